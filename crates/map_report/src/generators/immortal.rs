//! Monsters and beings of legend.
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::generators::{capitalize, points_phrase, section, ReportContext, ReportGenerator};
use crate::map::{Fixture, ImmortalKind};
use crate::output::{Block, HeadedMap, Item, Row, Table};
use crate::registry::Entry;

#[derive(Clone, Copy, Debug, Default)]
pub struct ImmortalGenerator;

/// Sighting locations keyed by label.
type Sightings<'a> = HeadedMap<String, Vec<(Entry<'a>, &'a ImmortalKind)>>;

/// Plural of an immortal's noun.
pub fn plural(noun: &str) -> String {
    match noun {
        "pegasus" => return "pegasi".to_owned(),
        "djinn" => return "djinni".to_owned(),
        "kraken" => return "kraken".to_owned(),
        _ => {}
    }
    if ["s", "x", "ch", "sh"].iter().any(|end| noun.ends_with(end)) {
        return format!("{noun}es");
    }
    if let Some(stem) = noun.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{stem}ies");
        }
    }
    format!("{noun}s")
}

impl ImmortalGenerator {
    pub fn new() -> Self {
        Self
    }

    fn row(ctx: &ReportContext<'_>, entry: &Entry<'_>, kind: &ImmortalKind) -> Row {
        let [distance, location] = ctx.row_prefix(entry.point);
        Row::new(Table::Immortals, [distance, location, kind.to_string()])
    }

    /// "<label> at <points>", pluralizing `noun` when there are several.
    fn located_item<'a>(
        ctx: &mut ReportContext<'a>,
        qualifier: Option<&str>,
        noun: &str,
        entries: Vec<(Entry<'a>, &'a ImmortalKind)>,
    ) -> Item {
        let noun = if entries.len() > 1 {
            plural(noun)
        } else {
            noun.to_owned()
        };
        let label = match qualifier {
            Some(qualifier) => format!("{qualifier} {noun}"),
            None => capitalize(&noun),
        };
        let mut item = Item::new(format!(
            "{label} at {}",
            points_phrase(entries.iter().map(|(entry, _)| entry.point))
        ));
        for (entry, kind) in &entries {
            item.rows.push(Self::row(ctx, entry, kind));
            ctx.claim(entry);
        }
        item
    }
}

impl ReportGenerator for ImmortalGenerator {
    fn name(&self) -> &'static str {
        "immortal"
    }

    fn produce_all<'a>(&self, ctx: &mut ReportContext<'a>) -> Result<Vec<Block>> {
        let mut simple: BTreeMap<String, Vec<(Entry<'a>, &'a ImmortalKind)>> = BTreeMap::new();
        let mut centaurs: Sightings<'a> = HeadedMap::new("Centaurs");
        let mut giants: Sightings<'a> = HeadedMap::new("Giants");
        let mut fairies: Sightings<'a> = HeadedMap::new("Fairies");
        let mut dragons: Sightings<'a> = HeadedMap::new("Dragons");
        for (entry, kind) in ctx.matching(|f| match f {
            Fixture::Immortal(immortal) => Some(&immortal.kind),
            _ => None,
        }) {
            let (group, sub_kind) = match kind {
                ImmortalKind::Centaur(sub) => (&mut centaurs, sub),
                ImmortalKind::Giant(sub) => (&mut giants, sub),
                ImmortalKind::Fairy(sub) => (&mut fairies, sub),
                ImmortalKind::Dragon(sub) => (&mut dragons, sub),
                _ => {
                    simple
                        .entry(kind.noun().to_owned())
                        .or_default()
                        .push((entry, kind));
                    continue;
                }
            };
            group.entry_or_default(sub_kind.clone()).push((entry, kind));
        }

        let mut items = Vec::new();
        for (noun, entries) in simple {
            items.push(Self::located_item(ctx, None, &noun, entries));
        }
        for (noun, group) in [
            ("centaur", centaurs),
            ("giant", giants),
            ("fairy", fairies),
            ("dragon", dragons),
        ] {
            items.extend(group.render_item(|sub_kind, entries| {
                Ok(Self::located_item(ctx, Some(sub_kind.as_str()), noun, entries))
            })?);
        }
        Ok(section("Immortals", items))
    }

    fn produce_one<'a>(&self, ctx: &mut ReportContext<'a>, entry: Entry<'a>) -> Result<Item> {
        let Fixture::Immortal(immortal) = entry.fixture else {
            return Err(Error::unhandled(self.name(), entry.fixture));
        };
        let item = Item::new(ctx.located(entry.point, &immortal.to_string()))
            .with_row(Self::row(ctx, &entry, &immortal.kind));
        ctx.claim(&entry);
        Ok(item)
    }
}
