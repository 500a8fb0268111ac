//! Resource sources: caches, groves, meadows, mines, mineral veins, shrubs and
//! stone deposits.
use crate::error::{Error, Result};
use crate::generators::{
    article, capitalize, points_phrase, section, ReportContext, ReportGenerator,
};
use crate::map::{Fixture, Harvestable};
use crate::output::{format_decimal, Block, HeadedList, HeadedMap, Item, Row, Table};
use crate::registry::Entry;

#[derive(Clone, Copy, Debug, Default)]
pub struct HarvestableGenerator;

/// " (N acres)", or nothing when the acreage is unknown.
fn acres_suffix(acres: f64) -> String {
    if acres > 0.0 {
        format!(" ({} acres)", format_decimal(acres, 2))
    } else {
        String::new()
    }
}

/// `" with N <noun>"` style count, or nothing when the count is zero.
fn count_suffix(count: u32, template: impl FnOnce(u32) -> String) -> String {
    if count > 0 {
        template(count)
    } else {
        String::new()
    }
}

impl HarvestableGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Short table category for the kind of resource.
    fn category(harvestable: &Harvestable) -> &'static str {
        match harvestable {
            Harvestable::Cache(_) => "cache",
            Harvestable::Grove(grove) if grove.orchard => "orchard",
            Harvestable::Grove(_) => "grove",
            Harvestable::Meadow(meadow) if meadow.field => "field",
            Harvestable::Meadow(_) => "meadow",
            Harvestable::Mine(_) => "mine",
            Harvestable::MineralVein(_) => "mineral",
            Harvestable::Shrub(_) => "shrub",
            Harvestable::StoneDeposit(_) => "stone",
        }
    }

    /// Prose description, starting in lower case.
    pub fn phrase(harvestable: &Harvestable) -> String {
        match harvestable {
            Harvestable::Cache(cache) => {
                format!("a cache of {}, containing {}", cache.kind, cache.contents)
            }
            Harvestable::Grove(grove) => format!(
                "a {} {} {}{}{}",
                if grove.cultivated { "cultivated" } else { "wild" },
                grove.kind,
                if grove.orchard { "orchard" } else { "grove" },
                count_suffix(grove.population, |n| format!(" with {n} trees")),
                acres_suffix(grove.acres)
            ),
            Harvestable::Meadow(meadow) => format!(
                "{} {} {} {}, {}{}",
                article(&meadow.status.to_string()),
                meadow.status,
                meadow.kind,
                if meadow.field { "field" } else { "meadow" },
                if meadow.cultivated { "cultivated" } else { "wild" },
                acres_suffix(meadow.acres)
            ),
            Harvestable::Mine(mine) => {
                let status = mine.status.to_string();
                format!("{} {status} {} mine", article(&status), mine.kind)
            }
            Harvestable::MineralVein(vein) => format!(
                "{} vein of {}",
                if vein.exposed { "an exposed" } else { "an unexposed" },
                vein.kind
            ),
            Harvestable::Shrub(shrub) => format!(
                "{}{}",
                shrub.kind,
                count_suffix(shrub.population, |n| format!(" ({n} plants)"))
            ),
            Harvestable::StoneDeposit(deposit) => format!("an exposed {} deposit", deposit.kind),
        }
    }

    fn row(ctx: &ReportContext<'_>, entry: &Entry<'_>, harvestable: &Harvestable) -> Row {
        let [distance, location] = ctx.row_prefix(entry.point);
        Row::new(
            Table::Harvestables,
            [
                distance,
                location,
                Self::category(harvestable).to_owned(),
                harvestable.kind().to_owned(),
                Self::phrase(harvestable),
            ],
        )
    }

    /// Renders locations grouped under one description, claiming each entry.
    fn grouped_item<'a>(
        ctx: &mut ReportContext<'a>,
        description: &str,
        entries: Vec<Entry<'a>>,
    ) -> Result<Item> {
        let mut item = Item::new(format!(
            "{}: at {}",
            capitalize(description),
            points_phrase(entries.iter().map(|e| e.point))
        ));
        for entry in &entries {
            let Fixture::Harvestable(harvestable) = entry.fixture else {
                return Err(Error::unhandled("harvestable", entry.fixture));
            };
            item.rows.push(Self::row(ctx, entry, harvestable));
            ctx.claim(entry);
        }
        Ok(item)
    }
}

impl ReportGenerator for HarvestableGenerator {
    fn name(&self) -> &'static str {
        "harvestable"
    }

    fn produce_all<'a>(&self, ctx: &mut ReportContext<'a>) -> Result<Vec<Block>> {
        let mut caches = HeadedList::new("Caches collected by your explorers and workers:");
        let mut groves = HeadedList::new("Groves and orchards");
        let mut meadows = HeadedList::new("Meadows and fields");
        let mut mines = HeadedList::new("Mines");
        let mut minerals: HeadedMap<String, Vec<Entry<'a>>> = HeadedMap::new("Mineral deposits");
        let mut shrubs = HeadedList::new("Shrubs, small trees, and such");
        let mut stone: HeadedMap<String, Vec<Entry<'a>>> =
            HeadedMap::new("Exposed stone deposits");
        for (entry, harvestable) in ctx.matching(|f| match f {
            Fixture::Harvestable(harvestable) => Some(harvestable),
            _ => None,
        }) {
            match harvestable {
                Harvestable::Cache(_) => caches.push(entry),
                Harvestable::Grove(_) => groves.push(entry),
                Harvestable::Meadow(_) => meadows.push(entry),
                Harvestable::Mine(_) => mines.push(entry),
                Harvestable::MineralVein(_) => minerals
                    .entry_or_default(Self::phrase(harvestable))
                    .push(entry),
                Harvestable::Shrub(_) => shrubs.push(entry),
                Harvestable::StoneDeposit(deposit) => {
                    stone.entry_or_default(deposit.kind.clone()).push(entry)
                }
            }
        }

        let mut items = Vec::new();
        for list in [caches, groves, meadows, mines] {
            items.extend(list.render_item(|entry| self.produce_one(ctx, entry))?);
        }
        items.extend(
            minerals.render_item(|description, entries| {
                Self::grouped_item(ctx, &description, entries)
            })?,
        );
        items.extend(shrubs.render_item(|entry| self.produce_one(ctx, entry))?);
        items.extend(
            stone.render_item(|kind, entries| Self::grouped_item(ctx, &kind, entries))?,
        );
        Ok(section("Resource Sources", items))
    }

    fn produce_one<'a>(&self, ctx: &mut ReportContext<'a>, entry: Entry<'a>) -> Result<Item> {
        let Fixture::Harvestable(harvestable) = entry.fixture else {
            return Err(Error::unhandled(self.name(), entry.fixture));
        };
        let item = Item::new(ctx.located(entry.point, &capitalize(&Self::phrase(harvestable))))
            .with_row(Self::row(ctx, &entry, harvestable));
        ctx.claim(&entry);
        Ok(item)
    }
}
