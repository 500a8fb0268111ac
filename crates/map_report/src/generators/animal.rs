//! Animals and animal tracks.
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::generators::{points_phrase, ReportContext, ReportGenerator, SECTION_LEVEL};
use crate::map::{Animal, Fixture};
use crate::output::{Block, HeadedMap, Item, Row, Table};
use crate::registry::Entry;

#[derive(Clone, Copy, Debug, Default)]
pub struct AnimalGenerator;

/// Fields two animal entries must share to be reported as one population.
type HerdKey = (String, String, bool, Option<i32>);

impl AnimalGenerator {
    pub fn new() -> Self {
        Self
    }

    fn row(ctx: &ReportContext<'_>, entry: &Entry<'_>) -> Option<Row> {
        let [distance, location] = ctx.row_prefix(entry.point);
        let cells = match entry.fixture {
            Fixture::Animal(animal) => [
                distance,
                location,
                animal.kind.clone(),
                animal.population.to_string(),
                animal.status.clone(),
            ],
            Fixture::Tracks(tracks) => [
                distance,
                location,
                tracks.kind.clone(),
                String::new(),
                "tracks".to_owned(),
            ],
            _ => return None,
        };
        Some(Row::new(Table::Animals, cells))
    }

    /// Renders a unit's animals under `header`, merging entries that differ only in
    /// population into one line with the summed population. Returns `None` if there
    /// are none.
    pub fn merged_item<'a>(
        &self,
        ctx: &mut ReportContext<'a>,
        header: &str,
        entries: Vec<Entry<'a>>,
    ) -> Result<Option<Item>> {
        let mut herds: BTreeMap<HerdKey, (Animal, Vec<Entry<'a>>)> = BTreeMap::new();
        for entry in entries {
            let Fixture::Animal(animal) = entry.fixture else {
                return Err(Error::unhandled(self.name(), entry.fixture));
            };
            let key = (
                animal.kind.clone(),
                animal.status.clone(),
                animal.talking,
                animal.born,
            );
            let (merged, members) = herds
                .entry(key)
                .or_insert_with(|| (animal.clone().with_population(0), Vec::new()));
            merged.population += animal.population;
            members.push(entry);
        }
        if herds.is_empty() {
            return Ok(None);
        }
        let mut items = Vec::with_capacity(herds.len());
        for (merged, members) in herds.into_values() {
            let mut item = Item::new(merged.to_string());
            for entry in &members {
                item.rows.extend(Self::row(ctx, entry));
                ctx.claim(entry);
            }
            items.push(item);
        }
        Ok(Some(Item::new(header).with_child(Block::List(items))))
    }
}

impl ReportGenerator for AnimalGenerator {
    fn name(&self) -> &'static str {
        "animal"
    }

    fn produce_all<'a>(&self, ctx: &mut ReportContext<'a>) -> Result<Vec<Block>> {
        let mut sightings: HeadedMap<String, Vec<Entry<'a>>> =
            HeadedMap::new("Animal sightings or encounters");
        for (entry, description) in ctx.matching(|f| match f {
            Fixture::Animal(animal) => Some(animal.to_string()),
            Fixture::Tracks(tracks) => Some(tracks.to_string()),
            _ => None,
        }) {
            sightings.entry_or_default(description).push(entry);
        }
        sightings.render_blocks(SECTION_LEVEL, |description, entries| {
            let mut rows = Vec::with_capacity(entries.len());
            for entry in &entries {
                rows.extend(Self::row(ctx, entry));
                ctx.claim(entry);
            }
            let points = points_phrase(entries.iter().map(|e| e.point));
            Ok(Item::new(format!("{description}: at {points}")).with_rows(rows))
        })
    }

    fn produce_one<'a>(&self, ctx: &mut ReportContext<'a>, entry: Entry<'a>) -> Result<Item> {
        let text = match entry.fixture {
            Fixture::Animal(animal) => animal.to_string(),
            Fixture::Tracks(tracks) => tracks.to_string(),
            other => return Err(Error::unhandled(self.name(), other)),
        };
        let item = Item::new(ctx.located(entry.point, &text)).with_rows(Self::row(ctx, &entry));
        ctx.claim(&entry);
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{AnimalTracks, Point, Unit};
    use crate::testing;

    #[test]
    fn sightings_group_identical_descriptions() {
        let mut map = testing::empty_map();
        map.add_fixture(Point::new(0, 3), Fixture::Animal(Animal::new(1, "deer")));
        map.add_fixture(Point::new(0, 1), Fixture::Animal(Animal::new(2, "deer")));
        map.add_fixture(
            Point::new(4, 4),
            Fixture::Tracks(AnimalTracks {
                kind: "wolf".into(),
            }),
        );
        let mut ctx = testing::context(&map, Some(Point::new(0, 0)));

        let blocks = AnimalGenerator::new().produce_all(&mut ctx).unwrap();
        assert_eq!(blocks[0], Block::heading(4, "Animal sightings or encounters"));
        assert_eq!(
            testing::list_texts(&blocks),
            vec![
                "tracks or traces of wolf: at (4, 4)",
                "wild deer: at (0, 1), (0, 3)",
            ]
        );
        assert!(ctx.registry.is_empty());
    }

    #[test]
    fn unit_animals_merge_by_population() {
        let mut map = testing::empty_map();
        let unit = Unit::new(1, testing::alice(), "herders", "Drovers")
            .with_member(Fixture::Animal(
                Animal::new(2, "horse").with_status("domesticated").with_population(3),
            ))
            .with_member(Fixture::Animal(
                Animal::new(3, "horse").with_status("domesticated").with_population(2),
            ))
            .with_member(Fixture::Animal(Animal::new(4, "horse")));
        map.add_fixture(Point::new(1, 1), Fixture::Unit(unit));
        let mut ctx = testing::context(&map, None);
        let container = map.fixtures().next().unwrap().1;
        let members = ctx.member_entries(container);

        let item = AnimalGenerator::new()
            .merged_item(&mut ctx, "Animals:", members)
            .unwrap()
            .unwrap();
        assert_eq!(
            testing::child_texts(&item),
            vec!["5 domesticated horse", "wild horse"]
        );
        assert_eq!(ctx.registry.len(), 1);
    }

    #[test]
    fn nothing_to_merge_is_none() {
        let map = testing::empty_map();
        let mut ctx = testing::context(&map, None);
        let item = AnimalGenerator::new()
            .merged_item(&mut ctx, "Animals:", Vec::new())
            .unwrap();
        assert!(item.is_none());
    }
}
