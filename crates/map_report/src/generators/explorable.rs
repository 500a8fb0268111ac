//! Caves, battlefields and portals. These are listed only by location.
use crate::error::{Error, Result};
use crate::generators::{points_phrase, section, ReportContext, ReportGenerator};
use crate::map::{Explorable, Fixture};
use crate::output::{Block, Item, Row, Table};
use crate::registry::Entry;

#[derive(Clone, Copy, Debug, Default)]
pub struct ExplorableGenerator;

impl ExplorableGenerator {
    pub fn new() -> Self {
        Self
    }

    fn row(ctx: &ReportContext<'_>, entry: &Entry<'_>, explorable: &Explorable) -> Row {
        let [distance, location] = ctx.row_prefix(entry.point);
        let (kind, detail) = match explorable {
            Explorable::Cave { dc, .. } => ("cave", dc.to_string()),
            Explorable::Battlefield { dc, .. } => ("battlefield", dc.to_string()),
            Explorable::Portal { destination, .. } => ("portal", destination.clone()),
        };
        Row::new(Table::Explorables, [distance, location, kind.to_owned(), detail])
    }

    /// One line listing every location, claiming each entry.
    fn located_group<'a>(
        ctx: &mut ReportContext<'a>,
        header: &str,
        group: Vec<(Entry<'a>, &'a Explorable)>,
    ) -> Option<Item> {
        if group.is_empty() {
            return None;
        }
        let mut item = Item::new(format!(
            "{header}: {}",
            points_phrase(group.iter().map(|(entry, _)| entry.point))
        ));
        for (entry, explorable) in &group {
            item.rows.push(Self::row(ctx, entry, explorable));
            ctx.claim(entry);
        }
        Some(item)
    }
}

impl ReportGenerator for ExplorableGenerator {
    fn name(&self) -> &'static str {
        "explorable"
    }

    fn produce_all<'a>(&self, ctx: &mut ReportContext<'a>) -> Result<Vec<Block>> {
        let mut caves = Vec::new();
        let mut battles = Vec::new();
        let mut portals = Vec::new();
        for (entry, explorable) in ctx.matching(|f| match f {
            Fixture::Explorable(explorable) => Some(explorable),
            _ => None,
        }) {
            match explorable {
                Explorable::Cave { .. } => caves.push((entry, explorable)),
                Explorable::Battlefield { .. } => battles.push((entry, explorable)),
                Explorable::Portal { .. } => portals.push((entry, explorable)),
            }
        }
        let items: Vec<Item> = [
            Self::located_group(ctx, "Caves beneath the following tiles", caves),
            Self::located_group(
                ctx,
                "Signs of long-ago battles on the following tiles",
                battles,
            ),
            Self::located_group(ctx, "Portals to other worlds", portals),
        ]
        .into_iter()
        .flatten()
        .collect();
        Ok(section("Caves, Battlefields, and Portals", items))
    }

    fn produce_one<'a>(&self, ctx: &mut ReportContext<'a>, entry: Entry<'a>) -> Result<Item> {
        let Fixture::Explorable(explorable) = entry.fixture else {
            return Err(Error::unhandled(self.name(), entry.fixture));
        };
        let item = Item::new(ctx.located(entry.point, &explorable.to_string()))
            .with_row(Self::row(ctx, &entry, explorable));
        ctx.claim(&entry);
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{FixtureId, Point};
    use crate::testing;

    #[test]
    fn explorables_are_listed_by_location() {
        let mut map = testing::empty_map();
        map.add_fixture(
            Point::new(0, 4),
            Fixture::Explorable(Explorable::Cave {
                id: FixtureId(1),
                dc: 12,
            }),
        );
        map.add_fixture(
            Point::new(0, 1),
            Fixture::Explorable(Explorable::Cave {
                id: FixtureId(2),
                dc: 15,
            }),
        );
        map.add_fixture(
            Point::new(3, 3),
            Fixture::Explorable(Explorable::Portal {
                id: FixtureId(3),
                destination: "the Underdeep".into(),
            }),
        );
        let mut ctx = testing::context(&map, Some(Point::new(0, 0)));

        let blocks = ExplorableGenerator::new().produce_all(&mut ctx).unwrap();
        assert_eq!(blocks[0], Block::heading(4, "Caves, Battlefields, and Portals"));
        assert_eq!(
            testing::list_texts(&blocks),
            vec![
                "Caves beneath the following tiles: (0, 1), (0, 4)",
                "Portals to other worlds: (3, 3)",
            ]
        );
        let Block::List(items) = &blocks[1] else {
            panic!("expected list")
        };
        assert_eq!(items[0].rows.len(), 2);
        assert_eq!(items[1].rows[0].cells[3], "the Underdeep");
        assert!(ctx.registry.is_empty());
    }

    #[test]
    fn single_explorable_is_described_in_prose() {
        let mut map = testing::empty_map();
        map.add_fixture(
            Point::new(2, 0),
            Fixture::Explorable(Explorable::Battlefield {
                id: FixtureId(1),
                dc: 10,
            }),
        );
        let mut ctx = testing::context(&map, Some(Point::new(0, 0)));
        let entry = ctx.registry.entries()[0];
        let item = ExplorableGenerator::new().produce_one(&mut ctx, entry).unwrap();
        assert_eq!(
            item.text,
            "At (2, 0) (2 tiles away): signs of a long-ago battle"
        );
    }
}
