//! Villages, grouped by allegiance.
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::generators::{article, ReportContext, ReportGenerator, SECTION_LEVEL};
use crate::map::{Fixture, PlayerId, TownStatus};
use crate::output::{Block, HeadedList, Item, Row, Table};
use crate::registry::Entry;

#[derive(Clone, Copy, Debug, Default)]
pub struct VillageGenerator;

impl VillageGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for VillageGenerator {
    fn name(&self) -> &'static str {
        "village"
    }

    fn produce_all<'a>(&self, ctx: &mut ReportContext<'a>) -> Result<Vec<Block>> {
        let mut own = HeadedList::new("Villages pledged to your service");
        let mut independent = HeadedList::new("Villages you think are independent");
        let mut sworn: BTreeMap<PlayerId, HeadedList<Entry<'a>>> = BTreeMap::new();
        for (entry, village) in ctx.matching(|f| match f {
            Fixture::Village(village) => Some(village),
            _ => None,
        }) {
            if ctx.is_current_player(&village.owner) {
                own.push(entry);
            } else if village.owner.is_independent() {
                independent.push(entry);
            } else {
                sworn
                    .entry(village.owner.id)
                    .or_insert_with(|| {
                        HeadedList::new(format!("Villages sworn to {}", village.owner.name))
                    })
                    .push(entry);
            }
        }
        let mut blocks = own.render_blocks(SECTION_LEVEL, |entry| self.produce_one(ctx, entry))?;
        blocks.extend(
            independent.render_blocks(SECTION_LEVEL, |entry| self.produce_one(ctx, entry))?,
        );
        for list in sworn.into_values() {
            blocks.extend(list.render_blocks(SECTION_LEVEL, |entry| self.produce_one(ctx, entry))?);
        }
        Ok(blocks)
    }

    fn produce_one<'a>(&self, ctx: &mut ReportContext<'a>, entry: Entry<'a>) -> Result<Item> {
        let Fixture::Village(village) = entry.fixture else {
            return Err(Error::unhandled(self.name(), entry.fixture));
        };
        let description = if village.status == TownStatus::Active {
            village.race.clone()
        } else {
            format!("{} {}", village.status, village.race)
        };
        let text = format!(
            "{}, {} {description} village, {} ({})",
            village.name,
            article(&description),
            ctx.ownership_phrase(&village.owner),
            ctx.distances.distance_string(entry.point)
        );
        let [distance, location] = ctx.row_prefix(entry.point);
        let item = Item::new(format!("At {}: {text}", entry.point)).with_row(Row::new(
            Table::Villages,
            [
                distance,
                location,
                ctx.owner_name(&village.owner),
                village.race.clone(),
                village.status.to_string(),
                village.name.clone(),
            ],
        ));
        ctx.claim(&entry);
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{FixtureId, Player, Point, Village};
    use crate::testing;

    fn village(id: u32, owner: Player, name: &str, status: TownStatus) -> Fixture {
        Fixture::Village(Village {
            id: FixtureId(id),
            owner,
            name: name.into(),
            race: "elf".into(),
            status,
        })
    }

    #[test]
    fn villages_are_grouped_by_allegiance() {
        let mut map = testing::empty_map();
        map.add_fixture(
            Point::new(0, 1),
            village(1, testing::bob(), "Ashford", TownStatus::Active),
        );
        map.add_fixture(
            Point::new(0, 2),
            village(2, Player::independent(), "Brook", TownStatus::Abandoned),
        );
        map.add_fixture(
            Point::new(0, 3),
            village(3, testing::alice(), "Cairn", TownStatus::Active),
        );
        let mut ctx = testing::context(&map, Some(Point::new(0, 0)));

        let blocks = VillageGenerator::new().produce_all(&mut ctx).unwrap();
        let headings: Vec<&Block> = blocks
            .iter()
            .filter(|b| matches!(b, Block::Heading { .. }))
            .collect();
        assert_eq!(
            headings,
            vec![
                &Block::heading(4, "Villages pledged to your service"),
                &Block::heading(4, "Villages you think are independent"),
                &Block::heading(4, "Villages sworn to Bob"),
            ]
        );
        assert_eq!(
            testing::list_texts(&blocks[2..]),
            vec!["At (0, 2): Brook, an abandoned elf village, independent (2 tiles away)"]
        );
        assert!(ctx.registry.is_empty());
    }

    #[test]
    fn active_villages_omit_status() {
        let mut map = testing::empty_map();
        map.add_fixture(
            Point::new(1, 0),
            village(1, testing::alice(), "Cairn", TownStatus::Active),
        );
        let mut ctx = testing::context(&map, None);
        let entry = ctx.registry.entries()[0];
        let item = VillageGenerator::new().produce_one(&mut ctx, entry).unwrap();
        assert_eq!(
            item.text,
            "At (1, 0): Cairn, an elf village, owned by you (unknown)"
        );
    }
}
