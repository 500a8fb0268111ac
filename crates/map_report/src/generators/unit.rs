//! Units and everything they carry.
use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::generators::{
    AnimalGenerator, FortressMemberGenerator, ReportContext, ReportGenerator, WorkerGenerator,
    SECTION_LEVEL,
};
use crate::map::{Fixture, Unit};
use crate::output::{Block, HeadedList, Item, Row, Table};
use crate::registry::Entry;

/// Describes units, delegating their members to the worker, animal and fortress
/// member generators. The top-level pass also lists workers, equipment and
/// resources found outside any unit.
#[derive(Clone, Copy, Debug)]
pub struct UnitGenerator {
    own_workers: WorkerGenerator,
    foreign_workers: WorkerGenerator,
    animals: AnimalGenerator,
    members: FortressMemberGenerator,
}

/// A unit's members split by the generator that describes them.
#[derive(Default)]
struct Members<'a> {
    workers: Vec<Entry<'a>>,
    animals: Vec<Entry<'a>>,
    equipment: Vec<Entry<'a>>,
    resources: Vec<Entry<'a>>,
    others: Vec<Entry<'a>>,
}

impl<'a> Members<'a> {
    fn partition(entries: Vec<Entry<'a>>) -> Self {
        let mut members = Self::default();
        for entry in entries {
            match entry.fixture {
                Fixture::Worker(_) => members.workers.push(entry),
                Fixture::Animal(_) => members.animals.push(entry),
                Fixture::Implement(_) => members.equipment.push(entry),
                Fixture::ResourcePile(_) => members.resources.push(entry),
                _ => members.others.push(entry),
            }
        }
        members
    }
}

impl UnitGenerator {
    pub fn new() -> Self {
        Self {
            own_workers: WorkerGenerator::new(true),
            foreign_workers: WorkerGenerator::new(false),
            animals: AnimalGenerator::new(),
            members: FortressMemberGenerator::new(),
        }
    }

    /// Orders and results by turn, ascending, or `None` if the unit has neither.
    fn orders_item(unit: &Unit) -> Option<Item> {
        let turns: BTreeSet<i32> = unit
            .orders
            .keys()
            .chain(unit.results.keys())
            .copied()
            .collect();
        if turns.is_empty() {
            return None;
        }
        let mut item = Item::new("Orders and Results:");
        for turn in turns {
            let mut entry = Item::new(format!("Turn {turn}:"));
            if let Some(orders) = unit.orders.get(&turn) {
                entry.push_nested(Item::new(format!("Orders: {orders}")));
            }
            if let Some(results) = unit.results.get(&turn) {
                entry.push_nested(Item::new(format!("Results: {results}")));
            }
            item.push_nested(entry);
        }
        Some(item)
    }
}

impl Default for UnitGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for UnitGenerator {
    fn name(&self) -> &'static str {
        "unit"
    }

    fn produce_all<'a>(&self, ctx: &mut ReportContext<'a>) -> Result<Vec<Block>> {
        let mut own = HeadedList::new("Your units");
        let mut foreign = HeadedList::new("Foreign units");
        for (entry, unit) in ctx.matching(|f| match f {
            Fixture::Unit(unit) => Some(unit),
            _ => None,
        }) {
            if ctx.is_current_player(&unit.owner) {
                own.push(entry);
            } else {
                foreign.push(entry);
            }
        }
        let mut render = |entry: Entry<'a>| -> Result<Item> {
            let mut item = self.produce_one(ctx, entry)?;
            item.text = ctx.located(entry.point, &item.text);
            Ok(item)
        };
        let items: Vec<Item> = [own.render_item(&mut render)?, foreign.render_item(&mut render)?]
            .into_iter()
            .flatten()
            .collect();
        let mut blocks = Vec::new();
        if !items.is_empty() {
            blocks.push(Block::heading(SECTION_LEVEL, "Units in the map"));
            blocks.push(Block::paragraph(
                "(Any units listed above are not described again.)",
            ));
            blocks.push(Block::List(items));
        }
        // Every unit's members are claimed by now, so whatever is left lies loose.
        blocks.extend(self.foreign_workers.produce_all(ctx)?);
        blocks.extend(self.members.produce_all(ctx)?);
        Ok(blocks)
    }

    fn produce_one<'a>(&self, ctx: &mut ReportContext<'a>, entry: Entry<'a>) -> Result<Item> {
        let Fixture::Unit(unit) = entry.fixture else {
            return Err(Error::unhandled(self.name(), entry.fixture));
        };
        ctx.claim(&entry);
        let own = ctx.is_current_player(&unit.owner);
        let [distance, location] = ctx.row_prefix(entry.point);
        let mut item = Item::new(format!(
            "Unit {} ({}), {}",
            unit.name,
            unit.kind,
            ctx.ownership_phrase(&unit.owner)
        ))
        .with_row(Row::new(
            Table::Units,
            [
                distance,
                location,
                ctx.owner_name(&unit.owner),
                unit.kind.clone(),
                unit.name.clone(),
            ],
        ));

        let members = Members::partition(ctx.member_entries(entry.fixture));
        let workers = if own {
            self.own_workers
        } else {
            self.foreign_workers
        };
        let mut worker_list = HeadedList::new("Workers:");
        worker_list.extend(members.workers);
        item.push_item(worker_list.render_item(|worker| workers.produce_one(ctx, worker))?);
        item.push_item(self.animals.merged_item(ctx, "Animals:", members.animals)?);
        item.push_item(self.members.equipment_item(ctx, "Equipment:", members.equipment)?);
        item.push_item(self.members.resources_item(ctx, "Resources:", members.resources)?);
        let mut others = HeadedList::new("Others:");
        others.extend(members.others);
        item.push_item(others.render_item(|other| Ok(ctx.plain_item(&other)))?);
        item.push_item(Self::orders_item(unit));
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{FixtureId, Implement, Point, Worker};
    use crate::testing;

    #[test]
    fn members_are_grouped_and_claimed() {
        let mut map = testing::empty_map();
        let unit = Unit::new(1, testing::alice(), "explorer", "Scouts")
            .with_member(Fixture::Worker(Worker::new(2, "Ann", "human")))
            .with_member(Fixture::Implement(Implement {
                id: FixtureId(3),
                kind: "cart".into(),
                count: 1,
            }));
        map.add_fixture(Point::new(1, 1), Fixture::Unit(unit));
        let mut ctx = testing::context(&map, None);
        let entry = ctx.registry.get(FixtureId(1)).unwrap();

        let item = UnitGenerator::new().produce_one(&mut ctx, entry).unwrap();
        assert_eq!(item.text, "Unit Scouts (explorer), owned by you");
        assert_eq!(
            testing::child_texts(&item),
            vec!["Workers:", "Equipment:"]
        );
        let workers = testing::child(&item, "Workers").unwrap();
        assert_eq!(testing::child_texts(workers), vec!["Ann, a human"]);
        assert!(ctx.registry.is_empty());
    }

    #[test]
    fn orders_and_results_follow_turn_order() {
        let unit = Unit::new(1, testing::alice(), "explorer", "Scouts")
            .with_orders(12, "Scout north")
            .with_results(3, "Found a cave")
            .with_orders(3, "Explore")
            .with_results(12, "Saw a dragon");
        let item = UnitGenerator::orders_item(&unit).unwrap();
        assert_eq!(testing::child_texts(&item), vec!["Turn 3:", "Turn 12:"]);
        let turn = testing::child(&item, "Turn 3").unwrap();
        assert_eq!(
            testing::child_texts(turn),
            vec!["Orders: Explore", "Results: Found a cave"]
        );
        assert!(UnitGenerator::orders_item(&Unit::new(2, testing::bob(), "a", "b")).is_none());
    }

    #[test]
    fn produce_all_splits_own_and_foreign_units() {
        let mut map = testing::empty_map();
        map.add_fixture(
            Point::new(0, 2),
            Fixture::Unit(Unit::new(1, testing::bob(), "soldiers", "Raiders")),
        );
        map.add_fixture(
            Point::new(0, 1),
            Fixture::Unit(Unit::new(2, testing::alice(), "explorer", "Scouts")),
        );
        let mut ctx = testing::context(&map, Some(Point::new(0, 0)));

        let blocks = UnitGenerator::new().produce_all(&mut ctx).unwrap();
        assert_eq!(blocks[0], Block::heading(4, "Units in the map"));
        assert_eq!(testing::list_texts(&blocks), vec!["Your units", "Foreign units"]);
        let Block::List(items) = &blocks[2] else {
            panic!("expected list")
        };
        assert_eq!(
            testing::child_texts(&items[1]),
            vec!["At (0, 2) (2 tiles away): Unit Raiders (soldiers), owned by Bob"]
        );
    }

    #[test]
    fn loose_members_follow_the_units() {
        let mut map = testing::empty_map();
        let unit = Unit::new(1, testing::alice(), "explorer", "Scouts")
            .with_member(Fixture::Worker(Worker::new(2, "Ann", "human")));
        map.add_fixture(Point::new(0, 1), Fixture::Unit(unit));
        map.add_fixture(Point::new(0, 3), Fixture::Worker(Worker::new(3, "Wanderer", "elf")));
        map.add_fixture(
            Point::new(0, 2),
            Fixture::Implement(Implement {
                id: FixtureId(4),
                kind: "cart".into(),
                count: 1,
            }),
        );
        let mut ctx = testing::context(&map, Some(Point::new(0, 0)));

        let blocks = UnitGenerator::new().produce_all(&mut ctx).unwrap();
        let headings: Vec<&Block> = blocks
            .iter()
            .filter(|b| matches!(b, Block::Heading { .. }))
            .collect();
        assert_eq!(
            headings,
            vec![
                &Block::heading(4, "Units in the map"),
                &Block::heading(4, "Workers"),
                &Block::heading(4, "Resources and Equipment"),
            ]
        );
        assert_eq!(
            blocks[4],
            Block::List(vec![Item::new("At (0, 3) (3 tiles away): Wanderer, an elf")
                .with_row(Row::new(
                    Table::Workers,
                    ["3", "(0, 3)", "Wanderer", "elf", ""]
                ))])
        );
        assert!(ctx.registry.is_empty());
    }
}
