//! Towns, cities and fortifications other than player fortresses.
use crate::error::{Error, Result};
use crate::generators::{ReportContext, ReportGenerator, VillageGenerator, SECTION_LEVEL};
use crate::map::{Fixture, TownStatus};
use crate::output::{Block, HeadedList, Item, Row, Table};
use crate::registry::Entry;

/// Describes towns; villages handed to it are described by the village generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct TownGenerator {
    villages: VillageGenerator,
}

impl TownGenerator {
    pub fn new() -> Self {
        Self {
            villages: VillageGenerator::new(),
        }
    }
}

impl ReportGenerator for TownGenerator {
    fn name(&self) -> &'static str {
        "town"
    }

    fn produce_all<'a>(&self, ctx: &mut ReportContext<'a>) -> Result<Vec<Block>> {
        let mut own = HeadedList::new("Cities, towns, and fortifications you control");
        let mut active = HeadedList::new("Active communities");
        let mut abandoned = HeadedList::new("Abandoned communities");
        let mut ruined = HeadedList::new("Ruined communities");
        let mut burned = HeadedList::new("Burned-out communities");
        for (entry, town) in ctx.matching(|f| match f {
            Fixture::Town(town) => Some(town),
            _ => None,
        }) {
            let bucket = if ctx.is_current_player(&town.owner) {
                &mut own
            } else {
                match town.status {
                    TownStatus::Active => &mut active,
                    TownStatus::Abandoned => &mut abandoned,
                    TownStatus::Ruined => &mut ruined,
                    TownStatus::Burned => &mut burned,
                }
            };
            bucket.push(entry);
        }
        let mut blocks = Vec::new();
        for bucket in [own, active, abandoned, ruined, burned] {
            blocks.extend(bucket.render_blocks(SECTION_LEVEL, |entry| self.produce_one(ctx, entry))?);
        }
        Ok(blocks)
    }

    fn produce_one<'a>(&self, ctx: &mut ReportContext<'a>, entry: Entry<'a>) -> Result<Item> {
        let town = match entry.fixture {
            Fixture::Town(town) => town,
            Fixture::Village(_) => return self.villages.produce_one(ctx, entry),
            other => return Err(Error::unhandled(self.name(), other)),
        };
        let [distance, location] = ctx.row_prefix(entry.point);
        let item = Item::new(format!(
            "At {}: {}, a {} {} {}, {} ({})",
            entry.point,
            town.name,
            town.size,
            town.status,
            town.kind,
            ctx.ownership_phrase(&town.owner),
            ctx.distances.distance_string(entry.point)
        ))
        .with_row(Row::new(
            Table::Towns,
            [
                distance,
                location,
                ctx.owner_name(&town.owner),
                town.kind.to_string(),
                town.size.to_string(),
                town.status.to_string(),
                town.name.clone(),
            ],
        ));
        ctx.claim(&entry);
        Ok(item)
    }
}
