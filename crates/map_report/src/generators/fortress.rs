//! Fortresses: their surroundings and their contents.
use tracing::debug;

use crate::error::{Error, Result};
use crate::generators::{
    FortressMemberGenerator, ReportContext, ReportGenerator, UnitGenerator, SECTION_LEVEL,
};
use crate::map::{Fixture, Point, River, TerrainFeature};
use crate::output::{Block, HeadedList, Item, Row, Table};
use crate::registry::Entry;

/// Describes fortresses. Units stationed inside are described through the unit
/// generator, stores through the fortress member generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct FortressGenerator {
    units: UnitGenerator,
    members: FortressMemberGenerator,
}

impl FortressGenerator {
    pub fn new() -> Self {
        Self {
            units: UnitGenerator::new(),
            members: FortressMemberGenerator::new(),
        }
    }

    /// The terrain line for `point`. Terrain features on the tile are claimed: the
    /// first forest, and every hill and oasis. The pass claims all other terrain
    /// features once every fortress is described.
    fn terrain_item<'a>(ctx: &mut ReportContext<'a>, point: Point) -> Item {
        let map = ctx.map;
        let tile = map.tile(point);
        let mut text = format!(
            "Surrounding terrain: {}",
            tile.and_then(|t| t.terrain)
                .map_or_else(|| "unknown".to_owned(), |t| t.to_string())
        );
        if tile.is_some_and(|t| t.mountainous) {
            text.push_str(", mountainous");
        }
        let mut forested = false;
        let mut hilly = false;
        let mut oasis = false;
        for entry in ctx.entries_at(point) {
            let Fixture::Terrain(feature) = entry.fixture else {
                continue;
            };
            match feature {
                TerrainFeature::Forest { kind, .. } if !forested => {
                    text.push_str(&format!(", forested with {kind} trees"));
                    forested = true;
                }
                TerrainFeature::Hill => hilly = true,
                TerrainFeature::Oasis => oasis = true,
                _ => continue,
            }
            ctx.claim(&entry);
        }
        if hilly {
            text.push_str(", hilly");
        }
        if oasis {
            text.push_str(", with a nearby oasis");
        }
        Item::new(text)
    }

    /// Lake first, then the borders a river crosses.
    fn river_items(ctx: &ReportContext<'_>, point: Point) -> Vec<Item> {
        let Some(tile) = ctx.map.tile(point) else {
            return Vec::new();
        };
        let mut items = Vec::new();
        if tile.rivers.contains(&River::Lake) {
            items.push(Item::new("There is a nearby lake."));
        }
        let borders: Vec<String> = tile
            .rivers
            .iter()
            .filter(|river| **river != River::Lake)
            .map(|river| river.to_string())
            .collect();
        if !borders.is_empty() {
            items.push(Item::new(format!(
                "There is a river on the tile, flowing through the following borders: {}",
                borders.join(", ")
            )));
        }
        items
    }

    fn roads_item(ctx: &ReportContext<'_>, point: Point) -> Option<Item> {
        let tile = ctx.map.tile(point)?;
        let roads: Vec<String> = tile
            .roads
            .iter()
            .filter(|(_, quality)| **quality > 0)
            .map(|(direction, quality)| format!("{direction} (quality {quality})"))
            .collect();
        (!roads.is_empty()).then(|| {
            Item::new(format!(
                "There are roads going in the following directions: {}",
                roads.join(", ")
            ))
        })
    }
}

impl ReportGenerator for FortressGenerator {
    fn name(&self) -> &'static str {
        "fortress"
    }

    fn produce_all<'a>(&self, ctx: &mut ReportContext<'a>) -> Result<Vec<Block>> {
        let mut own = HeadedList::new("Your fortresses in the map");
        let mut others = HeadedList::new("Other fortresses in the map");
        for (entry, fortress) in ctx.matching(|f| match f {
            Fixture::Fortress(fortress) => Some(fortress),
            _ => None,
        }) {
            if ctx.is_current_player(&fortress.owner) {
                own.push(entry);
            } else {
                others.push(entry);
            }
        }
        let mut blocks = own.render_blocks(SECTION_LEVEL, |entry| self.produce_one(ctx, entry))?;
        blocks.extend(others.render_blocks(SECTION_LEVEL, |entry| self.produce_one(ctx, entry))?);

        // Terrain is only described as a fortress's surroundings.
        let background = ctx.matching(|f| matches!(f, Fixture::Terrain(_)).then_some(()));
        for (entry, _) in &background {
            ctx.claim(entry);
        }
        if !background.is_empty() {
            debug!("Claimed {} terrain features away from fortresses.", background.len());
        }
        Ok(blocks)
    }

    fn produce_one<'a>(&self, ctx: &mut ReportContext<'a>, entry: Entry<'a>) -> Result<Item> {
        let Fixture::Fortress(fortress) = entry.fixture else {
            return Err(Error::unhandled(self.name(), entry.fixture));
        };
        ctx.claim(&entry);
        let owner = ctx.owner_name(&fortress.owner);
        let [distance, location] = ctx.row_prefix(entry.point);
        let mut item = Item::new(format!("Fortress {} belonging to {owner}", fortress.name))
            .with_row(Row::new(
                Table::Fortresses,
                [distance, location, owner, fortress.name.clone()],
            ));

        item.push_nested(Item::new(format!(
            "Located at {}, {}",
            entry.point,
            ctx.distances.distance_string(entry.point)
        )));
        item.push_nested(Self::terrain_item(ctx, entry.point));
        for river in Self::river_items(ctx, entry.point) {
            item.push_nested(river);
        }
        item.push_item(Self::roads_item(ctx, entry.point));

        let mut units = HeadedList::new("Units on the tile:");
        let mut equipment = Vec::new();
        let mut resources = Vec::new();
        let mut contents = HeadedList::new("Other fortress contents:");
        for member in ctx.member_entries(entry.fixture) {
            match member.fixture {
                Fixture::Unit(_) => units.push(member),
                Fixture::Implement(_) => equipment.push(member),
                Fixture::ResourcePile(_) => resources.push(member),
                _ => contents.push(member),
            }
        }
        item.push_item(units.render_item(|unit| self.units.produce_one(ctx, unit))?);
        item.push_item(self.members.equipment_item(ctx, "Equipment:", equipment)?);
        item.push_item(self.members.resources_item(ctx, "Resources:", resources)?);
        item.push_item(contents.render_item(|other| Ok(ctx.plain_item(&other)))?);
        Ok(item)
    }
}
