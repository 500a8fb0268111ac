//! Equipment and resource piles, whether stored in a fortress, carried by a unit, or
//! lying on the map.
use crate::error::{Error, Result};
use crate::generators::{section, ReportContext, ReportGenerator};
use crate::map::Fixture;
use crate::output::{Block, HeadedList, HeadedMap, Item, Row, Table};
use crate::registry::Entry;

#[derive(Clone, Copy, Debug, Default)]
pub struct FortressMemberGenerator;

impl FortressMemberGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Renders equipment entries under `header`, or `None` if there are none.
    pub fn equipment_item<'a>(
        &self,
        ctx: &mut ReportContext<'a>,
        header: &str,
        entries: Vec<Entry<'a>>,
    ) -> Result<Option<Item>> {
        let mut list = HeadedList::new(header);
        list.extend(entries);
        list.render_item(|entry| self.produce_one(ctx, entry))
    }

    /// Renders resource piles under `header`, grouped by resource kind.
    pub fn resources_item<'a>(
        &self,
        ctx: &mut ReportContext<'a>,
        header: &str,
        entries: Vec<Entry<'a>>,
    ) -> Result<Option<Item>> {
        let by_kind = self.group_by_kind(header, entries)?;
        Self::render_resources(by_kind, |pile| self.produce_one(ctx, pile))
    }

    fn group_by_kind<'a>(
        &self,
        header: &str,
        entries: Vec<Entry<'a>>,
    ) -> Result<HeadedMap<String, Vec<Entry<'a>>>> {
        let mut by_kind: HeadedMap<String, Vec<Entry<'a>>> = HeadedMap::new(header);
        for entry in entries {
            if let Fixture::ResourcePile(pile) = entry.fixture {
                by_kind.entry_or_default(pile.kind.clone()).push(entry);
            } else {
                return Err(Error::unhandled(self.name(), entry.fixture));
            }
        }
        Ok(by_kind)
    }

    fn render_resources<'a>(
        by_kind: HeadedMap<String, Vec<Entry<'a>>>,
        mut render: impl FnMut(Entry<'a>) -> Result<Item>,
    ) -> Result<Option<Item>> {
        by_kind.render_item(|kind, piles| {
            let mut item = Item::new(format!("{kind}:"));
            for pile in piles {
                item.push_nested(render(pile)?);
            }
            Ok(item)
        })
    }
}

impl ReportGenerator for FortressMemberGenerator {
    fn name(&self) -> &'static str {
        "fortress member"
    }

    /// Equipment and resources lying loose on the map, each line prefixed with its
    /// location.
    fn produce_all<'a>(&self, ctx: &mut ReportContext<'a>) -> Result<Vec<Block>> {
        let mut equipment = HeadedList::new("Equipment");
        let mut resources = Vec::new();
        for (entry, _) in ctx.matching(|f| {
            matches!(f, Fixture::Implement(_) | Fixture::ResourcePile(_)).then_some(())
        }) {
            match entry.fixture {
                Fixture::Implement(_) => equipment.push(entry),
                _ => resources.push(entry),
            }
        }
        let resources = self.group_by_kind("Resources", resources)?;
        let mut render = |entry: Entry<'a>| -> Result<Item> {
            let mut item = self.produce_one(ctx, entry)?;
            item.text = ctx.located(entry.point, &item.text);
            Ok(item)
        };
        let items: Vec<Item> = [
            equipment.render_item(&mut render)?,
            Self::render_resources(resources, &mut render)?,
        ]
        .into_iter()
        .flatten()
        .collect();
        Ok(section("Resources and Equipment", items))
    }

    fn produce_one<'a>(&self, ctx: &mut ReportContext<'a>, entry: Entry<'a>) -> Result<Item> {
        let [distance, location] = ctx.row_prefix(entry.point);
        let item = match entry.fixture {
            Fixture::Implement(implement) => Item::new(implement.to_string()).with_row(Row::new(
                Table::Equipment,
                [
                    distance,
                    location,
                    implement.kind.clone(),
                    implement.count.to_string(),
                ],
            )),
            Fixture::ResourcePile(pile) => Item::new(pile.to_string()).with_row(Row::new(
                Table::Resources,
                [
                    distance,
                    location,
                    pile.kind.clone(),
                    pile.contents.clone(),
                    pile.quantity.to_string(),
                    pile.created.map(|t| t.to_string()).unwrap_or_default(),
                ],
            )),
            other => return Err(Error::unhandled(self.name(), other)),
        };
        ctx.claim(&entry);
        Ok(item)
    }
}
