//! Arbitrary-text notes.
use crate::error::{Error, Result};
use crate::generators::{section, ReportContext, ReportGenerator};
use crate::map::Fixture;
use crate::output::{Block, Item, Row, Table};
use crate::registry::Entry;

#[derive(Clone, Copy, Debug, Default)]
pub struct TextGenerator;

impl TextGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for TextGenerator {
    fn name(&self) -> &'static str {
        "text"
    }

    /// Notes in turn order, then by distance, then by text.
    fn produce_all<'a>(&self, ctx: &mut ReportContext<'a>) -> Result<Vec<Block>> {
        let mut notes = ctx.matching(|f| match f {
            Fixture::Text(note) => Some(note),
            _ => None,
        });
        notes.sort_by(|(a, a_note), (b, b_note)| {
            a_note
                .turn
                .cmp(&b_note.turn)
                .then_with(|| ctx.distances.compare_entries(a, b))
                .then_with(|| a_note.text.cmp(&b_note.text))
        });
        let mut items = Vec::with_capacity(notes.len());
        for (entry, _) in notes {
            items.push(self.produce_one(ctx, entry)?);
        }
        Ok(section("Miscellaneous Notes", items))
    }

    fn produce_one<'a>(&self, ctx: &mut ReportContext<'a>, entry: Entry<'a>) -> Result<Item> {
        let Fixture::Text(note) = entry.fixture else {
            return Err(Error::unhandled(self.name(), entry.fixture));
        };
        let [distance, location] = ctx.row_prefix(entry.point);
        let item = Item::new(ctx.located(entry.point, &note.to_string())).with_row(Row::new(
            Table::Notes,
            [
                distance,
                location,
                note.turn.map(|t| t.to_string()).unwrap_or_default(),
                note.text.clone(),
            ],
        ));
        ctx.claim(&entry);
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Point, TextNote};
    use crate::testing;

    fn note(text: &str, turn: Option<i32>) -> Fixture {
        Fixture::Text(TextNote {
            text: text.into(),
            turn,
        })
    }

    #[test]
    fn notes_sort_by_turn_before_distance() {
        let mut map = testing::empty_map();
        map.add_fixture(Point::new(0, 1), note("Late", Some(9)));
        map.add_fixture(Point::new(0, 4), note("Early", Some(2)));
        map.add_fixture(Point::new(0, 3), note("Undated", None));
        map.add_fixture(Point::new(0, 2), note("Also early", Some(2)));
        let mut ctx = testing::context(&map, Some(Point::new(0, 0)));

        let blocks = TextGenerator::new().produce_all(&mut ctx).unwrap();
        assert_eq!(blocks[0], Block::heading(4, "Miscellaneous Notes"));
        assert_eq!(
            testing::list_texts(&blocks),
            vec![
                "At (0, 3) (3 tiles away): Undated",
                "At (0, 2) (2 tiles away): On turn 2: Also early",
                "At (0, 4) (4 tiles away): On turn 2: Early",
                "At (0, 1) (1 tile away): On turn 9: Late",
            ]
        );
        assert!(ctx.registry.is_empty());
    }

    #[test]
    fn notes_without_ids_are_claimed_as_found() {
        let map = testing::fortress_with_worker_map();
        let mut ctx = testing::context(&map, None);
        TextGenerator::new().produce_all(&mut ctx).unwrap();
        assert_eq!(ctx.registry.len(), 3);
        assert!(ctx
            .registry
            .entries()
            .iter()
            .all(|entry| !matches!(entry.fixture, Fixture::Text(_))));
    }
}
