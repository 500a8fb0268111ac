//! Map-building helpers shared by unit tests.
use crate::generators::ReportContext;
use crate::map::{
    Fixture, Fortress, GameMap, MapDimensions, Player, PlayerId, Point, TextNote, Unit, Worker,
};
use crate::output::{Block, Item};
use crate::registry::FixtureRegistry;

pub(crate) fn alice() -> Player {
    Player::new(PlayerId(1), "Alice")
}

pub(crate) fn bob() -> Player {
    Player::new(PlayerId(2), "Bob")
}

/// An empty 10x10 map viewed by Alice, with Bob as a second player.
pub(crate) fn empty_map() -> GameMap {
    GameMap::new(MapDimensions::new(10, 10), alice()).with_player(bob())
}

/// Alice's fortress "HQ" (id 1) at (0, 0) holds unit 2, which holds worker 3.
/// A note without an id sits at (2, 2).
pub(crate) fn fortress_with_worker_map() -> GameMap {
    let mut map = empty_map();
    let unit = Unit::new(2, alice(), "explorer", "Scouts")
        .with_member(Fixture::Worker(Worker::new(3, "Ann", "human")));
    map.add_fixture(
        Point::new(0, 0),
        Fixture::Fortress(Fortress::new(1, alice(), "HQ").with_member(Fixture::Unit(unit))),
    );
    map.add_fixture(
        Point::new(2, 2),
        Fixture::Text(TextNote {
            text: "Strange lights".into(),
            turn: Some(4),
        }),
    );
    map
}

/// A fresh context over `map` for its current player.
pub(crate) fn context(map: &GameMap, reference_point: Option<Point>) -> ReportContext<'_> {
    let registry = FixtureRegistry::from_map(map).expect("test map registry builds");
    ReportContext::new(map, registry, map.current_player(), reference_point)
}

/// Texts of the items in the first list of `blocks`.
pub(crate) fn list_texts(blocks: &[Block]) -> Vec<String> {
    blocks
        .iter()
        .find_map(|b| match b {
            Block::List(items) => Some(items.iter().map(|i| i.text.clone()).collect()),
            _ => None,
        })
        .unwrap_or_default()
}

/// The nested item under `item` whose text starts with `prefix`.
pub(crate) fn child<'i>(item: &'i Item, prefix: &str) -> Option<&'i Item> {
    item.children.iter().find_map(|b| match b {
        Block::List(items) => items.iter().find(|i| i.text.starts_with(prefix)),
        _ => None,
    })
}

/// Texts of the items nested directly under `item`.
pub(crate) fn child_texts(item: &Item) -> Vec<String> {
    item.children
        .iter()
        .flat_map(|b| match b {
            Block::List(items) => items.iter().map(|i| i.text.clone()).collect(),
            _ => Vec::new(),
        })
        .collect()
}
