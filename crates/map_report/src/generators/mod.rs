//! Category generators and the context they share.
//!
//! Each generator implements [`ReportGenerator`]: `produce_all` scans the registry for
//! its category and returns a section, `produce_one` describes a single fixture. Both
//! claim every fixture they describe. Containing categories hold the generators of the
//! categories they contain (fortress → unit → worker/animal/equipment) and delegate to
//! them, so a member described inside its container is never described again.
use crate::distance::DistanceComparator;
use crate::error::Result;
use crate::map::{Fixture, GameMap, Player, Point};
use crate::output::{Block, Item, Row, Table};
use crate::registry::{Entry, FixtureRegistry};

pub mod animal;
pub mod explorable;
pub mod fortress;
pub mod fortress_member;
pub mod harvestable;
pub mod immortal;
pub mod remainder;
pub mod text;
pub mod town;
pub mod unit;
pub mod village;
pub mod worker;

pub use animal::AnimalGenerator;
pub use explorable::ExplorableGenerator;
pub use fortress::FortressGenerator;
pub use fortress_member::FortressMemberGenerator;
pub use harvestable::HarvestableGenerator;
pub use immortal::ImmortalGenerator;
pub use remainder::RemainderGenerator;
pub use text::TextGenerator;
pub use town::TownGenerator;
pub use unit::UnitGenerator;
pub use village::VillageGenerator;
pub use worker::WorkerGenerator;

/// Heading level of each generator's section.
pub(crate) const SECTION_LEVEL: u8 = 4;

/// State shared by every generator during one report run.
pub struct ReportContext<'a> {
    pub map: &'a GameMap,
    pub registry: FixtureRegistry<'a>,
    /// The player the report is written for.
    pub player: Player,
    pub distances: DistanceComparator,
}

impl<'a> ReportContext<'a> {
    pub fn new(
        map: &'a GameMap,
        registry: FixtureRegistry<'a>,
        player: Player,
        reference_point: Option<Point>,
    ) -> Self {
        Self {
            map,
            registry,
            player,
            distances: DistanceComparator::new(reference_point, map.dimensions),
        }
    }

    /// Claims `entry`, returning `false` if it was already claimed.
    pub fn claim(&mut self, entry: &Entry<'a>) -> bool {
        self.registry.remove(entry.id).is_some()
    }

    pub fn is_current_player(&self, player: &Player) -> bool {
        player.id == self.player.id
    }

    /// "you", "independent", or the player's name.
    pub fn owner_name(&self, owner: &Player) -> String {
        if self.is_current_player(owner) {
            "you".to_owned()
        } else if owner.is_independent() {
            "independent".to_owned()
        } else {
            owner.name.clone()
        }
    }

    /// "owned by you", "independent", or "owned by <name>".
    pub fn ownership_phrase(&self, owner: &Player) -> String {
        if !self.is_current_player(owner) && owner.is_independent() {
            "independent".to_owned()
        } else {
            format!("owned by {}", self.owner_name(owner))
        }
    }

    /// Unclaimed entries whose fixture `select` accepts, sorted by distance then id.
    pub fn matching<T>(&self, mut select: impl FnMut(&'a Fixture) -> Option<T>) -> Vec<(Entry<'a>, T)> {
        let mut found: Vec<(Entry<'a>, T)> = self
            .registry
            .entries()
            .into_iter()
            .filter_map(|entry| select(entry.fixture).map(|value| (entry, value)))
            .collect();
        found.sort_by(|a, b| self.distances.compare_entries(&a.0, &b.0));
        found
    }

    /// Unclaimed entries for the members of a container.
    pub fn member_entries(&self, container: &'a Fixture) -> Vec<Entry<'a>> {
        container
            .members()
            .iter()
            .filter_map(|member| self.registry.lookup(member))
            .collect()
    }

    /// The first cells of every table row: distance and location.
    pub fn row_prefix(&self, point: Point) -> [String; 2] {
        [self.distances.distance_cell(point), point.to_string()]
    }

    /// Unclaimed entries located at `point`, in registry order.
    pub fn entries_at(&self, point: Point) -> Vec<Entry<'a>> {
        self.registry
            .entries()
            .into_iter()
            .filter(|entry| entry.point == point)
            .collect()
    }

    /// Describes a fixture by its plain-text form and claims it.
    pub fn plain_item(&mut self, entry: &Entry<'a>) -> Item {
        let [distance, location] = self.row_prefix(entry.point);
        let description = entry.fixture.to_string();
        self.claim(entry);
        Item::new(description.clone()).with_row(Row::new(
            Table::Other,
            [distance, location, description],
        ))
    }

    /// "At <point> (<distance>): <text>", the form of loose top-level entries.
    pub fn located(&self, point: Point, text: &str) -> String {
        format!("At {point} ({}): {text}", self.distances.distance_string(point))
    }
}

/// A generator for one category of fixtures.
pub trait ReportGenerator {
    /// Short name used in logs, events, and error messages.
    fn name(&self) -> &'static str;

    /// Describes every unclaimed fixture of this category, claiming each one.
    fn produce_all<'a>(&self, ctx: &mut ReportContext<'a>) -> Result<Vec<Block>>;

    /// Describes a single fixture and claims it.
    fn produce_one<'a>(&self, ctx: &mut ReportContext<'a>, entry: Entry<'a>) -> Result<Item>;
}

/// Joins points as "(0, 1), (2, 3)".
pub(crate) fn points_phrase(points: impl IntoIterator<Item = Point>) -> String {
    points
        .into_iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Upper-cases the first character.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "a" or "an" depending on the first letter of `word`.
pub(crate) fn article(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Wraps a list of items in a section heading, or nothing if there are none.
pub(crate) fn section(header: &str, items: Vec<Item>) -> Vec<Block> {
    if items.is_empty() {
        return Vec::new();
    }
    vec![Block::heading(SECTION_LEVEL, header), Block::List(items)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::PlayerId;
    use crate::testing;

    #[test]
    fn ownership_phrases_distinguish_players() {
        let map = testing::fortress_with_worker_map();
        let ctx = testing::context(&map, None);
        assert_eq!(ctx.ownership_phrase(&testing::alice()), "owned by you");
        assert_eq!(ctx.ownership_phrase(&Player::independent()), "independent");
        assert_eq!(
            ctx.ownership_phrase(&Player::new(PlayerId(2), "Bob")),
            "owned by Bob"
        );
        assert_eq!(ctx.owner_name(&Player::independent()), "independent");
    }

    #[test]
    fn text_helpers() {
        assert_eq!(capitalize("griffins"), "Griffins");
        assert_eq!(capitalize(""), "");
        assert_eq!(article("elf"), "an");
        assert_eq!(article("dwarf"), "a");
        assert_eq!(
            points_phrase([Point::new(0, 1), Point::new(2, 3)]),
            "(0, 1), (2, 3)"
        );
    }

    #[test]
    fn section_of_nothing_is_empty() {
        assert!(section("Anything", Vec::new()).is_empty());
        assert_eq!(section("Some", vec![Item::new("x")]).len(), 2);
    }
}
