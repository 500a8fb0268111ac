//! Read-only snapshot of the game world that reports are derived from.
//!
//! The report engine treats the map as an external collaborator: it only needs the
//! fixtures with their locations, the map dimensions, the players, and per-tile terrain
//! details that the fortress report describes.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod fixture;
pub mod point;

pub use fixture::{
    Animal, AnimalTracks, Cache, Explorable, FieldStatus, Fixture, FixtureId, Fortress, Grove,
    Harvestable, Immortal, ImmortalKind, Implement, Job, Meadow, Mine, MineralVein, Quantity,
    ResourcePile, Shrub, Skill, StoneDeposit, TerrainFeature, TextNote, Town, TownKind, TownSize,
    TownStatus, Unit, Village, Worker, WorkerStats,
};
pub use point::{MapDimensions, Point};

/// Name a player gives the fortress that serves as their headquarters.
pub const HEADQUARTERS_NAME: &str = "HQ";

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub i32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant in the game. Negative ids denote the independent pseudo-player.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn independent() -> Self {
        Self::new(PlayerId(-1), "independent")
    }

    pub fn is_independent(&self) -> bool {
        self.id.0 < 0
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TerrainType {
    Tundra,
    Desert,
    Ocean,
    #[default]
    Plains,
    Jungle,
    Steppe,
    Swamp,
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TerrainType::Tundra => "tundra",
            TerrainType::Desert => "desert",
            TerrainType::Ocean => "ocean",
            TerrainType::Plains => "plains",
            TerrainType::Jungle => "jungle",
            TerrainType::Steppe => "steppe",
            TerrainType::Swamp => "swamp",
        })
    }
}

/// A river segment on a tile: either a lake or a river crossing one border.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum River {
    Lake,
    North,
    East,
    South,
    West,
}

impl fmt::Display for River {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            River::Lake => "lake",
            River::North => "north",
            River::East => "east",
            River::South => "south",
            River::West => "west",
        })
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::North => "north",
            Direction::Northeast => "northeast",
            Direction::East => "east",
            Direction::Southeast => "southeast",
            Direction::South => "south",
            Direction::Southwest => "southwest",
            Direction::West => "west",
            Direction::Northwest => "northwest",
        })
    }
}

/// Everything the map knows about one location.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tile {
    pub terrain: Option<TerrainType>,
    pub mountainous: bool,
    pub rivers: BTreeSet<River>,
    /// Road quality by direction; zero means no road.
    pub roads: BTreeMap<Direction, u8>,
    pub fixtures: Vec<Fixture>,
}

/// A snapshot of the world map as seen by one player.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct GameMap {
    pub dimensions: MapDimensions,
    pub players: Vec<Player>,
    pub current_player: PlayerId,
    pub tiles: BTreeMap<Point, Tile>,
    /// Name of the file the map was loaded from, if any.
    pub file_name: Option<String>,
}

impl GameMap {
    pub fn new(dimensions: MapDimensions, current_player: Player) -> Self {
        let current = current_player.id;
        Self {
            dimensions,
            players: vec![current_player],
            current_player: current,
            tiles: BTreeMap::new(),
            file_name: None,
        }
    }

    /// Adds a player, replacing any existing player with the same id.
    pub fn with_player(mut self, player: Player) -> Self {
        self.players.retain(|p| p.id != player.id);
        self.players.push(player);
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// The player whose view this snapshot represents.
    pub fn current_player(&self) -> Player {
        self.player(self.current_player)
            .cloned()
            .unwrap_or_else(Player::independent)
    }

    pub fn tile(&self, point: Point) -> Option<&Tile> {
        self.tiles.get(&point)
    }

    pub fn tile_mut(&mut self, point: Point) -> &mut Tile {
        self.tiles.entry(point).or_default()
    }

    pub fn add_fixture(&mut self, point: Point, fixture: Fixture) {
        self.tile_mut(point).fixtures.push(fixture);
    }

    pub fn fixtures_at(&self, point: Point) -> &[Fixture] {
        self.tiles
            .get(&point)
            .map(|tile| tile.fixtures.as_slice())
            .unwrap_or(&[])
    }

    /// All top-level fixtures with their locations, in location order.
    pub fn fixtures(&self) -> impl Iterator<Item = (Point, &Fixture)> + '_ {
        self.tiles
            .iter()
            .flat_map(|(point, tile)| tile.fixtures.iter().map(move |f| (*point, f)))
    }

    /// Location of `player`'s headquarters: the fortress named [`HEADQUARTERS_NAME`],
    /// or failing that the first fortress the player owns.
    pub fn find_headquarters(&self, player: PlayerId) -> Option<Point> {
        let mut fallback = None;
        for (point, fixture) in self.fixtures() {
            if let Fixture::Fortress(fortress) = fixture {
                if fortress.owner.id != player {
                    continue;
                }
                if fortress.name == HEADQUARTERS_NAME {
                    return Some(point);
                }
                fallback.get_or_insert(point);
            }
        }
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Player {
        Player::new(PlayerId(1), "Alice")
    }

    #[test]
    fn current_player_falls_back_to_independent() {
        let mut map = GameMap::new(MapDimensions::new(4, 4), alice());
        assert_eq!(map.current_player().name, "Alice");
        map.current_player = PlayerId(42);
        assert!(map.current_player().is_independent());
    }

    #[test]
    fn fixtures_iterate_in_location_order() {
        let mut map = GameMap::new(MapDimensions::new(4, 4), alice());
        map.add_fixture(Point::new(2, 0), Fixture::Terrain(TerrainFeature::Hill));
        map.add_fixture(Point::new(0, 3), Fixture::Terrain(TerrainFeature::Oasis));
        let points: Vec<Point> = map.fixtures().map(|(p, _)| p).collect();
        assert_eq!(points, vec![Point::new(0, 3), Point::new(2, 0)]);
        assert!(map.fixtures_at(Point::new(1, 1)).is_empty());
    }

    #[test]
    fn headquarters_prefers_named_fortress() {
        let mut map = GameMap::new(MapDimensions::new(8, 8), alice());
        map.add_fixture(
            Point::new(1, 1),
            Fixture::Fortress(Fortress::new(1, alice(), "Outpost")),
        );
        map.add_fixture(
            Point::new(5, 5),
            Fixture::Fortress(Fortress::new(2, alice(), HEADQUARTERS_NAME)),
        );
        assert_eq!(map.find_headquarters(PlayerId(1)), Some(Point::new(5, 5)));
    }

    #[test]
    fn headquarters_falls_back_to_first_owned_fortress() {
        let mut map = GameMap::new(MapDimensions::new(8, 8), alice());
        map.add_fixture(
            Point::new(3, 2),
            Fixture::Fortress(Fortress::new(1, alice(), "Outpost")),
        );
        assert_eq!(map.find_headquarters(PlayerId(1)), Some(Point::new(3, 2)));
        assert_eq!(map.find_headquarters(PlayerId(7)), None);
    }
}
