//! Fixtures: everything that can be placed on a tile.
//!
//! [`Fixture`] is a closed enumeration of every category the report engine knows how
//! to describe. Units and fortresses own nested member fixtures, which the registry
//! flattens into their own entries.
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::map::Player;

/// Identity of a fixture, unique within one report run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixtureId(pub u32);

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FixtureId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Any discrete object placeable at a map location.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Fixture {
    Unit(Unit),
    Fortress(Fortress),
    Town(Town),
    Village(Village),
    Animal(Animal),
    Tracks(AnimalTracks),
    Harvestable(Harvestable),
    Explorable(Explorable),
    Immortal(Immortal),
    Text(TextNote),
    Implement(Implement),
    ResourcePile(ResourcePile),
    Worker(Worker),
    Terrain(TerrainFeature),
}

impl Fixture {
    /// Intrinsic id, if this category carries one. Fixtures without one get a
    /// synthetic id when the registry is built.
    pub fn id(&self) -> Option<FixtureId> {
        match self {
            Fixture::Unit(unit) => Some(unit.id),
            Fixture::Fortress(fortress) => Some(fortress.id),
            Fixture::Town(town) => Some(town.id),
            Fixture::Village(village) => Some(village.id),
            Fixture::Animal(animal) => Some(animal.id),
            Fixture::Harvestable(harvestable) => Some(harvestable.id()),
            Fixture::Explorable(explorable) => Some(explorable.id()),
            Fixture::Immortal(immortal) => Some(immortal.id),
            Fixture::Implement(implement) => Some(implement.id),
            Fixture::ResourcePile(pile) => Some(pile.id),
            Fixture::Worker(worker) => Some(worker.id),
            Fixture::Tracks(_) | Fixture::Text(_) | Fixture::Terrain(_) => None,
        }
    }

    /// Nested fixtures owned by this one.
    pub fn members(&self) -> &[Fixture] {
        match self {
            Fixture::Unit(unit) => &unit.members,
            Fixture::Fortress(fortress) => &fortress.members,
            _ => &[],
        }
    }

    /// Owning player, for categories that have one.
    pub fn owner(&self) -> Option<&Player> {
        match self {
            Fixture::Unit(unit) => Some(&unit.owner),
            Fixture::Fortress(fortress) => Some(&fortress.owner),
            Fixture::Town(town) => Some(&town.owner),
            Fixture::Village(village) => Some(&village.owner),
            _ => None,
        }
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fixture::Unit(unit) => fmt::Display::fmt(unit, f),
            Fixture::Fortress(fortress) => fmt::Display::fmt(fortress, f),
            Fixture::Town(town) => fmt::Display::fmt(town, f),
            Fixture::Village(village) => fmt::Display::fmt(village, f),
            Fixture::Animal(animal) => fmt::Display::fmt(animal, f),
            Fixture::Tracks(tracks) => fmt::Display::fmt(tracks, f),
            Fixture::Harvestable(harvestable) => fmt::Display::fmt(harvestable, f),
            Fixture::Explorable(explorable) => fmt::Display::fmt(explorable, f),
            Fixture::Immortal(immortal) => fmt::Display::fmt(immortal, f),
            Fixture::Text(note) => fmt::Display::fmt(note, f),
            Fixture::Implement(implement) => fmt::Display::fmt(implement, f),
            Fixture::ResourcePile(pile) => fmt::Display::fmt(pile, f),
            Fixture::Worker(worker) => fmt::Display::fmt(worker, f),
            Fixture::Terrain(feature) => fmt::Display::fmt(feature, f),
        }
    }
}

/// A group of workers and their belongings, moving together under one owner.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    pub id: FixtureId,
    pub owner: Player,
    pub kind: String,
    pub name: String,
    pub members: Vec<Fixture>,
    /// Orders given to the unit, by turn.
    pub orders: BTreeMap<i32, String>,
    /// Results reported back, by turn.
    pub results: BTreeMap<i32, String>,
}

impl Unit {
    pub fn new(
        id: impl Into<FixtureId>,
        owner: Player,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            owner,
            kind: kind.into(),
            name: name.into(),
            members: Vec::new(),
            orders: BTreeMap::new(),
            results: BTreeMap::new(),
        }
    }

    pub fn with_member(mut self, member: Fixture) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_orders(mut self, turn: i32, orders: impl Into<String>) -> Self {
        self.orders.insert(turn, orders.into());
        self
    }

    pub fn with_results(mut self, turn: i32, results: impl Into<String>) -> Self {
        self.results.insert(turn, results.into());
        self
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unit {} ({}), owned by {}", self.name, self.kind, self.owner)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TownSize {
    Small,
    Medium,
    Large,
}

impl fmt::Display for TownSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TownSize::Small => "small",
            TownSize::Medium => "medium",
            TownSize::Large => "large",
        })
    }
}

/// Condition of a community or mine.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TownStatus {
    Active,
    Abandoned,
    Ruined,
    Burned,
}

impl fmt::Display for TownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TownStatus::Active => "active",
            TownStatus::Abandoned => "abandoned",
            TownStatus::Ruined => "ruined",
            TownStatus::Burned => "burned-out",
        })
    }
}

/// A player's stronghold, holding units and stores.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Fortress {
    pub id: FixtureId,
    pub owner: Player,
    pub name: String,
    pub size: TownSize,
    pub members: Vec<Fixture>,
}

impl Fortress {
    pub fn new(id: impl Into<FixtureId>, owner: Player, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner,
            name: name.into(),
            size: TownSize::Small,
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: Fixture) -> Self {
        self.members.push(member);
        self
    }
}

impl fmt::Display for Fortress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fortress {}, owned by {}", self.name, self.owner)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TownKind {
    Town,
    City,
    Fortification,
}

impl fmt::Display for TownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TownKind::Town => "town",
            TownKind::City => "city",
            TownKind::Fortification => "fortification",
        })
    }
}

/// A town, city, or fortification that is not a player's fortress.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Town {
    pub id: FixtureId,
    pub owner: Player,
    pub name: String,
    pub kind: TownKind,
    pub size: TownSize,
    pub status: TownStatus,
}

impl fmt::Display for Town {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, a {} {} {}, owned by {}",
            self.name, self.size, self.status, self.kind, self.owner
        )
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Village {
    pub id: FixtureId,
    pub owner: Player,
    pub name: String,
    pub race: String,
    pub status: TownStatus,
}

impl fmt::Display for Village {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} {} village", self.name, self.status, self.race)
    }
}

/// A population of animals, wild or domesticated.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Animal {
    pub id: FixtureId,
    pub kind: String,
    pub talking: bool,
    /// Free-form status such as "wild" or "domesticated".
    pub status: String,
    /// Turn the animal was born, if known.
    pub born: Option<i32>,
    pub population: u32,
}

impl Animal {
    pub fn new(id: impl Into<FixtureId>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            talking: false,
            status: "wild".to_owned(),
            born: None,
            population: 1,
        }
    }

    pub fn with_population(mut self, population: u32) -> Self {
        self.population = population;
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Description without the population count.
    pub fn description(&self) -> String {
        let mut out = String::new();
        if self.talking {
            out.push_str("talking ");
        }
        out.push_str(&self.status);
        out.push(' ');
        out.push_str(&self.kind);
        if let Some(born) = self.born {
            out.push_str(&format!(" (born turn {born})"));
        }
        out
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.population > 1 {
            write!(f, "{} ", self.population)?;
        }
        f.write_str(&self.description())
    }
}

/// Signs that an animal passed through, without an encounter.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AnimalTracks {
    pub kind: String,
}

impl fmt::Display for AnimalTracks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tracks or traces of {}", self.kind)
    }
}

/// Growth stage of a meadow or field.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldStatus {
    Fallow,
    Seeding,
    Growing,
    Bearing,
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldStatus::Fallow => "fallow",
            FieldStatus::Seeding => "seeding",
            FieldStatus::Growing => "growing",
            FieldStatus::Bearing => "bearing",
        })
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Cache {
    pub id: FixtureId,
    pub kind: String,
    pub contents: String,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Grove {
    pub id: FixtureId,
    pub kind: String,
    pub orchard: bool,
    pub cultivated: bool,
    /// Number of trees, or zero if unknown.
    pub population: u32,
    /// Area in acres, or zero if unknown.
    pub acres: f64,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Meadow {
    pub id: FixtureId,
    pub kind: String,
    pub field: bool,
    pub cultivated: bool,
    pub status: FieldStatus,
    /// Area in acres, or zero if unknown.
    pub acres: f64,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Mine {
    pub id: FixtureId,
    pub kind: String,
    pub status: TownStatus,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct MineralVein {
    pub id: FixtureId,
    pub kind: String,
    pub exposed: bool,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Shrub {
    pub id: FixtureId,
    pub kind: String,
    /// Number of plants, or zero if unknown.
    pub population: u32,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct StoneDeposit {
    pub id: FixtureId,
    pub kind: String,
}

/// Resources that workers can gather or cultivate.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Harvestable {
    Cache(Cache),
    Grove(Grove),
    Meadow(Meadow),
    Mine(Mine),
    MineralVein(MineralVein),
    Shrub(Shrub),
    StoneDeposit(StoneDeposit),
}

impl Harvestable {
    pub fn id(&self) -> FixtureId {
        match self {
            Harvestable::Cache(cache) => cache.id,
            Harvestable::Grove(grove) => grove.id,
            Harvestable::Meadow(meadow) => meadow.id,
            Harvestable::Mine(mine) => mine.id,
            Harvestable::MineralVein(vein) => vein.id,
            Harvestable::Shrub(shrub) => shrub.id,
            Harvestable::StoneDeposit(deposit) => deposit.id,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Harvestable::Cache(cache) => &cache.kind,
            Harvestable::Grove(grove) => &grove.kind,
            Harvestable::Meadow(meadow) => &meadow.kind,
            Harvestable::Mine(mine) => &mine.kind,
            Harvestable::MineralVein(vein) => &vein.kind,
            Harvestable::Shrub(shrub) => &shrub.kind,
            Harvestable::StoneDeposit(deposit) => &deposit.kind,
        }
    }
}

impl fmt::Display for Harvestable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Harvestable::Cache(cache) => {
                write!(f, "a cache of {} containing {}", cache.kind, cache.contents)
            }
            Harvestable::Grove(grove) => write!(
                f,
                "{} {} {}",
                if grove.cultivated { "cultivated" } else { "wild" },
                grove.kind,
                if grove.orchard { "orchard" } else { "grove" }
            ),
            Harvestable::Meadow(meadow) => write!(
                f,
                "{} {} {}",
                meadow.status,
                meadow.kind,
                if meadow.field { "field" } else { "meadow" }
            ),
            Harvestable::Mine(mine) => write!(f, "{} {} mine", mine.status, mine.kind),
            Harvestable::MineralVein(vein) => write!(
                f,
                "{} vein of {}",
                if vein.exposed { "exposed" } else { "unexposed" },
                vein.kind
            ),
            Harvestable::Shrub(shrub) => f.write_str(&shrub.kind),
            Harvestable::StoneDeposit(deposit) => write!(f, "{} deposit", deposit.kind),
        }
    }
}

/// Places that invite exploration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Explorable {
    Cave { id: FixtureId, dc: u32 },
    Battlefield { id: FixtureId, dc: u32 },
    Portal { id: FixtureId, destination: String },
}

impl Explorable {
    pub fn id(&self) -> FixtureId {
        match self {
            Explorable::Cave { id, .. }
            | Explorable::Battlefield { id, .. }
            | Explorable::Portal { id, .. } => *id,
        }
    }
}

impl fmt::Display for Explorable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Explorable::Cave { .. } => f.write_str("caves beneath this tile"),
            Explorable::Battlefield { .. } => f.write_str("signs of a long-ago battle"),
            Explorable::Portal { destination, .. } => write!(f, "a portal to {destination}"),
        }
    }
}

/// Monsters and other beings of legend.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImmortalKind {
    Sphinx,
    Djinn,
    Griffin,
    Minotaur,
    Ogre,
    Phoenix,
    Simurgh,
    Troll,
    Snowbird,
    Thunderbird,
    Pegasus,
    Unicorn,
    Kraken,
    Centaur(String),
    Giant(String),
    Fairy(String),
    Dragon(String),
}

impl ImmortalKind {
    /// Base noun for the category, without any sub-kind.
    pub fn noun(&self) -> &'static str {
        match self {
            ImmortalKind::Sphinx => "sphinx",
            ImmortalKind::Djinn => "djinn",
            ImmortalKind::Griffin => "griffin",
            ImmortalKind::Minotaur => "minotaur",
            ImmortalKind::Ogre => "ogre",
            ImmortalKind::Phoenix => "phoenix",
            ImmortalKind::Simurgh => "simurgh",
            ImmortalKind::Troll => "troll",
            ImmortalKind::Snowbird => "snowbird",
            ImmortalKind::Thunderbird => "thunderbird",
            ImmortalKind::Pegasus => "pegasus",
            ImmortalKind::Unicorn => "unicorn",
            ImmortalKind::Kraken => "kraken",
            ImmortalKind::Centaur(_) => "centaur",
            ImmortalKind::Giant(_) => "giant",
            ImmortalKind::Fairy(_) => "fairy",
            ImmortalKind::Dragon(_) => "dragon",
        }
    }

    /// Sub-kind of the complex categories (e.g. "hill" for hill giants).
    pub fn sub_kind(&self) -> Option<&str> {
        match self {
            ImmortalKind::Centaur(kind)
            | ImmortalKind::Giant(kind)
            | ImmortalKind::Fairy(kind)
            | ImmortalKind::Dragon(kind) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for ImmortalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_kind() {
            Some(kind) => write!(f, "{} {}", kind, self.noun()),
            None => f.write_str(self.noun()),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Immortal {
    pub id: FixtureId,
    pub kind: ImmortalKind,
}

impl fmt::Display for Immortal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

/// An arbitrary-text note left on a tile.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct TextNote {
    pub text: String,
    /// In-game turn the note was written, if known.
    pub turn: Option<i32>,
}

impl fmt::Display for TextNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.turn {
            Some(turn) => write!(f, "On turn {turn}: {}", self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// A piece of equipment.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Implement {
    pub id: FixtureId,
    pub kind: String,
    pub count: u32,
}

impl fmt::Display for Implement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count > 1 {
            write!(f, "{} x {}", self.count, self.kind)
        } else {
            f.write_str(&self.kind)
        }
    }
}

/// An amount with its units, e.g. 12.5 pounds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Quantity {
    pub number: f64,
    pub units: String,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = crate::output::format_decimal(self.number, 2);
        if self.units.is_empty() {
            f.write_str(&number)
        } else {
            write!(f, "{} {}", number, self.units)
        }
    }
}

/// A stockpile of some resource.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ResourcePile {
    pub id: FixtureId,
    /// General kind of resource, e.g. "food".
    pub kind: String,
    /// Specific contents, e.g. "wheat".
    pub contents: String,
    pub quantity: Quantity,
    /// Turn the pile was produced, if known.
    pub created: Option<i32>,
}

impl fmt::Display for ResourcePile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A pile of {} of {}", self.quantity, self.contents)?;
        if let Some(turn) = self.created {
            write!(f, " from turn {turn}")?;
        }
        Ok(())
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerStats {
    pub hit_points: u32,
    pub max_hit_points: u32,
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    pub level: u32,
    pub hours: u32,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub level: u32,
    pub skills: Vec<Skill>,
}

impl Job {
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
            skills: Vec::new(),
        }
    }

    pub fn with_skill(mut self, name: impl Into<String>, level: u32, hours: u32) -> Self {
        self.skills.push(Skill {
            name: name.into(),
            level,
            hours,
        });
        self
    }
}

/// A member of a unit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Worker {
    pub id: FixtureId,
    pub name: String,
    pub race: String,
    pub stats: Option<WorkerStats>,
    pub jobs: Vec<Job>,
}

impl Worker {
    pub fn new(id: impl Into<FixtureId>, name: impl Into<String>, race: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            race: race.into(),
            stats: None,
            jobs: Vec::new(),
        }
    }

    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    pub fn with_stats(mut self, stats: WorkerStats) -> Self {
        self.stats = Some(stats);
        self
    }
}

impl fmt::Display for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let article = if self.race.starts_with(['a', 'e', 'i', 'o', 'u']) {
            "an"
        } else {
            "a"
        };
        write!(f, "{}, {article} {}", self.name, self.race)
    }
}

/// Terrain details that sit on a tile alongside its base terrain.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum TerrainFeature {
    Forest { kind: String, rows: bool },
    Hill,
    Oasis,
    Ground { kind: String, exposed: bool },
}

impl fmt::Display for TerrainFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainFeature::Forest { kind, rows: true } => write!(f, "rows of {kind} trees"),
            TerrainFeature::Forest { kind, rows: false } => write!(f, "a {kind} forest"),
            TerrainFeature::Hill => f.write_str("hills"),
            TerrainFeature::Oasis => f.write_str("an oasis"),
            TerrainFeature::Ground { kind, exposed } => write!(
                f,
                "{} {} ground",
                if *exposed { "exposed" } else { "unexposed" },
                kind
            ),
        }
    }
}
