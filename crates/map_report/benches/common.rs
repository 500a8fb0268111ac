#![allow(dead_code)]
use std::time::Duration;

use criterion::{Criterion, Throughput};
use map_report::map::{
    Animal, Fixture, FixtureId, Fortress, GameMap, Harvestable, Immortal, ImmortalKind,
    MapDimensions, MineralVein, Player, PlayerId, Point, TextNote, Town, TownKind, TownSize,
    TownStatus, Unit, Worker,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// A random map with roughly `fixtures` top-level fixtures spread over two players.
pub fn random_map(fixtures: usize, seed: u64) -> GameMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let dims = MapDimensions::new(64, 64);
    let players = [
        Player::new(PlayerId(1), "North"),
        Player::new(PlayerId(2), "South"),
    ];
    let mut map = GameMap::new(dims, players[0].clone()).with_player(players[1].clone());
    let mut next_id = 1u32;
    let mut id = || {
        next_id += 1;
        FixtureId(next_id)
    };

    for i in 0..fixtures {
        let point = Point::new(
            (rng.random::<u32>() % dims.rows as u32) as i32,
            (rng.random::<u32>() % dims.columns as u32) as i32,
        );
        let owner = players[rng.random::<u32>() as usize % players.len()].clone();
        let fixture = match rng.random::<u32>() % 8 {
            0 => Fixture::Fortress(
                Fortress::new(id(), owner.clone(), format!("Keep {i}")).with_member(
                    Fixture::Unit(
                        Unit::new(id(), owner, "guards", format!("Guard {i}"))
                            .with_member(Fixture::Worker(Worker::new(id(), "Sentry", "human"))),
                    ),
                ),
            ),
            1 => Fixture::Unit(
                Unit::new(id(), owner, "explorers", format!("Band {i}"))
                    .with_member(Fixture::Worker(Worker::new(id(), "Scout", "elf")))
                    .with_member(Fixture::Animal(Animal::new(id(), "horse"))),
            ),
            2 => Fixture::Town(Town {
                id: id(),
                owner,
                name: format!("Town {i}"),
                kind: TownKind::Town,
                size: TownSize::Small,
                status: TownStatus::Active,
            }),
            3 => Fixture::Harvestable(Harvestable::MineralVein(MineralVein {
                id: id(),
                kind: "iron".into(),
                exposed: rng.random::<f32>() < 0.5,
            })),
            4 => Fixture::Animal(Animal::new(id(), "deer")),
            5 => Fixture::Immortal(Immortal {
                id: id(),
                kind: ImmortalKind::Troll,
            }),
            6 => Fixture::Text(TextNote {
                text: format!("Note {i}"),
                turn: Some((rng.random::<u32>() % 20) as i32),
            }),
            _ => Fixture::Worker(Worker::new(id(), "Wanderer", "dwarf")),
        };
        map.add_fixture(point, fixture);
    }
    map
}
