#![forbid(unsafe_code)]

use map_report::map::{
    Animal, AnimalTracks, Cache, Direction, Explorable, FieldStatus, Fixture, FixtureId, Fortress,
    GameMap, Grove, Harvestable, Immortal, ImmortalKind, Implement, Job, MapDimensions, Meadow,
    Mine, MineralVein, Player, PlayerId, Point, Quantity, ResourcePile, River, Shrub,
    StoneDeposit, TerrainFeature, TerrainType, TextNote, Town, TownKind, TownSize, TownStatus,
    Unit, Village, Worker, WorkerStats,
};

/// Installs a stderr `tracing` subscriber honoring `RUST_LOG`, defaulting to INFO.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// A small world seen by "Aldric", touching every fixture category.
pub fn sample_world() -> GameMap {
    let aldric = Player::new(PlayerId(1), "Aldric");
    let brenna = Player::new(PlayerId(2), "Brenna");
    let mut map = GameMap::new(MapDimensions::new(24, 32), aldric.clone())
        .with_player(brenna.clone())
        .with_file_name("sample-world.xml");

    let hq = Point::new(4, 6);
    {
        let tile = map.tile_mut(hq);
        tile.terrain = Some(TerrainType::Plains);
        tile.rivers.insert(River::Lake);
        tile.rivers.insert(River::South);
        tile.roads.insert(Direction::East, 2);
    }
    let ranger = Worker::new(102, "Isolde", "elf")
        .with_stats(WorkerStats {
            hit_points: 9,
            max_hit_points: 10,
            strength: 11,
            dexterity: 15,
            constitution: 12,
            intelligence: 13,
            wisdom: 14,
            charisma: 10,
        })
        .with_job(Job::new("ranger", 3).with_skill("tracking", 2, 120))
        .with_job(Job::new("herder", 1));
    let garrison = Unit::new(101, aldric.clone(), "explorers", "Wayfinders")
        .with_member(Fixture::Worker(ranger))
        .with_member(Fixture::Animal(
            Animal::new(103, "pony").with_status("domesticated").with_population(2),
        ))
        .with_orders(11, "Scout the northern hills")
        .with_results(11, "Found a cave entrance");
    map.add_fixture(
        hq,
        Fixture::Fortress(
            Fortress::new(100, aldric.clone(), "HQ")
                .with_member(Fixture::Unit(garrison))
                .with_member(Fixture::Implement(Implement {
                    id: FixtureId(104),
                    kind: "wagon".into(),
                    count: 2,
                }))
                .with_member(Fixture::ResourcePile(ResourcePile {
                    id: FixtureId(105),
                    kind: "food".into(),
                    contents: "wheat".into(),
                    quantity: Quantity {
                        number: 120.0,
                        units: "pounds".into(),
                    },
                    created: Some(9),
                })),
        ),
    );
    map.add_fixture(
        hq,
        Fixture::Terrain(TerrainFeature::Forest {
            kind: "beech".into(),
            rows: false,
        }),
    );
    map.add_fixture(hq, Fixture::Terrain(TerrainFeature::Hill));

    map.add_fixture(
        Point::new(20, 30),
        Fixture::Unit(
            Unit::new(200, brenna.clone(), "raiders", "Red Hand")
                .with_member(Fixture::Worker(Worker::new(201, "Corvin", "human"))),
        ),
    );
    map.add_fixture(
        Point::new(10, 12),
        Fixture::Fortress(Fortress::new(202, brenna.clone(), "Stonewatch")),
    );
    map.add_fixture(
        Point::new(6, 9),
        Fixture::Town(Town {
            id: FixtureId(300),
            owner: Player::independent(),
            name: "Millbrook".into(),
            kind: TownKind::Town,
            size: TownSize::Medium,
            status: TownStatus::Active,
        }),
    );
    map.add_fixture(
        Point::new(7, 2),
        Fixture::Town(Town {
            id: FixtureId(301),
            owner: Player::independent(),
            name: "Old Keep".into(),
            kind: TownKind::Fortification,
            size: TownSize::Small,
            status: TownStatus::Ruined,
        }),
    );
    map.add_fixture(
        Point::new(3, 10),
        Fixture::Village(Village {
            id: FixtureId(302),
            owner: aldric,
            name: "Fernhollow".into(),
            race: "halfling".into(),
            status: TownStatus::Active,
        }),
    );
    map.add_fixture(
        Point::new(12, 20),
        Fixture::Village(Village {
            id: FixtureId(303),
            owner: brenna,
            name: "Ashmere".into(),
            race: "dwarf".into(),
            status: TownStatus::Active,
        }),
    );
    map.add_fixture(
        Point::new(2, 5),
        Fixture::Explorable(Explorable::Cave {
            id: FixtureId(400),
            dc: 15,
        }),
    );
    map.add_fixture(
        Point::new(9, 9),
        Fixture::Explorable(Explorable::Battlefield {
            id: FixtureId(401),
            dc: 12,
        }),
    );
    map.add_fixture(
        Point::new(15, 1),
        Fixture::Explorable(Explorable::Portal {
            id: FixtureId(402),
            destination: "the Glass Wastes".into(),
        }),
    );
    for (offset, harvestable) in [
        Harvestable::Cache(Cache {
            id: FixtureId(500),
            kind: "smuggler's".into(),
            contents: "silver coins".into(),
        }),
        Harvestable::Grove(Grove {
            id: FixtureId(501),
            kind: "apple".into(),
            orchard: true,
            cultivated: true,
            population: 60,
            acres: 3.25,
        }),
        Harvestable::Meadow(Meadow {
            id: FixtureId(502),
            kind: "barley".into(),
            field: true,
            cultivated: true,
            status: FieldStatus::Growing,
            acres: 0.0,
        }),
        Harvestable::Mine(Mine {
            id: FixtureId(503),
            kind: "iron".into(),
            status: TownStatus::Abandoned,
        }),
        Harvestable::MineralVein(MineralVein {
            id: FixtureId(504),
            kind: "copper".into(),
            exposed: true,
        }),
        Harvestable::Shrub(Shrub {
            id: FixtureId(505),
            kind: "blackberry".into(),
            population: 30,
        }),
        Harvestable::StoneDeposit(StoneDeposit {
            id: FixtureId(506),
            kind: "granite".into(),
        }),
    ]
    .into_iter()
    .enumerate()
    {
        map.add_fixture(
            Point::new(5 + offset as i32, 14),
            Fixture::Harvestable(harvestable),
        );
    }
    map.add_fixture(Point::new(8, 8), Fixture::Animal(Animal::new(600, "deer")));
    map.add_fixture(Point::new(8, 9), Fixture::Animal(Animal::new(601, "deer")));
    map.add_fixture(
        Point::new(1, 1),
        Fixture::Tracks(AnimalTracks {
            kind: "wolf".into(),
        }),
    );
    for (id, point, kind) in [
        (700, Point::new(22, 3), ImmortalKind::Griffin),
        (701, Point::new(23, 4), ImmortalKind::Griffin),
        (702, Point::new(18, 18), ImmortalKind::Pegasus),
        (703, Point::new(16, 25), ImmortalKind::Giant("hill".into())),
        (704, Point::new(0, 31), ImmortalKind::Dragon("silver".into())),
    ] {
        map.add_fixture(
            point,
            Fixture::Immortal(Immortal {
                id: FixtureId(id),
                kind,
            }),
        );
    }
    map.add_fixture(
        Point::new(5, 5),
        Fixture::Text(TextNote {
            text: "Strange lights over the lake".into(),
            turn: Some(10),
        }),
    );
    map.add_fixture(
        Point::new(11, 3),
        Fixture::Terrain(TerrainFeature::Oasis),
    );
    map
}
