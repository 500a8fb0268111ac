//! Registry of fixtures still waiting to be described.
//!
//! [`FixtureRegistry`] is an arena of entries indexed by [`FixtureId`]. Claiming an entry
//! with [`FixtureRegistry::remove`] only marks it pending; lookups treat it as absent
//! right away, while the slot itself is dropped by [`FixtureRegistry::coalesce`]. This lets
//! a generator walk a snapshot from [`FixtureRegistry::entries`] and claim as it goes.
use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::map::{Fixture, FixtureId, GameMap, Point};

/// A fixture together with its registry id and location.
#[derive(Clone, Copy, Debug)]
pub struct Entry<'a> {
    pub id: FixtureId,
    pub point: Point,
    pub fixture: &'a Fixture,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotState {
    Present,
    PendingRemoval,
}

#[derive(Debug)]
struct Slot<'a> {
    entry: Entry<'a>,
    state: SlotState,
}

/// Ordered mapping from fixture id to `(location, fixture)` with deferred removal.
#[derive(Debug)]
pub struct FixtureRegistry<'a> {
    slots: Vec<Slot<'a>>,
    index: HashMap<FixtureId, usize>,
    pending: usize,
}

impl<'a> FixtureRegistry<'a> {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            pending: 0,
        }
    }

    /// Builds a registry holding every fixture on `map`, including nested members.
    ///
    /// Fixtures without an intrinsic id receive synthetic ids numbered above the
    /// largest intrinsic id on the map.
    pub fn from_map(map: &'a GameMap) -> Result<Self> {
        let mut next_synthetic = map
            .fixtures()
            .filter_map(|(_, fixture)| max_intrinsic_id(fixture))
            .max()
            .map_or(Some(0), |id| id.0.checked_add(1));

        let mut registry = Self::new();
        for (point, fixture) in map.fixtures() {
            registry.put_tree(point, fixture, &mut next_synthetic)?;
        }
        debug!(
            "Built registry with {} entries ({} synthetic ids).",
            registry.len(),
            registry
                .slots
                .iter()
                .filter(|slot| slot.entry.fixture.id().is_none())
                .count()
        );
        Ok(registry)
    }

    fn put_tree(
        &mut self,
        point: Point,
        fixture: &'a Fixture,
        next_synthetic: &mut Option<u32>,
    ) -> Result<()> {
        let id = match fixture.id() {
            Some(id) => id,
            None => {
                let id = next_synthetic.ok_or(Error::IdsExhausted)?;
                *next_synthetic = id.checked_add(1);
                FixtureId(id)
            }
        };
        self.put(id, point, fixture)?;
        for member in fixture.members() {
            self.put_tree(point, member, next_synthetic)?;
        }
        Ok(())
    }

    /// Inserts a fixture. Fails if `id` is already known, even if pending removal.
    pub fn put(&mut self, id: FixtureId, point: Point, fixture: &'a Fixture) -> Result<()> {
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateId { id });
        }
        self.index.insert(id, self.slots.len());
        self.slots.push(Slot {
            entry: Entry { id, point, fixture },
            state: SlotState::Present,
        });
        Ok(())
    }

    /// Looks up a fixture that has not been claimed.
    pub fn get(&self, id: FixtureId) -> Option<Entry<'a>> {
        let slot = &self.slots[*self.index.get(&id)?];
        (slot.state == SlotState::Present).then_some(slot.entry)
    }

    pub fn contains_key(&self, id: FixtureId) -> bool {
        self.get(id).is_some()
    }

    /// Finds the unclaimed entry for `fixture`: by id when it has one, otherwise by
    /// identity of the referenced fixture.
    pub fn lookup(&self, fixture: &Fixture) -> Option<Entry<'a>> {
        match fixture.id() {
            Some(id) => self.get(id),
            None => self
                .slots
                .iter()
                .find(|slot| {
                    slot.state == SlotState::Present && std::ptr::eq(slot.entry.fixture, fixture)
                })
                .map(|slot| slot.entry),
        }
    }

    /// Claims a fixture, returning it, or `None` if it was absent or already claimed.
    pub fn remove(&mut self, id: FixtureId) -> Option<Entry<'a>> {
        let idx = *self.index.get(&id)?;
        let slot = &mut self.slots[idx];
        if slot.state == SlotState::PendingRemoval {
            return None;
        }
        slot.state = SlotState::PendingRemoval;
        self.pending += 1;
        Some(slot.entry)
    }

    /// Physically drops every claimed entry, returning how many were dropped.
    pub fn coalesce(&mut self) -> usize {
        if self.pending == 0 {
            return 0;
        }
        let dropped = self.pending;
        self.slots.retain(|slot| slot.state == SlotState::Present);
        self.index = self
            .slots
            .iter()
            .enumerate()
            .map(|(idx, slot)| (slot.entry.id, idx))
            .collect();
        self.pending = 0;
        debug!(
            "Coalesced registry: dropped {}, {} remain.",
            dropped,
            self.slots.len()
        );
        dropped
    }

    /// Snapshot of the unclaimed entries in insertion order.
    pub fn entries(&self) -> Vec<Entry<'a>> {
        self.slots
            .iter()
            .filter(|slot| slot.state == SlotState::Present)
            .map(|slot| slot.entry)
            .collect()
    }

    /// Number of unclaimed entries.
    pub fn len(&self) -> usize {
        self.slots.len() - self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of claimed entries still awaiting [`FixtureRegistry::coalesce`].
    pub fn pending_len(&self) -> usize {
        self.pending
    }
}

impl Default for FixtureRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn max_intrinsic_id(fixture: &Fixture) -> Option<FixtureId> {
    fixture
        .members()
        .iter()
        .filter_map(max_intrinsic_id)
        .chain(fixture.id())
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Animal, MapDimensions, TerrainFeature, TextNote};
    use crate::testing;

    fn hill() -> Fixture {
        Fixture::Terrain(TerrainFeature::Hill)
    }

    #[test]
    fn put_rejects_duplicate_ids() {
        let fixture = hill();
        let mut registry = FixtureRegistry::new();
        registry
            .put(FixtureId(1), Point::new(0, 0), &fixture)
            .expect("first insert succeeds");
        let err = registry
            .put(FixtureId(1), Point::new(1, 1), &fixture)
            .expect_err("duplicate insert fails");
        assert!(matches!(err, Error::DuplicateId { id } if id == FixtureId(1)));
    }

    #[test]
    fn remove_is_visible_before_coalesce() {
        let fixture = hill();
        let mut registry = FixtureRegistry::new();
        registry.put(FixtureId(1), Point::new(0, 0), &fixture).unwrap();
        registry.put(FixtureId(2), Point::new(0, 1), &fixture).unwrap();

        let removed = registry.remove(FixtureId(1)).expect("present");
        assert_eq!(removed.point, Point::new(0, 0));
        assert!(!registry.contains_key(FixtureId(1)));
        assert!(registry.get(FixtureId(1)).is_none());
        assert!(registry.remove(FixtureId(1)).is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.pending_len(), 1);

        assert_eq!(registry.coalesce(), 1);
        assert_eq!(registry.pending_len(), 0);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains_key(FixtureId(2)));
    }

    #[test]
    fn entries_skip_claimed_fixtures_and_keep_order() {
        let fixture = hill();
        let mut registry = FixtureRegistry::new();
        for id in [5, 3, 9] {
            registry.put(FixtureId(id), Point::new(0, 0), &fixture).unwrap();
        }
        registry.remove(FixtureId(3));
        let ids: Vec<FixtureId> = registry.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![FixtureId(5), FixtureId(9)]);
    }

    #[test]
    fn claiming_while_walking_a_snapshot_is_reflected() {
        let fixture = hill();
        let mut registry = FixtureRegistry::new();
        for id in 0..4 {
            registry.put(FixtureId(id), Point::new(0, 0), &fixture).unwrap();
        }
        let mut described = Vec::new();
        for entry in registry.entries() {
            if !registry.contains_key(entry.id) {
                continue;
            }
            described.push(entry.id);
            // Describing an even fixture also claims its odd neighbour.
            registry.remove(entry.id);
            registry.remove(FixtureId(entry.id.0 + 1));
        }
        assert_eq!(described, vec![FixtureId(0), FixtureId(2)]);
        registry.coalesce();
        assert!(registry.is_empty());
    }

    #[test]
    fn from_map_flattens_members_and_assigns_synthetic_ids() {
        let map = testing::fortress_with_worker_map();
        let registry = FixtureRegistry::from_map(&map).expect("registry builds");
        // fortress, unit, worker, and the text note
        assert_eq!(registry.len(), 4);
        let note = registry
            .entries()
            .into_iter()
            .find(|e| matches!(e.fixture, Fixture::Text(_)))
            .expect("note registered");
        assert!(note.id > FixtureId(3));
    }

    #[test]
    fn lookup_finds_id_less_fixtures_by_identity() {
        let map = testing::fortress_with_worker_map();
        let mut registry = FixtureRegistry::from_map(&map).unwrap();
        let (_, note) = map
            .fixtures()
            .find(|(_, f)| matches!(f, Fixture::Text(_)))
            .expect("note on map");
        let entry = registry.lookup(note).expect("note registered");
        registry.remove(entry.id);
        assert!(registry.lookup(note).is_none());

        let copy = note.clone();
        assert!(registry.lookup(&copy).is_none());
    }

    #[test]
    fn from_map_reports_duplicate_ids() {
        let mut map = crate::map::GameMap::new(MapDimensions::new(4, 4), testing::alice());
        map.add_fixture(
            Point::new(0, 0),
            Fixture::Worker(crate::map::Worker::new(7, "Ann", "human")),
        );
        map.add_fixture(
            Point::new(1, 0),
            Fixture::Worker(crate::map::Worker::new(7, "Bea", "elf")),
        );
        let err = FixtureRegistry::from_map(&map).expect_err("duplicate id");
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn synthetic_ids_start_at_zero_on_id_less_maps() {
        let mut map = crate::map::GameMap::new(MapDimensions::new(4, 4), testing::alice());
        map.add_fixture(
            Point::new(0, 0),
            Fixture::Text(TextNote {
                text: "hello".into(),
                turn: None,
            }),
        );
        let registry = FixtureRegistry::from_map(&map).unwrap();
        assert!(registry.contains_key(FixtureId(0)));
    }

    #[test]
    fn synthetic_ids_do_not_wrap_around() {
        let mut map = testing::empty_map();
        map.add_fixture(Point::new(0, 0), Fixture::Animal(Animal::new(u32::MAX, "deer")));
        let registry = FixtureRegistry::from_map(&map).expect("no synthetic ids needed");
        assert!(registry.contains_key(FixtureId(u32::MAX)));

        map.add_fixture(Point::new(0, 1), hill());
        let err = FixtureRegistry::from_map(&map).expect_err("no id left for the hill");
        assert!(matches!(err, Error::IdsExhausted));
    }
}
