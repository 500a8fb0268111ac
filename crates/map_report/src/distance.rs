//! Distances on a wrapping map and the comparators built on them.
//!
//! The map's edges connect to the opposite edge, so the offset between two tiles along
//! an axis is the shorter of the direct and the wrapped offset. Both axes are then
//! combined as a straight-line distance.
use std::cmp::Ordering;

use glam::DVec2;

use crate::map::{MapDimensions, Point};
use crate::output::format_decimal;
use crate::registry::Entry;

/// Shortest offset along one axis of length `extent`.
fn axis_offset(a: i32, b: i32, extent: i32) -> u32 {
    let direct = a.abs_diff(b);
    if extent <= 0 {
        return direct;
    }
    let extent = extent.unsigned_abs();
    let direct = direct % extent;
    direct.min(extent - direct)
}

/// Straight-line distance between two points, taking wraparound into account.
pub fn wrapped_distance(a: Point, b: Point, dimensions: MapDimensions) -> f64 {
    let rows = axis_offset(a.row, b.row, dimensions.rows);
    let columns = axis_offset(a.column, b.column, dimensions.columns);
    DVec2::new(f64::from(rows), f64::from(columns)).length()
}

/// Measures distances from an optional reference point, typically the player's
/// headquarters.
#[derive(Clone, Copy, Debug)]
pub struct DistanceComparator {
    base: Option<Point>,
    dimensions: MapDimensions,
}

impl DistanceComparator {
    pub fn new(base: Option<Point>, dimensions: MapDimensions) -> Self {
        Self { base, dimensions }
    }

    pub fn base(&self) -> Option<Point> {
        self.base
    }

    /// Distance from the reference point, or `None` if there is none.
    pub fn distance(&self, point: Point) -> Option<f64> {
        self.base
            .map(|base| wrapped_distance(base, point, self.dimensions))
    }

    /// Human-readable distance from the reference point.
    pub fn distance_string(&self, point: Point) -> String {
        match self.distance(point) {
            None => "unknown".to_owned(),
            Some(d) if d < 0.05 => "at the reference point".to_owned(),
            Some(d) => match format_decimal(d, 1).as_str() {
                "1" => "1 tile away".to_owned(),
                tiles => format!("{tiles} tiles away"),
            },
        }
    }

    /// Distance as a bare number for table cells; empty when unknown.
    pub fn distance_cell(&self, point: Point) -> String {
        self.distance(point)
            .map(|d| format_decimal(d, 1))
            .unwrap_or_default()
    }

    /// Orders points nearer the reference point first. Without a reference point
    /// every pair compares equal.
    pub fn compare(&self, a: Point, b: Point) -> Ordering {
        match (self.distance(a), self.distance(b)) {
            (Some(da), Some(db)) => da.total_cmp(&db),
            _ => Ordering::Equal,
        }
    }

    /// Orders entries by distance, then by fixture id.
    pub fn compare_entries(&self, a: &Entry<'_>, b: &Entry<'_>) -> Ordering {
        self.compare_entries_by(a, b, |e| e.id)
    }

    /// Orders entries by distance, then by a caller-supplied secondary key.
    pub fn compare_entries_by<K, F>(&self, a: &Entry<'_>, b: &Entry<'_>, key: F) -> Ordering
    where
        K: Ord,
        F: Fn(&Entry<'_>) -> K,
    {
        self.compare(a.point, b.point)
            .then_with(|| key(a).cmp(&key(b)))
    }

    /// Sorts entries in place by distance, breaking ties by fixture id.
    pub fn sort_entries(&self, entries: &mut [Entry<'_>]) {
        entries.sort_by(|a, b| self.compare_entries(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Fixture, FixtureId, TerrainFeature};

    fn entry(id: u32, point: Point, fixture: &Fixture) -> Entry<'_> {
        Entry {
            id: FixtureId(id),
            point,
            fixture,
        }
    }

    fn dims() -> MapDimensions {
        MapDimensions::new(10, 10)
    }

    #[test]
    fn opposite_corner_wraps_to_diagonal_neighbor() {
        let d = wrapped_distance(Point::new(0, 0), Point::new(9, 9), dims());
        assert!((d - 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let points = [
            Point::new(0, 0),
            Point::new(0, 9),
            Point::new(3, 7),
            Point::new(9, 1),
            Point::new(5, 5),
        ];
        for a in points {
            for b in points {
                assert_eq!(
                    wrapped_distance(a, b, dims()),
                    wrapped_distance(b, a, dims())
                );
            }
        }
    }

    #[test]
    fn opposite_edges_use_shorter_offset() {
        let dims = MapDimensions::new(8, 20);
        assert_eq!(wrapped_distance(Point::new(0, 0), Point::new(0, 19), dims), 1.0);
        assert_eq!(wrapped_distance(Point::new(0, 0), Point::new(0, 10), dims), 10.0);
        assert_eq!(wrapped_distance(Point::new(0, 0), Point::new(7, 0), dims), 1.0);
        assert_eq!(wrapped_distance(Point::new(0, 4), Point::new(0, 7), dims), 3.0);
    }

    #[test]
    fn distance_string_without_base_is_unknown() {
        let cmp = DistanceComparator::new(None, dims());
        assert_eq!(cmp.distance_string(Point::new(3, 3)), "unknown");
        assert_eq!(cmp.compare(Point::new(0, 0), Point::new(5, 5)), Ordering::Equal);
    }

    #[test]
    fn distance_cell_is_empty_when_unknown() {
        let cmp = DistanceComparator::new(None, dims());
        assert_eq!(cmp.distance_cell(Point::new(1, 1)), "");
        let cmp = DistanceComparator::new(Some(Point::new(0, 0)), dims());
        assert_eq!(cmp.distance_cell(Point::new(0, 4)), "4");
    }

    #[test]
    fn distance_string_formats_tiles() {
        let cmp = DistanceComparator::new(Some(Point::new(0, 0)), dims());
        assert_eq!(cmp.distance_string(Point::new(0, 0)), "at the reference point");
        assert_eq!(cmp.distance_string(Point::new(0, 3)), "3 tiles away");
        assert_eq!(cmp.distance_string(Point::new(1, 0)), "1 tile away");
        assert_eq!(cmp.distance_string(Point::new(9, 9)), "1.4 tiles away");
    }

    #[test]
    fn entries_sort_by_distance_then_id() {
        let hill = Fixture::Terrain(TerrainFeature::Hill);
        let cmp = DistanceComparator::new(Some(Point::new(0, 0)), dims());
        let mut entries = vec![
            entry(4, Point::new(3, 0), &hill),
            entry(9, Point::new(0, 1), &hill),
            entry(2, Point::new(1, 0), &hill),
        ];
        cmp.sort_entries(&mut entries);
        let ids: Vec<u32> = entries.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![2, 9, 4]);
    }

    #[test]
    fn entries_without_base_sort_by_id_only() {
        let hill = Fixture::Terrain(TerrainFeature::Hill);
        let cmp = DistanceComparator::new(None, dims());
        let mut entries = vec![
            entry(7, Point::new(0, 1), &hill),
            entry(1, Point::new(8, 8), &hill),
        ];
        cmp.sort_entries(&mut entries);
        assert_eq!(entries[0].id, FixtureId(1));
    }

    #[test]
    fn points_far_off_the_map_do_not_overflow() {
        let far = Point::new(i32::MIN, i32::MAX);
        let d = wrapped_distance(Point::new(i32::MAX, i32::MIN), far, dims());
        assert!(d.is_finite());
        assert!(d < 7.1);
        let unbounded = MapDimensions::new(0, 0);
        assert!(wrapped_distance(Point::new(0, 0), far, unbounded).is_finite());
    }
}
