//! Grid coordinates and map extents.
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A tile coordinate on the map grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: i32,
    pub column: i32,
}

impl Point {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl From<(i32, i32)> for Point {
    fn from((row, column): (i32, i32)) -> Self {
        Self { row, column }
    }
}

/// Size of the map. Both edges wrap around to the opposite side.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MapDimensions {
    pub rows: i32,
    pub columns: i32,
}

impl MapDimensions {
    pub const fn new(rows: i32, columns: i32) -> Self {
        Self { rows, columns }
    }

    /// Returns `true` if `point` lies inside the map.
    pub fn contains(&self, point: Point) -> bool {
        (0..self.rows).contains(&point.row) && (0..self.columns).contains(&point.column)
    }
}
