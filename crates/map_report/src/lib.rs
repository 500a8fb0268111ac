#![forbid(unsafe_code)]
//! map_report: Player-specific reports over strategic world map snapshots.
//!
//! Modules:
//! - map: the read-only map snapshot (points, players, tiles, fixtures)
//! - registry: id-keyed fixture registry with deferred removal
//! - distance: wraparound distances and the comparators built on them
//! - generators: one generator per fixture category, plus the shared context
//! - output: the document tree, headed containers, HTML and tabular backends
//! - report: configuration and the fixed-order report runner
//! - events: run observation
//!
//! For examples, see the `map_report_examples` crate.
pub mod distance;
pub mod error;
pub mod events;
pub mod generators;
pub mod map;
pub mod output;
pub mod registry;
pub mod report;

#[cfg(test)]
mod testing;

/// Convenient re-exports for common types. Import with `use map_report::prelude::*;`.
pub mod prelude {
    pub use crate::distance::{wrapped_distance, DistanceComparator};
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FnSink, MultiSink, ReportEvent, ReportEventKind, VecSink};
    pub use crate::generators::{ReportContext, ReportGenerator};
    pub use crate::map::{
        Direction, Fixture, FixtureId, GameMap, MapDimensions, Player, PlayerId, Point, River,
        TerrainType, Tile,
    };
    pub use crate::output::{
        render_html, Block, Document, HeadedList, HeadedMap, HtmlReport, Item, Row, Table,
        TableKey, TabularReport,
    };
    pub use crate::registry::{Entry, FixtureRegistry};
    pub use crate::report::{
        create_report, create_tabular_report, generate_report, PassSummary, Report,
        ReportConfig, ReportRunner, ReportSummary,
    };
}
