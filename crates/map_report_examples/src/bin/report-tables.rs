use std::path::PathBuf;

use map_report::prelude::*;
use map_report_examples::{init_tracing, sample_world};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("report-tables"));

    let map = sample_world();
    // Distances in the tables are measured from the map origin.
    let config = ReportConfig::new()
        .with_reference_point(Point::new(0, 0))
        .with_source_name("sample");
    let tables = create_tabular_report(&map, &config)?;
    let written = tables.write_to_dir(&dir)?;
    tracing::info!("Wrote {} tables to {}.", written.len(), dir.display());
    Ok(())
}
