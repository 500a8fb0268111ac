use std::path::PathBuf;

use map_report::prelude::*;
use map_report_examples::{init_tracing, sample_world};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let out = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("report.html"));

    let map = sample_world();
    let runner = ReportRunner::new(ReportConfig::new());

    let mut unclaimed = Vec::new();
    let mut sink = FnSink::new(|event| {
        if let ReportEvent::Unclaimed { point, description, .. } = event {
            unclaimed.push(format!("{point}: {description}"));
        }
    });
    let report = runner.run_with_events(&map, &mut sink)?;

    std::fs::write(&out, report.to_html().to_page())?;
    tracing::info!(
        "Wrote {} ({} fixtures, {} passes).",
        out.display(),
        report.summary.fixture_count,
        report.summary.passes.len()
    );
    for line in &unclaimed {
        tracing::info!("Described only by the remainder pass: {line}");
    }
    Ok(())
}
