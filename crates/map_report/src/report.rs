//! Report orchestration: configuration, the fixed pass order, and run summaries.
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::events::{EventSink, ReportEvent, ReportEventKind};
use crate::generators::{
    AnimalGenerator, ExplorableGenerator, FortressGenerator, HarvestableGenerator,
    ImmortalGenerator, RemainderGenerator, ReportContext, ReportGenerator, TextGenerator,
    TownGenerator, UnitGenerator, VillageGenerator,
};
use crate::map::{GameMap, Player, PlayerId, Point};
use crate::output::{Document, HtmlReport, TabularReport};
use crate::registry::FixtureRegistry;

/// Source name used for tabular output when neither the configuration nor the map
/// provides one.
pub const DEFAULT_SOURCE_NAME: &str = "map";

/// Configuration for generating a report.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Explicit reference point for distances. Takes precedence over the headquarters.
    pub reference_point: Option<Point>,
    /// Use the player's headquarters as reference point when none is given.
    pub locate_headquarters: bool,
    /// Player to write the report for, instead of the map's current player.
    pub player: Option<PlayerId>,
    /// Run the final pass describing anything no category generator claimed.
    pub include_remainder: bool,
    /// Name prefixed to tabular output files.
    pub source_name: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reference_point: None,
            locate_headquarters: true,
            player: None,
            include_remainder: true,
            source_name: None,
        }
    }
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit reference point.
    pub fn with_reference_point(mut self, point: Point) -> Self {
        self.reference_point = Some(point);
        self
    }

    /// Enables or disables the headquarters lookup.
    pub fn with_locate_headquarters(mut self, locate: bool) -> Self {
        self.locate_headquarters = locate;
        self
    }

    /// Writes the report for `player` instead of the map's current player.
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    /// Enables or disables the remainder pass.
    pub fn with_remainder(mut self, include: bool) -> Self {
        self.include_remainder = include;
        self
    }

    /// Sets the source name for tabular output.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Validates the configuration against `map`.
    pub fn validate(&self, map: &GameMap) -> Result<()> {
        if let Some(point) = self.reference_point {
            if !map.dimensions.contains(point) {
                return Err(Error::InvalidConfig(format!(
                    "reference point {point} lies outside the {}x{} map",
                    map.dimensions.rows, map.dimensions.columns
                )));
            }
        }
        if let Some(player) = self.player {
            if map.player(player).is_none() {
                return Err(Error::InvalidConfig(format!(
                    "player {player} is not known to the map"
                )));
            }
        }
        if let Some(name) = &self.source_name {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(Error::InvalidConfig(format!(
                    "source name {name:?} must be a non-empty file name"
                )));
            }
        }
        Ok(())
    }

    /// The player the report is written for.
    pub fn resolve_player(&self, map: &GameMap) -> Player {
        self.player
            .and_then(|id| map.player(id).cloned())
            .unwrap_or_else(|| map.current_player())
    }

    /// The reference point: explicit, else the player's headquarters if enabled.
    pub fn resolve_reference_point(&self, map: &GameMap, player: &Player) -> Option<Point> {
        self.reference_point.or_else(|| {
            self.locate_headquarters
                .then(|| map.find_headquarters(player.id))
                .flatten()
        })
    }

    /// The configured source name, else the stem of the map's file name, else
    /// [`DEFAULT_SOURCE_NAME`].
    pub fn resolve_source_name(&self, map: &GameMap) -> String {
        if let Some(name) = &self.source_name {
            return name.clone();
        }
        map.file_name
            .as_deref()
            .and_then(|file| Path::new(file).file_stem())
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or(DEFAULT_SOURCE_NAME)
            .to_owned()
    }
}

/// What one generator pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub name: &'static str,
    /// Fixtures the pass claimed.
    pub claimed: usize,
    /// Fixtures still unclaimed after the pass.
    pub remaining: usize,
}

/// Outcome of a report run.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Fixtures in the registry when the run started.
    pub fixture_count: usize,
    pub passes: Vec<PassSummary>,
    /// Fixtures no category generator claimed, left for the remainder pass.
    pub unclaimed: usize,
}

impl ReportSummary {
    pub fn new(fixture_count: usize) -> Self {
        Self {
            fixture_count,
            ..Default::default()
        }
    }

    /// Total fixtures claimed over all passes.
    pub fn claimed(&self) -> usize {
        self.passes.iter().map(|pass| pass.claimed).sum()
    }

    /// Fixtures still unclaimed after the last pass.
    pub fn remaining(&self) -> usize {
        self.passes
            .last()
            .map_or(self.fixture_count, |pass| pass.remaining)
    }
}

/// A generated report: the document plus what is needed to emit it.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub document: Document,
    pub summary: ReportSummary,
    /// The player the report was written for.
    pub player: Player,
    pub reference_point: Option<Point>,
    pub source_name: String,
}

impl Report {
    pub fn to_html(&self) -> HtmlReport {
        HtmlReport::from_document(&self.document)
    }

    pub fn to_tabular(&self) -> TabularReport {
        TabularReport::from_document(&self.source_name, &self.document)
    }
}

/// The category passes in the order they must run. Containers come before what they
/// contain, so members described inside a container are gone by the time their own
/// category's pass runs.
pub fn category_passes() -> Vec<Box<dyn ReportGenerator>> {
    vec![
        Box::new(FortressGenerator::new()),
        Box::new(UnitGenerator::new()),
        Box::new(TownGenerator::new()),
        Box::new(ExplorableGenerator::new()),
        Box::new(HarvestableGenerator::new()),
        Box::new(AnimalGenerator::new()),
        Box::new(VillageGenerator::new()),
        Box::new(ImmortalGenerator::new()),
        Box::new(TextGenerator::new()),
    ]
}

/// Generates reports for maps with a fixed configuration.
pub struct ReportRunner {
    /// Configuration applied to every run.
    pub config: ReportConfig,
}

impl ReportRunner {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Generates a report for `map`.
    pub fn run(&self, map: &GameMap) -> Result<Report> {
        generate_report(map, &self.config, None)
    }

    pub fn run_with_events(&self, map: &GameMap, sink: &mut dyn EventSink) -> Result<Report> {
        generate_report(map, &self.config, Some(sink))
    }
}

impl Default for ReportRunner {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

pub fn generate_report(
    map: &GameMap,
    config: &ReportConfig,
    sink: Option<&mut dyn EventSink>,
) -> Result<Report> {
    if let Some(s) = sink {
        generate_report_with_events(map, config, s)
    } else {
        generate_report_with_events(map, config, &mut ())
    }
}

pub fn generate_report_with_events(
    map: &GameMap,
    config: &ReportConfig,
    sink: &mut dyn EventSink,
) -> Result<Report> {
    generate_with_passes(map, config, &category_passes(), sink)
}

/// Runs `passes` in order, then the remainder pass if enabled.
fn generate_with_passes(
    map: &GameMap,
    config: &ReportConfig,
    passes: &[Box<dyn ReportGenerator>],
    sink: &mut dyn EventSink,
) -> Result<Report> {
    config.validate(map)?;
    let player = config.resolve_player(map);
    let reference_point = config.resolve_reference_point(map, &player);
    let source_name = config.resolve_source_name(map);

    let registry = FixtureRegistry::from_map(map)?;
    let fixture_count = registry.len();
    let mut ctx = ReportContext::new(map, registry, player.clone(), reference_point);

    let pass_count = passes.len() + usize::from(config.include_remainder);
    info!(
        "Report for {} | fixtures: {} | reference point: {}.",
        player,
        fixture_count,
        reference_point.map_or_else(|| "none".to_owned(), |p| p.to_string())
    );
    if sink.wants(ReportEventKind::RunStarted) {
        sink.send(ReportEvent::RunStarted {
            generator_count: pass_count,
            fixture_count,
        });
    }

    let mut document = Document::new(format!("Strategic report for {}", player.name));
    let mut summary = ReportSummary::new(fixture_count);
    for (index, generator) in passes.iter().enumerate() {
        let pass = run_pass(&mut ctx, &**generator, index, &mut document, sink)?;
        summary.passes.push(pass);
    }

    summary.unclaimed = ctx.registry.len();
    if summary.unclaimed > 0 {
        warn!(
            "{} fixtures were not claimed by any category generator.",
            summary.unclaimed
        );
        if sink.wants(ReportEventKind::Warning) {
            sink.send(ReportEvent::Warning {
                context: "registry".into(),
                message: format!("{} fixtures left unclaimed", summary.unclaimed),
            });
        }
        if sink.wants(ReportEventKind::Unclaimed) {
            for entry in ctx.registry.entries() {
                sink.send(ReportEvent::Unclaimed {
                    id: entry.id,
                    point: entry.point,
                    description: entry.fixture.to_string(),
                });
            }
        }
    }
    if config.include_remainder {
        let remainder = RemainderGenerator::new();
        let pass = run_pass(&mut ctx, &remainder, passes.len(), &mut document, sink)?;
        summary.passes.push(pass);
        if !ctx.registry.is_empty() {
            warn!(
                "{} fixtures remain in the registry after the remainder pass.",
                ctx.registry.len()
            );
        }
    }

    if sink.wants(ReportEventKind::RunFinished) {
        sink.send(ReportEvent::RunFinished {
            summary: summary.clone(),
        });
    }

    Ok(Report {
        document,
        summary,
        player,
        reference_point,
        source_name,
    })
}

/// Runs one generator over the registry, then coalesces its claims.
fn run_pass(
    ctx: &mut ReportContext<'_>,
    generator: &dyn ReportGenerator,
    index: usize,
    document: &mut Document,
    sink: &mut dyn EventSink,
) -> Result<PassSummary> {
    let name = generator.name();
    let before = ctx.registry.len();
    if sink.wants(ReportEventKind::PassStarted) {
        sink.send(ReportEvent::PassStarted {
            index,
            name,
            remaining: before,
        });
    }

    let blocks = generator.produce_all(ctx)?;
    document.push_section(name, blocks);
    ctx.registry.coalesce();

    let remaining = ctx.registry.len();
    let claimed = before - remaining;
    info!("Pass {index}: '{name}' | claimed: {claimed} | remaining: {remaining}.");
    if sink.wants(ReportEventKind::PassFinished) {
        sink.send(ReportEvent::PassFinished {
            index,
            name,
            claimed,
            remaining,
        });
    }
    Ok(PassSummary {
        name,
        claimed,
        remaining,
    })
}

/// Generates a report for `map` and renders it as a full HTML page.
pub fn create_report(map: &GameMap, config: &ReportConfig) -> Result<String> {
    Ok(generate_report(map, config, None)?.to_html().to_page())
}

/// Generates a report for `map` and collects its tables.
pub fn create_tabular_report(map: &GameMap, config: &ReportConfig) -> Result<TabularReport> {
    Ok(generate_report(map, config, None)?.to_tabular())
}
