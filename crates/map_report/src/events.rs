//! Event types and sinks for observing report runs.
//!
//! [`crate::report::ReportRunner`] emits a [`ReportEvent`] when a run starts, around
//! every generator pass, for each fixture that only the remainder pass described, and
//! when the run finishes. Sinks may opt out of kinds they do not care about through
//! [`EventSink::wants`], in which case the runner does not build those events.
use crate::map::{FixtureId, Point};
use crate::report::ReportSummary;

/// Describes events emitted while generating a report.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    /// Emitted once the registry has been built.
    RunStarted {
        /// Number of generator passes that will run.
        generator_count: usize,
        /// Number of fixtures in the registry.
        fixture_count: usize,
    },

    /// Emitted when the whole report is assembled.
    RunFinished {
        summary: ReportSummary,
    },

    /// Emitted before a generator pass.
    PassStarted {
        /// Position of the pass in the run.
        index: usize,
        /// Generator name.
        name: &'static str,
        /// Fixtures still unclaimed when the pass starts.
        remaining: usize,
    },

    /// Emitted after a generator pass and the coalescing that follows it.
    PassFinished {
        index: usize,
        name: &'static str,
        /// Fixtures the pass claimed.
        claimed: usize,
        /// Fixtures still unclaimed afterwards.
        remaining: usize,
    },

    /// A fixture no category generator described; the remainder pass will.
    Unclaimed {
        id: FixtureId,
        point: Point,
        /// Plain-text form of the fixture.
        description: String,
    },

    /// Non-fatal warning generated during a run.
    Warning {
        /// Context string (e.g. a generator name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of a [`ReportEvent`], used to filter events before building them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportEventKind {
    RunStarted,
    RunFinished,
    PassStarted,
    PassFinished,
    Unclaimed,
    Warning,
}

impl ReportEvent {
    pub fn kind(&self) -> ReportEventKind {
        match self {
            ReportEvent::RunStarted { .. } => ReportEventKind::RunStarted,
            ReportEvent::RunFinished { .. } => ReportEventKind::RunFinished,
            ReportEvent::PassStarted { .. } => ReportEventKind::PassStarted,
            ReportEvent::PassFinished { .. } => ReportEventKind::PassFinished,
            ReportEvent::Unclaimed { .. } => ReportEventKind::Unclaimed,
            ReportEvent::Warning { .. } => ReportEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`ReportEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: ReportEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: ReportEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = ReportEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ReportEvent) {}

    #[inline]
    fn wants(&self, _kind: ReportEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(ReportEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(ReportEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(ReportEvent),
{
    #[inline]
    fn send(&mut self, event: ReportEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally only some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<ReportEvent>,
    only: Option<Vec<ReportEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
            only: None,
        }
    }

    /// Collects only events of the given kinds.
    pub fn only(kinds: impl IntoIterator<Item = ReportEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<ReportEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ReportEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: ReportEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: ReportEventKind) -> bool {
        self.only.as_ref().is_none_or(|only| only.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: ReportEvent) {
        let kind = event.kind();
        let mut targets: Vec<&mut S> = self.sinks.iter_mut().filter(|s| s.wants(kind)).collect();
        let Some(last) = targets.pop() else {
            return;
        };
        for sink in targets {
            sink.send(event.clone());
        }
        last.send(event);
    }

    fn wants(&self, kind: ReportEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
