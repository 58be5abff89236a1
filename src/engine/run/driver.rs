use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::engine::aggregate::finalize::{FinalizeError, StationSummary, finalize};
use crate::engine::backend::{AggregateEngine, ScanOptions};
use crate::engine::run::events::{RunEvent, RunObserver, RunPhase, RunStatus};
use crate::ingest::record::MeasurementParser;
use crate::ingest::source::LineSource;

/// Fatal run failures. Per-line parse errors never appear here; they are
/// recovered inside the engines and reported as skip counts.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("input source unavailable: {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while reading input: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Finalize(#[from] FinalizeError),
}

/// Everything a completed run hands to the persistence collaborator.
#[derive(Debug)]
pub struct RunReport {
    pub engine: &'static str,
    pub summaries: Vec<StationSummary>,
    pub lines: u64,
    pub skipped: u64,
    pub elapsed: Duration,
}

/// Drives one aggregation run through its lifecycle:
/// `NotStarted -> Reading -> Aggregating -> Finalizing -> Done`, with
/// `Failed` reachable from any non-terminal phase.
///
/// The station table lives inside the engine scan and is dropped after
/// finalization; only the finalized summaries leave the run.
pub struct RunDriver<'a> {
    engine: &'a dyn AggregateEngine,
    parser: MeasurementParser,
    options: ScanOptions,
    observers: Vec<Box<dyn RunObserver>>,
    phase: RunPhase,
}

impl<'a> RunDriver<'a> {
    pub fn new(engine: &'a dyn AggregateEngine, parser: MeasurementParser) -> Self {
        Self {
            engine,
            parser,
            options: ScanOptions::default(),
            observers: Vec::new(),
            phase: RunPhase::NotStarted,
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn RunObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Executes one full run. A run with zero valid records is a success
    /// with an empty summary sequence; failure is always a distinct signal.
    pub fn run(&mut self, input: &Path) -> Result<RunReport, RunError> {
        let started = Instant::now();
        self.phase = RunPhase::NotStarted;

        // The source must be accessible before any state is built.
        if let Err(source) = LineSource::open(input) {
            let err = RunError::SourceUnavailable {
                path: input.to_path_buf(),
                source,
            };
            self.fail(&err);
            return Err(err);
        }
        self.transition(RunPhase::Reading, RunStatus::Success);

        self.transition(RunPhase::Aggregating, RunStatus::Success);
        let outcome = match self.engine.scan(input, &self.parser, &self.options) {
            Ok(outcome) => outcome,
            Err(err) => {
                let err = RunError::Io(err);
                self.fail(&err);
                return Err(err);
            }
        };

        self.transition(RunPhase::Finalizing, RunStatus::Success);
        let summaries = match finalize(outcome.table) {
            Ok(summaries) => summaries,
            Err(err) => {
                let err = RunError::Finalize(err);
                self.fail(&err);
                return Err(err);
            }
        };

        self.transition(RunPhase::Done, RunStatus::Success);
        let elapsed = started.elapsed();
        info!(
            target: "stationmart::run",
            engine = self.engine.name(),
            stations = summaries.len(),
            lines = outcome.lines,
            skipped = outcome.skipped,
            elapsed_ms = elapsed.as_millis() as u64,
            "run complete"
        );

        Ok(RunReport {
            engine: self.engine.name(),
            summaries,
            lines: outcome.lines,
            skipped: outcome.skipped,
            elapsed,
        })
    }

    fn transition(&mut self, next: RunPhase, status: RunStatus) {
        self.phase = next;
        let event = RunEvent {
            timestamp: Utc::now(),
            engine: self.engine.name().to_string(),
            phase: next,
            status,
        };
        debug!(
            target: "stationmart::run",
            engine = %event.engine,
            phase = next.as_str(),
            status = %event.status,
            "phase transition"
        );
        for observer in &mut self.observers {
            observer.on_transition(&event);
        }
    }

    fn fail(&mut self, err: &RunError) {
        error!(target: "stationmart::run", error = %err, "run failed");
        self.transition(RunPhase::Failed, RunStatus::Failed(err.to_string()));
    }
}
