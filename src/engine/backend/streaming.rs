use std::io;
use std::path::Path;

use tracing::debug;

use crate::engine::backend::{AggregateEngine, ScanOptions, ScanOutcome};
use crate::ingest::record::MeasurementParser;
use crate::ingest::source::LineSource;

/// Reference engine: one thread folds records line by line, in input order.
pub struct StreamingEngine;

impl AggregateEngine for StreamingEngine {
    fn name(&self) -> &'static str {
        "streaming"
    }

    fn scan(
        &self,
        input: &Path,
        parser: &MeasurementParser,
        _options: &ScanOptions,
    ) -> io::Result<ScanOutcome> {
        let source = LineSource::open(input)?;
        let mut outcome = ScanOutcome::default();

        for line in source.lines() {
            let line = line?;
            outcome.lines += 1;
            match parser.parse(&line) {
                Ok(measurement) => outcome.table.apply(measurement),
                Err(_) => outcome.skipped += 1,
            }
        }

        debug!(
            target: "stationmart::engine",
            engine = self.name(),
            lines = outcome.lines,
            skipped = outcome.skipped,
            stations = outcome.table.len(),
            "scan complete"
        );
        Ok(outcome)
    }
}
