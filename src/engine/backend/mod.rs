pub mod chunked;
pub mod columnar;
pub mod parallel;
pub mod streaming;


use std::io;
use std::path::Path;

use crate::engine::aggregate::state::StationTable;
use crate::ingest::record::MeasurementParser;

/// Partial state and counters produced by one engine scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    pub table: StationTable,
    pub lines: u64,
    pub skipped: u64,
}

impl ScanOutcome {
    /// Absorbs a partial outcome computed over a disjoint slice of the
    /// input.
    pub fn merge(&mut self, other: ScanOutcome) {
        self.table.merge(other.table);
        self.lines += other.lines;
        self.skipped += other.skipped;
    }
}

/// Scan knobs shared by every engine.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Lines per chunk for the chunk-oriented engines.
    pub chunk_size: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { chunk_size: 65_536 }
    }
}

/// One interchangeable aggregation engine.
///
/// Engines differ in how they walk the input; the statistics they produce
/// must not. Per-line parse failures are counted into `skipped`, never
/// surfaced as errors; only I/O faults abort a scan.
pub trait AggregateEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn scan(
        &self,
        input: &Path,
        parser: &MeasurementParser,
        options: &ScanOptions,
    ) -> io::Result<ScanOutcome>;
}

/// Folds raw lines into an outcome. Skips are counted, not logged, so
/// adversarial input cannot flood the diagnostics.
pub(crate) fn fold_lines<'a, I>(parser: &MeasurementParser, lines: I, outcome: &mut ScanOutcome)
where
    I: IntoIterator<Item = &'a str>,
{
    for line in lines {
        outcome.lines += 1;
        match parser.parse(line) {
            Ok(measurement) => outcome.table.apply(measurement),
            Err(_) => outcome.skipped += 1,
        }
    }
}

/// Every engine, in benchmark order.
pub fn all_engines() -> Vec<Box<dyn AggregateEngine>> {
    vec![
        Box::new(streaming::StreamingEngine),
        Box::new(chunked::ChunkedEngine),
        Box::new(parallel::ParallelEngine),
        Box::new(columnar::ColumnarEngine),
    ]
}

pub fn engine_by_name(name: &str) -> Option<Box<dyn AggregateEngine>> {
    all_engines().into_iter().find(|e| e.name() == name)
}
