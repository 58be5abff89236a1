use std::io;
use std::path::Path;

use rayon::iter::{ParallelBridge, ParallelIterator};

use crate::engine::backend::{AggregateEngine, ScanOptions, ScanOutcome, fold_lines};
use crate::ingest::record::MeasurementParser;
use crate::ingest::source::LineSource;

/// Parallel engine: disjoint chunks are folded on rayon workers, each into
/// a private partial table. Partials are merged on the way out; merge order
/// across chunks is unspecified and must not matter.
pub struct ParallelEngine;

impl AggregateEngine for ParallelEngine {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn scan(
        &self,
        input: &Path,
        parser: &MeasurementParser,
        options: &ScanOptions,
    ) -> io::Result<ScanOutcome> {
        let source = LineSource::open(input)?;

        source
            .chunks(options.chunk_size)
            .par_bridge()
            .map(|chunk| {
                let lines = chunk?;
                let mut partial = ScanOutcome::default();
                fold_lines(parser, lines.iter().map(String::as_str), &mut partial);
                Ok(partial)
            })
            .try_reduce(ScanOutcome::default, |mut acc, partial| {
                acc.merge(partial);
                Ok(acc)
            })
    }
}
