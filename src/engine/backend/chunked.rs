use std::io;
use std::path::Path;
use std::thread;

use crossbeam::channel;
use tracing::debug;

use crate::engine::backend::{AggregateEngine, ScanOptions, ScanOutcome, fold_lines};
use crate::ingest::record::MeasurementParser;
use crate::ingest::source::LineSource;

/// Chunked engine: a dedicated reader thread feeds line chunks over a
/// bounded channel while the consumer folds each chunk into a chunk-local
/// table and merges it into the accumulated state.
pub struct ChunkedEngine;

impl AggregateEngine for ChunkedEngine {
    fn name(&self) -> &'static str {
        "chunked"
    }

    fn scan(
        &self,
        input: &Path,
        parser: &MeasurementParser,
        options: &ScanOptions,
    ) -> io::Result<ScanOutcome> {
        let source = LineSource::open(input)?;
        let chunk_size = options.chunk_size;
        let (tx, rx) = channel::bounded::<io::Result<Vec<String>>>(2);

        let reader = thread::spawn(move || {
            for chunk in source.chunks(chunk_size) {
                let fatal = chunk.is_err();
                if tx.send(chunk).is_err() || fatal {
                    // Consumer is gone or the stream faulted: stop reading.
                    return;
                }
            }
        });

        let mut outcome = ScanOutcome::default();
        let mut fault: Option<io::Error> = None;
        for chunk in rx {
            match chunk {
                Ok(lines) => {
                    let mut partial = ScanOutcome::default();
                    fold_lines(parser, lines.iter().map(String::as_str), &mut partial);
                    outcome.merge(partial);
                }
                Err(err) => {
                    fault = Some(err);
                    break;
                }
            }
        }
        let _ = reader.join();

        // Partial state is discarded on a mid-stream fault.
        if let Some(err) = fault {
            return Err(err);
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
