use std::io;
use std::path::Path;

use arrow_array::builder::{Float64Builder, StringBuilder};
use arrow_array::{Array, Float64Array, StringArray};

use crate::engine::backend::{AggregateEngine, ScanOptions, ScanOutcome};
use crate::ingest::record::{Measurement, MeasurementParser};
use crate::ingest::source::LineSource;

/// Columnar engine: each chunk is materialized into typed in-memory arrays
/// before being folded column-wise into a partial table.
pub struct ColumnarEngine;

impl ColumnarEngine {
    /// Builds the station and temperature columns for one chunk. Lines that
    /// fail to parse contribute to the skip count instead of the columns.
    fn build_columns(
        parser: &MeasurementParser,
        lines: &[String],
    ) -> (StringArray, Float64Array, u64) {
        let mut stations = StringBuilder::new();
        let mut temperatures = Float64Builder::new();
        let mut skipped = 0u64;

        for line in lines {
            match parser.parse(line) {
                Ok(measurement) => {
                    stations.append_value(&measurement.station);
                    temperatures.append_value(measurement.temperature);
                }
                Err(_) => skipped += 1,
            }
        }

        (stations.finish(), temperatures.finish(), skipped)
    }
}

impl AggregateEngine for ColumnarEngine {
    fn name(&self) -> &'static str {
        "columnar"
    }

    fn scan(
        &self,
        input: &Path,
        parser: &MeasurementParser,
        options: &ScanOptions,
    ) -> io::Result<ScanOutcome> {
        let source = LineSource::open(input)?;
        let mut outcome = ScanOutcome::default();

        for chunk in source.chunks(options.chunk_size) {
            let lines = chunk?;

            let mut partial = ScanOutcome::default();
            partial.lines = lines.len() as u64;

            let (stations, temperatures, skipped) = Self::build_columns(parser, &lines);
            partial.skipped = skipped;
            for row in 0..stations.len() {
                partial.table.apply(Measurement {
                    station: stations.value(row).to_string(),
                    temperature: temperatures.value(row),
                });
            }

            outcome.merge(partial);
        }

        Ok(outcome)
    }
}
