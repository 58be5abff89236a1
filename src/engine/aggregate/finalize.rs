use thiserror::Error;

use crate::engine::aggregate::state::StationTable;

/// Final reported statistics for one station, rounded for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSummary {
    pub station: String,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FinalizeError {
    /// A station with zero folded records points at a bookkeeping bug in
    /// the aggregation path, never at a property of the input. Surfaced
    /// fatally instead of defaulting the mean.
    #[error("station '{station}' reached finalization with zero records")]
    EmptyGroup { station: String },
}

/// Rounds to 2 decimals, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts running aggregates into reported statistics.
///
/// `mean = sum / count`. All three statistics are rounded here and nowhere
/// earlier in the pipeline. The result is ordered by station name, byte-wise
/// ascending.
pub fn finalize(table: StationTable) -> Result<Vec<StationSummary>, FinalizeError> {
    let mut summaries = Vec::with_capacity(table.len());

    for (station, agg) in table.into_groups() {
        if agg.count == 0 {
            return Err(FinalizeError::EmptyGroup { station });
        }
        let mean = agg.sum / agg.count as f64;
        summaries.push(StationSummary {
            station,
            min: round2(agg.min),
            mean: round2(mean),
            max: round2(agg.max),
        });
    }

    summaries.sort_unstable_by(|a, b| a.station.cmp(&b.station));
    Ok(summaries)
}
