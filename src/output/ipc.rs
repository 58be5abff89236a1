use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use arrow_array::{ArrayRef, Float64Array, RecordBatch, StringArray};
use arrow_ipc::writer::FileWriter;
use arrow_schema::{ArrowError, DataType, Field, Schema};
use thiserror::Error;

use crate::engine::aggregate::finalize::StationSummary;

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

fn mart_schema() -> Schema {
    Schema::new(vec![
        Field::new("station", DataType::Utf8, false),
        Field::new("min", DataType::Float64, false),
        Field::new("mean", DataType::Float64, false),
        Field::new("max", DataType::Float64, false),
    ])
}

/// Persists the summaries as one record batch in the Arrow IPC file format.
/// The values written are the finalized, already-rounded statistics.
pub fn write_summaries(path: &Path, summaries: &[StationSummary]) -> Result<(), IpcError> {
    let schema = Arc::new(mart_schema());

    let stations: ArrayRef = Arc::new(StringArray::from_iter_values(
        summaries.iter().map(|s| s.station.as_str()),
    ));
    let mins: ArrayRef = Arc::new(Float64Array::from_iter_values(
        summaries.iter().map(|s| s.min),
    ));
    let means: ArrayRef = Arc::new(Float64Array::from_iter_values(
        summaries.iter().map(|s| s.mean),
    ));
    let maxs: ArrayRef = Arc::new(Float64Array::from_iter_values(
        summaries.iter().map(|s| s.max),
    ));

    let batch = RecordBatch::try_new(Arc::clone(&schema), vec![stations, mins, means, maxs])?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = FileWriter::try_new(file, &schema)?;
    writer.write(&batch)?;
    writer.finish()?;
    Ok(())
}
