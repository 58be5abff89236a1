use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::engine::aggregate::finalize::StationSummary;

/// Writes the ordered summaries as delimited text with a header row.
/// Every numeric field carries exactly 2 decimal digits.
pub fn write_summaries(
    path: &Path,
    delimiter: char,
    summaries: &[StationSummary],
) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "station{d}min{d}mean{d}max", d = delimiter)?;
    for summary in summaries {
        writeln!(
            writer,
            "{}{d}{:.2}{d}{:.2}{d}{:.2}",
            summary.station,
            summary.min,
            summary.mean,
            summary.max,
            d = delimiter
        )?;
    }
    writer.flush()?;

    info!(
        target: "stationmart::output",
        path = %path.display(),
        stations = summaries.len(),
        "mart written"
    );
    Ok(())
}
