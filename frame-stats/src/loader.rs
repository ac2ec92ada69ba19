//! Profiler CSV loader
//!
//! Reads a `frame_stats.csv` file into a [`FrameTable`]. The header is
//! validated before any row is parsed so that a malformed schema fails
//! fast, with the offending column named. Extra columns are ignored.

use crate::types::{FrameRecord, FrameTable, Result, StatsError};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column headers that must be present, in the order the profiler writes them
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Frame",
    "Total(ms)",
    "Work(ms)",
    "Input(ms)",
    "AI(ms)",
    "Physics(ms)",
    "Render(ms)",
];

/// Load a profiler CSV file into a frame table
///
/// Fails with [`StatsError::Io`] if the file cannot be opened,
/// [`StatsError::MissingColumn`] if a required header is absent, and
/// [`StatsError::InvalidValue`] if a duration cell is not numeric.
pub fn load_csv(path: &Path) -> Result<FrameTable> {
    log::info!("Loading frame stats: {:?}", path);
    let file = File::open(path)?;
    let table = read_table(file)?;
    log::info!("Loaded {} frame records from {:?}", table.len(), path);
    Ok(table)
}

/// Parse frame records from any CSV reader
///
/// Split out from [`load_csv`] so tests can feed in-memory data without
/// touching the filesystem.
pub fn read_table<R: Read>(reader: R) -> Result<FrameTable> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    // Validate the schema up front: a missing column aborts before any
    // row is parsed and before any output is produced downstream.
    let headers = rdr.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.trim() == required) {
            return Err(StatsError::MissingColumn(required.to_string()));
        }
    }

    let mut records = Vec::new();
    let mut last_frame: Option<u64> = None;
    for (index, row) in rdr.deserialize::<FrameRecord>().enumerate() {
        // CSV rows are 1-based and the header occupies the first line
        let line = index + 2;
        let record = row.map_err(|e| invalid_value(line, e))?;

        if let Some(prev) = last_frame {
            if record.frame <= prev {
                log::warn!(
                    "Frame index not monotonic at line {}: {} after {}",
                    line,
                    record.frame,
                    prev
                );
            }
        }
        last_frame = Some(record.frame);
        records.push(record);
    }

    if records.is_empty() {
        return Err(StatsError::EmptyTable);
    }

    Ok(FrameTable::new(records))
}

fn invalid_value(line: usize, err: csv::Error) -> StatsError {
    match err.kind() {
        csv::ErrorKind::Deserialize { .. } => StatsError::InvalidValue {
            row: line,
            message: err.to_string(),
        },
        _ => StatsError::Csv(err),
    }
}
