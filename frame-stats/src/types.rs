//! Core types for the frame statistics library
//!
//! This module defines the fundamental types shared by the loader, the
//! statistics calculator, and the recorder: a single frame measurement,
//! the loaded table of measurements, and the library error type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for frame statistics operations
pub type Result<T> = std::result::Result<T, StatsError>;

/// Size of the rolling window used for FPS smoothing (frames)
///
/// 60 frames is roughly one second of data at the 60 FPS target rate.
pub const DEFAULT_WINDOW: usize = 60;

/// Frame time (ms) that corresponds to a steady 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;

/// One row of profiler output: the timing measurements of a single frame
///
/// Field names map 1:1 onto the CSV header written by the profiler
/// (`Frame,Total(ms),Work(ms),Input(ms),AI(ms),Physics(ms),Render(ms)`).
/// All durations are milliseconds and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Monotonically increasing frame index
    #[serde(rename = "Frame")]
    pub frame: u64,
    /// Full frame duration, including idle/wait time
    #[serde(rename = "Total(ms)")]
    pub total_ms: f64,
    /// Active work portion of the frame
    #[serde(rename = "Work(ms)")]
    pub work_ms: f64,
    /// Input section duration
    #[serde(rename = "Input(ms)")]
    pub input_ms: f64,
    /// AI section duration
    #[serde(rename = "AI(ms)")]
    pub ai_ms: f64,
    /// Physics section duration
    #[serde(rename = "Physics(ms)")]
    pub physics_ms: f64,
    /// Render section duration
    #[serde(rename = "Render(ms)")]
    pub render_ms: f64,
}

impl FrameRecord {
    /// Get the duration of one timed section of this frame
    pub fn section_ms(&self, section: Section) -> f64 {
        match section {
            Section::Input => self.input_ms,
            Section::Ai => self.ai_ms,
            Section::Physics => self.physics_ms,
            Section::Render => self.render_ms,
        }
    }
}

/// The four timed phases of per-frame work
///
/// The declaration order is also the stacking order in the section
/// breakdown chart and the print order in the summary block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Input,
    #[serde(rename = "AI")]
    Ai,
    Physics,
    Render,
}

impl Section {
    /// All sections in stacking/reporting order
    pub const ALL: [Section; 4] = [
        Section::Input,
        Section::Ai,
        Section::Physics,
        Section::Render,
    ];

    /// Human-readable name, as used in chart legends and the summary
    pub fn name(&self) -> &'static str {
        match self {
            Section::Input => "Input",
            Section::Ai => "AI",
            Section::Physics => "Physics",
            Section::Render => "Render",
        }
    }

    /// CSV column header for this section
    pub fn column(&self) -> &'static str {
        match self {
            Section::Input => "Input(ms)",
            Section::Ai => "AI(ms)",
            Section::Physics => "Physics(ms)",
            Section::Render => "Render(ms)",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered, read-only table of frame records loaded from a profiler CSV
///
/// The table is never mutated after loading; derived series (rolling means,
/// FPS) are computed as separate vectors by the `stats` module.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameTable {
    records: Vec<FrameRecord>,
}

impl FrameTable {
    /// Build a table from already-parsed records
    pub fn new(records: Vec<FrameRecord>) -> Self {
        Self { records }
    }

    /// Number of frames in the table
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the table holds no frames
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in file order
    pub fn records(&self) -> &[FrameRecord] {
        &self.records
    }

    /// Frame indices as a plotting series
    pub fn frames(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.frame).collect()
    }

    /// `Total(ms)` column
    pub fn totals(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.total_ms).collect()
    }

    /// `Work(ms)` column
    pub fn works(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.work_ms).collect()
    }

    /// One section column
    pub fn section(&self, section: Section) -> Vec<f64> {
        self.records.iter().map(|r| r.section_ms(section)).collect()
    }
}

/// Errors that can occur while loading or summarizing frame data
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Required column missing from CSV header: {0}")]
    MissingColumn(String),

    #[error("Invalid value in row {row}: {message}")]
    InvalidValue { row: usize, message: String },

    #[error("CSV file contains no frame records")]
    EmptyTable,

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FrameRecord {
        FrameRecord {
            frame: 0,
            total_ms: 20.0,
            work_ms: 15.0,
            input_ms: 1.0,
            ai_ms: 2.0,
            physics_ms: 3.0,
            render_ms: 4.0,
        }
    }

    #[test]
    fn test_section_accessor_matches_fields() {
        let r = record();
        assert_eq!(r.section_ms(Section::Input), 1.0);
        assert_eq!(r.section_ms(Section::Ai), 2.0);
        assert_eq!(r.section_ms(Section::Physics), 3.0);
        assert_eq!(r.section_ms(Section::Render), 4.0);
    }

    #[test]
    fn test_section_display_names() {
        let names: Vec<_> = Section::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["Input", "AI", "Physics", "Render"]);
    }

    #[test]
    fn test_table_columns() {
        let table = FrameTable::new(vec![record()]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.totals(), [20.0]);
        assert_eq!(table.works(), [15.0]);
        assert_eq!(table.section(Section::Physics), [3.0]);
        assert_eq!(table.frames(), [0]);
    }
}
