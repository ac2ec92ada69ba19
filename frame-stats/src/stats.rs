//! Statistics over a loaded frame table
//!
//! Pure functions: every series and aggregate is derived from the table
//! without mutating it. The rolling mean uses a running sum so the whole
//! series is computed in a single pass regardless of window size.

use crate::types::{FrameTable, Section};
use serde::Serialize;

/// Arithmetic mean of a series
///
/// Returns NaN for an empty slice, matching the reference semantics of
/// aggregating an empty column.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rolling mean with partial windows at the start
///
/// Element `i` is the mean of `values[max(0, i-window+1) ..= i]`, so the
/// output has the same length as the input and element 0 equals
/// `values[0]`. `window` must be at least 1.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window > 0, "rolling window must be at least 1");

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        let count = (i + 1).min(window);
        out.push(sum / count as f64);
    }
    out
}

/// FPS series derived from a rolling frame-time series (ms)
///
/// The division is deliberately unguarded: a rolling mean of zero yields
/// an infinite FPS value that propagates into the chart and the printed
/// average, as in the reference implementation.
pub fn fps_series(rolling_ms: &[f64]) -> Vec<f64> {
    rolling_ms.iter().map(|&ms| 1000.0 / ms).collect()
}

/// Mean duration of one section column, in ms
pub fn section_average(table: &FrameTable, section: Section) -> f64 {
    mean(&table.section(section))
}

/// Aggregate statistics of a whole profiling run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of frame records in the table
    pub frames: usize,
    /// Mean `Total(ms)` across all frames
    pub avg_total_ms: f64,
    /// Mean of the rolling FPS series
    pub avg_fps: f64,
    /// Smallest `Total(ms)` in the table
    pub min_total_ms: f64,
    /// Largest `Total(ms)` in the table
    pub max_total_ms: f64,
    /// Mean duration per section, in reporting order
    pub section_averages: Vec<SectionAverage>,
}

/// Mean duration of one timed section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionAverage {
    pub section: Section,
    pub average_ms: f64,
}

impl Summary {
    /// Compute the summary of a table using the given rolling window
    pub fn from_table(table: &FrameTable, window: usize) -> Self {
        let totals = table.totals();
        let fps = fps_series(&rolling_mean(&totals, window));

        Self {
            frames: table.len(),
            avg_total_ms: mean(&totals),
            avg_fps: mean(&fps),
            min_total_ms: totals.iter().copied().fold(f64::INFINITY, f64::min),
            max_total_ms: totals.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            section_averages: Section::ALL
                .iter()
                .map(|&section| SectionAverage {
                    section,
                    average_ms: section_average(table, section),
                })
                .collect(),
        }
    }
}
