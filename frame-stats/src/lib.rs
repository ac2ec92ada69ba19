//! Frame Statistics Library
//!
//! A small, reusable library for working with per-frame profiler
//! measurements:
//! - Loads `frame_stats.csv` files into an immutable frame table
//! - Derives rolling means, FPS series, and per-section averages
//! - Records live frame timings into a sliding window and writes them
//!   back out as the same CSV schema
//!
//! The library does NOT render charts or print reports; presentation is
//! the application layer's job (frame-stats-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use frame_stats::{load_csv, Summary, DEFAULT_WINDOW};
//! use std::path::Path;
//!
//! let table = load_csv(Path::new("frame_stats.csv")).unwrap();
//! let summary = Summary::from_table(&table, DEFAULT_WINDOW);
//! println!("{} frames, {:.2} ms average", summary.frames, summary.avg_total_ms);
//! ```

// Public modules
pub mod loader;
pub mod recorder;
pub mod stats;
pub mod types;

// Re-export main types for convenience
pub use loader::load_csv;
pub use recorder::{FrameRecorder, FrameSample};
pub use stats::{fps_series, mean, rolling_mean, section_average, SectionAverage, Summary};
pub use types::{
    FrameRecord, FrameTable, Result, Section, StatsError, DEFAULT_WINDOW, TARGET_FRAME_MS,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty table has no rows and the recorder starts idle
        let table = FrameTable::default();
        assert!(table.is_empty());
        let recorder = FrameRecorder::new();
        assert_eq!(recorder.window_len(), 0);
    }
}
