//! Live frame recording
//!
//! The capture side of the toolkit: a fixed-size ring buffer over the most
//! recent frames with O(1) running-sum averages, worst-frame tracking, and
//! scoped timing of the four per-frame sections. Completed frames are also
//! kept as a full history that can be written back out as the same CSV
//! schema the loader reads.

use crate::types::{FrameRecord, Result, Section, DEFAULT_WINDOW};
use std::path::Path;
use std::time::{Duration, Instant};

/// One frame in the recorder's window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameSample {
    /// Frame index assigned by the recorder
    pub frame: u64,
    /// Full frame duration in ms
    pub total_ms: f64,
    /// Active work duration in ms
    pub work_ms: f64,
}

/// Records per-frame timings into a sliding window and a full history
///
/// The window holds the most recent [`capacity`](FrameRecorder::capacity)
/// frames. Averages over the window are maintained as running sums, so a
/// frame costs O(1) to record; only eviction of the worst frame triggers a
/// rescan of the buffer.
#[derive(Debug, Clone)]
pub struct FrameRecorder {
    window: Vec<FrameSample>,
    count: usize,
    sum_total_ms: f64,
    sum_work_ms: f64,
    worst_window: FrameSample,
    worst_overall: FrameSample,
    current_sections: [Duration; 4],
    next_frame: u64,
    history: Vec<FrameRecord>,
}

impl FrameRecorder {
    /// Create a recorder with the default 60-frame window
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_WINDOW)
    }

    /// Create a recorder with a custom window size (must be at least 1)
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "recorder window must be at least 1");
        Self {
            window: vec![FrameSample::default(); capacity],
            count: 0,
            sum_total_ms: 0.0,
            sum_work_ms: 0.0,
            worst_window: FrameSample::default(),
            worst_overall: FrameSample::default(),
            current_sections: [Duration::ZERO; 4],
            next_frame: 0,
            history: Vec::new(),
        }
    }

    /// Time one section of the current frame
    ///
    /// Runs the closure, measures its wall-clock duration, and accumulates
    /// it into the in-progress frame. Returns the closure's result.
    pub fn time_section<F, R>(&mut self, section: Section, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        self.record_section(section, start.elapsed());
        result
    }

    /// Add an already-measured duration to a section of the current frame
    pub fn record_section(&mut self, section: Section, duration: Duration) {
        let slot = Section::ALL.iter().position(|&s| s == section).unwrap_or(0);
        self.current_sections[slot] += duration;
    }

    /// Complete the current frame and push it into window and history
    ///
    /// `total` is the full frame duration (including waits), `work` the
    /// active portion. Section accumulators are consumed and cleared for
    /// the next frame.
    pub fn end_frame(&mut self, total: Duration, work: Duration) -> FrameSample {
        let sample = FrameSample {
            frame: self.next_frame,
            total_ms: duration_ms(total),
            work_ms: duration_ms(work),
        };

        // Write slot is the frame index modulo the window size
        let capacity = self.window.len();
        let slot = (sample.frame as usize) % capacity;
        if self.is_full() {
            self.sum_total_ms -= self.window[slot].total_ms;
            self.sum_work_ms -= self.window[slot].work_ms;
        }
        self.window[slot] = sample;
        self.sum_total_ms += sample.total_ms;
        self.sum_work_ms += sample.work_ms;
        self.count = (self.count + 1).min(capacity);

        if sample.total_ms > self.worst_overall.total_ms {
            self.worst_overall = sample;
        }
        if sample.total_ms > self.worst_window.total_ms {
            self.worst_window = sample;
        }
        // The previous worst may have been evicted from the window
        if sample.frame - self.worst_window.frame > (capacity as u64 - 1) {
            self.rescan_worst_window();
        }

        self.history.push(FrameRecord {
            frame: sample.frame,
            total_ms: sample.total_ms,
            work_ms: sample.work_ms,
            input_ms: duration_ms(self.current_sections[0]),
            ai_ms: duration_ms(self.current_sections[1]),
            physics_ms: duration_ms(self.current_sections[2]),
            render_ms: duration_ms(self.current_sections[3]),
        });
        self.current_sections = [Duration::ZERO; 4];
        self.next_frame += 1;

        sample
    }

    fn rescan_worst_window(&mut self) {
        self.worst_window = FrameSample::default();
        for sample in &self.window[..self.count.min(self.window.len())] {
            if sample.total_ms > self.worst_window.total_ms {
                self.worst_window = *sample;
            }
        }
    }

    /// Mean `Total(ms)` over the current window
    pub fn avg_total_ms(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum_total_ms / self.count as f64
    }

    /// Mean `Work(ms)` over the current window
    pub fn avg_work_ms(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum_work_ms / self.count as f64
    }

    /// Smoothed FPS over the current window (0 when no frames recorded)
    pub fn fps(&self) -> f64 {
        let avg = self.avg_total_ms();
        if avg > 0.0 {
            1000.0 / avg
        } else {
            0.0
        }
    }

    /// Slowest frame seen since the recorder was created or reset
    pub fn worst_overall(&self) -> FrameSample {
        self.worst_overall
    }

    /// Slowest frame currently inside the window
    pub fn worst_in_window(&self) -> FrameSample {
        self.worst_window
    }

    /// Number of frames currently in the window
    pub fn window_len(&self) -> usize {
        self.count
    }

    /// Window capacity in frames
    pub fn capacity(&self) -> usize {
        self.window.len()
    }

    /// True once the window has wrapped at least once
    pub fn is_full(&self) -> bool {
        self.count == self.window.len()
    }

    /// Every completed frame since creation or reset, in order
    pub fn records(&self) -> &[FrameRecord] {
        &self.history
    }

    /// Clear all recorded state, including the history
    pub fn reset(&mut self) {
        let capacity = self.window.len();
        self.window = vec![FrameSample::default(); capacity];
        self.count = 0;
        self.sum_total_ms = 0.0;
        self.sum_work_ms = 0.0;
        self.worst_window = FrameSample::default();
        self.worst_overall = FrameSample::default();
        self.current_sections = [Duration::ZERO; 4];
        self.next_frame = 0;
        self.history.clear();
    }

    /// Write the full history as a profiler CSV
    ///
    /// Produces the same schema [`crate::loader::load_csv`] reads, so a
    /// captured session feeds straight into the report pipeline.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        log::info!(
            "Writing {} frame records to {:?}",
            self.history.len(),
            path
        );
        let file = std::fs::File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);
        for record in &self.history {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for FrameRecorder {
    fn default() -> Self {
        Self::new()
    }
}

fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_empty_recorder() {
        let rec = FrameRecorder::new();
        assert_eq!(rec.window_len(), 0);
        assert_eq!(rec.capacity(), DEFAULT_WINDOW);
        assert!(!rec.is_full());
        assert_eq!(rec.avg_total_ms(), 0.0);
        assert_eq!(rec.fps(), 0.0);
    }

    #[test]
    fn test_window_average_uses_only_recent_frames() {
        let mut rec = FrameRecorder::with_capacity(4);
        for v in [10, 10, 10, 10] {
            rec.end_frame(ms(v), ms(v - 2));
        }
        assert!(rec.is_full());
        assert_eq!(rec.avg_total_ms(), 10.0);

        // Two 30ms frames evict two 10ms frames
        rec.end_frame(ms(30), ms(28));
        rec.end_frame(ms(30), ms(28));
        assert_eq!(rec.avg_total_ms(), 20.0);
        assert_eq!(rec.fps(), 50.0);
    }

    #[test]
    fn test_worst_frame_tracking() {
        let mut rec = FrameRecorder::with_capacity(3);
        rec.end_frame(ms(10), ms(8));
        rec.end_frame(ms(50), ms(45)); // frame 1: the spike
        rec.end_frame(ms(10), ms(8));

        assert_eq!(rec.worst_in_window().frame, 1);
        assert_eq!(rec.worst_overall().frame, 1);

        // Push the spike out of the window; worst-in-window rescans,
        // worst-overall stays put
        rec.end_frame(ms(20), ms(18));
        rec.end_frame(ms(15), ms(12));
        assert_eq!(rec.worst_in_window().frame, 3);
        assert_eq!(rec.worst_overall().frame, 1);
        assert_eq!(rec.worst_overall().total_ms, 50.0);
    }

    #[test]
    fn test_sections_accumulate_into_history() {
        let mut rec = FrameRecorder::new();
        rec.record_section(Section::Input, ms(1));
        rec.record_section(Section::Ai, ms(2));
        rec.record_section(Section::Physics, ms(3));
        rec.record_section(Section::Render, ms(4));
        // A section timed twice in one frame accumulates
        rec.record_section(Section::Render, ms(1));
        rec.end_frame(ms(20), ms(11));

        let record = rec.records()[0];
        assert_eq!(record.frame, 0);
        assert_eq!(record.input_ms, 1.0);
        assert_eq!(record.ai_ms, 2.0);
        assert_eq!(record.physics_ms, 3.0);
        assert_eq!(record.render_ms, 5.0);

        // Accumulators cleared for the next frame
        rec.end_frame(ms(10), ms(9));
        assert_eq!(rec.records()[1].input_ms, 0.0);
    }

    #[test]
    fn test_time_section_returns_closure_result() {
        let mut rec = FrameRecorder::new();
        let value = rec.time_section(Section::Physics, || 6 * 7);
        assert_eq!(value, 42);
        rec.end_frame(ms(5), ms(5));
        assert!(rec.records()[0].physics_ms >= 0.0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut rec = FrameRecorder::with_capacity(2);
        rec.end_frame(ms(30), ms(25));
        rec.reset();
        assert_eq!(rec.window_len(), 0);
        assert_eq!(rec.records().len(), 0);
        assert_eq!(rec.worst_overall().total_ms, 0.0);
        // Frame numbering restarts
        let sample = rec.end_frame(ms(10), ms(9));
        assert_eq!(sample.frame, 0);
    }

    #[test]
    fn test_csv_round_trip() {
        let mut rec = FrameRecorder::new();
        rec.record_section(Section::Input, ms(1));
        rec.end_frame(ms(20), ms(15));
        rec.end_frame(ms(18), ms(14));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame_stats.csv");
        rec.write_csv(&path).unwrap();

        let table = crate::loader::load_csv(&path).unwrap();
        assert_eq!(table.records(), rec.records());
    }
}
