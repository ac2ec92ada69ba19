//! Simulated profiling session
//!
//! Runs a few hundred fake frames through the recorder, timing the four
//! sections with varying busy-work, and writes the result to
//! `frame_stats.csv` — ready for `frame-stats-cli` to turn into a report.
//!
//! Usage:
//!   cargo run --example record_session [frame_count]

use frame_stats::{FrameRecorder, Section};
use std::env;
use std::path::Path;
use std::time::{Duration, Instant};

/// Keeps the CPU busy for roughly the requested period
fn simulate_work(period: Duration) {
    let end = Instant::now() + period;
    let mut dummy: u64 = 0;
    let mut iter = 0u32;
    loop {
        // Cheap integer mixing so the loop is not optimized away
        dummy = dummy.wrapping_mul(1664525).wrapping_add(1013904223);
        dummy ^= dummy >> 13;
        iter = iter.wrapping_add(1);
        // Check the clock every 256 iterations to keep overhead low
        if iter % 256 == 0 && Instant::now() >= end {
            break;
        }
    }
    std::hint::black_box(dummy);
}

/// Deterministic per-frame load factor in [0, 1)
fn load_factor(frame: u64) -> f64 {
    let mixed = frame
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    (mixed >> 40) as f64 / (1u64 << 24) as f64
}

fn main() {
    env_logger::init();

    let frame_count: u64 = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(300);

    println!("Recording {} simulated frames...", frame_count);
    let mut recorder = FrameRecorder::new();

    for frame in 0..frame_count {
        let frame_start = Instant::now();
        let load = load_factor(frame);
        // Every ~100th frame spikes, like a GC pause or asset load
        let spike = if frame % 97 == 0 { 3.0 } else { 1.0 };

        recorder.time_section(Section::Input, || {
            simulate_work(Duration::from_micros(200));
        });
        recorder.time_section(Section::Ai, || {
            simulate_work(Duration::from_micros((800.0 * load * spike) as u64 + 300));
        });
        recorder.time_section(Section::Physics, || {
            simulate_work(Duration::from_micros((1200.0 * load) as u64 + 500));
        });
        recorder.time_section(Section::Render, || {
            simulate_work(Duration::from_micros((2000.0 * load * spike) as u64 + 1000));
        });

        let work = frame_start.elapsed();
        // Pad the frame toward a 60 FPS cadence; spiky frames overrun
        let target = Duration::from_micros(16_670);
        if work < target {
            std::thread::sleep(target - work);
        }
        recorder.end_frame(frame_start.elapsed(), work);
    }

    let output = Path::new("frame_stats.csv");
    recorder.write_csv(output).expect("failed to write CSV");

    println!("\n=== Session ===");
    println!("Frames recorded: {}", recorder.records().len());
    println!("Window average: {:.2} ms", recorder.avg_total_ms());
    println!("Window FPS: {:.2}", recorder.fps());
    let worst = recorder.worst_overall();
    println!(
        "Worst frame: #{} at {:.2} ms",
        worst.frame, worst.total_ms
    );
    println!("Wrote {:?}", output);
}
