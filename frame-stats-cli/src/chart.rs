//! Composite chart rendering
//!
//! Draws the four report panels (frame time, rolling FPS, stacked section
//! breakdown, section averages) onto a single PNG. Rendering is a pure
//! sink: it reads the table and derived series, writes one image file,
//! and returns nothing.

use anyhow::Result;
use frame_stats::{FrameTable, Section, TARGET_FRAME_MS};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::path::Path;

const TOTAL_COLOR: RGBColor = RGBColor(31, 119, 180);
const WORK_COLOR: RGBColor = RGBColor(255, 127, 14);
const FPS_COLOR: RGBColor = RGBColor(0, 128, 0);
const TARGET_COLOR: RGBColor = RGBColor(255, 0, 0);

/// Fixed per-section chart colors
///
/// A lookup table rather than positional lists: stacking and legend order
/// always come from `Section::ALL`.
pub const SECTION_COLORS: [(Section, RGBColor); 4] = [
    (Section::Input, RGBColor(0xFF, 0x6B, 0x6B)),
    (Section::Ai, RGBColor(0x4E, 0xCD, 0xC4)),
    (Section::Physics, RGBColor(0x45, 0xB7, 0xD1)),
    (Section::Render, RGBColor(0xFF, 0xA0, 0x7A)),
];

fn section_color(section: Section) -> RGBColor {
    SECTION_COLORS
        .iter()
        .find(|(s, _)| *s == section)
        .map(|(_, c)| *c)
        .unwrap_or(BLACK)
}

/// Render the composite report image
///
/// Overwrites `path` unconditionally. `fps` is the rolling FPS series and
/// `window` the window size it was computed with (used for the legend).
pub fn render(
    table: &FrameTable,
    fps: &[f64],
    window: usize,
    size: (u32, u32),
    path: &Path,
) -> Result<()> {
    log::info!("Rendering {}x{} chart to {:?}", size.0, size.1, path);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let titled = root.titled(
        "Profiler Metrics Visualization",
        FontDesc::new(FontFamily::SansSerif, 30.0, FontStyle::Bold),
    )?;

    let panels = titled.split_evenly((2, 2));
    draw_frame_time_panel(&panels[0], table)?;
    draw_fps_panel(&panels[1], table, fps, window)?;
    draw_breakdown_panel(&panels[2], table)?;
    draw_averages_panel(&panels[3], table)?;

    root.present()?;
    log::debug!("Chart written to {:?}", path);
    Ok(())
}

/// Largest finite value in the series, clamped from below
fn axis_max(values: &[f64], floor: f64) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(floor, f64::max)
}

/// X axis bounds over the frame index column
fn frame_bounds(frames: &[u64]) -> (f64, f64) {
    let first = frames.first().copied().unwrap_or(0) as f64;
    let last = frames.last().copied().unwrap_or(0) as f64;
    (first, last.max(first + 1.0))
}

/// Cumulative section sums, one layer per section in stacking order
///
/// `layers[j][i]` is the sum of sections `0..=j` at frame `i`, so the last
/// layer is the full stack height.
fn stacked_layers(table: &FrameTable) -> Vec<Vec<f64>> {
    let mut layers = Vec::with_capacity(Section::ALL.len());
    let mut acc = vec![0.0; table.len()];
    for section in Section::ALL {
        for (sum, v) in acc.iter_mut().zip(table.section(section)) {
            *sum += v;
        }
        layers.push(acc.clone());
    }
    layers
}

fn draw_frame_time_panel<DB>(area: &DrawingArea<DB, Shift>, table: &FrameTable) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let frames: Vec<f64> = table.frames().iter().map(|&f| f as f64).collect();
    let totals = table.totals();
    let works = table.works();

    let (x_min, x_max) = frame_bounds(table.frames().as_slice());
    let y_max = axis_max(&totals, TARGET_FRAME_MS).max(axis_max(&works, 0.0)) * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Frame Time Over Time", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Frame")
        .y_desc("Time (ms)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            frames.iter().copied().zip(totals.iter().copied()),
            &TOTAL_COLOR,
        ))?
        .label("Total Frame Time")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], &TOTAL_COLOR));

    chart
        .draw_series(LineSeries::new(
            frames.iter().copied().zip(works.iter().copied()),
            &WORK_COLOR,
        ))?
        .label("Work Time")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], &WORK_COLOR));

    chart
        .draw_series(DashedLineSeries::new(
            vec![(x_min, TARGET_FRAME_MS), (x_max, TARGET_FRAME_MS)],
            8,
            6,
            TARGET_COLOR.stroke_width(1),
        ))?
        .label("60 FPS Target (16.67ms)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], &TARGET_COLOR));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.7))
        .border_style(&BLACK.mix(0.3))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    Ok(())
}

fn draw_fps_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    table: &FrameTable,
    fps: &[f64],
    window: usize,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let frames: Vec<f64> = table.frames().iter().map(|&f| f as f64).collect();
    let (x_min, x_max) = frame_bounds(table.frames().as_slice());
    let y_max = axis_max(fps, 60.0) * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("FPS Over Time (Rolling Average)", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

    chart.configure_mesh().x_desc("Frame").y_desc("FPS").draw()?;

    chart
        .draw_series(LineSeries::new(
            frames.iter().copied().zip(fps.iter().copied()),
            &FPS_COLOR,
        ))?
        .label(format!("FPS (rolling {} frames)", window))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], &FPS_COLOR));

    chart
        .draw_series(DashedLineSeries::new(
            vec![(x_min, 60.0), (x_max, 60.0)],
            8,
            6,
            TARGET_COLOR.stroke_width(1),
        ))?
        .label("60 FPS Target")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], &TARGET_COLOR));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.7))
        .border_style(&BLACK.mix(0.3))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    Ok(())
}

fn draw_breakdown_panel<DB>(area: &DrawingArea<DB, Shift>, table: &FrameTable) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let frames: Vec<f64> = table.frames().iter().map(|&f| f as f64).collect();
    let layers = stacked_layers(table);

    let (x_min, x_max) = frame_bounds(table.frames().as_slice());
    let top = layers.last().map(|l| axis_max(l, 1.0)).unwrap_or(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption("Section Breakdown (Stacked)", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0.0..top * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Frame")
        .y_desc("Time (ms)")
        .draw()?;

    // Tallest cumulative layer first so each band paints over the area
    // below the next layer down
    for (idx, section) in Section::ALL.iter().enumerate().rev() {
        let color = section_color(*section);
        chart.draw_series(AreaSeries::new(
            frames.iter().copied().zip(layers[idx].iter().copied()),
            0.0,
            color.mix(0.7),
        ))?;
    }

    // Legend entries in stacking order, not draw order
    for section in Section::ALL {
        let color = section_color(section);
        chart
            .draw_series(LineSeries::new(
                std::iter::empty::<(f64, f64)>(),
                color.mix(0.7).filled(),
            ))?
            .label(section.name())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.mix(0.7).filled())
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.7))
        .border_style(&BLACK.mix(0.3))
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

fn draw_averages_panel<DB>(area: &DrawingArea<DB, Shift>, table: &FrameTable) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let averages: Vec<f64> = Section::ALL
        .iter()
        .map(|&section| frame_stats::section_average(table, section))
        .collect();
    let y_max = axis_max(&averages, 1.0) * 1.25;

    let mut chart = ChartBuilder::on(area)
        .caption("Average Section Times", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(
            (0u32..Section::ALL.len() as u32).into_segmented(),
            0.0..y_max,
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|pos| {
            let idx = match pos {
                SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => *i as usize,
                SegmentValue::Last => return String::new(),
            };
            Section::ALL
                .get(idx)
                .map(|s| s.name().to_string())
                .unwrap_or_default()
        })
        .y_desc("Average Time (ms)")
        .draw()?;

    let value_font = FontDesc::new(FontFamily::SansSerif, 15.0, FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    for (i, section) in Section::ALL.iter().enumerate() {
        let color = section_color(*section);
        let avg = averages[i];
        let x = i as u32;
        let bar = || [(SegmentValue::Exact(x), 0.0), (SegmentValue::Exact(x + 1), avg)];
        chart.draw_series(std::iter::once(Rectangle::new(bar(), color.mix(0.7).filled())))?;
        chart.draw_series(std::iter::once(Rectangle::new(bar(), BLACK.stroke_width(1))))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("{:.2}ms", avg),
            (SegmentValue::CenterOf(x), avg),
            value_font.clone(),
        )))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_stats::FrameRecord;

    fn table() -> FrameTable {
        FrameTable::new(vec![
            FrameRecord {
                frame: 0,
                total_ms: 20.0,
                work_ms: 15.0,
                input_ms: 1.0,
                ai_ms: 2.0,
                physics_ms: 3.0,
                render_ms: 4.0,
            },
            FrameRecord {
                frame: 1,
                total_ms: 10.0,
                work_ms: 8.0,
                input_ms: 0.5,
                ai_ms: 1.0,
                physics_ms: 1.5,
                render_ms: 2.0,
            },
        ])
    }

    #[test]
    fn test_stacked_layers_are_cumulative() {
        let layers = stacked_layers(&table());
        assert_eq!(layers.len(), 4);
        assert_eq!(layers[0], [1.0, 0.5]);
        assert_eq!(layers[1], [3.0, 1.5]);
        assert_eq!(layers[2], [6.0, 3.0]);
        assert_eq!(layers[3], [10.0, 5.0]);
    }

    #[test]
    fn test_axis_max_ignores_non_finite() {
        let values = [10.0, f64::INFINITY, 25.0, f64::NAN];
        assert_eq!(axis_max(&values, 0.0), 25.0);
        // The floor wins over smaller data
        assert_eq!(axis_max(&[1.0, 2.0], 60.0), 60.0);
    }

    #[test]
    fn test_frame_bounds_degenerate_run() {
        assert_eq!(frame_bounds(&[5]), (5.0, 6.0));
        assert_eq!(frame_bounds(&[0, 1, 2]), (0.0, 2.0));
    }

    #[test]
    fn test_every_section_has_a_color() {
        for section in Section::ALL {
            assert!(SECTION_COLORS.iter().any(|(s, _)| *s == section));
        }
    }
}
