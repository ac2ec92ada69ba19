//! Summary report output
//!
//! Prints the fixed-order text block to stdout and optionally writes the
//! same aggregates as JSON. The writer is generic so tests can capture the
//! exact bytes.

use anyhow::{Context, Result};
use frame_stats::Summary;
use std::io::{self, Write};
use std::path::Path;

/// Write the summary block to any writer
///
/// The layout and two-decimal formatting are fixed; downstream tooling
/// greps this output.
pub fn write_summary<W: Write>(writer: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "=== Summary Statistics ===")?;
    writeln!(writer, "Total Frames: {}", summary.frames)?;
    writeln!(writer, "Average Frame Time: {:.2} ms", summary.avg_total_ms)?;
    writeln!(writer, "Average FPS: {:.2}", summary.avg_fps)?;
    writeln!(writer, "Min Frame Time: {:.2} ms", summary.min_total_ms)?;
    writeln!(writer, "Max Frame Time: {:.2} ms", summary.max_total_ms)?;
    writeln!(writer)?;
    writeln!(writer, "Section Averages:")?;
    for avg in &summary.section_averages {
        writeln!(writer, "  {}: {:.2} ms", avg.section, avg.average_ms)?;
    }
    Ok(())
}

/// Print the summary block to stdout
pub fn print_summary(summary: &Summary) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_summary(&mut handle, summary)
}

/// Write the summary as pretty-printed JSON
pub fn write_json(summary: &Summary, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create JSON summary: {:?}", path))?;
    serde_json::to_writer_pretty(file, summary)
        .with_context(|| format!("Failed to serialize summary to {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_stats::{FrameRecord, FrameTable};

    fn single_row_summary() -> Summary {
        let table = FrameTable::new(vec![FrameRecord {
            frame: 0,
            total_ms: 20.0,
            work_ms: 15.0,
            input_ms: 1.0,
            ai_ms: 2.0,
            physics_ms: 3.0,
            render_ms: 4.0,
        }]);
        Summary::from_table(&table, 60)
    }

    #[test]
    fn test_summary_block_exact_output() {
        let mut buffer = Vec::new();
        write_summary(&mut buffer, &single_row_summary()).unwrap();

        let expected = "\n\
=== Summary Statistics ===\n\
Total Frames: 1\n\
Average Frame Time: 20.00 ms\n\
Average FPS: 50.00\n\
Min Frame Time: 20.00 ms\n\
Max Frame Time: 20.00 ms\n\
\n\
Section Averages:\n\
\x20 Input: 1.00 ms\n\
\x20 AI: 2.00 ms\n\
\x20 Physics: 3.00 ms\n\
\x20 Render: 4.00 ms\n";
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }

    #[test]
    fn test_json_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_json(&single_row_summary(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["frames"], 1);
        assert_eq!(value["avg_total_ms"], 20.0);
        assert_eq!(value["section_averages"][1]["section"], "AI");
        assert_eq!(value["section_averages"][3]["average_ms"], 4.0);
    }
}
