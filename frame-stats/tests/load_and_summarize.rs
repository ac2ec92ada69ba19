// End-to-end: write a profiler CSV to disk, load it, summarize it.

use frame_stats::{load_csv, Section, StatsError, Summary};
use std::io::Write;

fn write_fixture(contents: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let mut file = std::fs::File::create(dir.path().join("frame_stats.csv")).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    dir
}

#[test]
fn load_and_summarize_small_run() {
    let dir = write_fixture(
        "\
Frame,Total(ms),Work(ms),Input(ms),AI(ms),Physics(ms),Render(ms)
0,20.0,15.0,1.0,2.0,3.0,4.0
1,10.0,8.0,0.5,1.0,1.5,2.0
2,30.0,24.0,1.5,3.0,4.5,6.0
",
    );

    let table = load_csv(&dir.path().join("frame_stats.csv")).unwrap();
    assert_eq!(table.len(), 3);

    let summary = Summary::from_table(&table, 60);
    assert_eq!(summary.frames, 3);
    assert_eq!(summary.avg_total_ms, 20.0);
    assert_eq!(summary.min_total_ms, 10.0);
    assert_eq!(summary.max_total_ms, 30.0);

    // Rolling means: 20, 15, 20 -> FPS 50, 66.66.., 50
    let expected_fps = (50.0 + 1000.0 / 15.0 + 50.0) / 3.0;
    assert!((summary.avg_fps - expected_fps).abs() < 1e-9);

    let averages: Vec<(Section, f64)> = summary
        .section_averages
        .iter()
        .map(|s| (s.section, s.average_ms))
        .collect();
    assert_eq!(
        averages,
        [
            (Section::Input, 1.0),
            (Section::Ai, 2.0),
            (Section::Physics, 3.0),
            (Section::Render, 4.0),
        ]
    );
}

#[test]
fn missing_section_column_aborts_load() {
    let dir = write_fixture(
        "\
Frame,Total(ms),Work(ms),Input(ms),AI(ms),Physics(ms)
0,20.0,15.0,1.0,2.0,3.0
",
    );

    let err = load_csv(&dir.path().join("frame_stats.csv")).unwrap_err();
    match err {
        StatsError::MissingColumn(name) => assert_eq!(name, "Render(ms)"),
        other => panic!("expected MissingColumn, got {:?}", other),
    }
}
