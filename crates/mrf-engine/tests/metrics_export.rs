use std::fs;

use mrf_engine::metrics::{IterationSample, MetricsRecorder};
use tempfile::tempdir;

#[test]
fn write_csv_emits_the_header_and_one_row_per_sample() {
    let mut recorder = MetricsRecorder::new();
    recorder.push_sample(IterationSample {
        iteration: 0,
        sites_changed: 12,
        changed_fraction: 0.75,
        energy_delta: -3.5,
    });
    recorder.push_sample(IterationSample {
        iteration: 1,
        sites_changed: 0,
        changed_fraction: 0.0,
        energy_delta: 0.0,
    });

    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("metrics.csv");
    recorder.write_csv(&path).expect("write metrics");

    let contents = fs::read_to_string(&path).expect("read metrics");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "iteration,sites_changed,changed_fraction,energy_delta"
    );
    assert_eq!(lines[1], "0,12,0.750000,-3.500000");
    assert_eq!(lines[2], "1,0,0.000000,0.000000");
}

#[test]
fn write_csv_on_an_empty_recorder_leaves_only_the_header() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("empty.csv");
    MetricsRecorder::new().write_csv(&path).expect("write metrics");

    let contents = fs::read_to_string(&path).expect("read metrics");
    assert_eq!(
        contents.trim_end(),
        "iteration,sites_changed,changed_fraction,energy_delta"
    );
}
