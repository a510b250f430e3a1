//! Tests for `pms_density::density` and `pms_density::summary`.

use std::collections::BTreeMap;

use pms_density::{
    bms::prelude::*,
    density::{
        DensityResult, DensitySnapshot, analyze, calculate_range_selection_stats,
        compute_range_rms,
    },
    summary::{aggregate_by_difficulty, difficulty_sort_key, summarize},
};
use pretty_assertions::assert_eq;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn note(time: f64, lane: u8) -> Note {
    Note {
        time,
        lane: Lane::new(lane).unwrap(),
    }
}

fn sample_chart() -> Chart {
    load_chart("tests/files/sample.pms", default_config())
        .unwrap()
        .chart
        .compile()
}

#[test]
fn sample_density() {
    let chart = sample_chart();
    let result = analyze(&chart.notes, chart.metadata.total);
    assert_eq!(result.per_second_total, vec![3, 3, 2, 2, 2]);
    assert_close(result.duration, 4.5);
    assert_eq!(result.max_density, 3.0);
    assert_close(result.average_density, 2.4);
    assert_close(result.chm_density, 2.5);
    assert_close(result.high_density_occupancy_rate, 100.0);

    // TOTAL 250 over 12 notes needs the last 4 notes, from the fourth bin on.
    let window = result.terminal_window.unwrap();
    assert_close(window, 1.8);
    assert_close(result.terminal_density, 4.0 / 1.8);
    assert_close(result.terminal_chm_density, 2.0);
    assert_close(result.terminal_density_difference, 2.0 - 2.75);
    assert_eq!(result.terminal_gustiness, 0.0);
    assert!(result.terminal_difficulty < 0.0);

    let lane_totals: Vec<u32> = (0..LANE_COUNT)
        .map(|lane| result.per_second_by_key.iter().map(|row| row[lane]).sum())
        .collect();
    assert_eq!(lane_totals, vec![4, 2, 1, 1, 1, 0, 2, 0, 1]);
}

#[test]
fn two_bins_regression() {
    let result = DensityResult::recompute(vec![1, 2], vec![], 2.0, Some(120.0));
    assert_close(result.high_density_occupancy_rate, 100.0);
    assert_close(result.average_density, 1.5);
    assert_close(result.terminal_density, 1.5);
    assert_eq!(result.terminal_window, Some(2.0));
}

#[test]
fn terminal_is_not_computed_without_total() {
    let notes: Vec<_> = (0..40)
        .map(|index| note(f64::from(index) * 0.3, (index % 9) as u8))
        .collect();
    let result = analyze(&notes, None);
    assert_eq!(result.terminal_window, None);
    assert_eq!(result.terminal_density, 0.0);
    assert_eq!(result.terminal_rms_density, 0.0);
    assert_eq!(result.terminal_cms_density, 0.0);
    assert_eq!(result.terminal_chm_density, 0.0);
    assert_eq!(result.terminal_gustiness, 0.0);
    assert_eq!(result.terminal_difficulty, 0.0);
    assert_eq!(result.terminal_difficulty_cms, 0.0);
    assert_eq!(result.terminal_difficulty_chm, 0.0);
    assert_eq!(result.terminal_density_difference, 0.0);

    let with_total = analyze(&notes, Some(200.0));
    assert!(with_total.terminal_window.is_some());
}

#[test]
fn zero_total_is_not_computed() {
    let notes = [note(0.0, 0), note(1.5, 1)];
    assert_eq!(analyze(&notes, Some(0.0)).terminal_window, None);
}

#[test]
fn leading_silence_is_trimmed() {
    let notes = [note(30.0, 0), note(30.5, 1), note(31.5, 2)];
    let result = analyze(&notes, None);
    assert_eq!(result.per_second_total, vec![2, 1]);
    assert_close(result.duration, 1.5);
}

#[test]
fn snapshot_round_trip_restores_every_field() {
    let chart = sample_chart();
    for total in [None, Some(250.0), Some(80.0)] {
        let result = analyze(&chart.notes, total);
        assert_eq!(result.snapshot().restore(total), result);
    }
}

#[cfg(feature = "serde")]
#[test]
fn snapshot_through_json() {
    let chart = sample_chart();
    let result = analyze(&chart.notes, chart.metadata.total);
    let json = serde_json::to_string(&result.snapshot()).unwrap();
    let snapshot: DensitySnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot.restore(chart.metadata.total), result);
}

#[test]
fn snapshot_without_lanes() {
    let snapshot = DensitySnapshot {
        per_second_total: vec![3, 3, 2, 2, 2],
        per_second_by_key: vec![],
        duration: 4.5,
    };
    let restored = snapshot.restore(Some(250.0));
    assert_eq!(restored.per_second_by_key.len(), 5);
    assert!(restored.per_second_by_key.iter().all(|row| row[1..].iter().all(|&count| count == 0)));
    assert_eq!(restored.terminal_window.map(|window| (window * 10.0).round()), Some(18.0));
}

#[test]
fn range_over_whole_chart_agrees_with_bins() {
    let chart = sample_chart();
    let result = analyze(&chart.notes, chart.metadata.total);
    let bin_count = result.per_second_total.len();
    let stats = calculate_range_selection_stats(
        &result.per_second_total,
        result.duration,
        &chart.notes,
        chart.metadata.total,
        0.0,
        bin_count as f64,
        None,
    )
    .unwrap();
    assert_close(stats.start_seconds, 0.0);
    assert_close(stats.end_seconds, result.duration);
    assert_eq!(stats.note_count, chart.notes.len());
    assert_close(stats.gauge_increase.unwrap(), 250.0);
    assert_close(stats.average_density, 12.0 / 4.5);
}

#[test]
fn range_of_first_bins() {
    let notes = [note(0.0, 0), note(0.5, 1), note(1.2, 2), note(2.9, 3)];
    let stats =
        calculate_range_selection_stats(&[2, 1, 1], 3.0, &notes, Some(100.0), 0.0, 2.0, None)
            .unwrap();
    assert_close(stats.end_seconds, 2.0);
    assert_eq!(stats.note_count, 3);
    assert_close(stats.gauge_increase.unwrap(), 75.0);
    assert_close(stats.average_density, 1.5);
    assert_close(stats.rms_density, 2.5_f64.sqrt());
    assert_close(stats.cms_density, 4.5_f64.cbrt());
}

#[test]
fn explicit_bin_size() {
    let stats =
        calculate_range_selection_stats(&[4, 4], 3.0, &[], None, 1.0, 2.0, Some(0.5)).unwrap();
    assert_close(stats.start_seconds, 0.5);
    assert_close(stats.end_seconds, 1.0);
    assert_eq!(stats.gauge_increase, None);
    assert_close(stats.rms_density, 4.0);
}

#[test]
fn fractional_window_changes_smoothly() {
    let bins = [1, 2, 3];
    let steps: Vec<f64> = [2.0, 2.25, 2.5, 2.75, 3.0]
        .into_iter()
        .map(|end| compute_range_rms(&bins, 1.0, 0.0, end))
        .collect();
    assert!(steps.windows(2).all(|pair| pair[0] < pair[1]));
    assert_close(steps[0], 2.5_f64.sqrt());
    assert_close(steps[4], (14.0_f64 / 3.0).sqrt());
}

#[test]
fn summary_by_difficulty() {
    let chart = sample_chart();
    let result = analyze(&chart.notes, chart.metadata.total);
    let empty = analyze(&[], None);

    let mut grouped: BTreeMap<String, Vec<DensityResult>> = BTreeMap::new();
    grouped
        .entry(chart.metadata.level.clone())
        .or_default()
        .extend([result.clone(), empty]);
    grouped.entry("☆12".to_string()).or_default();

    let summary = aggregate_by_difficulty(&grouped);
    assert_eq!(summary.len(), 2);
    let five = summary[&"5".to_string()];
    assert_close(five.max_density, result.max_density / 2.0);
    assert_close(five.terminal_density, result.terminal_density / 2.0);
    assert_eq!(summary[&"☆12".to_string()], summarize(std::iter::empty()));

    let mut labels: Vec<&str> = summary.keys().map(|label| label.as_str()).collect();
    labels.sort_by_key(|label| difficulty_sort_key(label));
    assert_eq!(labels, vec!["5", "☆12"]);
}
