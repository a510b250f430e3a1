//! Tests for `pms_density::chart_process`.

use pms_density::{
    bms::prelude::*,
    chart_process::prelude::*,
};
use pretty_assertions::assert_eq;

fn compile_source(source: &str) -> Chart {
    parse_chart(source, default_config()).chart.compile()
}

fn times(chart: &Chart) -> Vec<f64> {
    chart.notes.iter().map(|note| note.time).collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn bpm_change_by_hex_channel() {
    let chart = compile_source(
        "#BPM 120\n#00011:0100\n#00012:0001\n#00111:0001\n#00103:7800\n",
    );
    assert_eq!(chart.notes.len(), 3);
    assert!((3.5..=4.5).contains(&chart.total_seconds));
    assert_close(chart.total_seconds, 4.0);
    assert_close(chart.notes[2].time, 3.5);
}

#[test]
fn hex_bpm_change_updates_tempo() {
    // 0xF0 = 240 from the second half of the measure.
    let chart = compile_source("#BPM 120\n#00003:00F0\n#00011:00000001\n");
    assert_close(chart.notes[0].time, 1.0 + 0.25);
    assert_eq!(chart.metadata.bpm.max, 240.0);
}

#[test]
fn stop_delays_later_notes() {
    let chart = compile_source("#BPM 120\n#STOP01 96\n#00009:0001\n#00011:01\n#00111:01\n");
    assert_close(chart.notes[0].time, 0.0);
    assert_close(chart.notes[1].time, 3.0);
    assert_close(chart.total_seconds, 5.0);
}

#[test]
fn stop_applies_before_note_at_same_position() {
    let chart = compile_source("#BPM 150\n#STOPAA 192\n#00011:0100\n#00009:AA00\n");
    assert_eq!(chart.notes.len(), 1);
    assert!((1.5..=1.7).contains(&chart.notes[0].time));
    assert_close(chart.notes[0].time, 1.6);
}

#[test]
fn stop_ignores_measure_length() {
    let chart = compile_source("#BPM 120\n#STOP01 192\n#00002:0.5\n#00009:01\n#00111:01\n");
    // Half measure of 1 second, plus a full default measure of stop.
    assert_close(chart.notes[0].time, 3.0);
}

#[test]
fn measure_length_by_header_and_channel() {
    let chart = compile_source("#BPM 120\n#MEASURE 000 0.25\n#00102:1.5\n#00211:01\n");
    assert_close(chart.notes[0].time, 0.5 + 3.0);
}

#[test]
fn undefined_symbols_are_ignored() {
    let chart = compile_source("#BPM 120\n#00008:ZZ\n#00009:ZZ\n#00011:0001\n");
    assert_close(chart.notes[0].time, 1.0);
    assert_eq!(chart.metadata.bpm, BpmStats::constant(120.0));
}

#[test]
fn non_positive_bpm_takes_no_time() {
    let chart = compile_source("#BPM 0\n#00011:01\n#00111:01\n");
    assert_eq!(times(&chart), vec![0.0]);
    assert_eq!(chart.total_seconds, 0.0);
}

#[test]
fn mines_never_become_notes() {
    let chart = compile_source("#BPM 120\n#00016:01010101\n#00056:01\n#00086:0101\n");
    assert!(chart.notes.is_empty());
    assert_close(chart.total_seconds, 2.0);
}

#[test]
fn long_note_channels_share_lanes() {
    let chart = compile_source("#BPM 120\n#00011:01\n#00051:0001\n#00029:01\n");
    let lanes: Vec<_> = chart.notes.iter().map(|note| note.lane.index()).collect();
    assert_eq!(chart.notes.len(), 3);
    assert!(lanes.contains(&0));
    assert!(lanes.contains(&8));
}

#[test]
fn duplicated_notes_collapse() {
    let chart = compile_source("#BPM 120\n#00011:01\n#00021:01\n#00012:01\n");
    assert_eq!(chart.notes.len(), 2);

    // Another lane in between does not split the duplicates on lane 0.
    let chart = compile_source("#BPM 120\n#00011:01\n#00012:01\n#00051:01\n");
    let lanes: Vec<_> = chart.notes.iter().map(|note| note.lane.index()).collect();
    assert_eq!(lanes, vec![0, 1]);
}

#[test]
fn odd_length_message_is_ignored() {
    let output = parse_chart("#BPM 120\n#00011:010\n#00012:01\n", default_config());
    assert_eq!(output.warnings.len(), 1);
    assert!(matches!(
        output.warnings[0].content(),
        ParseWarning::OddLengthMessage { len: 3, .. }
    ));
    let chart = output.chart.compile();
    assert_eq!(chart.notes.len(), 1);
}

#[test]
fn random_picks_one_lane() {
    let source = "\
#BPM 120
#RANDOM 4
#IF 1
#00011:01
#ENDIF
#IF 2
#00012:01
#ENDIF
#IF 3
#00013:01
#ENDIF
#IF 4
#00014:01
#ENDIF
#ENDRANDOM
";
    let chart = compile_source(source);
    assert_eq!(chart.notes.len(), 1);
    assert_eq!(chart.notes[0].lane.index(), 0);
}

#[test]
fn compile_sample_file() {
    let output = load_chart("tests/files/sample.pms", default_config()).unwrap();
    let chart = output.chart.compile();
    assert_eq!(chart.notes.len(), 12);
    assert_close(chart.total_seconds, 5.5);
    assert_eq!(
        chart.metadata.bpm,
        BpmStats {
            start: 120.0,
            min: 120.0,
            max: 240.0,
        }
    );
    let expected = [
        0.0, 0.0, 0.5, 1.0, 1.0, 1.5, 2.0, 2.25, 3.25, 3.5, 4.0, 4.5,
    ];
    for (actual, expected) in times(&chart).into_iter().zip(expected) {
        assert_close(actual, expected);
    }
    let last = chart.notes.last().unwrap();
    assert_eq!(last.lane.index(), 3);
}

#[test]
fn sample_file_with_other_branch() {
    let output = load_chart("tests/files/sample.pms", default_config().rng(RngMock([2]))).unwrap();
    let chart = output.chart.compile();
    assert_eq!(chart.notes.len(), 12);
    assert_eq!(chart.notes.last().unwrap().lane.index(), 7);
}

#[test]
fn compile_from_grid() {
    let mut grid = MeasureGrid::default();
    grid.push(Track(0), read_channel(11), "0101");
    grid.push(Track(2), read_channel(12), "01");
    let compiled = compile(&grid, 60.0, &SymbolTables::default());
    assert_eq!(compiled.notes.len(), 3);
    assert_close(compiled.notes[2].time, 8.0);
    assert_close(compiled.total_seconds, 12.0);
}
