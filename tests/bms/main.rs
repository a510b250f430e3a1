//! Tests for `pms_density::bms`.

use std::io::Write as _;

use encoding_rs::SHIFT_JIS;
use pms_density::bms::prelude::*;
use pretty_assertions::assert_eq;

fn note_channels(chart: &ParsedChart) -> Vec<(Track, Channel)> {
    chart
        .grid
        .iter()
        .flat_map(|(track, messages)| messages.iter().map(move |message| (track, message.channel)))
        .collect()
}

#[test]
fn headers_with_colon_or_space() {
    let source = "\
#TITLE:Colon Title
#ARTIST Someone
#genre:Pop
#PLAYLEVEL 12
#RANK 2
#TOTAL:350.5
";
    let ChartOutput { chart, warnings } = parse_chart(source, default_config());
    assert_eq!(warnings, vec![]);
    assert_eq!(chart.metadata.title, "Colon Title");
    assert_eq!(chart.metadata.artist, "Someone");
    assert_eq!(chart.metadata.genre, "Pop");
    assert_eq!(chart.metadata.level, "12");
    assert_eq!(chart.metadata.rank, Some(2));
    assert_eq!(chart.metadata.total, Some(350.5));
}

#[test]
fn invalid_values_keep_previous() {
    let source = "\
#BPM 150
#BPM fast
#TOTAL 300
#TOTAL lots
#RANK 3
#RANK easy
";
    let ChartOutput { chart, warnings } = parse_chart(source, default_config());
    assert_eq!(warnings.len(), 3);
    assert!(
        warnings
            .iter()
            .all(|warning| matches!(warning.content(), ParseWarning::SyntaxError(_)))
    );
    assert_eq!(chart.metadata.bpm, BpmStats::constant(150.0));
    assert_eq!(chart.metadata.total, Some(300.0));
    assert_eq!(chart.metadata.rank, None);
}

#[test]
fn default_bpm_without_header() {
    let output = parse_chart("#00111:01\n", default_config());
    assert_eq!(output.chart.metadata.bpm, BpmStats::constant(DEFAULT_BPM));
    let output = parse_chart("#00111:01\n", default_config().default_bpm(180.0));
    assert_eq!(output.chart.metadata.bpm, BpmStats::constant(180.0));
}

#[test]
fn symbols_are_case_insensitive() {
    let source = "#bpmaa 200\n#STOPaA 48\n#00008:AA\n#00009:aa\n";
    let ChartOutput { chart, warnings } = parse_chart(source, default_config());
    assert_eq!(warnings, vec![]);
    let id = ObjId::try_from("AA").unwrap();
    assert_eq!(chart.symbols.bpm_defs.get(&id), Some(&200.0));
    assert_eq!(chart.symbols.stop_defs.get(&id), Some(&48.0));
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let source = "\n// #TITLE commented\n\n   #TITLE real   \nnot a command\n";
    let output = parse_chart(source, default_config());
    assert_eq!(output.chart.metadata.title, "real");
    assert_eq!(output.warnings, vec![]);
}

#[test]
fn random_takes_first_branch_by_default() {
    const SRC: &str = r"
        #RANDOM 4
        #IF 1
            #00111:01
        #ENDIF
        #IF 2
            #00112:01
        #ENDIF
        #IF 3
            #00113:01
        #ENDIF
        #IF 4
            #00114:01
        #ENDIF
        #ENDRANDOM
    ";
    let output = parse_chart(SRC, default_config());
    assert_eq!(output.warnings, vec![]);
    assert_eq!(
        note_channels(&output.chart),
        vec![(Track(1), read_channel(11))]
    );
}

#[test]
fn scripted_rng_changes_branch() {
    const SRC: &str = r"
        #RANDOM 4
        #IF 1
            #00111:01
        #ELSEIF 3
            #00113:01
        #ELSE
            #00115:01
        #ENDIF
        #ENDRANDOM
    ";
    let output = parse_chart(SRC, default_config().rng(RngMock([3])));
    assert_eq!(
        note_channels(&output.chart),
        vec![(Track(1), read_channel(13))]
    );
    let output = parse_chart(SRC, default_config().rng(RngMock([2])));
    assert_eq!(
        note_channels(&output.chart),
        vec![(Track(1), read_channel(15))]
    );
}

#[test]
fn nested_random() {
    const SRC: &str = r"
        #00111:01
        #RANDOM 2
        #IF 1
            #00112:01
            #RANDOM 2
            #IF 1
                #00115:01
            #ENDIF
            #IF 2
                #00116:01
            #ENDIF
            #ENDRANDOM
        #ENDIF
        #IF 2
            #00113:01
        #ENDIF
        #ENDRANDOM
        #00114:01
    ";
    let output = parse_chart(SRC, default_config().rng(RngMock([1, 2])));
    assert_eq!(output.warnings, vec![]);
    // The inner block is resolved to 2, which is a mine channel.
    assert_eq!(
        note_channels(&output.chart),
        vec![
            (Track(1), read_channel(11)),
            (Track(1), read_channel(12)),
            (Track(1), Channel::Mine),
            (Track(1), read_channel(14)),
        ]
    );
}

#[test]
fn switch_takes_matching_case() {
    const SRC: &str = r"
        #SWITCH 3
        #CASE 1
            #00111:01
        #CASE 3
            #00113:01
        #CASE 4
            #00114:01
        #DEFAULT
            #00115:01
        #ENDSWITCH
        #00119:01
    ";
    let output = parse_chart(SRC, default_config());
    assert_eq!(output.warnings, vec![]);
    assert_eq!(
        note_channels(&output.chart),
        vec![(Track(1), read_channel(13)), (Track(1), read_channel(19))]
    );
}

#[cfg(feature = "rand")]
#[test]
fn seeded_rand_rng_is_deterministic() {
    use rand::{SeedableRng, rngs::StdRng};

    const SRC: &str = "#RANDOM 9\n#IF 1\n#00111:01\n#ELSE\n#00112:01\n#ENDIF\n#ENDRANDOM\n";
    let first = parse_chart(SRC, default_config().rng(RandRng(StdRng::seed_from_u64(7))));
    let second = parse_chart(SRC, default_config().rng(RandRng(StdRng::seed_from_u64(7))));
    assert_eq!(first.chart, second.chart);
    assert_eq!(first.chart.grid.len(), 1);
}

#[test]
fn same_bytes_give_same_chart() {
    let load = || {
        load_chart("tests/files/sample.pms", default_config())
            .unwrap()
            .chart
            .compile()
    };
    let first = load();
    let second = load();
    assert!(!first.notes.is_empty());
    assert_eq!(first.notes, second.notes);
    assert_eq!(first.metadata, second.metadata);
    assert_eq!(first, second);

    let source = std::fs::read_to_string("tests/files/sample.pms").unwrap();
    let parsed = parse_chart(&source, default_config()).chart.compile();
    assert_eq!(parsed.notes, first.notes);
}

#[test]
fn stray_control_commands_are_warned() {
    let source = "#ENDIF\n#ENDRANDOM\n#TITLE kept\n";
    let output = parse_chart(source, default_config());
    assert_eq!(output.warnings.len(), 2);
    assert_eq!(output.warnings[0].range(), 0..6);
    assert_eq!(output.chart.metadata.title, "kept");
}

#[test]
fn load_shift_jis_file() {
    let (bytes, _, had_errors) = SHIFT_JIS.encode("#TITLE 夜の曲\n#ARTIST 作者\n#00111:01\n");
    assert!(!had_errors);
    let mut file = tempfile::Builder::new()
        .suffix(".pms")
        .tempfile()
        .unwrap();
    file.write_all(&bytes).unwrap();

    let output = load_chart(file.path(), default_config()).unwrap();
    assert_eq!(output.chart.metadata.title, "夜の曲");
    assert_eq!(output.chart.metadata.artist, "作者");
    assert_eq!(output.chart.grid.len(), 1);
}

#[test]
fn load_defaults_title_to_file_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("untitled_song.pms");
    std::fs::write(&path, "#BPM 140\n#00111:01\n").unwrap();

    let output = load_chart(&path, default_config()).unwrap();
    assert_eq!(output.chart.metadata.title, "untitled_song");
}

#[test]
fn invalid_bytes_never_fail_a_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pms");
    std::fs::write(&path, b"#TITLE \xFF\xFE\x80\n#BPM 120\n").unwrap();

    let output = load_chart(&path, default_config()).unwrap();
    assert_eq!(output.chart.metadata.bpm, BpmStats::constant(120.0));
    assert!(!output.chart.metadata.title.is_empty());
}

#[test]
fn missing_file_is_the_only_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.pms");
    let error = load_chart(&path, default_config()).unwrap_err();
    assert!(matches!(error, LoadError::Io { .. }));
    assert!(error.to_string().contains("missing.pms"));
}

#[test]
fn sample_file_parses_cleanly() {
    let output = load_chart("tests/files/sample.pms", default_config()).unwrap();
    assert_eq!(output.warnings, vec![]);
    assert_eq!(output.chart.metadata.title, "Sample");
    assert_eq!(output.chart.metadata.total, Some(250.0));
}
