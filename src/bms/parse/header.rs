//! Header commands of the chart.
//!
//! Only the headers that affect metadata or timing are read. Unknown headers are ignored.

use crate::{
    bms::{
        command::{ObjId, time::Track},
        model::{BpmStats, ParsedChart},
    },
    util::StrExtension,
};

use super::{ParseWarning, Result};

/// Applies a header to the chart. `name` must be uppercase.
///
/// Invalid values keep the previous value, except `#RANK` which becomes `None`.
pub(super) fn apply_header(chart: &mut ParsedChart, name: &str, args: &str) -> Result<()> {
    let metadata = &mut chart.metadata;
    match name {
        "TITLE" => set_text(&mut metadata.title, args),
        "SUBTITLE" => set_text(&mut metadata.subtitle, args),
        "GENRE" => set_text(&mut metadata.genre, args),
        "ARTIST" => set_text(&mut metadata.artist, args),
        "SUBARTIST" => set_text(&mut metadata.subartist, args),
        "LEVEL" | "PLAYLEVEL" => set_text(&mut metadata.level, args),
        "BPM" if !args.is_empty() => {
            metadata.bpm = BpmStats::constant(parse_float(name, args)?);
        }
        "TOTAL" if !args.is_empty() => {
            metadata.total = Some(parse_float(name, args)?);
        }
        "RANK" if !args.is_empty() => {
            metadata.rank = args.trim().parse().ok();
            if metadata.rank.is_none() {
                return Err(expected("an integer", name, args));
            }
        }
        "MEASURE" if !args.is_empty() => {
            let (track, length) = parse_measure_args(args).ok_or_else(|| {
                expected("`<measure> <length>`", name, args)
            })?;
            chart.symbols.measure_lengths.insert(track, length);
        }
        _ => {
            if let Some(code) = symbol_code(name, "BPM") {
                let id = parse_obj_id(name, code)?;
                let bpm = parse_float(name, args)?;
                chart.symbols.bpm_defs.insert(id, bpm);
            } else if let Some(code) = symbol_code(name, "STOP") {
                let id = parse_obj_id(name, code)?;
                let stop = parse_float(name, args)?;
                chart.symbols.stop_defs.insert(id, stop);
            }
        }
    }
    Ok(())
}

fn set_text(field: &mut String, args: &str) {
    if !args.is_empty() {
        args.clone_into(field);
    }
}

/// Returns the two characters after `prefix` if `name` is exactly `prefix` followed by two.
fn symbol_code<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.strip_prefix_ignore_case(prefix)
        .filter(|code| code.chars().count() == 2)
}

fn parse_obj_id(name: &str, code: &str) -> Result<ObjId> {
    ObjId::try_from(code).map_err(|_| {
        ParseWarning::SyntaxError(format!("expected base 62 object id in `#{name}`"))
    })
}

/// Parses a finite number. `nan` and `inf` are rejected like any other malformed value.
pub(super) fn parse_float(name: &str, args: &str) -> Result<f64> {
    args.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| expected("a number", name, args))
}

fn parse_measure_args(args: &str) -> Option<(Track, f64)> {
    let mut words = args.split_whitespace();
    let (Some(index), Some(length), None) = (words.next(), words.next(), words.next()) else {
        return None;
    };
    if !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let length = length.parse::<f64>().ok().filter(|length| length.is_finite())?;
    Some((Track(index.parse().ok()?), length))
}

fn expected(what: &str, name: &str, args: &str) -> ParseWarning {
    ParseWarning::SyntaxError(format!("expected {what} for #{name}, found `{args}`"))
}
