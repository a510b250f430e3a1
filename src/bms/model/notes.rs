use itertools::Itertools;

use crate::bms::command::channel::Lane;

/// Notes closer than this on the same lane are one note.
pub const DUPLICATE_EPSILON: f64 = 1e-6;

/// A playable note on the absolute timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// Seconds from the start of the chart.
    pub time: f64,
    /// The lane of the note.
    pub lane: Lane,
}

/// Sorts notes by time, keeping the source order of ties, and collapses duplicates.
///
/// A note is dropped if an already kept note on the same lane lies within
/// [`DUPLICATE_EPSILON`] before it.
#[must_use]
pub fn sort_and_dedup(notes: Vec<Note>) -> Vec<Note> {
    let sorted = notes
        .into_iter()
        .sorted_by(|a, b| a.time.total_cmp(&b.time));
    let mut kept: Vec<Note> = Vec::with_capacity(sorted.len());
    for note in sorted {
        let duplicated = kept
            .iter()
            .rev()
            .take_while(|prev| note.time - prev.time < DUPLICATE_EPSILON)
            .any(|prev| prev.lane == note.lane);
        if !duplicated {
            kept.push(note);
        }
    }
    kept
}
