//! Timeline compilation of parsed charts.
//!
//! [`compile`] walks the measures of a [`MeasureGrid`] in ascending order with a running
//! [`Clock`](clock::Clock):
//!
//! - Measures missing between two written ones still take their length at the current BPM.
//! - Inside a measure, events are applied in position order. At the same position BPM changes
//!   apply first, then stops, then notes.
//! - The clock always runs to the end of each measure.
//!
//! The notes are finally sorted by time, collapsing duplicates on the same lane.

pub mod clock;
pub mod event;
pub mod prelude;

use tracing::debug;

use crate::bms::{
    command::time::Track,
    model::{
        BpmStats, Chart, MeasureGrid, Note, ParsedChart, SymbolTables, notes::sort_and_dedup,
    },
};

use self::{
    clock::Clock,
    event::{EventKind, expand_measure},
};

/// Notes on the absolute timeline with the length and tempo of the chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompiledChart {
    /// Notes sorted by time, without duplicates.
    pub notes: Vec<Note>,
    /// Seconds until the end of the last measure.
    pub total_seconds: f64,
    /// Tempo through the chart.
    pub bpm: BpmStats,
}

/// Compiles the measure grid into notes on the absolute timeline.
#[must_use]
pub fn compile(grid: &MeasureGrid, base_bpm: f64, symbols: &SymbolTables) -> CompiledChart {
    let mut clock = Clock::new(base_bpm);
    let mut notes = vec![];
    let mut previous = None;
    for (track, messages) in grid.iter() {
        for missing in Track::missing_between(previous, track) {
            clock.advance(1.0, symbols.measure_length(missing));
        }

        let measure_length = symbols.measure_length(track);
        let mut previous_position = 0.0;
        for event in expand_measure(messages, symbols) {
            clock.advance(event.position - previous_position, measure_length);
            previous_position = event.position;
            match event.kind {
                EventKind::BpmChange(bpm) => clock.set_bpm(bpm),
                EventKind::Stop(units) => clock.stop(units),
                EventKind::Note(lane) => notes.push(Note {
                    time: clock.seconds(),
                    lane,
                }),
            }
        }
        clock.advance(1.0 - previous_position, measure_length);
        previous = Some(track);
    }

    let placed = notes.len();
    let notes = sort_and_dedup(notes);
    debug!(
        placed,
        notes = notes.len(),
        total_seconds = clock.seconds(),
        "compiled timeline"
    );
    CompiledChart {
        notes,
        total_seconds: clock.seconds(),
        bpm: clock.stats(),
    }
}

impl ParsedChart {
    /// Compiles the chart into notes on the absolute timeline. The BPM stats of the metadata are
    /// updated with the tempo changes.
    #[must_use]
    pub fn compile(&self) -> Chart {
        let CompiledChart {
            notes,
            total_seconds,
            bpm,
        } = compile(&self.grid, self.metadata.bpm.start, &self.symbols);
        let mut metadata = self.metadata.clone();
        metadata.bpm = bpm;
        Chart {
            metadata,
            notes,
            total_seconds,
        }
    }
}
