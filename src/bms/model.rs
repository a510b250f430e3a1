//! Parsed chart data.
//!
//! [`ParsedChart`] is the output of the parser: metadata, the raw measure grid and the symbol
//! tables. Compiling it with [`ParsedChart::compile`] yields a [`Chart`] on the absolute
//! timeline.

pub mod metadata;
pub mod notes;

use std::collections::BTreeMap;

use crate::bms::command::{ObjId, channel::Channel, time::Track};

pub use self::{
    metadata::{BpmStats, ChartMetadata},
    notes::Note,
};

/// One channel message of a measure, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelMessage {
    /// The channel of the message.
    pub channel: Channel,
    /// The object id sequence, two characters per cell.
    pub message: String,
}

/// Channel messages grouped by measure, in source order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasureGrid {
    measures: BTreeMap<Track, Vec<ChannelMessage>>,
}

impl MeasureGrid {
    /// Appends a message to the measure.
    pub fn push(&mut self, track: Track, channel: Channel, message: impl Into<String>) {
        self.measures
            .entry(track)
            .or_default()
            .push(ChannelMessage {
                channel,
                message: message.into(),
            });
    }

    /// Iterates measures in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Track, &[ChannelMessage])> {
        self.measures
            .iter()
            .map(|(track, messages)| (*track, messages.as_slice()))
    }

    /// Returns the messages of the measure.
    #[must_use]
    pub fn get(&self, track: Track) -> Option<&[ChannelMessage]> {
        self.measures.get(&track).map(Vec::as_slice)
    }

    /// Returns the number of measures with at least one message.
    #[must_use]
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    /// Returns `true` if there is no message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }
}

/// Symbol definitions referenced by channel messages, and measure lengths.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolTables {
    /// BPM definitions. `#BPMxx n`
    pub bpm_defs: BTreeMap<ObjId, f64>,
    /// Stop definitions in 1/192 of a measure. `#STOPxx n`
    pub stop_defs: BTreeMap<ObjId, f64>,
    /// Measure length multipliers. `#XXX02:n` or `#MEASURE XXX n`
    pub measure_lengths: BTreeMap<Track, f64>,
}

impl SymbolTables {
    /// Returns the length multiplier of the measure, `1.0` unless overridden.
    #[must_use]
    pub fn measure_length(&self, track: Track) -> f64 {
        self.measure_lengths.get(&track).copied().unwrap_or(1.0)
    }
}

/// A chart after parsing, before timing.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedChart {
    /// The header data.
    pub metadata: ChartMetadata,
    /// The channel messages.
    pub grid: MeasureGrid,
    /// The symbol tables.
    pub symbols: SymbolTables,
}

/// A chart on the absolute timeline.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chart {
    /// The header data, with BPM stats of the whole timeline.
    pub metadata: ChartMetadata,
    /// Notes sorted by time, without duplicates.
    pub notes: Vec<Note>,
    /// Length of the chart in seconds, including trailing silent measures.
    pub total_seconds: f64,
}
