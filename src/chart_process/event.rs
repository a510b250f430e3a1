//! Timeline events inside one measure.

use crate::bms::{
    command::{ObjId, channel::Channel, channel::Lane},
    model::{ChannelMessage, SymbolTables},
};

/// What happens at a point of a measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// The BPM changes to the value.
    BpmChange(f64),
    /// The scroll stops for the value in 1/192 of a measure.
    Stop(f64),
    /// A note is placed on the lane.
    Note(Lane),
}

impl EventKind {
    /// Events at the same position apply in this order: BPM changes, then stops, then notes.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::BpmChange(_) => 0,
            Self::Stop(_) => 1,
            Self::Note(_) => 2,
        }
    }
}

/// An event at a position of a measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineEvent {
    /// Position in the measure, `[0, 1)`.
    pub position: f64,
    /// What happens.
    pub kind: EventKind,
}

/// Expands the messages of a measure into events sorted by position and rank.
///
/// Odd-length messages, `00` cells, mines, undefined symbols and non-positive values yield
/// nothing.
#[must_use]
pub fn expand_measure(messages: &[ChannelMessage], symbols: &SymbolTables) -> Vec<TimelineEvent> {
    let mut events = vec![];
    for ChannelMessage { channel, message } in messages {
        if !channel.is_timed() {
            continue;
        }
        let chars: Vec<char> = message.chars().collect();
        if chars.len() % 2 != 0 {
            continue;
        }
        let cells = chars.len() / 2;
        for (index, cell) in chars.chunks_exact(2).enumerate() {
            let &[first, second] = cell else {
                continue;
            };
            if (first, second) == ('0', '0') {
                continue;
            }
            let Some(kind) = route(*channel, [first, second], symbols) else {
                continue;
            };
            events.push(TimelineEvent {
                position: index as f64 / cells as f64,
                kind,
            });
        }
    }
    events.sort_by(|a, b| {
        a.position
            .total_cmp(&b.position)
            .then(a.kind.rank().cmp(&b.kind.rank()))
    });
    events
}

/// Any cell other than `00` on a key channel is a note, while symbol channels need a valid id.
fn route(channel: Channel, cell: [char; 2], symbols: &SymbolTables) -> Option<EventKind> {
    if let Channel::Note { lane } = channel {
        return Some(EventKind::Note(lane));
    }
    let id = ObjId::try_from(cell).ok()?;
    match channel {
        Channel::BpmChange => symbols
            .bpm_defs
            .get(&id)
            .copied()
            .filter(|&bpm| bpm > 0.0)
            .map(EventKind::BpmChange),
        Channel::BpmChangeU8 => id.as_hex().map(|bpm| EventKind::BpmChange(f64::from(bpm))),
        Channel::Stop => symbols
            .stop_defs
            .get(&id)
            .copied()
            .filter(|&stop| stop > 0.0)
            .map(EventKind::Stop),
        Channel::Note { .. } | Channel::SectionLen | Channel::Mine | Channel::Other(_) => None,
    }
}
