//! Definitions of channel command argument data.
//!
//! A channel is the two decimal digits `YY` of a `#XXXYY:...` message. Only the channels which
//! affect timing or note density are distinguished; everything else is [`Channel::Other`].
//!
//! Pop'n style 9-key charts put playable notes on three bands of channels: `11-19` for the
//! primary lanes, `21-29` used by some exporters, and `51-59` for long notes, which count as
//! plain notes for density. Each band maps onto the same 9 logical [`Lane`]s.

/// Number of logical lanes.
pub const LANE_COUNT: usize = 9;

/// A logical play column, `0..9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lane(u8);

impl Lane {
    /// Creates a lane from its index, or `None` if `index >= LANE_COUNT`.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < LANE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Returns the lane index in `0..LANE_COUNT`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lane {}", self.0)
    }
}

/// Mine channels. They take precedence over the key bands.
const MINE_CHANNELS: [u8; 8] = [16, 26, 36, 46, 56, 66, 76, 86];

/// Channel number to lane, for all three key bands.
const fn key_lane(number: u8) -> Option<Lane> {
    match number {
        11..=19 | 21..=29 | 51..=59 => Lane::new(number % 10 - 1),
        _ => None,
    }
}

/// The channel, or lane, where the object will be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// `02`: the section length change.
    SectionLen,
    /// `03`: the BPM change by a hexadecimal [`u8`] integer.
    BpmChangeU8,
    /// `08`: the BPM change by a `#BPMxx` definition.
    BpmChange,
    /// `09`: the stop by a `#STOPxx` definition.
    Stop,
    /// A key channel of one of the three bands.
    Note {
        /// The logical lane of the note.
        lane: Lane,
    },
    /// A mine channel, never timed nor counted.
    Mine,
    /// Any other channel (BGM, BGA and so on).
    Other(u8),
}

impl Channel {
    /// Returns `true` if objects on the channel are placed on the timeline.
    #[must_use]
    pub const fn is_timed(self) -> bool {
        matches!(
            self,
            Self::BpmChangeU8 | Self::BpmChange | Self::Stop | Self::Note { .. }
        )
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Channel: ")?;
        match self {
            Self::SectionLen => write!(f, "SECTION_LEN"),
            Self::BpmChangeU8 => write!(f, "BPM_CHANGE_U8"),
            Self::BpmChange => write!(f, "BPM_CHANGE"),
            Self::Stop => write!(f, "STOP"),
            Self::Note { lane } => write!(f, "NOTE ({lane})"),
            Self::Mine => write!(f, "MINE"),
            Self::Other(id) => write!(f, "OTHER ({id:02})"),
        }
    }
}

/// Reads a channel from its number `0..=99`.
#[must_use]
pub fn read_channel(number: u8) -> Channel {
    if MINE_CHANNELS.contains(&number) {
        return Channel::Mine;
    }
    match number {
        2 => Channel::SectionLen,
        3 => Channel::BpmChangeU8,
        8 => Channel::BpmChange,
        9 => Channel::Stop,
        _ => match key_lane(number) {
            Some(lane) => Channel::Note { lane },
            None => Channel::Other(number),
        },
    }
}
