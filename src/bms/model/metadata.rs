use crate::bms::DEFAULT_BPM;

/// Tempo statistics of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BpmStats {
    /// The base BPM, `#BPM` or the configured default.
    pub start: f64,
    /// The lowest BPM reached through the chart, including the start.
    pub min: f64,
    /// The highest BPM reached through the chart, including the start.
    pub max: f64,
}

impl BpmStats {
    /// Stats of a chart that never changes its tempo.
    #[must_use]
    pub const fn constant(bpm: f64) -> Self {
        Self {
            start: bpm,
            min: bpm,
            max: bpm,
        }
    }

    /// Widens the range to include `bpm`.
    pub fn observe(&mut self, bpm: f64) {
        self.min = self.min.min(bpm);
        self.max = self.max.max(bpm);
    }
}

impl Default for BpmStats {
    fn default() -> Self {
        Self::constant(DEFAULT_BPM)
    }
}

/// The header data in the chart.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartMetadata {
    /// The title of the chart. When loaded from a file without `#TITLE`, the file stem.
    pub title: String,
    /// The subtitle of the chart.
    pub subtitle: String,
    /// The genre of the chart.
    pub genre: String,
    /// The artist of the music in the chart.
    pub artist: String,
    /// The co-artist of the music in the chart.
    pub subartist: String,
    /// The judge rank, or `None` if missing or not an integer.
    pub rank: Option<i64>,
    /// The level label, `#PLAYLEVEL` or `#LEVEL`, as written.
    pub level: String,
    /// The gauge total, `#TOTAL`.
    pub total: Option<f64>,
    /// Tempo of the chart. `min` and `max` are filled in by compiling the timeline.
    pub bpm: BpmStats,
}
