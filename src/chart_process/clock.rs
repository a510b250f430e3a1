//! The running clock of the timeline.

use crate::bms::model::BpmStats;

/// Number of stop units in a measure.
pub const STOP_UNITS_PER_MEASURE: f64 = 192.0;

/// Seconds taken by `portion` of a measure of length `measure_length` at `bpm`.
///
/// A measure of length `1.0` has 4 beats. Non-positive BPM takes no time.
#[must_use]
pub fn measure_seconds(portion: f64, bpm: f64, measure_length: f64) -> f64 {
    if bpm <= 0.0 {
        return 0.0;
    }
    portion * 4.0 * measure_length * 60.0 / bpm
}

/// Elapsed seconds and the current BPM while walking through measures.
#[derive(Debug, Clone, PartialEq)]
pub struct Clock {
    seconds: f64,
    bpm: f64,
    stats: BpmStats,
}

impl Clock {
    /// Starts a clock at zero with the base BPM.
    #[must_use]
    pub const fn new(base_bpm: f64) -> Self {
        Self {
            seconds: 0.0,
            bpm: base_bpm,
            stats: BpmStats::constant(base_bpm),
        }
    }

    /// Advances through `portion` of a measure at the current BPM.
    pub fn advance(&mut self, portion: f64, measure_length: f64) {
        self.seconds += measure_seconds(portion, self.bpm, measure_length);
    }

    /// Stops for `units` in 1/192 of a default length measure, regardless of the measure length.
    pub fn stop(&mut self, units: f64) {
        self.seconds += measure_seconds(units / STOP_UNITS_PER_MEASURE, self.bpm, 1.0);
    }

    /// Changes the current BPM.
    pub fn set_bpm(&mut self, bpm: f64) {
        self.bpm = bpm;
        self.stats.observe(bpm);
    }

    /// Returns the elapsed seconds.
    #[must_use]
    pub const fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Returns the current BPM.
    #[must_use]
    pub const fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Returns the BPM stats observed so far.
    #[must_use]
    pub const fn stats(&self) -> BpmStats {
        self.stats
    }
}
