//! Per-second note density and the difficulty scores derived from it.
//!
//! [`analyze`] buckets the notes of a chart into 1-second bins, counted from the first note to the
//! last one so that leading and trailing silence is left out. Every statistic is then derived by
//! [`DensityResult::recompute`] from the bins, the duration and the optional `#TOTAL` value. The
//! same path restores a result from a [`DensitySnapshot`], so a cache never stores derived values.
//!
//! # Example
//!
//! ```
//! use pms_density::bms::{default_config, parse_chart};
//! use pms_density::density::analyze;
//!
//! let source = "#BPM 120\n#00011:01010101\n#00013:00010001\n#00111:01\n";
//! let chart = parse_chart(source, default_config()).chart.compile();
//! let result = analyze(&chart.notes, Some(200.0));
//! assert_eq!(result.per_second_total, vec![3, 4]);
//! assert_eq!(result.max_density, 4.0);
//! assert!(result.terminal_window.is_some());
//! ```

pub mod cache;
pub mod range;
pub mod stats;
pub mod terminal;

use itertools::{Itertools, MinMaxResult};
use tracing::{debug, warn};

use crate::bms::{command::channel::LANE_COUNT, model::Note};

pub use self::{
    cache::DensitySnapshot,
    range::{
        RangeSelectionStats, calculate_range_selection_stats, compute_range_cms,
        compute_range_rms,
    },
    stats::{BinStats, EPSILON},
    terminal::{GAUGE_CLEAR, GAUGE_FLOOR, TerminalSegment},
};

/// Upper bound of the bins [`analyze`] allocates, about 12 days of 1-second bins.
pub const MAX_BIN_COUNT: usize = 1 << 20;

/// Note counts of one bin, per lane.
pub type LaneCounts = [u32; LANE_COUNT];

/// Density statistics of a chart.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensityResult {
    /// Notes in each bin.
    pub per_second_total: Vec<u32>,
    /// Notes in each bin, per lane.
    pub per_second_by_key: Vec<LaneCounts>,
    /// Seconds between the first and the last note.
    pub duration: f64,
    /// The busiest bin.
    pub max_density: f64,
    /// Mean of the non-zero bins.
    pub average_density: f64,
    /// Quadratic mean of the non-zero bins.
    pub rms_density: f64,
    /// Cubic mean of the non-zero bins.
    pub cms_density: f64,
    /// Contraharmonic mean of the non-zero bins.
    pub chm_density: f64,
    /// Sum of the differences between adjacent bins, relative to the note count.
    pub density_change: f64,
    /// Percentage of all bins at or above the floored [`Self::chm_density`].
    pub high_density_occupancy_rate: f64,
    /// How far the busiest bin stands out, in standard deviations.
    pub gustiness: f64,
    /// Seconds covered by the terminal segment, or `None` if it was not computed.
    pub terminal_window: Option<f64>,
    /// Notes per second in the terminal segment.
    pub terminal_density: f64,
    /// Quadratic mean of the terminal segment.
    pub terminal_rms_density: f64,
    /// Cubic mean of the terminal segment.
    pub terminal_cms_density: f64,
    /// Contraharmonic mean of the terminal segment.
    pub terminal_chm_density: f64,
    /// Gustiness of the terminal segment.
    pub terminal_gustiness: f64,
    /// Mean over standard deviation of the non-zero bins.
    pub overall_difficulty: f64,
    /// Terminal against non-terminal quadratic mean, in standard deviations.
    pub terminal_difficulty: f64,
    /// Terminal against non-terminal cubic mean, in standard deviations.
    pub terminal_difficulty_cms: f64,
    /// Terminal against non-terminal contraharmonic mean, in standard deviations.
    pub terminal_difficulty_chm: f64,
    /// Terminal minus non-terminal contraharmonic mean.
    pub terminal_density_difference: f64,
}

impl DensityResult {
    /// The result with no bins. Only the duration and the lane rows are kept.
    #[must_use]
    pub fn neutral(per_second_by_key: Vec<LaneCounts>, duration: f64) -> Self {
        Self {
            per_second_by_key,
            duration,
            ..Self::default()
        }
    }

    /// Derives every statistic from the bins.
    ///
    /// This is the only way a result is built from bins, both after [`analyze`] and when restoring
    /// a [`DensitySnapshot`]. The terminal fields stay zero, with `terminal_window` as `None`,
    /// unless `total_value` makes the gauge rise.
    #[must_use]
    pub fn recompute(
        per_second_total: Vec<u32>,
        per_second_by_key: Vec<LaneCounts>,
        duration: f64,
        total_value: Option<f64>,
    ) -> Self {
        let Some(&peak) = per_second_total.iter().max() else {
            return Self::neutral(per_second_by_key, duration);
        };
        let bin_count = per_second_total.len();
        let bin_size = if duration > 0.0 {
            duration / bin_count as f64
        } else {
            1.0
        };
        let total_notes: u64 = per_second_total.iter().map(|&bin| u64::from(bin)).sum();
        let max_density = f64::from(peak);
        let overall = BinStats::of_non_zero(&per_second_total).unwrap_or_default();

        let terminal = total_value
            .and_then(|total| TerminalSegment::locate(&per_second_total, bin_size, total));
        let non_terminal = terminal
            .and_then(|segment| {
                let (prefix, _) =
                    per_second_total.split_at(segment.start_bin.min(per_second_total.len()));
                BinStats::of_non_zero(prefix)
            })
            .unwrap_or(overall);

        let density_change = per_second_total
            .iter()
            .tuple_windows()
            .map(|(&prev, &next)| prev.abs_diff(next) as f64)
            .sum::<f64>()
            / (total_notes as f64 + EPSILON);
        let threshold = overall.chm.floor();
        let occupied = per_second_total
            .iter()
            .filter(|&&bin| f64::from(bin) >= threshold)
            .count();
        let high_density_occupancy_rate = occupied as f64 / bin_count as f64 * 100.0;

        let overall_difficulty = if overall.mean > 0.0 {
            overall.mean / (overall.std + EPSILON)
        } else {
            0.0
        };
        let versus = |terminal: f64, non_terminal: f64| {
            if overall.std > 0.0 {
                (terminal - non_terminal) / (overall.std + EPSILON)
            } else {
                0.0
            }
        };

        let mut result = Self {
            max_density,
            average_density: overall.mean,
            rms_density: overall.rms,
            cms_density: overall.cms,
            chm_density: overall.chm,
            density_change,
            high_density_occupancy_rate,
            gustiness: overall.gustiness(max_density),
            overall_difficulty,
            ..Self::neutral(per_second_by_key, duration)
        };
        if let Some(segment) = terminal {
            result.terminal_window = Some(segment.window);
            result.terminal_density = segment.density;
            result.terminal_rms_density = segment.stats.rms;
            result.terminal_cms_density = segment.stats.cms;
            result.terminal_chm_density = segment.stats.chm;
            result.terminal_gustiness = segment.gustiness;
            result.terminal_difficulty = versus(segment.stats.rms, non_terminal.rms);
            result.terminal_difficulty_cms = versus(segment.stats.cms, non_terminal.cms);
            result.terminal_difficulty_chm = versus(segment.stats.chm, non_terminal.chm);
            result.terminal_density_difference = segment.stats.chm - non_terminal.chm;
        }
        result.per_second_total = per_second_total;
        result
    }

    /// Number of notes counted in the bins.
    #[must_use]
    pub fn note_count(&self) -> u64 {
        self.per_second_total
            .iter()
            .map(|&bin| u64::from(bin))
            .sum()
    }
}

/// Buckets the notes into 1-second bins and derives the statistics.
///
/// The notes need not be sorted. An empty slice gives [`DensityResult::neutral`], and so does a
/// span that is not finite or needs more than [`MAX_BIN_COUNT`] bins.
#[must_use]
pub fn analyze(notes: &[Note], total_value: Option<f64>) -> DensityResult {
    let (first, last) = match notes.iter().map(|note| note.time).minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => return DensityResult::neutral(vec![], 0.0),
        MinMaxResult::OneElement(time) => (time, time),
        MinMaxResult::MinMax(first, last) => (first, last),
    };
    let span = last - first;
    if !span.is_finite() || span > MAX_BIN_COUNT as f64 {
        warn!(span, notes = notes.len(), "note span is too long to bucket");
        return DensityResult::neutral(vec![], 0.0);
    }
    let bin_count = (span.ceil() as usize).max(1);

    let mut per_second_by_key = vec![[0u32; LANE_COUNT]; bin_count];
    for note in notes {
        let index = ((note.time - first).floor() as usize).min(bin_count - 1);
        if let Some(count) = per_second_by_key
            .get_mut(index)
            .and_then(|row| row.get_mut(note.lane.index()))
        {
            *count += 1;
        }
    }
    let per_second_total = per_second_by_key
        .iter()
        .map(|row| row.iter().sum::<u32>())
        .collect::<Vec<_>>();
    debug!(notes = notes.len(), bin_count, span, "bucketed notes");
    DensityResult::recompute(per_second_total, per_second_by_key, span, total_value)
}
