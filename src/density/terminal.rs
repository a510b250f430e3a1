//! The terminal segment: the trailing run of notes needed to fill the clear gauge.
//!
//! Each note raises the gauge by `total / note_count`. A chart is cleared when the gauge climbs
//! from [`GAUGE_FLOOR`] to [`GAUGE_CLEAR`], so the last `ceil((85 - 2) / rate)` notes decide
//! whether a weak player survives. Their bins make up the terminal segment.

use super::stats::BinStats;

/// Gauge needed to clear.
pub const GAUGE_CLEAR: f64 = 85.0;
/// Gauge left after a drain to the bottom.
pub const GAUGE_FLOOR: f64 = 2.0;

/// Statistics of the terminal segment of a histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalSegment {
    /// Index of the first bin of the segment. Equals the bin count when the segment is empty.
    pub start_bin: usize,
    /// Seconds covered by the segment.
    pub window: f64,
    /// Notes per second over the window.
    pub density: f64,
    /// Stats over the non-zero bins of the segment.
    pub stats: BinStats,
    /// Gustiness over the non-zero bins of the segment.
    pub gustiness: f64,
}

impl TerminalSegment {
    /// Locates the terminal segment, or returns `None` when the gauge never rises: no notes, or a
    /// non-positive `total_value`.
    #[must_use]
    pub fn locate(bins: &[u32], bin_size: f64, total_value: f64) -> Option<Self> {
        let total_notes: u64 = bins.iter().map(|&bin| u64::from(bin)).sum();
        if total_notes == 0 {
            return None;
        }
        let gauge_rate = total_value / total_notes as f64;
        if gauge_rate.is_nan() || gauge_rate <= 0.0 {
            return None;
        }
        let required_notes = ((GAUGE_CLEAR - GAUGE_FLOOR) / gauge_rate).ceil() as u64;
        let start_note = total_notes.saturating_sub(required_notes);
        let start_bin = start_bin_of(bins, start_note);

        let (_, terminal_bins) = bins.split_at(start_bin.min(bins.len()));
        let window = terminal_bins.len() as f64 * bin_size;
        let notes: u64 = terminal_bins.iter().map(|&bin| u64::from(bin)).sum();
        let density = if window > 0.0 && notes > 0 {
            notes as f64 / window
        } else {
            0.0
        };
        let peak = terminal_bins.iter().copied().max().unwrap_or(0);
        let stats = BinStats::of_non_zero(terminal_bins).unwrap_or_default();
        Some(Self {
            start_bin,
            window,
            density,
            stats,
            gustiness: stats.gustiness(f64::from(peak)),
        })
    }
}

/// Index of the bin holding the note of index `start_note`, counted from the start.
fn start_bin_of(bins: &[u32], start_note: u64) -> usize {
    let cumulative: Vec<u64> = bins
        .iter()
        .scan(0u64, |sum, &bin| {
            *sum += u64::from(bin);
            Some(*sum)
        })
        .collect();
    cumulative.partition_point(|&sum| sum <= start_note)
}
