//! Statistics of a selected range of bins.
//!
//! These are computed on demand for a window picked over a histogram, so they are never part of a
//! [`DensityResult`](super::DensityResult) nor of its snapshot.

use crate::bms::model::Note;

/// Tolerance on the end of the window when counting notes.
const NOTE_TIME_TOLERANCE: f64 = 1e-6;

/// Statistics of the notes in a window of the chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeSelectionStats {
    /// Start of the window, in seconds from the first note.
    pub start_seconds: f64,
    /// End of the window, in seconds from the first note.
    pub end_seconds: f64,
    /// Notes in the window.
    pub note_count: usize,
    /// Gauge gained through the window, if `#TOTAL` is known.
    pub gauge_increase: Option<f64>,
    /// Notes per second through the window.
    pub average_density: f64,
    /// Overlap weighted quadratic mean of the bins.
    pub rms_density: f64,
    /// Overlap weighted cubic mean of the bins.
    pub cms_density: f64,
}

/// Mean of `bin^power` over `[start, end)` seconds, where each bin contributes in proportion to
/// the part of it inside the window.
fn weighted_power_mean(per_second: &[u32], bin_size: f64, start: f64, end: f64, power: i32) -> f64 {
    if end <= start || per_second.is_empty() || bin_size <= 0.0 {
        return 0.0;
    }
    per_second
        .iter()
        .enumerate()
        .map(|(index, &bin)| {
            let bin_start = index as f64 * bin_size;
            let bin_end = bin_start + bin_size;
            let overlap = (bin_end.min(end) - bin_start.max(start)).max(0.0);
            f64::from(bin).powi(power) * overlap
        })
        .sum::<f64>()
        / (end - start)
}

/// Quadratic mean of the bins over `[start, end)` seconds, weighting partial bins by overlap.
#[must_use]
pub fn compute_range_rms(per_second: &[u32], bin_size: f64, start: f64, end: f64) -> f64 {
    weighted_power_mean(per_second, bin_size, start, end, 2).sqrt()
}

/// Cubic mean of the bins over `[start, end)` seconds, weighting partial bins by overlap.
#[must_use]
pub fn compute_range_cms(per_second: &[u32], bin_size: f64, start: f64, end: f64) -> f64 {
    weighted_power_mean(per_second, bin_size, start, end, 3).cbrt()
}

/// Computes the statistics of the bins `start_bin..end_bin`.
///
/// The bounds may be given in any order and out of range; they are clamped into the histogram and
/// truncated to whole bins, keeping at least one bin when the selection is not empty. `bin_size`
/// defaults to `duration / bin count`. `notes` must be sorted by time, as their times are counted
/// from the first one.
///
/// Returns `None` for an empty histogram or a non-positive duration.
#[must_use]
pub fn calculate_range_selection_stats(
    per_second_total: &[u32],
    duration: f64,
    notes: &[Note],
    total_value: Option<f64>,
    start_bin: f64,
    end_bin: f64,
    bin_size: Option<f64>,
) -> Option<RangeSelectionStats> {
    if per_second_total.is_empty() || duration <= 0.0 {
        return None;
    }
    let bin_count = per_second_total.len();
    let bin_size = bin_size
        .filter(|&size| size > 0.0)
        .unwrap_or(duration / bin_count as f64);
    let total_span = bin_size * bin_count as f64;

    let low = start_bin.min(end_bin).max(0.0);
    let high = start_bin.max(end_bin).min(bin_count as f64);
    let start_index = low as usize;
    let mut end_index = high as usize;
    if end_index <= start_index && high > low {
        end_index = (start_index + 1).min(bin_count);
    }
    let start_seconds = start_index as f64 * bin_size;
    let end_seconds = (end_index as f64 * bin_size).min(total_span);

    let note_count = notes.first().map_or(0, |first| {
        notes
            .iter()
            .map(|note| note.time - first.time)
            .filter(|&offset| {
                start_seconds <= offset && offset <= end_seconds + NOTE_TIME_TOLERANCE
            })
            .count()
    });
    let span = end_seconds - start_seconds;
    let average_density = if span > 0.0 {
        note_count as f64 / span
    } else {
        0.0
    };
    let gauge_increase = total_value
        .filter(|_| !notes.is_empty())
        .map(|total| total / notes.len() as f64 * note_count as f64);

    Some(RangeSelectionStats {
        start_seconds,
        end_seconds,
        note_count,
        gauge_increase,
        average_density,
        rms_density: compute_range_rms(per_second_total, bin_size, start_seconds, end_seconds),
        cms_density: compute_range_cms(per_second_total, bin_size, start_seconds, end_seconds),
    })
}
