//! The persisted form of a [`DensityResult`].
//!
//! Only the bins and the duration are kept. Every statistic is derived again on restore, so a
//! change to the statistics never leaves a cache stale.

use super::{DensityResult, LaneCounts};

/// Bins and duration of a [`DensityResult`], as stored by caches.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensitySnapshot {
    /// Notes in each bin.
    pub per_second_total: Vec<u32>,
    /// Notes in each bin, per lane. May be empty in older caches.
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_second_by_key: Vec<LaneCounts>,
    /// Seconds between the first and the last note.
    pub duration: f64,
}

impl DensityResult {
    /// Takes the bins and the duration for caching.
    #[must_use]
    pub fn snapshot(&self) -> DensitySnapshot {
        DensitySnapshot {
            per_second_total: self.per_second_total.clone(),
            per_second_by_key: self.per_second_by_key.clone(),
            duration: self.duration,
        }
    }
}

impl DensitySnapshot {
    /// Derives the result again with [`DensityResult::recompute`].
    ///
    /// Without the lane rows, the total of each bin is put on the first lane.
    #[must_use]
    pub fn restore(self, total_value: Option<f64>) -> DensityResult {
        let Self {
            per_second_total,
            mut per_second_by_key,
            duration,
        } = self;
        if per_second_by_key.is_empty() && !per_second_total.is_empty() {
            per_second_by_key = per_second_total
                .iter()
                .map(|&count| -> LaneCounts {
                    std::array::from_fn(|lane| if lane == 0 { count } else { 0 })
                })
                .collect();
        }
        DensityResult::recompute(per_second_total, per_second_by_key, duration, total_value)
    }
}

impl From<&DensityResult> for DensitySnapshot {
    fn from(result: &DensityResult) -> Self {
        result.snapshot()
    }
}
