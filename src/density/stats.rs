//! Statistics over the non-zero bins of a density histogram.

/// Added to divisors that may be zero.
pub const EPSILON: f64 = 1e-6;

/// Summaries of the non-zero bins of a histogram.
///
/// Silent seconds are left out so that breaks do not dilute the density.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BinStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Quadratic mean, `sqrt(mean(x^2))`.
    pub rms: f64,
    /// Cubic mean, `cbrt(mean(x^3))`.
    pub cms: f64,
    /// Contraharmonic mean, `sum(x^2) / sum(x)`.
    pub chm: f64,
    /// Population standard deviation.
    pub std: f64,
}

impl BinStats {
    /// Computes the stats of the non-zero bins, or `None` if every bin is zero.
    #[must_use]
    pub fn of_non_zero(bins: &[u32]) -> Option<Self> {
        let (count, sum, sum_sq, sum_cube) = bins
            .iter()
            .filter(|&&bin| bin > 0)
            .map(|&bin| f64::from(bin))
            .fold((0usize, 0.0, 0.0, 0.0), |(count, sum, sum_sq, sum_cube), x| {
                (count + 1, sum + x, sum_sq + x * x, sum_cube + x * x * x)
            });
        if count == 0 {
            return None;
        }
        let n = count as f64;
        let mean = sum / n;
        let variance = bins
            .iter()
            .filter(|&&bin| bin > 0)
            .map(|&bin| (f64::from(bin) - mean).powi(2))
            .sum::<f64>()
            / n;
        Some(Self {
            mean,
            rms: (sum_sq / n).sqrt(),
            cms: (sum_cube / n).cbrt(),
            chm: sum_sq / sum,
            std: variance.sqrt(),
        })
    }

    /// How far the peak stands out of the typical bin, in standard deviations. Zero for a flat
    /// histogram.
    #[must_use]
    pub fn gustiness(&self, max: f64) -> f64 {
        if self.std > 0.0 {
            (max - self.mean) / (self.std + EPSILON)
        } else {
            0.0
        }
    }
}
