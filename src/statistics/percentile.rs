//! Empirical percentile thresholds for outlier cropping.
//!
//! The crop quantiles follow `q_i = 1 - 0.5^(10*(i+1)/100)`: they cluster
//! near 1, keeping many fine-grained crop points in the long right tail of
//! the timing distribution while the first few indices still cut coarsely
//! near the median. The exact skew is an empirical tuning choice preserved
//! for compatibility with the reference methodology.

use crate::constants::NUMBER_PERCENTILES;

/// A frozen table of 100 crop thresholds.
///
/// Computed exactly once per detection attempt from the first completed
/// batch of raw durations; every later batch is cropped against the same
/// thresholds so the 100 cropped tests bin consistently for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentileTable {
    thresholds: [i64; NUMBER_PERCENTILES],
}

impl PercentileTable {
    /// Estimate the table from a batch of raw durations.
    ///
    /// Sorts `samples` ascending in place; threshold `i` is the value at
    /// sorted position `floor(q_i * N)`, clamped below `N` to guard against
    /// the quantile product rounding up to exactly `N`.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is empty.
    pub fn estimate(samples: &mut [i64]) -> Self {
        assert!(
            !samples.is_empty(),
            "cannot estimate percentiles of an empty batch"
        );
        samples.sort_unstable();

        let n = samples.len();
        let mut thresholds = [0i64; NUMBER_PERCENTILES];
        for (i, slot) in thresholds.iter_mut().enumerate() {
            let which = 1.0 - 0.5f64.powf(10.0 * (i as f64 + 1.0) / NUMBER_PERCENTILES as f64);
            let pos = ((which * n as f64) as usize).min(n - 1);
            *slot = samples[pos];
        }
        Self { thresholds }
    }

    /// The crop threshold for cropped test `index` in `0..100`.
    #[inline]
    pub fn threshold(&self, index: usize) -> i64 {
        self.thresholds[index]
    }

    /// All 100 thresholds, in non-decreasing order.
    pub fn thresholds(&self) -> &[i64; NUMBER_PERCENTILES] {
        &self.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_non_decreasing() {
        let mut samples: Vec<i64> = (0..10_000).map(|i| (i * 7919) % 100_000).collect();
        let table = PercentileTable::estimate(&mut samples);
        for w in table.thresholds().windows(2) {
            assert!(w[0] <= w[1], "thresholds must be non-decreasing");
        }
    }

    #[test]
    fn estimation_is_deterministic() {
        let samples: Vec<i64> = (0..5000).map(|i| (i * 31) % 9973).collect();
        let a = PercentileTable::estimate(&mut samples.clone());
        let b = PercentileTable::estimate(&mut samples.clone());
        assert_eq!(a, b);
    }

    #[test]
    fn last_threshold_comes_from_inside_the_array() {
        // q_99 = 1 - 0.5^10 is close to 1; the clamp must keep the index < N.
        let mut samples: Vec<i64> = (1..=100).collect();
        let table = PercentileTable::estimate(&mut samples);
        assert!(table.threshold(99) <= 100);
        assert_eq!(table.threshold(99), samples[(0.999_023_437_5 * 100.0) as usize]);
    }

    #[test]
    fn quantiles_cluster_near_the_top() {
        let mut samples: Vec<i64> = (0..100_000).collect();
        let table = PercentileTable::estimate(&mut samples);
        // First index cuts near the 6.7th percentile, last near the 99.9th.
        assert!(table.threshold(0) < 7_000);
        assert!(table.threshold(99) > 99_800);
    }

    #[test]
    fn single_sample_batch_is_handled() {
        let mut samples = [37i64];
        let table = PercentileTable::estimate(&mut samples);
        assert!(table.thresholds().iter().all(|&t| t == 37));
    }

    #[test]
    #[should_panic(expected = "empty batch")]
    fn empty_batch_panics() {
        let mut samples: [i64; 0] = [];
        PercentileTable::estimate(&mut samples);
    }
}
