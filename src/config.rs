//! Configuration for a detection run.

use crate::constants::{ENOUGH_MEASUREMENTS, TEST_TRIES, T_THRESHOLD_BANANAS, T_THRESHOLD_MODERATE};

/// Configuration options for [`Detector`](crate::Detector).
///
/// All fields are public so hosts embedding the detector can construct a
/// configuration directly; the [`Detector`](crate::Detector) builder methods
/// cover the common adjustments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Samples measured per round.
    ///
    /// Each round allocates buffers proportional to this count, measures the
    /// target once per sample, and feeds the results into the accumulators.
    /// Default: 10,000.
    pub number_measurements: usize,

    /// Samples discarded at the head and tail of every round.
    ///
    /// The first and last measurements of a round are most exposed to edge
    /// effects (cold caches, buffer teardown); they are measured but never
    /// reach the statistics. Default: 20.
    pub drop_size: usize,

    /// Minimum class-0 sample count before a slot's t-statistic is trusted
    /// and before the overall verdict is more than "insufficient data".
    ///
    /// Default: 10,000.
    pub enough_measurements: usize,

    /// Independent detection attempts before the final verdict is returned.
    ///
    /// Each attempt starts from fresh accumulators and a fresh percentile
    /// table; measurements accumulate across rounds only within one attempt.
    /// Default: 10.
    pub test_tries: usize,

    /// |t| above this means the test failed. Default: 10.
    pub t_threshold_moderate: f64,

    /// |t| above this means the test failed with overwhelming probability.
    /// Default: 500.
    pub t_threshold_bananas: f64,

    /// Print a progress line after every round. Default: false.
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            number_measurements: 10_000,
            drop_size: 20,
            enough_measurements: ENOUGH_MEASUREMENTS,
            test_tries: TEST_TRIES,
            t_threshold_moderate: T_THRESHOLD_MODERATE,
            t_threshold_bananas: T_THRESHOLD_BANANAS,
            progress: false,
        }
    }
}

impl Config {
    /// Rounds per attempt: just enough to clear the sample floor given the
    /// per-round yield after head/tail dropping.
    ///
    /// # Panics
    ///
    /// Panics if the configuration drops every sample
    /// (`number_measurements <= 2 * drop_size`). The builder methods uphold
    /// this, but `Config` can also be built by hand.
    pub(crate) fn rounds_per_attempt(&self) -> usize {
        assert!(
            self.number_measurements > 2 * self.drop_size,
            "round of {} measurements would be fully consumed by 2x{} dropped edge samples",
            self.number_measurements,
            self.drop_size
        );
        let kept = self.number_measurements - 2 * self.drop_size;
        self.enough_measurements / kept + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_regime_needs_two_rounds() {
        let config = Config::default();
        // 10_000 / (10_000 - 40) + 1
        assert_eq!(config.rounds_per_attempt(), 2);
    }

    #[test]
    fn small_rounds_need_more_attempts() {
        let config = Config {
            number_measurements: 150,
            drop_size: 20,
            ..Config::default()
        };
        assert_eq!(config.rounds_per_attempt(), 10_000 / 110 + 1);
    }

    #[test]
    #[should_panic(expected = "fully consumed")]
    fn hand_built_config_dropping_every_sample_is_rejected() {
        let config = Config {
            number_measurements: 40,
            drop_size: 20,
            ..Config::default()
        };
        config.rounds_per_attempt();
    }
}
