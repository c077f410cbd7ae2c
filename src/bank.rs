//! The bank of 102 parallel t-tests and its update/evaluate logic.

use crate::config::Config;
use crate::constants::{NUMBER_TESTS, SECOND_ORDER_SLOT};
use crate::measurement::Batch;
use crate::report::{Report, Verdict};
use crate::statistics::{PercentileTable, WelchAccumulator};
use crate::types::Class;

/// Fixed-size ordered collection of accumulators for one detection attempt.
///
/// Slot meaning is fixed for the lifetime of the bank:
/// - slot 0: first-order test on raw durations
/// - slots 1..=100: first-order tests on percentile-cropped durations
///   (slot `i + 1` keeps durations below crop threshold `i`)
/// - slot 101: second-order test on centered squared durations
///
/// The crop thresholds are estimated from the first batch fed to
/// [`update`](Self::update) and frozen for the rest of the bank's life, so
/// every cropped test bins consistently across rounds.
#[derive(Debug, Clone)]
pub struct TestBank {
    slots: Vec<WelchAccumulator>,
    percentiles: Option<PercentileTable>,
    enough: f64,
    t_moderate: f64,
    t_bananas: f64,
}

impl TestBank {
    /// Create a fresh bank for one detection attempt.
    pub fn new(config: &Config) -> Self {
        Self {
            slots: vec![WelchAccumulator::new(); NUMBER_TESTS],
            percentiles: None,
            enough: config.enough_measurements as f64,
            t_moderate: config.t_threshold_moderate,
            t_bananas: config.t_threshold_bananas,
        }
    }

    /// Feed one completed batch into the accumulators.
    ///
    /// The first call locks the percentile table from this batch's raw
    /// durations; later calls reuse it. For every valid (positive) duration:
    /// slot 0 is updated unconditionally, each cropped slot is updated when
    /// the duration falls below its threshold, and once slot 0 holds more
    /// than the sample floor of class-0 data the squared deviation from the
    /// live running mean feeds the second-order slot under the same class.
    pub fn update(&mut self, batch: &Batch) {
        if batch.is_empty() {
            return;
        }
        let table = self.percentiles.get_or_insert_with(|| {
            let mut scratch = batch.durations.clone();
            PercentileTable::estimate(&mut scratch)
        });
        let thresholds = *table.thresholds();

        for (&duration, &class) in batch.durations.iter().zip(&batch.classes) {
            // CPU cycle counter overflowed or measurement was preempted.
            if duration <= 0 {
                continue;
            }
            let x = duration as f64;

            // First-order test on the raw execution time.
            self.slots[0].push(x, class);

            // First-order tests on cropped data.
            for (i, &threshold) in thresholds.iter().enumerate() {
                if duration < threshold {
                    self.slots[i + 1].push(x, class);
                }
            }

            // Second-order test, gated on enough first-order data to make
            // the centering estimate meaningful.
            if self.slots[0].count(Class::Fixed) > self.enough {
                let centered = x - self.slots[0].mean(class);
                self.slots[SECOND_ORDER_SLOT].push(centered * centered, class);
            }
        }
    }

    /// Evaluate the bank into a verdict and diagnostics.
    ///
    /// Scans all slots whose class-0 count clears the sample floor for the
    /// maximum |t| (first occurrence wins ties); non-finite statistics never
    /// qualify. When even the leading slot's total is below the floor the
    /// verdict is [`Verdict::InsufficientData`].
    pub fn evaluate(&self) -> Report {
        let mut best = 0.0;
        let mut leading = 0;
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.count(Class::Fixed) > self.enough {
                let t = slot.t_statistic().abs();
                if t.is_finite() && t > best {
                    best = t;
                    leading = i;
                }
            }
        }

        // The verdict reads the selected slot's t directly; when no slot
        // cleared the per-slot floor this falls back to the raw test.
        let t = self.slots[leading].t_statistic().abs();
        let max_t = if t.is_finite() { t } else { 0.0 };

        let total = self.slots[leading].total();
        if total < self.enough {
            return Report {
                verdict: Verdict::InsufficientData {
                    still_needed: self.enough - total,
                },
                max_t,
                max_tau: 0.0,
                samples_to_detect: f64::INFINITY,
                total_samples: total,
                leading_test: leading,
            };
        }

        let max_tau = max_t / total.sqrt();
        let verdict = if max_t > self.t_bananas {
            Verdict::DefinitelyLeaking
        } else if max_t > self.t_moderate {
            Verdict::ProbablyLeaking
        } else {
            Verdict::NoLeakDetected
        };

        Report {
            verdict,
            max_t,
            max_tau,
            samples_to_detect: (5.0 * 5.0) / (max_tau * max_tau),
            total_samples: total,
            leading_test: leading,
        }
    }

    /// The frozen crop thresholds, once the first batch has been seen.
    pub fn percentiles(&self) -> Option<&PercentileTable> {
        self.percentiles.as_ref()
    }

    /// Read access to one accumulator slot.
    ///
    /// # Panics
    ///
    /// Panics if `index >= NUMBER_TESTS`.
    pub fn slot(&self, index: usize) -> &WelchAccumulator {
        &self.slots[index]
    }
}
