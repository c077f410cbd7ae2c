//! Online Welch's t-test over two sample classes.
//!
//! State is updated with Welford's single-pass algorithm, which keeps the
//! running mean and second central moment numerically stable regardless of
//! the magnitude of the incoming values. Memory use is constant: six floats
//! per accumulator, however many samples are pushed.

use crate::types::Class;

/// Incremental two-class accumulator for Welch's t-test.
///
/// Each pushed `(value, class)` pair updates the running count, mean, and
/// second central moment of its class. [`t_statistic`](Self::t_statistic)
/// can be read at any point; it is `NaN` until both classes hold at least
/// two samples.
#[derive(Debug, Clone, Default)]
pub struct WelchAccumulator {
    n: [f64; 2],
    mean: [f64; 2],
    m2: [f64; 2],
}

impl WelchAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one sample into the given class.
    ///
    /// Accepts values of either sign and zero; there are no error conditions.
    #[inline]
    pub fn push(&mut self, value: f64, class: Class) {
        let c = class.index();
        self.n[c] += 1.0;
        let delta = value - self.mean[c];
        self.mean[c] += delta / self.n[c];
        self.m2[c] += delta * (value - self.mean[c]);
    }

    /// Welch's t-statistic between the two classes:
    /// `t = (mean0 - mean1) / sqrt(var0/n0 + var1/n1)`.
    ///
    /// Returns `NaN` while either class has fewer than 2 samples, so a
    /// degenerate accumulator can never report a spurious finite t. Callers
    /// filter with `is_finite()`.
    pub fn t_statistic(&self) -> f64 {
        if self.n[0] < 2.0 || self.n[1] < 2.0 {
            return f64::NAN;
        }
        let var = [self.m2[0] / (self.n[0] - 1.0), self.m2[1] / (self.n[1] - 1.0)];
        let num = self.mean[0] - self.mean[1];
        let den = (var[0] / self.n[0] + var[1] / self.n[1]).sqrt();
        num / den
    }

    /// Sample count of one class.
    #[inline]
    pub fn count(&self, class: Class) -> f64 {
        self.n[class.index()]
    }

    /// Running mean of one class. Zero while the class is empty.
    #[inline]
    pub fn mean(&self, class: Class) -> f64 {
        self.mean[class.index()]
    }

    /// Sample variance of one class. `NaN` with fewer than 2 samples.
    pub fn variance(&self, class: Class) -> f64 {
        let c = class.index();
        if self.n[c] < 2.0 {
            return f64::NAN;
        }
        self.m2[c] / (self.n[c] - 1.0)
    }

    /// Total samples across both classes.
    #[inline]
    pub fn total(&self) -> f64 {
        self.n[0] + self.n[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_accumulator_is_degenerate() {
        let acc = WelchAccumulator::new();
        assert!(acc.t_statistic().is_nan());
        assert_eq!(acc.total(), 0.0);
    }

    #[test]
    fn single_class_stays_degenerate() {
        let mut acc = WelchAccumulator::new();
        for i in 0..1000 {
            acc.push(i as f64, Class::Fixed);
        }
        assert!(
            acc.t_statistic().is_nan(),
            "one-sided accumulator must not yield a finite t"
        );
    }

    #[test]
    fn one_sample_per_class_stays_degenerate() {
        let mut acc = WelchAccumulator::new();
        acc.push(10.0, Class::Fixed);
        acc.push(90.0, Class::Random);
        assert!(acc.t_statistic().is_nan());
    }

    #[test]
    fn variance_is_degenerate_below_two_samples() {
        let mut acc = WelchAccumulator::new();
        assert!(acc.variance(Class::Fixed).is_nan());
        acc.push(5.0, Class::Fixed);
        assert!(acc.variance(Class::Fixed).is_nan());
        acc.push(7.0, Class::Fixed);
        assert!((acc.variance(Class::Fixed) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn welford_matches_two_pass_moments() {
        let values = [3.0, -1.5, 0.0, 12.25, 7.0, -4.0, 2.5, 9.75];
        let mut acc = WelchAccumulator::new();
        for &v in &values {
            acc.push(v, Class::Fixed);
        }

        let n = values.len() as f64;
        let mean: f64 = values.iter().sum::<f64>() / n;
        let var: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

        assert!((acc.mean(Class::Fixed) - mean).abs() < 1e-12);
        assert!((acc.variance(Class::Fixed) - var).abs() < 1e-12);
    }

    #[test]
    fn moment_never_negative_under_near_constant_input() {
        // Values differing only in the last ulp stress the update's stability.
        let mut acc = WelchAccumulator::new();
        for i in 0..100_000 {
            let v = 1e9 + (i % 2) as f64 * 1e-6;
            acc.push(v, Class::Fixed);
        }
        assert!(acc.variance(Class::Fixed) >= 0.0);
    }

    #[test]
    fn shifted_classes_give_large_t() {
        let mut acc = WelchAccumulator::new();
        for i in 0..5000 {
            let noise = (i % 7) as f64;
            acc.push(100.0 + noise, Class::Fixed);
            acc.push(150.0 + noise, Class::Random);
        }
        let t = acc.t_statistic();
        assert!(t.is_finite());
        assert!(t.abs() > 500.0, "expected an overwhelming t, got {}", t);
        // Class 0 mean is lower, so t is negative.
        assert!(t < 0.0);
    }

    #[test]
    fn identical_constant_classes_stay_degenerate() {
        // Zero variance in both classes: 0/0 must come out NaN, not a verdict.
        let mut acc = WelchAccumulator::new();
        for _ in 0..100 {
            acc.push(42.0, Class::Fixed);
            acc.push(42.0, Class::Random);
        }
        assert!(acc.t_statistic().is_nan());
    }
}
