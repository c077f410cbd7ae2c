//! Verdicts and per-round reports.

use serde::{Deserialize, Serialize};

/// Classification of one evaluation of the test bank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    /// Not enough samples yet to say anything.
    InsufficientData {
        /// Samples still to collect before the floor is reached.
        still_needed: f64,
    },
    /// max|t| exceeded the high threshold: failed with overwhelming
    /// probability.
    DefinitelyLeaking,
    /// max|t| exceeded the moderate threshold: failed.
    ProbablyLeaking,
    /// No test fired. Absence of evidence after a finite run, not proof of
    /// constant-time behavior.
    NoLeakDetected,
}

/// Diagnostics from one evaluation of the test bank.
///
/// Recomputed every round; never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Report {
    /// The verdict this round.
    pub verdict: Verdict,
    /// Largest |t| among slots with enough class-0 samples.
    pub max_t: f64,
    /// `max_t / sqrt(total_samples)`: a distribution-distance measure that
    /// is comparable across differently-sized runs.
    pub max_tau: f64,
    /// `(5 / max_tau)^2`: roughly how many measurements would be needed to
    /// barely detect a leak of the observed size (reach t = 5).
    pub samples_to_detect: f64,
    /// Total samples (both classes) in the leading slot.
    pub total_samples: f64,
    /// Index of the leading slot: 0 = raw first order, 1..=100 = cropped,
    /// 101 = second order.
    pub leading_test: usize,
}

impl Report {
    /// Whether this round's verdict was a provisional pass.
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::NoLeakDetected
    }
}

/// Final outcome of a full detection run (all attempts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Outcome {
    /// Every test stayed quiet in some attempt. "Maybe" is deliberate: a
    /// finite run can only ever fail to find evidence.
    MaybeConstantTime {
        /// The passing attempt's final report.
        report: Report,
        /// Attempts consumed, including the passing one.
        attempts: usize,
    },
    /// A test fired in every attempt.
    Leaking {
        /// The last attempt's final report.
        report: Report,
        /// Attempts consumed.
        attempts: usize,
    },
    /// The run ended without ever clearing the sample floor.
    Inconclusive {
        /// The last attempt's final report.
        report: Report,
        /// Attempts consumed.
        attempts: usize,
    },
}

impl Outcome {
    /// The final report, whichever variant this is.
    pub fn report(&self) -> &Report {
        match self {
            Outcome::MaybeConstantTime { report, .. }
            | Outcome::Leaking { report, .. }
            | Outcome::Inconclusive { report, .. } => report,
        }
    }

    /// Whether a leak was detected.
    pub fn is_leaking(&self) -> bool {
        matches!(self, Outcome::Leaking { .. })
    }
}
