//! # tattle
//!
//! Dude, is my code constant time?
//!
//! This crate measures the execution time of a function under test many times
//! on two classes of inputs and runs Welch's t-test to decide whether the
//! timing distributions differ between classes. This is leakage detection,
//! not a timing attack: a leak verdict means the code is observably
//! data-dependent, while a pass is only ever "no evidence of a leak yet".
//!
//! The methodology:
//!
//! - Execution time distributions are skewed towards large timings (a fat
//!   right tail from OS interruptions and cache effects). The detector keeps
//!   the x% fastest timings and repeats for 100 values of x, alongside a
//!   t-test on the uncropped data.
//! - A second-order t-test on centered squared timings catches variance-only
//!   leaks that the first-order tests can miss.
//! - If any of the 102 parallel tests fails, the code is deemed variable
//!   time. The worst-case |t| drives the verdict.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tattle::{Class, Detector, Target};
//!
//! struct CompareSecret { secret: [u8; 16] }
//!
//! impl Target for CompareSecret {
//!     fn chunk_size(&self) -> usize { 16 }
//!     fn prepare_inputs(&mut self, inputs: &mut [u8], classes: &mut [Class]) {
//!         // Class policy: Fixed inputs stay zeroed, Random inputs vary.
//!         for (chunk, class) in inputs.chunks_mut(16).zip(classes.iter_mut()) {
//!             *class = if rand::random() { Class::Random } else { Class::Fixed };
//!             if *class == Class::Random {
//!                 rand::fill(chunk);
//!             }
//!         }
//!     }
//!     fn execute(&mut self, input: &[u8]) {
//!         std::hint::black_box(self.secret.as_slice() == input);
//!     }
//! }
//!
//! let outcome = Detector::new().run(&mut CompareSecret { secret: [0; 16] })?;
//! assert!(!outcome.is_leaking());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod bank;
mod config;
mod constants;
mod detector;
mod error;
mod report;
mod target;
mod types;

// Functional modules
pub mod measurement;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use bank::TestBank;
pub use config::Config;
pub use constants::{
    ALLOCATION_FAILURE_STATUS, DEFAULT_SEED, ENOUGH_MEASUREMENTS, NUMBER_PERCENTILES,
    NUMBER_TESTS, SECOND_ORDER_SLOT, TEST_TRIES, T_THRESHOLD_BANANAS, T_THRESHOLD_MODERATE,
};
pub use detector::Detector;
pub use error::Error;
pub use measurement::{Batch, CycleTimer, MeasurementBatch};
pub use report::{Outcome, Report, Verdict};
pub use statistics::{PercentileTable, WelchAccumulator};
pub use target::Target;
pub use types::Class;

// ============================================================================
// Assertion Macros
// ============================================================================

/// Assert that the outcome indicates constant-time behavior.
/// Panics on a leaking or inconclusive outcome with the full report summary.
///
/// # Example
///
/// ```ignore
/// use tattle::{assert_constant_time, Detector};
///
/// let outcome = Detector::new().run(&mut my_target).unwrap();
/// assert_constant_time!(outcome);
/// ```
#[macro_export]
macro_rules! assert_constant_time {
    ($outcome:expr) => {
        match &$outcome {
            $crate::Outcome::MaybeConstantTime { .. } => {}
            $crate::Outcome::Leaking { report, .. } => {
                panic!(
                    "Timing leak detected!\n\n{}",
                    $crate::output::format_report(report),
                );
            }
            $crate::Outcome::Inconclusive { report, .. } => {
                panic!(
                    "Could not confirm constant-time behavior\n\n{}",
                    $crate::output::format_report(report),
                );
            }
        }
    };
}

/// Assert that a timing leak WAS detected (for testing known-leaky code).
/// Panics on a pass with the report showing why no leak was found.
///
/// # Example
///
/// ```ignore
/// use tattle::{assert_leak_detected, Detector};
///
/// let outcome = Detector::new().run(&mut leaky_target).unwrap();
/// assert_leak_detected!(outcome);
/// ```
#[macro_export]
macro_rules! assert_leak_detected {
    ($outcome:expr) => {
        match &$outcome {
            $crate::Outcome::Leaking { .. } => {}
            $crate::Outcome::MaybeConstantTime { report, .. } => {
                panic!(
                    "Expected timing leak but none was detected\n\n{}",
                    $crate::output::format_report(report),
                );
            }
            $crate::Outcome::Inconclusive { report, .. } => {
                panic!(
                    "Expected timing leak but measurement was inconclusive\n\n{}",
                    $crate::output::format_report(report),
                );
            }
        }
    };
}
