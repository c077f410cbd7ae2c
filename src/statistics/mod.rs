//! Streaming statistics for leakage detection.
//!
//! This module provides:
//! - [`WelchAccumulator`] - online per-class mean/variance with Welch's t
//! - [`PercentileTable`] - the frozen crop thresholds for outlier-robust tests

mod percentile;
mod ttest;

pub use percentile::PercentileTable;
pub use ttest::WelchAccumulator;
