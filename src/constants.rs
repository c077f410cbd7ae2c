//! Detection constants shared across the crate.

/// Number of percentile-cropped first-order tests.
pub const NUMBER_PERCENTILES: usize = 100;

/// Total number of parallel t-tests:
/// 1 first-order uncropped, 100 first-order cropped, 1 second-order.
pub const NUMBER_TESTS: usize = NUMBER_PERCENTILES + 2;

/// Slot index of the second-order (variance leakage) test.
pub const SECOND_ORDER_SLOT: usize = NUMBER_PERCENTILES + 1;

/// Minimum class-0 sample count before a slot's t-statistic is trusted.
pub const ENOUGH_MEASUREMENTS: usize = 10_000;

/// t threshold above which the test failed with overwhelming probability.
pub const T_THRESHOLD_BANANAS: f64 = 500.0;

/// t threshold above which the test failed.
pub const T_THRESHOLD_MODERATE: f64 = 10.0;

/// Independent detection attempts before giving up on a pass.
pub const TEST_TRIES: usize = 10;

/// Process exit status for working-buffer allocation failure.
pub const ALLOCATION_FAILURE_STATUS: i32 = 111;

/// Default deterministic seed for the built-in demo targets.
///
/// The value `0x746174746C65` is "tattle" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x7461_7474_6C65;
