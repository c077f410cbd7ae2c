//! Measurement infrastructure.
//!
//! This module provides:
//! - [`CycleTimer`] - a monotonic tick source (`rdtsc` on x86_64,
//!   `cntvct_el0` on aarch64, `Instant` nanoseconds elsewhere)
//! - [`MeasurementBatch`] - per-round buffer management and the measure loop
//!
//! Tick sources are deliberately raw: durations are compared between classes,
//! never converted to wall time, so the unit only has to be consistent within
//! a run. Non-positive durations (counter wraparound, OS preemption landing
//! between the reads) are tolerated by marking the sample invalid downstream
//! rather than failing the round.

mod batch;
mod timer;

pub use batch::{Batch, MeasurementBatch};
pub use timer::{black_box, CycleTimer};
