//! Raw cycle-count timestamps.

use std::time::Instant;

pub use std::hint::black_box;

/// Monotonic tick source for before/after timestamps.
///
/// - **x86_64**: `rdtsc` (~0.3ns resolution)
/// - **aarch64**: `cntvct_el0` virtual counter (resolution varies by SoC)
/// - elsewhere: nanoseconds from a process-lifetime `Instant`
///
/// Ticks are signed so that `after - before` subtraction lands directly in
/// the duration domain the statistics consume; a wrapped counter simply
/// yields a non-positive duration, which is dropped downstream.
#[derive(Debug, Clone, Copy)]
pub struct CycleTimer {
    #[cfg_attr(any(target_arch = "x86_64", target_arch = "aarch64"), allow(dead_code))]
    start: Instant,
}

impl CycleTimer {
    /// Create a timer. On architectures without a cycle counter this anchors
    /// the `Instant` epoch the fallback ticks are measured from.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Read the current tick count.
    #[inline]
    pub fn now(&self) -> i64 {
        #[cfg(target_arch = "x86_64")]
        {
            // SAFETY: rdtsc has no preconditions; it only reads the TSC.
            unsafe { core::arch::x86_64::_rdtsc() as i64 }
        }

        #[cfg(target_arch = "aarch64")]
        {
            let ticks: u64;
            // SAFETY: cntvct_el0 is readable from EL0 on all supported OSes.
            unsafe {
                core::arch::asm!("mrs {}, cntvct_el0", out(reg) ticks, options(nomem, nostack));
            }
            ticks as i64
        }

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            self.start.elapsed().as_nanos() as i64
        }
    }

    /// Timer name for diagnostics.
    pub fn name(&self) -> &'static str {
        #[cfg(target_arch = "x86_64")]
        {
            "rdtsc"
        }
        #[cfg(target_arch = "aarch64")]
        {
            "cntvct_el0"
        }
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            "Instant"
        }
    }
}

impl Default for CycleTimer {
    fn default() -> Self {
        Self::new()
    }
}
