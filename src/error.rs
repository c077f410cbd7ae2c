//! Error types for the detector.

use std::fmt;

/// Fatal errors from the measurement layer.
///
/// The detector cannot produce meaningful statistics without its per-round
/// working buffers, so allocation failure is unrecoverable from the core's
/// point of view. How it is surfaced (exit status, panic, propagation) is the
/// host's decision; the bundled binary exits with
/// [`ALLOCATION_FAILURE_STATUS`](crate::ALLOCATION_FAILURE_STATUS).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A per-round measurement buffer could not be allocated.
    Allocation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation => write!(f, "failed to allocate measurement buffers"),
        }
    }
}

impl std::error::Error for Error {}
