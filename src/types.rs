//! Common types.

/// Input class identifier for timing measurements.
///
/// The two classes partition the inputs whose timing distributions are being
/// compared. The class-assignment policy (which inputs land in which class)
/// belongs entirely to the [`Target`](crate::Target) implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// Fixed input that might trigger timing variations.
    Fixed,
    /// Randomly sampled input for comparison.
    Random,
}

impl Class {
    /// Index of this class in per-class accumulator state.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Class::Fixed => 0,
            Class::Random => 1,
        }
    }
}
