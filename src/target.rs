//! The seam between the detector and the function under test.

use crate::types::Class;

/// A function under test together with its input policy.
///
/// The detector owns the measurement loop and the statistics; everything
/// specific to the code being tested lives behind this trait. One `Target`
/// value corresponds to one function variant under test - hosts testing
/// several operations construct one target per operation.
///
/// The closures-into-trait shape matters for validity: `execute` must run
/// identical code paths for both classes. Only the input *bytes* may differ,
/// never the operations performed, or the detector will faithfully report
/// the overhead difference as a leak.
pub trait Target {
    /// Bytes of input consumed per sample.
    fn chunk_size(&self) -> usize;

    /// One-time setup before each detection attempt (e.g. seeding internal
    /// state). Default: no-op.
    fn init(&mut self) {}

    /// Fill `inputs` (length `measurements * chunk_size`) and assign each
    /// sample a class label. The class-assignment policy - random classes,
    /// fixed boundary inputs, whatever distinguishes the hypothesized leak -
    /// is owned entirely by the target.
    ///
    /// `classes` arrives pre-filled with [`Class::Fixed`]; `inputs` arrives
    /// zeroed.
    fn prepare_inputs(&mut self, inputs: &mut [u8], classes: &mut [Class]);

    /// Run the function under test once on one sample's input.
    ///
    /// Called between the timestamp reads; keep it free of side work
    /// (no RNG, no allocation) so only the function's own timing is measured.
    fn execute(&mut self, input: &[u8]);
}
