//! Per-round measurement batches.

use tracing::warn;

use crate::config::Config;
use crate::error::Error;
use crate::target::Target;
use crate::types::Class;

use super::timer::CycleTimer;

/// One round's worth of raw measurements: derived durations paired with the
/// class label of each sample.
///
/// Durations are signed ticks; entries `<= 0` (counter wraparound, OS
/// preemption between the timestamp reads) stay in the batch but are excluded
/// from every downstream statistic.
#[derive(Debug, Clone)]
pub struct Batch {
    /// `after - before` ticks, one per kept sample.
    pub durations: Vec<i64>,
    /// Class label of each kept sample, parallel to `durations`.
    pub classes: Vec<Class>,
}

impl Batch {
    /// Number of kept samples (valid or not).
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// Whether the batch holds no samples.
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Number of samples with a usable (positive) duration.
    pub fn valid_count(&self) -> usize {
        self.durations.iter().filter(|&&d| d > 0).count()
    }
}

/// Allocates per-round buffers, drives the target, and produces a [`Batch`].
///
/// Buffer lifetime is scoped to one [`run`](Self::run) call: everything is
/// acquired at the start of the round and released when the round's `Batch`
/// is the only thing left, bounding peak memory to one round's samples plus
/// the fixed accumulator state held elsewhere.
#[derive(Debug)]
pub struct MeasurementBatch {
    timer: CycleTimer,
    measurements: usize,
    drop_size: usize,
}

impl MeasurementBatch {
    /// Create a batcher for the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configuration drops every sample
    /// (`number_measurements <= 2 * drop_size`).
    pub fn new(config: &Config) -> Self {
        Self::with_timer(CycleTimer::new(), config.number_measurements, config.drop_size)
    }

    /// Create a batcher with an explicit timer and sizes.
    pub fn with_timer(timer: CycleTimer, measurements: usize, drop_size: usize) -> Self {
        assert!(
            measurements > 2 * drop_size,
            "round of {} measurements would be fully consumed by 2x{} dropped edge samples",
            measurements,
            drop_size
        );
        Self {
            timer,
            measurements,
            drop_size,
        }
    }

    /// Run one measurement round against the target.
    ///
    /// Fills the input buffer and class labels via
    /// [`Target::prepare_inputs`], executes the target once per sample with
    /// timestamps immediately before and after, and returns the kept
    /// durations (head and tail `drop_size` samples discarded).
    ///
    /// # Errors
    ///
    /// [`Error::Allocation`] if any working buffer cannot be allocated.
    pub fn run<T: Target + ?Sized>(&self, target: &mut T) -> Result<Batch, Error> {
        let m = self.measurements;
        let chunk = target.chunk_size();

        let mut before = try_vec(m, 0i64)?;
        let mut after = try_vec(m, 0i64)?;
        let mut inputs = try_vec(m * chunk, 0u8)?;
        let mut classes = try_vec(m, Class::Fixed)?;

        target.prepare_inputs(&mut inputs, &mut classes);

        for i in 0..m {
            let input = &inputs[i * chunk..(i + 1) * chunk];
            before[i] = self.timer.now();
            target.execute(input);
            after[i] = self.timer.now();
        }

        let keep = self.drop_size..m - self.drop_size;
        let kept = keep.len();
        let mut durations = try_vec(kept, 0i64)?;
        for (slot, i) in durations.iter_mut().zip(keep.clone()) {
            *slot = after[i] - before[i];
        }
        let mut kept_classes = try_vec(kept, Class::Fixed)?;
        kept_classes.copy_from_slice(&classes[keep]);

        let batch = Batch {
            durations,
            classes: kept_classes,
        };

        let invalid = batch.len() - batch.valid_count();
        if invalid * 100 > batch.len() {
            warn!(
                invalid,
                total = batch.len(),
                "more than 1% of durations were non-positive; timer may be too coarse"
            );
        }

        Ok(batch)
    }
}

/// Allocate a filled `Vec`, mapping allocation failure to [`Error::Allocation`].
fn try_vec<T: Clone>(len: usize, fill: T) -> Result<Vec<T>, Error> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| Error::Allocation)?;
    v.resize(len, fill);
    Ok(v)
}
