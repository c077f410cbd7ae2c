//! The outer detection driver.

use tracing::debug;

use crate::bank::TestBank;
use crate::config::Config;
use crate::error::Error;
use crate::measurement::MeasurementBatch;
use crate::output;
use crate::report::{Outcome, Report, Verdict};
use crate::target::Target;

/// Main entry point: repeatedly measures a [`Target`] and decides whether
/// its timing leaks.
///
/// Use the builder methods to adjust the measurement regime, then either
/// [`run`](Self::run) for a bounded detection (up to `test_tries` independent
/// attempts) or [`monitor`](Self::monitor) for the continuous mode.
///
/// # Example
///
/// ```ignore
/// use tattle::{Detector, Outcome};
///
/// let outcome = Detector::new()
///     .measurements(20_000)
///     .test_tries(5)
///     .run(&mut my_target)?;
///
/// match outcome {
///     Outcome::MaybeConstantTime { report, .. } => {
///         println!("max t: {:.2} - no evidence of a leak", report.max_t);
///     }
///     Outcome::Leaking { report, .. } => {
///         println!("leaking! max t: {:.2}", report.max_t);
///     }
///     Outcome::Inconclusive { .. } => println!("not enough valid samples"),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: Config,
}

impl Detector {
    /// Create a detector with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set samples measured per round.
    ///
    /// # Panics
    ///
    /// Panics if `n` does not exceed twice the drop size.
    pub fn measurements(mut self, n: usize) -> Self {
        assert!(
            n > 2 * self.config.drop_size,
            "measurements per round must exceed 2x drop_size, got {}",
            n
        );
        self.config.number_measurements = n;
        self
    }

    /// Set head/tail samples discarded per round.
    pub fn drop_size(mut self, n: usize) -> Self {
        assert!(
            self.config.number_measurements > 2 * n,
            "drop_size {} would consume the whole round",
            n
        );
        self.config.drop_size = n;
        self
    }

    /// Set the sample floor below which verdicts are withheld.
    ///
    /// # Panics
    ///
    /// Panics if `n` is 0.
    pub fn sample_floor(mut self, n: usize) -> Self {
        assert!(n > 0, "sample floor must be > 0");
        self.config.enough_measurements = n;
        self
    }

    /// Set the number of independent detection attempts.
    ///
    /// # Panics
    ///
    /// Panics if `n` is 0.
    pub fn test_tries(mut self, n: usize) -> Self {
        assert!(n > 0, "test_tries must be > 0");
        self.config.test_tries = n;
        self
    }

    /// Print a progress line after every round.
    pub fn progress(mut self, enabled: bool) -> Self {
        self.config.progress = enabled;
        self
    }

    /// The current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Driving
    // =========================================================================

    /// Run a bounded detection: up to `test_tries` independent attempts,
    /// stopping early on the first attempt whose final verdict is a pass.
    ///
    /// Each attempt starts with fresh accumulators and a fresh percentile
    /// table, calls [`Target::init`] once, then performs enough rounds to
    /// clear the sample floor; measurements accumulate across rounds within
    /// the attempt.
    ///
    /// # Errors
    ///
    /// [`Error::Allocation`] if a round's working buffers cannot be
    /// allocated.
    pub fn run<T: Target + ?Sized>(&self, target: &mut T) -> Result<Outcome, Error> {
        let rounds = self.config.rounds_per_attempt();
        let mut last: Option<Report> = None;

        for attempt in 0..self.config.test_tries {
            let report = self.one_attempt(target, rounds, attempt)?;
            if report.passed() {
                return Ok(Outcome::MaybeConstantTime {
                    report,
                    attempts: attempt + 1,
                });
            }
            debug!(
                attempt = attempt + 1,
                max_t = report.max_t,
                "attempt did not pass, retrying with fresh accumulators"
            );
            last = Some(report);
        }

        // All attempts consumed without a pass; the driver guarantees at
        // least one attempt ran, so `last` is populated here.
        let report = match last {
            Some(report) => report,
            None => unreachable!("test_tries is validated to be > 0"),
        };
        Ok(match report.verdict {
            Verdict::InsufficientData { .. } => Outcome::Inconclusive {
                report,
                attempts: self.config.test_tries,
            },
            _ => Outcome::Leaking {
                report,
                attempts: self.config.test_tries,
            },
        })
    }

    /// Continuous monitor mode: a single attempt's accumulators, rounds
    /// forever, one report per round handed to `sink`. There is no natural
    /// termination - the sink returning `false` is the caller-imposed
    /// budget.
    ///
    /// # Errors
    ///
    /// [`Error::Allocation`] if a round's working buffers cannot be
    /// allocated.
    pub fn monitor<T: Target + ?Sized>(
        &self,
        target: &mut T,
        mut sink: impl FnMut(&Report) -> bool,
    ) -> Result<(), Error> {
        let mut bank = TestBank::new(&self.config);
        let batcher = MeasurementBatch::new(&self.config);
        target.init();

        loop {
            let batch = batcher.run(target)?;
            bank.update(&batch);
            let report = bank.evaluate();
            if self.config.progress {
                println!("{}", output::format_progress(&report));
            }
            if !sink(&report) {
                return Ok(());
            }
        }
    }

    fn one_attempt<T: Target + ?Sized>(
        &self,
        target: &mut T,
        rounds: usize,
        attempt: usize,
    ) -> Result<Report, Error> {
        let mut bank = TestBank::new(&self.config);
        let batcher = MeasurementBatch::new(&self.config);
        target.init();

        let mut report = bank.evaluate();
        for round in 0..rounds {
            let batch = batcher.run(target)?;
            bank.update(&batch);
            report = bank.evaluate();
            if self.config.progress {
                println!(
                    "attempt {}/{}, round {}/{}: {}",
                    attempt + 1,
                    self.config.test_tries,
                    round + 1,
                    rounds,
                    output::format_progress(&report)
                );
            }
        }
        Ok(report)
    }
}
