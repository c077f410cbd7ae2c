//! Demo driver: checks two byte-comparison routines for timing leakage.
//!
//! `tattle leaky` tests an early-exit comparison (expected to leak),
//! `tattle safe` tests an accumulate-xor comparison (expected to pass),
//! and no argument runs both. Exits with status 111 on allocation failure,
//! 1 if any tested routine leaks, 0 otherwise.

use std::process::exit;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tattle::measurement::black_box;
use tattle::{
    output, Class, Detector, Error, Target, ALLOCATION_FAILURE_STATUS, DEFAULT_SEED,
};

const CHUNK: usize = 32;

/// Two-class input policy shared by both demo targets: Fixed samples keep
/// the zeroed buffer (matching the all-zero secret, so the comparison scans
/// the full length), Random samples get fresh random bytes.
fn prepare(rng: &mut Xoshiro256PlusPlus, inputs: &mut [u8], classes: &mut [Class]) {
    for (chunk, class) in inputs.chunks_mut(CHUNK).zip(classes.iter_mut()) {
        if rng.random::<bool>() {
            *class = Class::Random;
            rng.fill(chunk);
        } else {
            *class = Class::Fixed;
        }
    }
}

/// Early-exit comparison: returns at the first mismatching byte.
struct EarlyExitCompare {
    secret: [u8; CHUNK],
    rng: Xoshiro256PlusPlus,
}

impl Target for EarlyExitCompare {
    fn chunk_size(&self) -> usize {
        CHUNK
    }

    fn prepare_inputs(&mut self, inputs: &mut [u8], classes: &mut [Class]) {
        prepare(&mut self.rng, inputs, classes);
    }

    fn execute(&mut self, input: &[u8]) {
        let mut equal = true;
        for (a, b) in self.secret.iter().zip(input) {
            if a != b {
                equal = false;
                break;
            }
        }
        black_box(equal);
    }
}

/// Constant-time comparison: accumulates the xor of every byte pair.
struct CtCompare {
    secret: [u8; CHUNK],
    rng: Xoshiro256PlusPlus,
}

impl Target for CtCompare {
    fn chunk_size(&self) -> usize {
        CHUNK
    }

    fn prepare_inputs(&mut self, inputs: &mut [u8], classes: &mut [Class]) {
        prepare(&mut self.rng, inputs, classes);
    }

    fn execute(&mut self, input: &[u8]) {
        let mut acc = 0u8;
        for (a, b) in self.secret.iter().zip(input) {
            acc |= a ^ b;
        }
        black_box(acc == 0);
    }
}

fn check(name: &str, target: &mut dyn Target) -> bool {
    println!("Testing {}...", name);
    let detector = Detector::new().progress(true);
    match detector.run(target) {
        Ok(outcome) => {
            println!("{}", output::format_report(outcome.report()));
            outcome.is_leaking()
        }
        Err(Error::Allocation) => {
            eprintln!("tattle: {}", Error::Allocation);
            exit(ALLOCATION_FAILURE_STATUS);
        }
    }
}

fn main() {
    let mode = std::env::args().nth(1);
    let rng = Xoshiro256PlusPlus::seed_from_u64(DEFAULT_SEED);

    let mut leaked = false;
    match mode.as_deref() {
        Some("leaky") => {
            leaked |= check(
                "early-exit compare",
                &mut EarlyExitCompare {
                    secret: [0; CHUNK],
                    rng,
                },
            );
        }
        Some("safe") => {
            leaked |= check(
                "constant-time compare",
                &mut CtCompare {
                    secret: [0; CHUNK],
                    rng,
                },
            );
        }
        None => {
            leaked |= check(
                "early-exit compare",
                &mut EarlyExitCompare {
                    secret: [0; CHUNK],
                    rng: rng.clone(),
                },
            );
            leaked |= check(
                "constant-time compare",
                &mut CtCompare {
                    secret: [0; CHUNK],
                    rng,
                },
            );
        }
        Some(other) => {
            eprintln!("usage: tattle [leaky|safe] (got {:?})", other);
            exit(2);
        }
    }

    exit(if leaked { 1 } else { 0 });
}
