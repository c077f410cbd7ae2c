//! End-to-end detection of a grossly leaky target on the real timer.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tattle::measurement::black_box;
use tattle::{assert_leak_detected, Class, Detector, Target, DEFAULT_SEED};

/// Branches on the input's first byte: class Random pays for a spin loop the
/// class Fixed path never enters. The timing gap is orders of magnitude
/// above the noise floor, so detection must succeed on any host.
struct BranchOnInput {
    rng: Xoshiro256PlusPlus,
}

impl Target for BranchOnInput {
    fn chunk_size(&self) -> usize {
        1
    }

    fn prepare_inputs(&mut self, inputs: &mut [u8], classes: &mut [Class]) {
        for (input, class) in inputs.iter_mut().zip(classes.iter_mut()) {
            if self.rng.random::<bool>() {
                *class = Class::Random;
                *input = 1;
            } else {
                *class = Class::Fixed;
                *input = 0;
            }
        }
    }

    fn execute(&mut self, input: &[u8]) {
        if input[0] == 1 {
            for i in 0u64..2000 {
                black_box(i);
            }
        } else {
            black_box(0u64);
        }
    }
}

#[test]
fn detects_branch_on_input_class() {
    let mut target = BranchOnInput {
        rng: Xoshiro256PlusPlus::seed_from_u64(DEFAULT_SEED),
    };

    let outcome = Detector::new()
        .measurements(2_000)
        .sample_floor(1_000)
        .test_tries(2)
        .run(&mut target)
        .unwrap();

    assert_leak_detected!(outcome);
    assert!(
        outcome.report().max_t > 10.0,
        "a 2000-iteration spin must dominate the noise, got t={}",
        outcome.report().max_t
    );
}
