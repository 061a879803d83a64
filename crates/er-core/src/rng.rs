//! Seedable RNG used for mock traffic generation.
//!
//! # Determinism strategy
//!
//! A run owns one root `DispatchRng` seeded from `DispatchConfig::seed`.  Each
//! dispatched incident gets its own child stream:
//!
//!   child_seed = root.next_u64() XOR (offset * MIXING_CONSTANT)
//!
//! Children are derived sequentially, in dispatch order, before any routing
//! call is issued.  Traffic factors therefore depend only on the seed and the
//! dispatch order, never on whether annotation ran on one thread or many.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct DispatchRng(SmallRng);

impl DispatchRng {
    pub fn new(seed: u64) -> Self {
        DispatchRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child stream.
    pub fn child(&mut self, offset: u64) -> DispatchRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        DispatchRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
