//! Simple random number generator for reproducibility.
//!
//! This module provides a lightweight xorshift-based PRNG that doesn't require
//! external dependencies, ensuring reproducible results across runs. Weight
//! initialization needs normally distributed samples, so the generator also
//! exposes a Box-Muller transform over its uniform output.

/// Simple RNG for reproducibility without external crates.
///
/// Uses the xorshift algorithm for fast, deterministic random number
/// generation. An instance is passed explicitly into layer construction so
/// tests can seed it and reproduce exact weight initializations.
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a new RNG with explicit seed (if zero, use a fixed value).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state }
    }

    /// Basic xorshift to generate u32.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x >> 32) as u32
    }

    /// Convert to [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// Sample from a normal distribution via the Box-Muller transform.
    ///
    /// Uses two uniform draws; the first is flipped to (0, 1] so the
    /// logarithm stays finite.
    pub fn next_normal_f32(&mut self, mean: f32, sd: f32) -> f32 {
        let u1 = 1.0 - self.next_f32();
        let u2 = self.next_f32();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
        z * sd + mean
    }
}
