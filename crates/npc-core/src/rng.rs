//! Deterministic RNG helpers.
//!
//! Every stochastic behavior owns its own generator instead of sharing process-wide state, so a
//! fixed seed reproduces a simulation exactly. This is **not** cryptographic.

use core::f32::consts::{PI, TAU};

use crate::{Vec2, Vec3};

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform sample in `[0, 1)`.
    fn next_f32_unit(&mut self) -> f32 {
        // 24 bits of mantissa.
        let x = self.next_u32() >> 8;
        (x as f32) / ((1u32 << 24) as f32)
    }

    fn next_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }

    /// Uniform sample in `[min, max)`. Reversed bounds are swapped.
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        lo + (hi - lo) * self.next_f32_unit()
    }

    /// Vector with a uniformly random heading and a magnitude in `[min_mag, max_mag)`.
    fn random_vec2(&mut self, min_mag: f32, max_mag: f32) -> Vec2 {
        let angle = self.uniform(0.0, TAU);
        let mag = self.uniform(min_mag, max_mag);
        Vec2::new(mag * angle.cos(), mag * angle.sin())
    }

    /// Vector with a random direction (spherical coordinates) and a magnitude in
    /// `[min_mag, max_mag)`.
    fn random_vec3(&mut self, min_mag: f32, max_mag: f32) -> Vec3 {
        let theta = self.uniform(0.0, TAU);
        let phi = self.uniform(0.0, PI);
        let mag = self.uniform(min_mag, max_mag);
        let sin_phi = phi.sin();
        Vec3::new(
            mag * sin_phi * theta.cos(),
            mag * sin_phi * theta.sin(),
            mag * phi.cos(),
        )
    }
}

/// SplitMix64: good seeding RNG and small deterministic generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        mix64(self.state)
    }
}

impl Default for SplitMix64 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.step()
    }
}

pub fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Derive an independent stream seed for one agent.
pub fn derive_seed(global_seed: u64, agent: u64, stream: u64) -> u64 {
    let x = global_seed ^ mix64(agent.wrapping_add(0x9E3779B97F4A7C15)) ^ mix64(stream);
    mix64(x)
}

/// Stable 64-bit FNV-1a hash of a string id, for seeding per-agent streams.
pub fn hash_str(s: &str) -> u64 {
    s.bytes().fold(0xcbf29ce484222325u64, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x100000001b3)
    })
}
