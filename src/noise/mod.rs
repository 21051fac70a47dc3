//! Coherent-noise sampling behind a narrow trait.
//!
//! The design pass only ever needs "a value in [0, 1] at continuous
//! coordinates", so that is the whole trait. [`PerlinField`] is the production
//! implementation; [`ConstField`] exists for tests and for carving out
//! degenerate all-wall / all-empty levels on purpose.

use noise::{NoiseFn, Perlin};

/// A deterministic 2D scalar field sampled at continuous coordinates.
///
/// Implementations must be pure: the same `(x, y)` always yields the same
/// value. `Send + Sync` is required because the design pass samples the field
/// from parallel row workers.
pub trait NoiseField: Send + Sync {
    /// Samples the field at `(x, y)`, returning a value in `[0.0, 1.0]`.
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Perlin gradient noise normalized from its native `[-1, 1]` into `[0, 1]`.
pub struct PerlinField {
    seed: u32,
    perlin: Perlin,
}

impl PerlinField {
    /// Creates a field whose gradient table derives from `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            perlin: Perlin::new(seed),
        }
    }

    /// Seed the gradient table was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Clone for PerlinField {
    fn clone(&self) -> Self {
        Self::new(self.seed)
    }
}

impl std::fmt::Debug for PerlinField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerlinField").field("seed", &self.seed).finish()
    }
}

impl NoiseField for PerlinField {
    fn sample(&self, x: f64, y: f64) -> f64 {
        // Perlin can overshoot [-1, 1] by a hair in some implementations;
        // clamp after normalizing so callers can rely on the contract.
        let raw = self.perlin.get([x, y]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// A field that returns the same value everywhere, clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstField(pub f64);

impl NoiseField for ConstField {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.0.clamp(0.0, 1.0)
    }
}
