//! Noise-threshold level generation.
//!
//! The design pass samples a coherent noise field once per cell at
//! `(x * noise_scalar + offset_x, y * noise_scalar + offset_y)` and classifies
//! samples strictly below the threshold as walls. Offsets are drawn fresh per
//! pass, so repeated runs against one RNG explore different slices of the same
//! field; everything downstream of a seed is fully deterministic.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use tracing::info;

use crate::config::{ConfigError, LevelConfig};
use crate::constants::OFFSET_RANGE;
use crate::grid::{CellState, LevelGrid};
use crate::noise::{NoiseField, PerlinField};

/// Global run seed - the root of all level generation.
/// Every depth derives its own hash, so one u64 reproduces a whole descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaveSeed {
    pub seed: u64,
}

impl CaveSeed {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Deterministic level hash from run seed and depth
    pub fn level_hash(&self, depth: u32) -> u64 {
        let mut hasher = Sha3_256::new();
        hasher.update(self.seed.to_le_bytes());
        hasher.update(depth.to_le_bytes());
        let result = hasher.finalize();
        u64::from_le_bytes(result[0..8].try_into().unwrap())
    }
}

/// Offsets added to sample coordinates, decorrelating one pass from the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseOffsets {
    pub x: f64,
    pub y: f64,
}

impl NoiseOffsets {
    /// No displacement; samples the field at raw scaled indices.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Draws both offsets uniformly from `[-OFFSET_RANGE, OFFSET_RANGE)`.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(-OFFSET_RANGE..OFFSET_RANGE),
            y: rng.gen_range(-OFFSET_RANGE..OFFSET_RANGE),
        }
    }
}

/// Runs the noise-threshold design pass over a validated config.
///
/// The generator owns its noise field; rows are classified in parallel since
/// every cell decision is independent.
#[derive(Debug, Clone)]
pub struct LevelGenerator<N: NoiseField> {
    config: LevelConfig,
    noise: N,
}

impl LevelGenerator<PerlinField> {
    /// Builds a Perlin-backed generator from a level hash.
    pub fn from_hash(config: LevelConfig, hash: u64) -> Result<Self, ConfigError> {
        // Perlin seeds are u32; the low hash bits decide the gradient table
        Self::new(config, PerlinField::new(hash as u32))
    }
}

impl<N: NoiseField> LevelGenerator<N> {
    /// Validates `config` and pairs it with a noise field.
    pub fn new(config: LevelConfig, noise: N) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, noise })
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// One full design pass: draws fresh offsets from `rng`, then classifies.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> LevelGrid {
        self.generate_at(NoiseOffsets::draw(rng))
    }

    /// Classifies every cell against the field displaced by `offsets`.
    ///
    /// Pure: the same offsets always reproduce the same grid.
    pub fn generate_at(&self, offsets: NoiseOffsets) -> LevelGrid {
        let width = self.config.width;
        let noise_scalar = self.config.noise_scalar;
        let threshold = self.config.threshold;

        let mut grid = LevelGrid::new(width, self.config.height);
        if grid.is_empty() {
            // nothing to classify, and chunking by a zero width would panic
            return grid;
        }

        let noise = &self.noise;
        grid.cells_mut()
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    let sx = x as f64 * noise_scalar + offsets.x;
                    let sy = y as f64 * noise_scalar + offsets.y;
                    if noise.sample(sx, sy) < threshold {
                        *cell = CellState::Wall;
                    }
                }
            });
        grid
    }
}

/// Full pipeline for one depth of a run: hash the seed, build the Perlin
/// field, draw offsets from a hash-seeded RNG, classify.
pub fn generate_level(
    config: &LevelConfig,
    seed: &CaveSeed,
    depth: u32,
) -> Result<LevelGrid, ConfigError> {
    let hash = seed.level_hash(depth);
    let generator = LevelGenerator::from_hash(config.clone(), hash)?;
    let mut rng = Xoshiro256StarStar::seed_from_u64(hash);
    let grid = generator.generate(&mut rng);
    info!(
        depth,
        width = grid.width(),
        height = grid.height(),
        walls = grid.wall_count(),
        "level generated"
    );
    Ok(grid)
}
