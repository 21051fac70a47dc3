//! Generator configuration: dimensions, noise frequency, wall threshold.
//!
//! A [`LevelConfig`] is validated once when a generator is built, so the
//! design pass itself never has to re-check parameters. Configs round-trip
//! through RON files for CLI and tooling use.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LEVEL_HEIGHT, DEFAULT_LEVEL_WIDTH, DEFAULT_NOISE_SCALAR, DEFAULT_THRESHOLD,
};

/// Error type for configuration validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Noise scalar must be finite and non-negative, got {0}")]
    InvalidNoiseScalar(f64),
    #[error("Threshold must be finite and within [0, 1], got {0}")]
    InvalidThreshold(f64),
}

/// Parameters of one noise-threshold design pass.
///
/// Zero extents are valid and produce an empty grid. A `noise_scalar` of zero
/// collapses every sample onto one point, producing a uniform level; useful
/// for tests, rarely what a designer wants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Level width in cells
    pub width: u32,
    /// Level height in cells
    pub height: u32,
    /// Spatial frequency: cell index -> noise-plane distance
    pub noise_scalar: f64,
    /// Samples strictly below this value become walls
    pub threshold: f64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_LEVEL_WIDTH,
            height: DEFAULT_LEVEL_HEIGHT,
            noise_scalar: DEFAULT_NOISE_SCALAR,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl LevelConfig {
    /// Default noise parameters at the given extents.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Returns self with the given noise scalar.
    pub fn with_noise_scalar(mut self, noise_scalar: f64) -> Self {
        self.noise_scalar = noise_scalar;
        self
    }

    /// Returns self with the given wall threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Total number of cells a pass with this config will classify.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Checks the numeric parameters.
    ///
    /// The scalar must be finite and non-negative; the threshold finite and
    /// inside `[0, 1]`. Extents need no check: `u32` already rules out
    /// negatives and zero is a valid degenerate size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.noise_scalar.is_finite() || self.noise_scalar < 0.0 {
            return Err(ConfigError::InvalidNoiseScalar(self.noise_scalar));
        }
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }

    /// Loads a config from a RON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = ron::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Saves the config to a RON file, pretty-printed.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}
