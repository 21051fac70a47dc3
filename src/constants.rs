//! Centralized tuning constants for the caves procedural core.
//!
//! Eliminates magic numbers duplicated across the generator, the CLI and the
//! test suites. Per-module constants (render glyphs, demo roster stats) remain
//! in their respective modules as the single source of truth.

// =====================================================
// Level Dimensions
// =====================================================

/// Default level width in cells
pub const DEFAULT_LEVEL_WIDTH: u32 = 100;

/// Default level height in cells
pub const DEFAULT_LEVEL_HEIGHT: u32 = 100;

// =====================================================
// Noise-Threshold Design Pass
// =====================================================

/// Default spatial frequency applied to cell indices before sampling.
/// Small values stretch noise features across many cells (large caverns).
pub const DEFAULT_NOISE_SCALAR: f64 = 0.1;

/// Default wall threshold: samples strictly below this become walls
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Noise-plane offsets are drawn uniformly from [-OFFSET_RANGE, OFFSET_RANGE)
pub const OFFSET_RANGE: f64 = 100.0;
