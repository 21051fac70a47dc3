//! Caves - Procedural Core Library
//!
//! This crate provides the deterministic level logic for the Caves prototype:
//! - Noise-threshold level generation (seed + depth model, Perlin fields)
//! - Grid representation and cell classification
//! - Placement-event streaming for an external instantiation layer
//! - ASCII preview rendering
//! - Character roster and ability invocation
//! - Structured logging

pub mod config;
pub mod constants;
pub mod generation;
pub mod grid;
pub mod logging;
pub mod noise;
pub mod placement;
pub mod render;
pub mod roster;
