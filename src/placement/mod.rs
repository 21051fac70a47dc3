//! Placement events: the hand-off surface to an external instantiation layer.
//!
//! Generation never talks to an engine directly. It exposes a lazy stream of
//! [`PlacementEvent`]s, one per wall cell, and whatever renders the level
//! (engine adapter, ASCII preview, a test) walks the stream at its own pace.
//! The stream borrows the grid immutably, so it can be restarted at will and
//! always replays the same events in the same row-major order.

use serde::{Deserialize, Serialize};

use crate::grid::{CellState, LevelGrid};

/// Kinds of object an external layer can be asked to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Wall,
}

/// Integer grid position of a placement. Levels are 2D, so `z` is always 0;
/// it exists because instantiation layers almost universally speak 3D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl GridPosition {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y, z: 0 }
    }
}

/// One unit of instantiation work, in engine-agnostic terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementEvent {
    pub kind: ObjectKind,
    pub position: GridPosition,
}

impl LevelGrid {
    /// Streams one wall event per wall cell, row-major from `(0, 0)`.
    ///
    /// Lazy and finite: nothing is allocated up front, and the iterator ends
    /// after the last wall. Empty cells produce no event at all.
    pub fn materialize(&self) -> impl Iterator<Item = PlacementEvent> + '_ {
        self.iter_cells().filter_map(|(x, y, state)| match state {
            CellState::Wall => Some(PlacementEvent {
                kind: ObjectKind::Wall,
                position: GridPosition::new(x, y),
            }),
            CellState::Empty => None,
        })
    }
}
