//! Level grid: the cell classifications produced by a design pass.
//!
//! A [`LevelGrid`] is written once by the generator and read by everything
//! downstream (placement streaming, ASCII preview, tests). Cells are stored
//! flat in row-major order; `(x, y)` indexing is bounds-checked at the API
//! surface so out-of-range queries return `None` instead of panicking.

use serde::{Deserialize, Serialize};

/// Classification of a single level cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Nothing occupies the cell; traversable space.
    Empty,
    /// Solid rock; the placement pass emits one wall event here.
    Wall,
}

/// Rectangular grid of cell classifications.
///
/// Zero-extent grids (width or height of 0) are valid degenerate values: they
/// hold no cells and every downstream pass treats them as already complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGrid {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
}

impl LevelGrid {
    /// Creates an all-[`Empty`](CellState::Empty) grid of the given extents.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![CellState::Empty; len],
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells (width * height).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the grid holds no cells at all (either extent is zero).
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell at `(x, y)`, or `None` when out of range.
    pub fn get(&self, x: u32, y: u32) -> Option<CellState> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[self.index(x, y)])
    }

    /// Sets the cell at `(x, y)`. Returns false when out of range.
    pub fn set(&mut self, x: u32, y: u32, state: CellState) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = state;
        true
    }

    /// Iterates all cells in row-major order as `(x, y, state)`.
    ///
    /// A zero-extent grid yields nothing, so the divisions below never see a
    /// zero width.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, CellState)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().map(move |(i, &state)| {
            let x = (i % width) as u32;
            let y = (i / width) as u32;
            (x, y, state)
        })
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.count(CellState::Wall)
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.count(CellState::Empty)
    }

    /// Mutable view of the flat cell storage, for the design pass.
    pub(crate) fn cells_mut(&mut self) -> &mut [CellState] {
        &mut self.cells
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
