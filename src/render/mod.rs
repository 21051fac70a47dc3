//! Level preview rendering.
//!
//! Renders a generated grid as ASCII art by consuming the placement-event
//! stream exactly the way an engine-side instantiation layer would: start
//! from an empty canvas, place one glyph per event.

use tracing::info;

use crate::grid::LevelGrid;
use crate::placement::ObjectKind;

const EMPTY_GLYPH: char = '.';

fn glyph(kind: ObjectKind) -> char {
    match kind {
        ObjectKind::Wall => '#',
    }
}

/// Renders the grid as one text row per grid row, `y = 0` first,
/// each terminated by `\n`. Zero-extent grids render as an empty string.
pub fn render_ascii(grid: &LevelGrid) -> String {
    let width = grid.width() as usize;
    let height = grid.height() as usize;
    if width == 0 || height == 0 {
        return String::new();
    }

    let mut canvas = vec![EMPTY_GLYPH; width * height];
    for event in grid.materialize() {
        let idx = event.position.y as usize * width + event.position.x as usize;
        canvas[idx] = glyph(event.kind);
    }

    let mut out = String::with_capacity((width + 1) * height);
    for row in canvas.chunks(width) {
        out.extend(row.iter());
        out.push('\n');
    }

    info!(
        "Rendered level preview: {}x{}, {} walls",
        grid.width(),
        grid.height(),
        grid.wall_count()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellState;

    #[test]
    fn test_glyphs_distinct_from_empty() {
        assert_ne!(glyph(ObjectKind::Wall), EMPTY_GLYPH);
    }

    #[test]
    fn test_render_small_grid() {
        let mut grid = LevelGrid::new(3, 2);
        grid.set(1, 0, CellState::Wall);
        grid.set(0, 1, CellState::Wall);
        grid.set(2, 1, CellState::Wall);
        assert_eq!(render_ascii(&grid), ".#.\n#.#\n");
    }

    #[test]
    fn test_render_zero_extent_grid() {
        assert_eq!(render_ascii(&LevelGrid::new(0, 5)), "");
        assert_eq!(render_ascii(&LevelGrid::new(5, 0)), "");
    }

    #[test]
    fn test_render_line_structure() {
        let grid = LevelGrid::new(7, 4);
        let text = render_ascii(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.len() == 7));
        assert!(lines.iter().all(|l| l.chars().all(|c| c == EMPTY_GLYPH)));
    }

    #[test]
    fn test_glyph_count_matches_wall_count() {
        let mut grid = LevelGrid::new(10, 10);
        for i in 0..10 {
            grid.set(i, i, CellState::Wall);
        }
        let text = render_ascii(&grid);
        assert_eq!(text.chars().filter(|&c| c == '#').count(), grid.wall_count());
    }
}
