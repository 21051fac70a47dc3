//! Integration tests: the instantiation-layer pattern end to end.
//!
//! Simulates the engine-side consumer the prototype pairs with:
//!   1. Build a config (in memory or from a RON file)
//!   2. Generate a level for (seed, depth)
//!   3. Walk the placement stream and "instantiate" every event
//!   4. Verify the mock scene agrees with the grid and the preview
//!
//! These tests pin the contract between generation and whatever consumes
//! the placement events.

use std::collections::HashMap;

use caves_core::config::LevelConfig;
use caves_core::generation::{generate_level, CaveSeed};
use caves_core::grid::{CellState, LevelGrid};
use caves_core::placement::{ObjectKind, PlacementEvent};
use caves_core::render::render_ascii;

// ============================================================
// Helpers
// ============================================================

/// Stand-in for an engine scene: remembers what was placed where.
#[derive(Default)]
struct MockScene {
    placed: HashMap<(u32, u32, u32), ObjectKind>,
}

impl MockScene {
    /// Places one object. Returns false if the cell was already occupied.
    fn place(&mut self, event: PlacementEvent) -> bool {
        let key = (event.position.x, event.position.y, event.position.z);
        self.placed.insert(key, event.kind).is_none()
    }

    fn len(&self) -> usize {
        self.placed.len()
    }
}

fn instantiate(grid: &LevelGrid) -> MockScene {
    let mut scene = MockScene::default();
    for event in grid.materialize() {
        assert!(
            scene.place(event),
            "duplicate placement at {:?}",
            event.position
        );
    }
    scene
}

// ============================================================
// Scene construction
// ============================================================

#[test]
fn scene_matches_grid_after_full_stream() {
    let config = LevelConfig::new(48, 48).with_noise_scalar(0.3);
    let grid = generate_level(&config, &CaveSeed::new(2718), 0).unwrap();
    let scene = instantiate(&grid);

    assert_eq!(scene.len(), grid.wall_count());

    // everything placed sits on a wall cell, on the ground plane
    for (&(x, y, z), &kind) in &scene.placed {
        assert_eq!(z, 0);
        assert_eq!(kind, ObjectKind::Wall);
        assert_eq!(grid.get(x, y), Some(CellState::Wall));
    }

    // and every wall cell got placed
    for (x, y, state) in grid.iter_cells() {
        if state == CellState::Wall {
            assert!(scene.placed.contains_key(&(x, y, 0)));
        }
    }
}

#[test]
fn partial_consumption_leaves_grid_reusable() {
    let config = LevelConfig::new(32, 32).with_noise_scalar(0.3);
    let grid = generate_level(&config, &CaveSeed::new(1618), 0).unwrap();

    // an engine might abort instantiation partway (level change, shutdown)
    let consumed: Vec<PlacementEvent> = grid.materialize().take(5).collect();
    assert!(consumed.len() <= 5);

    // a fresh walk still sees everything
    let scene = instantiate(&grid);
    assert_eq!(scene.len(), grid.wall_count());
}

#[test]
fn events_survive_a_json_detour() {
    // tooling path: events get dumped to JSON by the CLI and consumed later
    let config = LevelConfig::new(24, 24).with_noise_scalar(0.5);
    let grid = generate_level(&config, &CaveSeed::new(31), 4).unwrap();

    let events: Vec<PlacementEvent> = grid.materialize().collect();
    let json = serde_json::to_string_pretty(&events).unwrap();
    let decoded: Vec<PlacementEvent> = serde_json::from_str(&json).unwrap();

    let mut scene = MockScene::default();
    for event in decoded {
        assert!(scene.place(event));
    }
    assert_eq!(scene.len(), grid.wall_count());
}

// ============================================================
// Descent reproducibility
// ============================================================

#[test]
fn descent_is_reproducible_and_varied() {
    let config = LevelConfig::new(40, 40).with_noise_scalar(0.8);
    let seed = CaveSeed::new(555);

    let mut hashes = std::collections::HashSet::new();
    for depth in 0..6 {
        let a = generate_level(&config, &seed, depth).unwrap();
        let b = generate_level(&config, &seed, depth).unwrap();
        assert_eq!(a, b, "depth {depth} must reproduce exactly");
        hashes.insert(seed.level_hash(depth));
    }
    assert_eq!(hashes.len(), 6, "each depth must hash to its own level");
}

#[test]
fn config_file_run_matches_in_memory_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("descent.ron");

    let config = LevelConfig::new(36, 20)
        .with_noise_scalar(0.45)
        .with_threshold(0.55);
    config.save_to_file(&path).unwrap();
    let loaded = LevelConfig::load_from_file(&path).unwrap();

    let seed = CaveSeed::new(9);
    let from_memory = generate_level(&config, &seed, 2).unwrap();
    let from_file = generate_level(&loaded, &seed, 2).unwrap();
    assert_eq!(from_memory, from_file);
}

// ============================================================
// Preview fidelity
// ============================================================

#[test]
fn preview_shows_exactly_the_instantiated_walls() {
    let config = LevelConfig::new(30, 12).with_noise_scalar(0.6);
    let grid = generate_level(&config, &CaveSeed::new(64), 0).unwrap();
    let scene = instantiate(&grid);
    let text = render_ascii(&grid);

    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 12);
    for (y, row) in rows.iter().enumerate() {
        for (x, glyph) in row.chars().enumerate() {
            let placed = scene.placed.contains_key(&(x as u32, y as u32, 0));
            assert_eq!(
                glyph == '#',
                placed,
                "preview and scene disagree at ({x}, {y})"
            );
        }
    }
}
