//! Cavegen CLI - noise-threshold cave level generator.
//!
//! Generate cave levels from a seed, preview them as ASCII, dump placement
//! events for an instantiation layer, and walk the character roster demo.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use caves_core::config::LevelConfig;
use caves_core::constants::{
    DEFAULT_LEVEL_HEIGHT, DEFAULT_LEVEL_WIDTH, DEFAULT_NOISE_SCALAR, DEFAULT_THRESHOLD,
};
use caves_core::generation::{generate_level, CaveSeed};
use caves_core::grid::CellState;
use caves_core::placement::PlacementEvent;
use caves_core::render::render_ascii;
use caves_core::roster::{demo_roster, Roster, SelectionController};

/// Procedural cave level generator.
#[derive(Parser)]
#[command(name = "cavegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a cave level and preview it.
    Generate {
        /// Level width in cells.
        #[arg(long, default_value_t = DEFAULT_LEVEL_WIDTH)]
        width: u32,

        /// Level height in cells.
        #[arg(long, default_value_t = DEFAULT_LEVEL_HEIGHT)]
        height: u32,

        /// Noise frequency: smaller values make larger caverns.
        #[arg(long, default_value_t = DEFAULT_NOISE_SCALAR)]
        noise_scalar: f64,

        /// Wall threshold in [0, 1]: samples below it become walls.
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Depth of the level within the run; each depth gets its own hash.
        #[arg(short, long, default_value_t = 0)]
        depth: u32,

        /// RON config file; overrides the dimension and noise flags.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write placement events as JSON to this file.
        #[arg(long)]
        events: Option<PathBuf>,

        /// Skip the ASCII preview (useful for very large levels).
        #[arg(long)]
        no_preview: bool,
    },

    /// Display size information for a level configuration.
    Info {
        /// Level width in cells.
        #[arg(long, default_value_t = DEFAULT_LEVEL_WIDTH)]
        width: u32,

        /// Level height in cells.
        #[arg(long, default_value_t = DEFAULT_LEVEL_HEIGHT)]
        height: u32,
    },

    /// Walk through the character roster demo.
    DemoRoster {
        /// Random seed for the starting-health rolls.
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() {
    caves_core::logging::init_tracing_default();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            width,
            height,
            noise_scalar,
            threshold,
            seed,
            depth,
            config,
            events,
            no_preview,
        } => {
            run_generate(
                width,
                height,
                noise_scalar,
                threshold,
                seed,
                depth,
                config,
                events,
                no_preview,
            );
        }
        Commands::Info { width, height } => {
            run_info(width, height);
        }
        Commands::DemoRoster { seed } => {
            run_demo_roster(seed);
        }
    }
}

fn run_generate(
    width: u32,
    height: u32,
    noise_scalar: f64,
    threshold: f64,
    seed: Option<u64>,
    depth: u32,
    config_path: Option<PathBuf>,
    events_path: Option<PathBuf>,
    no_preview: bool,
) {
    let config = match config_path {
        Some(path) => LevelConfig::load_from_file(&path).unwrap_or_else(|e| {
            eprintln!("Error loading config: {:#}", e);
            std::process::exit(1);
        }),
        None => LevelConfig {
            width,
            height,
            noise_scalar,
            threshold,
        },
    };

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let seed = seed_or_entropy(seed);

    println!("Cavegen - Noise-Threshold Level Generator");
    println!("=========================================");
    println!("Level: {}x{} cells", config.width, config.height);
    println!(
        "Noise scalar: {}, threshold: {}",
        config.noise_scalar, config.threshold
    );
    println!("Seed: {} (depth {})", seed, depth);

    let start = Instant::now();
    let grid = generate_level(&config, &CaveSeed::new(seed), depth).unwrap_or_else(|e| {
        eprintln!("Error during generation: {}", e);
        std::process::exit(1);
    });
    let gen_time = start.elapsed();

    let walls = grid.wall_count();
    let fill = if grid.is_empty() {
        0.0
    } else {
        walls as f64 / grid.len() as f64 * 100.0
    };
    println!("Generation completed in {:.2?}", gen_time);
    println!(
        "Cells: {} total, {} walls, {} empty ({:.1}% filled)",
        grid.len(),
        walls,
        grid.empty_count(),
        fill
    );

    if let Some(path) = events_path {
        let events: Vec<PlacementEvent> = grid.materialize().collect();
        write_events_json(&path, &events).unwrap_or_else(|e| {
            eprintln!("Error writing events: {:#}", e);
            std::process::exit(1);
        });
        println!("Wrote {} placement events to {}", events.len(), path.display());
    }

    if !no_preview {
        println!();
        print!("{}", render_ascii(&grid));
    }
    println!("Done!");
}

/// Dumps placement events as pretty JSON, flushing before reporting success
/// so short payloads cannot vanish silently in a buffered writer.
fn write_events_json(path: &Path, events: &[PlacementEvent]) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, events)
        .with_context(|| format!("Failed to write events to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write events to {}", path.display()))?;
    Ok(())
}

fn run_info(width: u32, height: u32) {
    let config = LevelConfig::new(width, height);
    let cells = config.cell_count() as u64;
    let grid_bytes = cells.checked_mul(std::mem::size_of::<CellState>() as u64);
    let event_bytes = cells.checked_mul(std::mem::size_of::<PlacementEvent>() as u64);
    let preview_bytes = (width as u64 + 1).checked_mul(height as u64);

    println!("Cavegen - Level Configuration Info");
    println!("==================================");
    println!();
    println!("Level: {}x{} cells", width, height);
    println!();
    println!("Cell counts:");
    println!("  Total:     {:>12} cells", cells);
    println!();
    println!("Memory usage (in-memory):");
    println!("{}", size_row("Grid:", grid_bytes));
    println!("{}", size_row("Events (worst):", event_bytes));
    println!("{}", size_row("ASCII preview:", preview_bytes));
    println!();
    println!("The worst case assumes every cell is a wall; with the default");
    println!("threshold of {} roughly half the cells emit events.", DEFAULT_THRESHOLD);
}

/// One labeled size row; estimates too large for u64 print a marker instead
/// of a wrapped value.
fn size_row(label: &str, bytes: Option<u64>) -> String {
    match bytes {
        Some(bytes) => format!("  {:<16} {:>12} bytes", label, bytes),
        None => format!("  {:<16} exceeds u64 bytes", label),
    }
}

fn run_demo_roster(seed: Option<u64>) {
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    let seed = seed_or_entropy(seed);
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

    let roster = Roster::new(
        demo_roster()
            .characters
            .into_iter()
            .map(|c| c.with_random_health(&mut rng))
            .collect(),
    );

    println!("Cavegen - Roster Demo (seed {})", seed);
    println!("==============================");
    println!("{} characters available:", roster.len());
    for (i, character) in roster.characters.iter().enumerate() {
        println!(
            "  [{}] {:<20} {:>3}/{} health, {} abilities",
            i,
            character.name,
            character.health(),
            character.max_health,
            character.abilities.len()
        );
    }

    let mut controller = SelectionController::new();

    println!();
    println!("Pressing ability slot 0 with nothing selected:");
    if controller.invoke(&roster, 0).is_none() {
        println!("  (ignored - no character selected)");
    }

    for index in 0..roster.len() {
        controller.select(&roster, index);
        println!();
        if let Some(line) = controller.status_line(&roster) {
            println!("Selected: {}", line);
        }
        for slot in 0..controller.ability_count() {
            match controller.invoke(&roster, slot) {
                Some(invocation) => println!(
                    "  slot {}: {} -> invoked for {}",
                    slot, invocation.ability, invocation.character
                ),
                None => println!("  slot {}: (empty)", slot),
            }
        }
    }
    println!();
    println!("Done!");
}

fn seed_or_entropy(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos() as u64
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use caves_core::placement::{GridPosition, ObjectKind};

    #[test]
    fn test_info_estimates_overflow_for_extreme_extents() {
        // 3_000_000_000 x 3_000_000_000 cells fit in u64; their per-event
        // byte total does not and must not wrap or panic
        let cells = 3_000_000_000u64 * 3_000_000_000u64;
        assert!(cells
            .checked_mul(std::mem::size_of::<PlacementEvent>() as u64)
            .is_none());
        assert!(cells
            .checked_mul(std::mem::size_of::<CellState>() as u64)
            .is_some());
    }

    #[test]
    fn test_size_row_reports_overflow_instead_of_wrapping() {
        let row = size_row("Events (worst):", None);
        assert!(row.contains("exceeds u64 bytes"), "got: {row}");
        let row = size_row("Grid:", Some(144));
        assert!(row.contains("144 bytes"), "got: {row}");
    }

    #[test]
    fn test_event_dump_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let events = vec![PlacementEvent {
            kind: ObjectKind::Wall,
            position: GridPosition::new(3, 1),
        }];
        write_events_json(&path, &events).unwrap();
        let decoded: Vec<PlacementEvent> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(decoded, events);
    }

    #[cfg(unix)]
    #[test]
    fn test_event_dump_surfaces_full_device_errors() {
        // /dev/full accepts the open and fails the write, which for payloads
        // smaller than the writer's buffer only surfaces at flush time
        let events = vec![PlacementEvent {
            kind: ObjectKind::Wall,
            position: GridPosition::new(0, 0),
        }];
        assert!(write_events_json(Path::new("/dev/full"), &events).is_err());
    }
}
