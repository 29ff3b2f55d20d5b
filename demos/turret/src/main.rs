//! turret — headless demo for the rust_bn behavior framework.
//!
//! A turret tracks and fires at drones drifting out of an arena while a
//! scripted pilot flies a ship in a square.  Traces are written to
//! `output/turret/`.
//!
//! ```text
//! cargo run -p turret -- [run_config.json]
//! ```
//!
//! The optional JSON file overrides any `RunConfig` field; missing fields keep
//! their defaults.

mod scene;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use bn_behavior::Transforms;
use bn_core::{RunConfig, Tick};
use bn_output::{CsvWriter, TraceObserver};
use bn_sim::{RunObserver, RunnerBuilder};
use bn_world::InputState;

// ── Constants ─────────────────────────────────────────────────────────────────

const DRONE_COUNT: usize = 12;
const SEED:        u64   = 42;
const OUTPUT_DIR:  &str  = "output/turret";

/// Frames the pilot holds each leg of the square.
const LEG_FRAMES: u64 = 90;

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config() -> Result<RunConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(RunConfig { total_frames: 720, snapshot_interval_frames: 30, ..RunConfig::default() });
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: RunConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

/// Right, up, left, down: one leg every `LEG_FRAMES` frames.
fn steer(input: &mut InputState, frame: Tick) {
    let (h, v) = match (frame.0 / LEG_FRAMES) % 4 {
        0 => (1.0, 0.0),
        1 => (0.0, 1.0),
        2 => (-1.0, 0.0),
        _ => (0.0, -1.0),
    };
    input.set_axis("Horizontal", h);
    input.set_axis("Vertical", v);
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let mut rng = SmallRng::seed_from_u64(SEED);
    let arena = scene::build(DRONE_COUNT, &mut rng)?;
    let (ship, turret, drones) = (arena.ship, arena.turret, arena.drones);

    let mut runner = RunnerBuilder::new(config.clone())
        .world(arena.world)
        .cells(arena.cells)
        .events(arena.events)
        .scene(arena.scene)
        .build()?;

    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = TraceObserver::new(writer, &config);

    // Drive frame by frame so the pilot can steer between frames.
    let t0 = Instant::now();
    while runner.frame() < config.end_frame() {
        let frame = runner.frame();
        steer(&mut runner.world.input, frame);
        runner.run_frames(1, &mut obs)?;
    }
    runner.end();
    obs.on_run_end(runner.frame());
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        log::error!("output error: {e}");
    }

    // ── Summary ───────────────────────────────────────────────────────────
    let world = &runner.world;
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!("  frames        : {}", runner.frame().0);
    println!("  fixed steps   : {}", runner.clock.total_fixed_steps);
    println!("  bullets fired : {}", world.spawned());
    println!(
        "  drones left   : {} / {}",
        drones.iter().filter(|&&d| world.is_alive(d)).count(),
        drones.len()
    );
    println!();

    println!("{:<8} {:>8} {:>8}", "Entity", "x", "y");
    println!("{}", "-".repeat(26));
    for (label, entity) in [("ship", ship), ("turret", turret)] {
        if let Some(p) = world.position(entity) {
            println!("{label:<8} {:>8.2} {:>8.2}", p.x, p.y);
        }
    }
    println!();
    println!("Traces written to {OUTPUT_DIR}/");

    Ok(())
}
