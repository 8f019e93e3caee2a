#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a headless Maze Chase level.

mod collaborators;
mod config;
mod session;
mod transition;

use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use maze_chase_core::LevelId;
use tracing_subscriber::EnvFilter;

use crate::{config::GameConfig, session::Session};

/// Plays one level with an autopilot and reports the scene it ends on.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", version)]
struct Args {
    /// Path to the TOML game configuration.
    #[arg(long, default_value = "assets/game.toml")]
    config: PathBuf,
    /// Level to load.
    #[arg(long, default_value_t = 1)]
    level: u32,
    /// Fixed simulation step in milliseconds.
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,
    /// Number of steps after which the session gives up.
    #[arg(long, default_value_t = 6_000)]
    max_ticks: u32,
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    if args.tick_ms == 0 {
        bail!("--tick-ms must be greater than zero");
    }

    let config = GameConfig::load(&args.config)?;
    let level = LevelId::new(args.level);
    let summary = Session::start(&config, level, Duration::from_millis(args.tick_ms))
        .with_context(|| format!("failed to start level {}", args.level))?
        .run(args.max_ticks);

    match summary.scene {
        Some(scene) => println!(
            "{:?} after {} ticks ({} cues); loaded scene {}",
            summary.outcome,
            summary.ticks,
            summary.cues,
            scene.get()
        ),
        None => println!(
            "{:?} after {} ticks ({} cues); no scene change",
            summary.outcome, summary.ticks, summary.cues
        ),
    }
    Ok(())
}
