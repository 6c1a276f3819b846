//! Cadenza console player.
//!
//! Wires a [`LocalFileProvider`] rooted at the library directory and a
//! [`PlayerEngine`] running the simulated track source into a small
//! interactive command loop.

mod repl;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use core_playback::{PlaybackObserver, PlayerEngine, SimulatedSource};
use core_runtime::logging::{init_logging, LoggingConfig};
use provider_local::LocalFileProvider;

/// Cadenza - a queue-driven music player for the console
#[derive(Parser, Debug)]
#[command(name = "cadenza", version, about)]
struct Args {
    /// Music library directory
    #[arg(long, default_value = "./music")]
    library: PathBuf,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Prints lifecycle transitions to the console.
struct ConsoleObserver;

impl PlaybackObserver for ConsoleObserver {
    fn on_playback_started(&self) {
        println!("Playback started");
    }

    fn on_playback_paused(&self) {
        println!("Playback paused");
    }

    fn on_playback_stopped(&self) {
        println!("Playback stopped");
    }

    fn on_track_changed(&self, uri: &str) {
        println!("Now playing: {uri}");
    }

    fn on_playback_progress(&self, _position: f64, _duration: f64) {
        // Progress ticks every 100 ms; printing them would drown the prompt.
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    init_logging(LoggingConfig::default().with_level(level))?;

    info!(library = %args.library.display(), "Starting Cadenza");

    let provider = LocalFileProvider::new(&args.library);
    let engine = PlayerEngine::new(Arc::new(SimulatedSource::new()));
    engine.add_observer(Arc::new(ConsoleObserver));

    println!("Cadenza console player (library: {})", args.library.display());
    println!("Type 'help' for commands.");

    repl::run(&engine, &provider)
}
