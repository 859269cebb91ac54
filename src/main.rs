//! # Puissance 4
//!
//! A terminal rendition of the classic Connect 4 game with an interactive
//! ratatui interface: a 1-player mode against a minimax alpha-beta AI, a
//! local 2-player mode, animated piece drops, and mouse support.
//!
//! ## Usage
//! Run with `cargo run --release` for best AI performance. Pass
//! `--exhibition` to watch the engine play itself without the TUI.

mod app;
mod exhibition;
mod tui;

use app::{App, AppConfig};
use clap::Parser;
use std::io;

/// Connect 4 (Puissance 4) in the terminal, with a minimax AI opponent.
#[derive(Parser, Debug)]
#[command(name = "play", version, about)]
struct Args {
    /// Search depth in plies
    #[arg(long, default_value_t = 4)]
    depth: u32,

    /// Worker threads for the search (0 = one per core)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Minimum AI think delay in milliseconds
    #[arg(long, default_value_t = 1000)]
    ai_delay_min_ms: u64,

    /// Maximum AI think delay in milliseconds
    #[arg(long, default_value_t = 5000)]
    ai_delay_max_ms: u64,

    /// RNG seed, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Run headless AI-vs-AI exhibition games instead of the TUI
    #[arg(long)]
    exhibition: bool,

    /// Number of exhibition games to play
    #[arg(long, default_value_t = 1)]
    games: usize,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if args.exhibition {
        exhibition::run(args.depth, args.threads, args.seed, args.games);
        return Ok(());
    }

    let (delay_min, delay_max) = if args.ai_delay_min_ms <= args.ai_delay_max_ms {
        (args.ai_delay_min_ms, args.ai_delay_max_ms)
    } else {
        (args.ai_delay_max_ms, args.ai_delay_min_ms)
    };

    let mut app = App::new(AppConfig {
        depth: args.depth,
        num_threads: args.threads,
        ai_delay_ms: (delay_min, delay_max),
        seed: args.seed,
    });
    tui::run(&mut app)
}
