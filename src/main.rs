//! Terminal runner (default binary).
//!
//! Polls crossterm for key events, feeds one input frame per fixed tick to
//! the engine and redraws from a snapshot. Logging goes to a file only,
//! since the terminal is in raw mode while the game runs.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfall::core::{EngineConfig, Game, GameSnapshot};
use blockfall::input::{FrameCollector, SessionKey};
use blockfall::term::{Canvas, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

/// Blockfall - falling-block puzzle game for the terminal
#[derive(Parser, Debug)]
#[command(name = "blockfall")]
#[command(about = "Falling-block puzzle game for the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON engine config; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Piece source seed, overrides the config file
    #[arg(long)]
    seed: Option<u32>,

    /// Write logs to this file (level from RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = load_config(&cli)?;
    let game = Game::new(config).context("invalid engine config")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("installing log subscriber: {err}"))
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_json_str(&json)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn run(term: &mut TerminalRenderer, mut game: Game) -> Result<()> {
    info!(seed = game.config().seed, "session started");

    let view = GameView::default();
    let mut collector = FrameCollector::new();
    let mut snapshot = GameSnapshot::default();
    let mut canvas = Canvas::default();

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut canvas);
        term.draw(&canvas)?;

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let event = event::read()?;
            if matches!(event, Event::Resize(..)) {
                term.invalidate();
            }
            collector.handle_event(&event);
        }

        match collector.session_key() {
            Some(SessionKey::Quit) => {
                info!(
                    score = game.score(),
                    level = game.level(),
                    lines = game.lines(),
                    "session ended"
                );
                return Ok(());
            }
            Some(SessionKey::Restart) => {
                collector.take_frame();
                game.reset();
                last_tick = Instant::now();
                continue;
            }
            None => {}
        }

        // Tick.
        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            let input = collector.take_frame();
            // A finished game waits for restart or quit.
            if !game.is_game_over() {
                game.tick(TICK_MS, input)?;
            }
        }
    }
}
