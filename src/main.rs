//! Neon Tetris runner (default binary).
//!
//! `play` (the default) runs the game in the terminal with crossterm input
//! and the framebuffer renderer. `simulate` plays a headless game and prints
//! the final snapshot as JSON.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::event::{self, Event};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::prelude::*;

use neon_tetris::core::{Clock, GameConfig, GameState, MonotonicClock};
use neon_tetris::input::{should_quit, InputHandler};
use neon_tetris::sim::simulate;
use neon_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use neon_tetris::types::{GameAction, Phase, COUNTDOWN_MS};

/// Frame period (~60 FPS)
const FRAME_MS: u64 = 16;

#[derive(Debug, Parser)]
#[command(name = "neon-tetris", version, about = "Neon falling-block puzzle game")]
struct Cli {
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity level (-v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Play in the terminal (default)
    Play(PlayArgs),

    /// Hard-drop pieces headlessly and print the final snapshot as JSON
    Simulate {
        #[arg(long, default_value_t = 100, help = "Number of pieces to drop")]
        pieces: u32,

        #[arg(long, default_value_t = 1, help = "Seed for the piece bags")]
        seed: u64,

        #[arg(long, help = "Pretty-print the JSON")]
        pretty: bool,
    },
}

#[derive(Debug, Args)]
struct PlayArgs {
    #[arg(long, help = "Seed for the piece bags (random when omitted)")]
    seed: Option<u64>,

    #[arg(long, help = "Start playing without the countdown")]
    skip_countdown: bool,

    #[arg(long, default_value_t = COUNTDOWN_MS, help = "Countdown length in milliseconds")]
    countdown_ms: u64,

    #[arg(long, help = "Write logs to this file (the terminal is busy drawing)")]
    log_file: Option<PathBuf>,
}

fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = level_for(cli.verbose);

    match cli.command {
        Some(Commands::Simulate {
            pieces,
            seed,
            pretty,
        }) => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .with(tracing_subscriber::filter::LevelFilter::from_level(level))
                .init();

            let report = simulate(seed, pieces);
            let json = if pretty {
                serde_json::to_string_pretty(&report.snapshot)
            } else {
                serde_json::to_string(&report.snapshot)
            }
            .context("serialize snapshot")?;
            println!("{json}");
            Ok(())
        }
        Some(Commands::Play(args)) => play(args, level),
        None => play(
            PlayArgs {
                seed: None,
                skip_countdown: false,
                countdown_ms: COUNTDOWN_MS,
                log_file: None,
            },
            level,
        ),
    }
}

fn play(args: PlayArgs, level: Level) -> Result<()> {
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("create log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .with(tracing_subscriber::filter::LevelFilter::from_level(level))
            .init();
    }

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1)
    });
    info!(seed, "starting");

    // With panic = "abort" the terminal would otherwise stay in raw mode.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = TerminalRenderer::new().exit();
        default_hook(panic);
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let config = GameConfig::default()
        .with_seed(seed)
        .with_countdown_ms(args.countdown_ms);
    let result = run(&mut term, config, args.skip_countdown);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!(error = %err, "failed to restore terminal");
    }
    result
}

/// Whole milliseconds to hand the engine, and the span they account for.
///
/// The caller advances its frame anchor by the span only, so the sub-ms
/// remainder carries into the next frame.
fn frame_delta(elapsed: Duration) -> (u32, Duration) {
    let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
    (ms, Duration::from_millis(u64::from(ms)))
}

fn dispatch<C: Clock>(
    game: &mut GameState<C>,
    input: &mut InputHandler,
    action: GameAction,
    skip_countdown: bool,
) {
    match action {
        GameAction::Start if !game.phase().is_live() => {
            // A latch from the last session must not leak into the new one.
            input.reset();
            game.start_game(skip_countdown);
        }
        _ => {
            game.apply_action(action);
        }
    }
}

fn run(term: &mut TerminalRenderer, config: GameConfig, skip_countdown: bool) -> Result<()> {
    let mut game = GameState::with_clock(config, MonotonicClock::new());
    let view = GameView::default();
    let mut input = InputHandler::new();
    if term.reports_key_release() {
        input = input.with_release_timeout_ms(u32::MAX);
    }

    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(FRAME_MS);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(score = game.score(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = input.handle_key(key) {
                        dispatch(&mut game, &mut input, action, skip_countdown);
                    }
                }
                Event::Mouse(mouse) => {
                    let now = game.clock().now_ms();
                    for action in input.handle_mouse(mouse, now, game.phase()) {
                        dispatch(&mut game, &mut input, action, skip_countdown);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            let (elapsed_ms, consumed) = frame_delta(elapsed);
            last_tick += consumed;

            for action in input.update(elapsed_ms) {
                dispatch(&mut game, &mut input, action, skip_countdown);
            }
            game.tick(elapsed_ms);
            if game.phase() == Phase::Over && input.soft_drop_held() {
                input.reset();
            }

            if let Some(event) = game.take_last_event() {
                debug!(
                    kind = event.kind.as_str(),
                    lines = event.lines_cleared,
                    points = event.points,
                    topped_out = event.topped_out,
                    "locked"
                );
            }
        }
    }
}
