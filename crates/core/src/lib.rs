//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule and the state machine that applies them.
//! It has no dependency on rendering or terminal I/O; time comes from an
//! injected [`Clock`], randomness from a seeded bag generator, so the same
//! seed and the same inputs always replay the same game.
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 grid (20 visible rows), collision, merge and line sweep
//! - [`pieces`]: static shape catalog with rotation matrices and palette
//! - [`piece`]: the falling piece - spawn, move, rotate with kicks, ghost
//! - [`rng`]: 7-bag randomizer feeding the upcoming-piece queue
//! - [`scoring`]: level, gravity and line-clear scoring with combos
//! - [`game_state`]: phase machine, timing, hold and the lock resolver
//! - [`snapshot`]: owned read-only view for renderers and headless hosts
//! - [`clock`], [`config`]: injected time source and tunables
//!
//! # Example
//!
//! ```
//! use neon_tetris_core::{GameConfig, GameState, ManualClock};
//! use neon_tetris_core::types::{GameAction, Phase};
//!
//! let clock = ManualClock::new(0);
//! let mut game = GameState::with_clock(GameConfig::default().with_seed(7), clock.clone());
//! game.start_game(false);
//! assert_eq!(game.phase(), Phase::Countdown);
//!
//! clock.advance(2400);
//! game.tick(16);
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::HardDrop);
//! assert_eq!(game.board().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`] every frame with the elapsed milliseconds. The
//! piece steps down once the accumulated time reaches the drop interval:
//! 900ms at the start, `max(90, 1000 - (level - 1) * 75)` after the first
//! clear, and a fifth of that (at least 60ms) while soft drop is held.

pub mod board;
pub mod clock;
pub mod config;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use neon_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, ClearedRows, Sweep};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::GameConfig;
pub use game_state::{GameState, LineClearEffect, LockEvent, StartOptions};
pub use piece::ActivePiece;
pub use pieces::{shape, Matrix, PieceShape};
pub use rng::{pick_bag, PieceQueue};
pub use scoring::{GameStats, ScoreResult};
pub use snapshot::GameSnapshot;
