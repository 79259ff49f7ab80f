//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It renders a
//! [`core::GameSnapshot`] into a framebuffer that is flushed to the terminal
//! with crossterm, without any widget or layout library.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use neon_tetris_core as core;
pub use neon_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
