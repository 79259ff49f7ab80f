//! Input module (engine-facing).
//!
//! Independent of any UI framework. Maps `crossterm` key events into
//! [`crate::types::GameAction`], recognizes touch-style gestures, and provides
//! a soft-drop latch for terminals that never report key releases.

pub mod handler;
pub mod map;
pub mod touch;

pub use neon_tetris_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
pub use touch::{TouchActions, TouchGestures};
