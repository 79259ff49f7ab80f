//! Neon Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one path,
//! `neon_tetris::{core, input, term, types}`, for the binary, integration
//! tests and benches.

pub mod sim;

pub use neon_tetris_core as core;
pub use neon_tetris_input as input;
pub use neon_tetris_term as term;
pub use neon_tetris_types as types;
