//! Engine configuration.
//!
//! Defaults match the gameplay constants in `neon_tetris_types`; hosts only
//! override what they need.

use crate::types::COUNTDOWN_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed for the piece bags of the first game
    pub seed: u64,
    /// Pre-game countdown length
    pub countdown_ms: u64,
    /// Reuse `seed` on every restart instead of drawing a new one
    pub fixed_seed: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            countdown_ms: COUNTDOWN_MS,
            fixed_seed: false,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_countdown_ms(mut self, countdown_ms: u64) -> Self {
        self.countdown_ms = countdown_ms;
        self
    }

    pub fn with_fixed_seed(mut self, fixed_seed: bool) -> Self {
        self.fixed_seed = fixed_seed;
        self
    }
}
