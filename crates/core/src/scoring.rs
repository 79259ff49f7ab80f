//! Scoring module - level, gravity and line-clear score rules
//!
//! - Level is `lines / 10 + 1`.
//! - Gravity is `max(90, 1000 - (level - 1) * 75)` milliseconds per row.
//! - A clear of N rows scores `LINE_SCORES[N] * level`, plus a combo bonus of
//!   `combo * 25 * N` where `combo` already counts the current clear.

use serde::Serialize;

use crate::types::{
    BASE_DROP_MS, COMBO_BONUS, DROP_STEP_MS, INITIAL_DROP_MS, LINES_PER_LEVEL, LINE_SCORES,
    MIN_DROP_MS, SOFT_DROP_DIVISOR, SOFT_DROP_MIN_MS,
};

/// Cumulative game statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameStats {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Current natural drop interval
    pub speed_ms: u32,
    /// Consecutive locks that cleared at least one row
    pub combo: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            speed_ms: INITIAL_DROP_MS,
            combo: 0,
        }
    }
}

impl GameStats {
    /// Fold one lock into the stats and return the points it earned
    ///
    /// `rows == 0` only breaks the combo chain.
    pub fn record_lock(&mut self, rows: usize) -> ScoreResult {
        if rows == 0 {
            self.combo = 0;
            return ScoreResult::default();
        }

        self.lines = self.lines.saturating_add(rows as u32);
        self.combo = self.combo.saturating_add(1);
        self.level = level_for_lines(self.lines);
        self.speed_ms = drop_interval_for_level(self.level);

        let result = score_clear(rows, self.level, self.combo);
        self.score = self.score.saturating_add(result.total);
        result
    }
}

/// Score breakdown for a single lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Table points times level
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`
    pub combo_bonus: u32,
    pub total: u32,
}

pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

pub fn drop_interval_for_level(level: u32) -> u32 {
    let slowdown = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS.saturating_sub(slowdown).max(MIN_DROP_MS)
}

/// Soft drop interval derived from a natural drop interval
pub fn soft_drop_interval(speed_ms: u32) -> u32 {
    (speed_ms / SOFT_DROP_DIVISOR).max(SOFT_DROP_MIN_MS)
}

/// Table points for `rows` cleared at `level`; unknown row counts score 0
pub fn line_clear_score(rows: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(rows)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

pub fn combo_bonus(combo: u32, rows: usize) -> u32 {
    combo.saturating_mul(COMBO_BONUS).saturating_mul(rows as u32)
}

pub fn score_clear(rows: usize, level: u32, combo: u32) -> ScoreResult {
    let line_clear_score = line_clear_score(rows, level);
    let combo_bonus = combo_bonus(combo, rows);
    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score.saturating_add(combo_bonus),
    }
}
