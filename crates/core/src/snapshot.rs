//! Read-only game snapshot for renderers, audio and headless hosts.
//!
//! A snapshot owns copies of everything it exposes, so observers can hold it
//! across frames without borrowing the game. It serializes to JSON for the
//! `simulate` command.

use serde::Serialize;

use crate::board::Board;
use crate::game_state::LineClearEffect;
use crate::piece::ActivePiece;
use crate::scoring::GameStats;
use crate::types::{Phase, PieceKind, BOARD_COLS, HIDDEN_ROWS, QUEUE_PREVIEW, VISIBLE_ROWS};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub board: Board,
    pub active: Option<ActivePiece>,
    /// Resting row of the active piece
    pub ghost_y: Option<i32>,
    pub stats: GameStats,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next_queue: [PieceKind; QUEUE_PREVIEW],
    pub recent_effect: Option<LineClearEffect>,
    pub countdown_until: Option<u64>,
    pub countdown_remaining_ms: Option<u64>,
    /// Clock reading when the snapshot was taken
    pub now_ms: u64,
    pub session_id: u32,
}

impl GameSnapshot {
    /// Whole seconds left on the countdown, rounded up (3, 2, 1)
    pub fn countdown_seconds(&self) -> Option<u64> {
        self.countdown_remaining_ms.map(|ms| ms.div_ceil(1000))
    }

    /// Whether the active piece covers board cell (x, y)
    pub fn active_covers(&self, x: i32, y: i32) -> bool {
        self.active
            .map(|p| p.cells().any(|cell| cell == (x, y)))
            .unwrap_or(false)
    }

    /// Whether the ghost projection covers board cell (x, y)
    pub fn ghost_covers(&self, x: i32, y: i32) -> bool {
        match (self.active, self.ghost_y) {
            (Some(p), Some(gy)) => p.translated(0, gy - p.y).cells().any(|cell| cell == (x, y)),
            _ => false,
        }
    }

    /// Visible rows as text, top to bottom: `#` locked, `@` active, `+` ghost
    pub fn ascii_rows(&self) -> Vec<String> {
        (HIDDEN_ROWS..HIDDEN_ROWS + VISIBLE_ROWS)
            .map(|row| {
                let y = row as i32;
                (0..BOARD_COLS as i32)
                    .map(|x| {
                        if self.active_covers(x, y) {
                            '@'
                        } else if self.board.is_occupied(x, y) {
                            '#'
                        } else if self.ghost_covers(x, y) {
                            '+'
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
