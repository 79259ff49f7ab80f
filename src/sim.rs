//! Headless simulation used by the `simulate` command and benches.
//!
//! Plays a game without a terminal: every piece is turned and steered toward
//! a column chosen by a fixed sweep, then hard-dropped. Time comes from a
//! manual clock, so a seed always produces the same final snapshot.

use tracing::{debug, info};

use crate::core::{GameConfig, GameSnapshot, GameState, ManualClock};
use crate::types::{Direction, Phase, RotateDir, BOARD_COLS};

/// Simulated time between two drops
const MS_PER_PIECE: u64 = 250;

#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Pieces actually dropped (fewer than requested after a top-out)
    pub pieces_dropped: u32,
    pub snapshot: GameSnapshot,
}

/// Column the `index`-th piece is steered to
fn target_column(index: u32) -> i32 {
    ((index * 3) % BOARD_COLS as u32) as i32
}

/// Drop up to `pieces` pieces from a fresh game seeded with `seed`
pub fn simulate(seed: u64, pieces: u32) -> SimulationReport {
    let clock = ManualClock::new(0);
    let config = GameConfig::default().with_seed(seed).with_fixed_seed(true);
    let mut game = GameState::with_clock(config, clock.clone());
    game.start_game(true);

    let mut dropped = 0;
    while dropped < pieces && game.phase() == Phase::Playing {
        for _ in 0..dropped % 4 {
            game.rotate(RotateDir::Cw);
        }

        let target = target_column(dropped);
        while let Some(active) = game.active() {
            let dir = match active.x.cmp(&target) {
                std::cmp::Ordering::Less => Direction::Right,
                std::cmp::Ordering::Greater => Direction::Left,
                std::cmp::Ordering::Equal => break,
            };
            if !game.move_piece(dir) {
                break;
            }
        }

        game.hard_drop();
        dropped += 1;
        clock.advance(MS_PER_PIECE);
        if let Some(event) = game.take_last_event() {
            debug!(
                piece = dropped,
                kind = event.kind.as_str(),
                lines = event.lines_cleared,
                "dropped"
            );
        }
    }

    let snapshot = game.snapshot();
    info!(
        seed,
        dropped,
        score = snapshot.stats.score,
        lines = snapshot.stats.lines,
        phase = snapshot.phase.as_str(),
        "simulation finished"
    );
    SimulationReport {
        pieces_dropped: dropped,
        snapshot,
    }
}
