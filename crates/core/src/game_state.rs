//! Game state module - the single owner of all mutable game state
//!
//! Ties together the board, the active piece, the bag queue and scoring, and
//! drives the phase machine:
//!
//! ```text
//! Intro ──start──▶ Countdown ──deadline──▶ Playing ⇄ Paused
//!   ▲                                         │
//!   └──────reset──────── Over ◀──top-out──────┘
//! ```
//!
//! `start_game` is accepted from any phase. Every action runs to completion;
//! actions that would produce an illegal placement leave the state unchanged
//! and report `false`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::board::{Board, ClearedRows, Sweep};
use crate::clock::{Clock, MonotonicClock};
use crate::config::GameConfig;
use crate::piece::ActivePiece;
use crate::rng::PieceQueue;
use crate::scoring::{soft_drop_interval, GameStats};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Most recent line clear, for transient visual/audio feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineClearEffect {
    pub id: u64,
    /// Cleared rows, pre-sweep indices, ascending
    pub rows: ClearedRows,
    pub timestamp: u64,
}

/// Emitted after every lock (consumed by observers such as audio)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub points: u32,
    pub combo: u32,
    pub topped_out: bool,
}

/// Options for [`GameState::start_game_with`]
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    pub skip_countdown: bool,
    /// Starting grid; empty when `None`
    pub board: Option<Board>,
    /// Pieces dealt before the first bag
    pub opening: Vec<PieceKind>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<C: Clock = MonotonicClock> {
    clock: C,
    config: GameConfig,
    seeds: StdRng,
    phase: Phase,
    board: Board,
    active: Option<ActivePiece>,
    ghost_y: i32,
    queue: PieceQueue,
    hold: Option<PieceKind>,
    can_hold: bool,
    stats: GameStats,
    drop_accumulator_ms: u32,
    soft_drop: bool,
    recent_effect: Option<LineClearEffect>,
    effect_seq: u64,
    last_event: Option<LockEvent>,
    countdown_until: Option<u64>,
    /// Increments on every start
    session_id: u32,
}

impl GameState<MonotonicClock> {
    /// Create a game in the intro phase with the given bag seed
    pub fn new(seed: u64) -> Self {
        Self::with_clock(GameConfig::default().with_seed(seed), MonotonicClock::new())
    }
}

impl Default for GameState<MonotonicClock> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<C: Clock> GameState<C> {
    pub fn with_clock(config: GameConfig, clock: C) -> Self {
        Self {
            clock,
            config,
            seeds: StdRng::seed_from_u64(config.seed),
            phase: Phase::Intro,
            board: Board::new(),
            active: None,
            ghost_y: 0,
            queue: PieceQueue::new(config.seed),
            hold: None,
            can_hold: true,
            stats: GameStats::default(),
            drop_accumulator_ms: 0,
            soft_drop: false,
            recent_effect: None,
            effect_seq: 0,
            last_event: None,
            countdown_until: None,
            session_id: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Resting row of the active piece
    pub fn ghost_y(&self) -> Option<i32> {
        self.active.map(|_| self.ghost_y)
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    pub fn score(&self) -> u32 {
        self.stats.score
    }

    pub fn hold_piece_kind(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn next_queue(&self) -> [PieceKind; QUEUE_PREVIEW] {
        self.queue.preview()
    }

    pub fn recent_effect(&self) -> Option<&LineClearEffect> {
        self.recent_effect.as_ref()
    }

    pub fn countdown_until(&self) -> Option<u64> {
        self.countdown_until
    }

    /// Time left before the countdown ends
    pub fn countdown_remaining_ms(&self) -> Option<u64> {
        self.countdown_until
            .map(|deadline| deadline.saturating_sub(self.clock.now_ms()))
    }

    pub fn soft_drop_active(&self) -> bool {
        self.soft_drop
    }

    pub fn drop_accumulator_ms(&self) -> u32 {
        self.drop_accumulator_ms
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Current gravity, accounting for a held soft drop
    pub fn drop_interval_ms(&self) -> u32 {
        if self.soft_drop {
            soft_drop_interval(self.stats.speed_ms)
        } else {
            self.stats.speed_ms
        }
    }

    /// Immutable copy of everything renderers and audio may observe
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            board: self.board.clone(),
            active: self.active,
            ghost_y: self.ghost_y(),
            stats: self.stats,
            hold: self.hold,
            can_hold: self.can_hold,
            next_queue: self.queue.preview(),
            recent_effect: self.recent_effect.clone(),
            countdown_until: self.countdown_until,
            countdown_remaining_ms: self.countdown_remaining_ms(),
            now_ms: self.clock.now_ms(),
            session_id: self.session_id,
        }
    }

    fn fresh_queue(&mut self, opening: &[PieceKind]) -> PieceQueue {
        let seed = if self.config.fixed_seed {
            self.config.seed
        } else {
            self.seeds.random()
        };
        PieceQueue::with_opening(seed, opening)
    }

    /// Start a new session on an empty board
    pub fn start_game(&mut self, skip_countdown: bool) {
        self.start_game_with(StartOptions {
            skip_countdown,
            ..StartOptions::default()
        });
    }

    /// Start a new session from any phase
    ///
    /// Resets board, stats, queue and hold, then spawns the first piece. The
    /// piece does not fall until the countdown (if any) has elapsed.
    pub fn start_game_with(&mut self, options: StartOptions) {
        self.board = options.board.unwrap_or_default();
        self.queue = self.fresh_queue(&options.opening);
        self.hold = None;
        self.can_hold = true;
        self.stats = GameStats::default();
        self.drop_accumulator_ms = 0;
        self.recent_effect = None;
        self.last_event = None;
        self.active = None;
        self.session_id = self.session_id.wrapping_add(1);

        if options.skip_countdown {
            self.countdown_until = None;
            self.phase = Phase::Playing;
        } else {
            self.countdown_until = Some(self.clock.now_ms().saturating_add(self.config.countdown_ms));
            self.phase = Phase::Countdown;
        }
        info!(
            session = self.session_id,
            seed = self.queue.seed(),
            phase = self.phase.as_str(),
            "game started"
        );

        self.spawn_next();
    }

    /// Return to the intro screen with a fresh, empty session
    pub fn reset_game(&mut self) {
        self.phase = Phase::Intro;
        self.board = Board::new();
        self.queue = self.fresh_queue(&[]);
        self.active = None;
        self.ghost_y = 0;
        self.stats = GameStats::default();
        self.hold = None;
        self.can_hold = true;
        self.drop_accumulator_ms = 0;
        self.recent_effect = None;
        self.last_event = None;
        self.countdown_until = None;
        info!(session = self.session_id, "game reset");
    }

    /// `Playing → Paused`; no-op otherwise
    pub fn pause_game(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.phase = Phase::Paused;
        debug!("paused");
        true
    }

    /// `Paused → Playing`; no-op otherwise
    pub fn resume_game(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Playing;
        debug!("resumed");
        true
    }

    /// Set or clear the held soft-drop input
    pub fn soft_drop(&mut self, active: bool) {
        self.soft_drop = active;
    }

    /// The active piece, if input may act on it right now
    fn controllable(&self) -> Option<ActivePiece> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.active
    }

    fn set_active(&mut self, piece: ActivePiece) {
        self.ghost_y = piece.ghost_y(&self.board);
        self.active = Some(piece);
    }

    /// Shift the active piece one column
    pub fn move_piece(&mut self, dir: Direction) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };
        match active.try_translate(&self.board, dir.dx(), 0) {
            Some(next) => {
                self.set_active(next);
                true
            }
            None => {
                trace!(?dir, "move blocked");
                false
            }
        }
    }

    /// Rotate the active piece, trying horizontal wall kicks
    pub fn rotate(&mut self, dir: RotateDir) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };
        match active.try_rotate(&self.board, dir) {
            Some(next) => {
                self.set_active(next);
                true
            }
            None => {
                trace!(?dir, kind = active.kind.as_str(), "rotation blocked");
                false
            }
        }
    }

    /// Drop the active piece to its ghost row and lock it immediately
    pub fn hard_drop(&mut self) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };
        let landed = ActivePiece {
            y: active.ghost_y(&self.board),
            ..active
        };
        self.active = Some(landed);
        self.lock_piece();
        true
    }

    /// Swap the active piece with the hold slot (once per piece)
    pub fn hold_piece(&mut self) -> bool {
        let Some(active) = self.controllable() else {
            return false;
        };
        if !self.can_hold {
            trace!("hold unavailable");
            return false;
        }

        self.active = None;
        match self.hold.replace(active.kind) {
            Some(held) => {
                self.place_spawned(ActivePiece::spawn(held));
            }
            None => {
                self.spawn_next();
            }
        }
        self.can_hold = false;
        debug!(held = active.kind.as_str(), "hold");
        true
    }

    /// Advance fall timing by `delta_ms`
    ///
    /// Returns true when the active piece stepped down or locked.
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        if self.phase == Phase::Countdown {
            if let Some(deadline) = self.countdown_until {
                if self.clock.now_ms() >= deadline {
                    self.phase = Phase::Playing;
                    self.drop_accumulator_ms = 0;
                    self.countdown_until = None;
                    debug!("countdown finished");
                }
            }
        }

        let Some(active) = self.controllable() else {
            self.drop_accumulator_ms = 0;
            return false;
        };

        self.drop_accumulator_ms = self.drop_accumulator_ms.saturating_add(delta_ms);
        if self.drop_accumulator_ms < self.drop_interval_ms() {
            return false;
        }
        self.drop_accumulator_ms = 0;

        match active.try_translate(&self.board, 0, 1) {
            Some(next) => self.set_active(next),
            None => self.lock_piece(),
        }
        true
    }

    /// Merge the active piece, clear rows, score, and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let now = self.clock.now_ms();
        let Sweep { board, cleared } = self.board.merge(&active, now).sweep_lines();
        self.board = board;

        let result = self.stats.record_lock(cleared.len());
        if cleared.is_empty() {
            self.recent_effect = None;
        } else {
            self.effect_seq += 1;
            debug!(
                rows = ?cleared.as_slice(),
                points = result.total,
                combo = self.stats.combo,
                level = self.stats.level,
                "lines cleared"
            );
            self.recent_effect = Some(LineClearEffect {
                id: self.effect_seq,
                rows: cleared.clone(),
                timestamp: now,
            });
        }

        self.can_hold = true;
        let spawned = self.spawn_next();

        self.last_event = Some(LockEvent {
            kind: active.kind,
            lines_cleared: cleared.len() as u32,
            points: result.total,
            combo: self.stats.combo,
            topped_out: !spawned,
        });
    }

    /// Draw the next kind from the queue and spawn it
    fn spawn_next(&mut self) -> bool {
        let kind = self.queue.draw();
        self.place_spawned(ActivePiece::spawn(kind))
    }

    /// Make `piece` active, or end the game if it cannot be placed
    fn place_spawned(&mut self, piece: ActivePiece) -> bool {
        if !piece.fits(&self.board) {
            self.active = None;
            self.ghost_y = 0;
            self.countdown_until = None;
            self.phase = Phase::Over;
            info!(
                session = self.session_id,
                kind = piece.kind.as_str(),
                score = self.stats.score,
                lines = self.stats.lines,
                "top out"
            );
            return false;
        }
        self.set_active(piece);
        self.can_hold = true;
        true
    }

    /// Apply an input command
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(Direction::Left),
            GameAction::MoveRight => self.move_piece(Direction::Right),
            GameAction::RotateCw => self.rotate(RotateDir::Cw),
            GameAction::RotateCcw => self.rotate(RotateDir::Ccw),
            GameAction::SoftDropStart => {
                self.soft_drop(true);
                true
            }
            GameAction::SoftDropStop => {
                self.soft_drop(false);
                true
            }
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Hold => self.hold_piece(),
            GameAction::TogglePause => match self.phase {
                Phase::Playing => self.pause_game(),
                Phase::Paused => self.resume_game(),
                _ => false,
            },
            GameAction::Start => {
                if self.phase.is_live() {
                    return false;
                }
                self.start_game(false);
                true
            }
        }
    }
}
