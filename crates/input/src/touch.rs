//! Touch gesture recognizer.
//!
//! Turns a single-finger stream (start, move, end) into game actions:
//!
//! - horizontal swipe past [`SWIPE_THRESHOLD`] moves one column, then
//!   re-anchors so a long swipe keeps moving
//! - downward drag past [`SWIPE_THRESHOLD`] engages soft drop; past
//!   [`DROP_THRESHOLD`] it hard-drops and ends the gesture
//! - a tap rotates clockwise; a press longer than [`HOLD_THRESHOLD_MS`]
//!   holds the piece
//!
//! Coordinates are in pixels. Gestures only start while a session is live.

use arrayvec::ArrayVec;

use crate::types::{GameAction, Phase};

pub const SWIPE_THRESHOLD: f32 = 24.0;
pub const DROP_THRESHOLD: f32 = 90.0;
pub const HOLD_THRESHOLD_MS: u64 = 420;

pub type TouchActions = ArrayVec<GameAction, 4>;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchor {
    x: f32,
    y: f32,
    started_ms: u64,
    acted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TouchGestures {
    anchor: Option<Anchor>,
}

impl TouchGestures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is in progress
    pub fn is_tracking(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn touch_start(&mut self, x: f32, y: f32, now_ms: u64, phase: Phase) {
        if !phase.is_live() {
            return;
        }
        self.anchor = Some(Anchor {
            x,
            y,
            started_ms: now_ms,
            acted: false,
        });
    }

    pub fn touch_move(&mut self, x: f32, y: f32, phase: Phase) -> TouchActions {
        let mut actions = TouchActions::new();
        if phase != Phase::Playing {
            return actions;
        }
        let Some(anchor) = self.anchor.as_mut() else {
            return actions;
        };

        let dx = x - anchor.x;
        let dy = y - anchor.y;
        if dx.abs() > dy.abs() && dx.abs() > SWIPE_THRESHOLD {
            actions.push(if dx > 0.0 {
                GameAction::MoveRight
            } else {
                GameAction::MoveLeft
            });
            anchor.x = x;
            anchor.acted = true;
        } else if dy > SWIPE_THRESHOLD {
            actions.push(GameAction::SoftDropStart);
            // A drag is never a tap.
            anchor.acted = true;
        }

        if dy > DROP_THRESHOLD {
            actions.push(GameAction::HardDrop);
            self.anchor = None;
        }
        actions
    }

    /// Finish the gesture (touch end or cancel)
    pub fn touch_end(&mut self, now_ms: u64) -> TouchActions {
        let mut actions = TouchActions::new();
        if let Some(anchor) = self.anchor.take() {
            if !anchor.acted {
                let held_ms = now_ms.saturating_sub(anchor.started_ms);
                actions.push(if held_ms > HOLD_THRESHOLD_MS {
                    GameAction::Hold
                } else {
                    GameAction::RotateCw
                });
            }
        }
        actions.push(GameAction::SoftDropStop);
        actions
    }
}
