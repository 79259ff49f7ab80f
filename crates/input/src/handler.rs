//! Terminal input handler.
//!
//! Wraps the key map with the state a terminal needs: most terminals never
//! report key releases, so a held soft drop is released after a quiet period
//! with no soft-drop key events. Mouse drags are fed through the touch
//! gesture recognizer, scaled from cells to pixels.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::map::{handle_key_event, is_soft_drop_key};
use crate::touch::{TouchActions, TouchGestures};
use crate::types::{GameAction, Phase};

// Long enough to bridge the typical initial key-repeat delay.
const DEFAULT_SOFT_DROP_RELEASE_MS: u32 = 550;

/// Approximate pixel size of one terminal cell.
pub const CELL_PX_W: f32 = 8.0;
pub const CELL_PX_H: f32 = 16.0;

#[derive(Debug, Clone)]
pub struct InputHandler {
    soft_drop_held: bool,
    since_soft_drop_key_ms: u32,
    release_timeout_ms: u32,
    gestures: TouchGestures,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            soft_drop_held: false,
            since_soft_drop_key_ms: 0,
            release_timeout_ms: DEFAULT_SOFT_DROP_RELEASE_MS,
            gestures: TouchGestures::new(),
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    pub fn release_timeout_ms(&self) -> u32 {
        self.release_timeout_ms
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<GameAction> {
        if is_soft_drop_key(key.code) {
            if key.kind == KeyEventKind::Release {
                return self.release_soft_drop();
            }
            // Repeats keep the latch alive.
            self.since_soft_drop_key_ms = 0;
            if self.soft_drop_held {
                return None;
            }
            self.soft_drop_held = true;
            return Some(GameAction::SoftDropStart);
        }
        handle_key_event(key)
    }

    pub fn handle_mouse(&mut self, event: MouseEvent, now_ms: u64, phase: Phase) -> TouchActions {
        let x = f32::from(event.column) * CELL_PX_W;
        let y = f32::from(event.row) * CELL_PX_H;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.gestures.touch_start(x, y, now_ms, phase);
                TouchActions::new()
            }
            MouseEventKind::Drag(MouseButton::Left) => self.gestures.touch_move(x, y, phase),
            MouseEventKind::Up(MouseButton::Left) => self.gestures.touch_end(now_ms),
            _ => TouchActions::new(),
        }
    }

    fn release_soft_drop(&mut self) -> Option<GameAction> {
        if !self.soft_drop_held {
            return None;
        }
        self.soft_drop_held = false;
        self.since_soft_drop_key_ms = 0;
        Some(GameAction::SoftDropStop)
    }

    /// Advance the release timer
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 1> {
        let mut actions = ArrayVec::new();
        if !self.soft_drop_held {
            return actions;
        }
        self.since_soft_drop_key_ms = self.since_soft_drop_key_ms.saturating_add(elapsed_ms);
        if self.since_soft_drop_key_ms > self.release_timeout_ms {
            if let Some(action) = self.release_soft_drop() {
                actions.push(action);
            }
        }
        actions
    }

    pub fn reset(&mut self) {
        self.soft_drop_held = false;
        self.since_soft_drop_key_ms = 0;
        self.gestures = TouchGestures::new();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
