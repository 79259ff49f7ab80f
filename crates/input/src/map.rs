//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

/// Arrow keys that should not auto-repeat while held.
fn is_directional(code: KeyCode) -> bool {
    matches!(code, KeyCode::Left | KeyCode::Right | KeyCode::Down)
}

/// Whether the key drives soft drop.
pub fn is_soft_drop_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Down | KeyCode::Char('s' | 'S'))
}

/// Map keyboard input to game actions.
///
/// Release events only matter for soft drop; auto-repeat of the arrow keys
/// is ignored so a held arrow moves once. Letter keys keep repeating.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.kind {
        KeyEventKind::Release => {
            return is_soft_drop_key(key.code).then_some(GameAction::SoftDropStop);
        }
        KeyEventKind::Repeat if is_directional(key.code) => return None,
        _ => {}
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(GameAction::SoftDropStart),

        // Rotation
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'x' | 'X') => Some(GameAction::RotateCw),
        KeyCode::Char('z' | 'Z' | 'q' | 'Q') => Some(GameAction::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c' | 'C')
        | KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
            Some(GameAction::Hold)
        }
        KeyCode::Char('p' | 'P') | KeyCode::Esc => Some(GameAction::TogglePause),
        KeyCode::Enter => Some(GameAction::Start),

        _ => None,
    }
}

/// Check if key should quit the game.
///
/// `q` rotates, so quitting needs Ctrl.
pub fn should_quit(key: KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c' | 'C' | 'q' | 'Q'))
}
