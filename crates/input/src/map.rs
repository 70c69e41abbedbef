//! Key mapping from terminal events to game inputs and app commands.

use crate::types::InputAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key means to the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Fed to the controller through the key tracker
    Game(InputAction),
    Restart,
    ToggleEffects,
    Quit,
}

/// Map a key to the game input it drives, if any.
pub fn input_action(code: KeyCode) -> Option<InputAction> {
    match code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputAction::MoveDown)
        }
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char(' ') => Some(InputAction::Rotate),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(InputAction::Pause),
        _ => None,
    }
}

/// Map keyboard input to a runner command.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyCommand> {
    if should_quit(key) {
        return Some(KeyCommand::Quit);
    }
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyCommand::Restart),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(KeyCommand::ToggleEffects),
        code => input_action(code).map(KeyCommand::Game),
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
