//! Key mapping from terminal events to input events.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::GameAction;

/// Discrete events an input source can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    /// Begin a session (from idle or after game over)
    Start,
    /// Leave the shell; never reaches the engine
    Quit,
}

impl InputEvent {
    /// Engine command for this event, if it has one
    pub fn action(&self) -> Option<GameAction> {
        match self {
            InputEvent::MoveLeft => Some(GameAction::MoveLeft),
            InputEvent::MoveRight => Some(GameAction::MoveRight),
            InputEvent::SoftDrop => Some(GameAction::SoftDrop),
            InputEvent::Rotate => Some(GameAction::Rotate),
            InputEvent::HardDrop => Some(GameAction::HardDrop),
            InputEvent::TogglePause => Some(GameAction::TogglePause),
            InputEvent::Start => Some(GameAction::Start),
            InputEvent::Quit => None,
        }
    }
}

/// Map keyboard input to input events.
///
/// Arrow keys or WASD move and rotate, space hard-drops, `p` pauses,
/// Enter or `r` starts, `q` or Ctrl-C quits. Key releases and unknown keys
/// map to `None`.
pub fn handle_key_event(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputEvent::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(InputEvent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(InputEvent::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(InputEvent::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(InputEvent::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(InputEvent::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputEvent::TogglePause),
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Start),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    handle_key_event(key) == Some(InputEvent::Quit)
}
