use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::buttons::ControlPad;
use crate::game::Heading;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Heading),
    /// Begin a game from the start or game-over screen
    Start,
    /// Throw the current game away and begin a new one
    Restart,
    Pause,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Steer(Heading::Up),
            KeyCode::Down => KeyAction::Steer(Heading::Down),
            KeyCode::Left => KeyAction::Steer(Heading::Left),
            KeyCode::Right => KeyAction::Steer(Heading::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Heading::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Heading::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Heading::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Heading::Right),

            // Controls
            KeyCode::Enter => KeyAction::Start,
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Pause,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }

    /// Left clicks on the on-screen pad steer; every other mouse event is ignored
    pub fn handle_mouse_event(&self, mouse: MouseEvent, pad: &ControlPad) -> KeyAction {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return KeyAction::None;
        }

        pad.hit(mouse.column, mouse.row)
            .map(|button| KeyAction::Steer(button.heading()))
            .unwrap_or(KeyAction::None)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
