//! Input queue and keyboard translation.
//!
//! Every input source (terminal, gamepad thread, tests) pushes
//! [`InputAction`]s through an [`InputSender`]. The session drains the
//! queue once per pump, before anything else runs.

use super::types::InputAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use std::sync::mpsc;

/// Cloneable handle onto a session's input queue.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: mpsc::Sender<InputAction>,
}

impl InputSender {
    pub(crate) fn new(tx: mpsc::Sender<InputAction>) -> Self {
        Self { tx }
    }

    /// Queue an action. Returns false once the session is gone.
    pub fn send(&self, action: InputAction) -> bool {
        self.tx.send(action).is_ok()
    }
}

/// What a key press means to the front end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    Game(InputAction),
    ToggleAudioCues,
    ToggleSpeedMode,
    Quit,
}

/// Maps crossterm key events onto game commands.
///
/// Terminals that cannot report key releases get synthesized ones: jump
/// releases immediately, duck toggles on each press.
#[derive(Debug, Clone)]
pub struct KeyTranslator {
    release_events: bool,
    duck_held: bool,
}

impl KeyTranslator {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            duck_held: false,
        }
    }

    pub fn translate_key(&mut self, key: KeyEvent) -> Vec<KeyCommand> {
        use InputAction::*;
        use KeyCommand::Game;

        let pressed = match key.kind {
            KeyEventKind::Press => true,
            KeyEventKind::Release => false,
            KeyEventKind::Repeat => return Vec::new(),
        };

        match key.code {
            KeyCode::Char(' ') | KeyCode::Up => {
                if !self.release_events {
                    vec![Game(JumpPressed), Game(JumpReleased)]
                } else if pressed {
                    vec![Game(JumpPressed)]
                } else {
                    vec![Game(JumpReleased)]
                }
            }
            KeyCode::Down => {
                if !self.release_events {
                    self.duck_held = !self.duck_held;
                    if self.duck_held {
                        vec![Game(DuckPressed)]
                    } else {
                        vec![Game(DuckReleased)]
                    }
                } else if pressed {
                    vec![Game(DuckPressed)]
                } else {
                    vec![Game(DuckReleased)]
                }
            }
            // Restart fires on key-up, or on press when releases are unknown.
            KeyCode::Enter if pressed != self.release_events => vec![Game(Restart)],
            _ if !pressed => Vec::new(),
            KeyCode::Char('a') => vec![KeyCommand::ToggleAudioCues],
            KeyCode::Char('s') => vec![KeyCommand::ToggleSpeedMode],
            KeyCode::Char('q') | KeyCode::Esc => vec![KeyCommand::Quit],
            _ => Vec::new(),
        }
    }

    /// Left button presses and releases, mapped into canvas units.
    pub fn translate_mouse(
        &self,
        mouse: MouseEvent,
        to_canvas: impl Fn(u16, u16) -> Option<(f64, f64)>,
    ) -> Option<InputAction> {
        let (x, y) = to_canvas(mouse.column, mouse.row)?;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(InputAction::PointerPressed { x, y }),
            MouseEventKind::Up(MouseButton::Left) => Some(InputAction::PointerReleased { x, y }),
            _ => None,
        }
    }
}

/// A fresh queue: the sending half and the receiver the session owns.
pub fn channel() -> (InputSender, mpsc::Receiver<InputAction>) {
    let (tx, rx) = mpsc::channel();
    (InputSender::new(tx), rx)
}
