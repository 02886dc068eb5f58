//! Gamepad polling.
//!
//! The poller never touches the session. It compares button snapshots and
//! turns edges into actions on the shared input queue: button 0 jumps,
//! button 1 ducks and button 9 restarts on release.

use super::input::InputSender;
use super::types::InputAction;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const JUMP_BUTTON: usize = 0;
pub const DUCK_BUTTON: usize = 1;
pub const RESTART_BUTTON: usize = 9;

/// Pressed state of every button on one pad.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamepadSnapshot {
    pub buttons: Vec<bool>,
}

impl GamepadSnapshot {
    pub fn pressed(&self, button: usize) -> bool {
        self.buttons.get(button).copied().unwrap_or(false)
    }
}

/// Anything that can enumerate connected pads. Slots may be empty.
pub trait GamepadSource {
    fn snapshot(&mut self) -> Vec<Option<GamepadSnapshot>>;
}

#[derive(Debug, Clone, Default)]
pub struct GamepadPoller {
    active: Option<usize>,
    previous: Option<GamepadSnapshot>,
}

impl GamepadPoller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Poll once and return the actions produced.
    pub fn poll(&mut self, source: &mut impl GamepadSource) -> Vec<InputAction> {
        let pads = source.snapshot();

        let pad = match self.active {
            Some(index) => match pads.get(index).cloned().flatten() {
                Some(pad) => pad,
                None => {
                    tracing::info!(index, "gamepad disconnected, no active gamepad");
                    self.active = None;
                    self.previous = None;
                    return self.scan(&pads);
                }
            },
            None => return self.scan(&pads),
        };

        let mut actions = Vec::new();
        let prev = self.previous.take().unwrap_or_default();
        edge(&prev, &pad, JUMP_BUTTON, &mut actions, |down| {
            Some(if down {
                InputAction::JumpPressed
            } else {
                InputAction::JumpReleased
            })
        });
        if pad.buttons.len() > DUCK_BUTTON {
            edge(&prev, &pad, DUCK_BUTTON, &mut actions, |down| {
                Some(if down {
                    InputAction::DuckPressed
                } else {
                    InputAction::DuckReleased
                })
            });
        }
        if pad.buttons.len() > RESTART_BUTTON {
            edge(&prev, &pad, RESTART_BUTTON, &mut actions, |down| {
                (!down).then_some(InputAction::Restart)
            });
        }
        self.previous = Some(pad);
        actions
    }

    /// Adopt the first pad holding the jump button.
    fn scan(&mut self, pads: &[Option<GamepadSnapshot>]) -> Vec<InputAction> {
        let found = pads.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|pad| !pad.buttons.is_empty() && pad.pressed(JUMP_BUTTON))
        });
        match found {
            Some(index) => {
                tracing::info!(index, "gamepad active");
                self.active = Some(index);
                self.previous = pads[index].clone();
                // The adopting press counts as a rising edge.
                vec![InputAction::JumpPressed]
            }
            None => Vec::new(),
        }
    }

    /// Poll and forward the actions. Returns false once the queue is closed.
    pub fn forward(&mut self, source: &mut impl GamepadSource, sender: &InputSender) -> bool {
        self.poll(source).into_iter().all(|action| sender.send(action))
    }
}

fn edge(
    prev: &GamepadSnapshot,
    now: &GamepadSnapshot,
    button: usize,
    out: &mut Vec<InputAction>,
    map: impl Fn(bool) -> Option<InputAction>,
) {
    let down = now.pressed(button);
    if down != prev.pressed(button) {
        if let Some(action) = map(down) {
            out.push(action);
        }
    }
}

/// Handle onto a background polling thread.
pub struct PollingHandle {
    stop: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl PollingHandle {
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                tracing::warn!("gamepad polling thread panicked");
            }
        }
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Poll `source` every `interval` on its own thread until stopped or the
/// session drops its queue.
pub fn spawn_polling<S>(mut source: S, sender: InputSender, interval: Duration) -> PollingHandle
where
    S: GamepadSource + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    let thread = thread::spawn(move || {
        let mut poller = GamepadPoller::new();
        while !flag.load(Ordering::Relaxed) {
            if !poller.forward(&mut source, &sender) {
                break;
            }
            thread::sleep(interval);
        }
    });
    PollingHandle {
        stop,
        thread: Some(thread),
    }
}
