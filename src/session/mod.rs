//! Game session: lifecycle, frame scheduling and input plumbing.

pub mod gamepad;
pub mod host;
pub mod input;
pub mod launch;
pub mod logic;
pub mod scheduler;
pub mod types;

pub use gamepad::{spawn_polling, GamepadPoller, GamepadSnapshot, GamepadSource, PollingHandle};
pub use host::{HighScoreHost, JsonHighScoreStore, MemoryHighScore, NoHighScoreHost};
pub use input::{channel, InputSender, KeyCommand, KeyTranslator};
pub use launch::{launch, DisabledNotice, Launch};
pub use logic::{clamp_dimensions, GameSession};
pub use scheduler::{FrameScheduler, ResizeDebouncer};
pub use types::{GameState, InputAction, SessionOptions};
