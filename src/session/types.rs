//! Session state, input actions and construction options.

use crate::core::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::core::SpeedMode;
use crate::skins::SkinId;

/// Lifecycle of a session.
///
/// `Waiting -> Intro -> Running <-> Paused`, `Running -> Crashed -> Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Not yet activated; the avatar idles and blinks.
    Waiting,
    /// Avatar slides in after the first jump; the world is frozen.
    Intro,
    Running,
    /// Focus lost; the frame loop is halted.
    Paused,
    Crashed,
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Intro => "intro",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Crashed => "crashed",
        }
    }

    /// Whether the frame loop advances the simulation.
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Intro | Self::Running)
    }
}

/// Device-independent input, with press and release edges.
///
/// Pointer coordinates are logical canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    JumpPressed,
    JumpReleased,
    DuckPressed,
    DuckReleased,
    Restart,
    PointerPressed { x: f64, y: f64 },
    PointerReleased { x: f64, y: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub width: f64,
    pub height: f64,
    pub speed_mode: SpeedMode,
    pub audio_cues: bool,
    /// Alternate skin unlocked by the collectable, if configured.
    pub alt_skin: Option<SkinId>,
    /// Fullscreen play: width is capped at the default width.
    pub arcade: bool,
    /// Swaps the meaning of the night-mode inversion.
    pub dark_mode: bool,
    pub seed: u64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            speed_mode: SpeedMode::Normal,
            audio_cues: false,
            alt_skin: None,
            arcade: false,
            dark_mode: false,
            seed: 0,
        }
    }
}
