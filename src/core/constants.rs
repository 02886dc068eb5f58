//! Shared simulation constants.
//!
//! All positions are in logical canvas units (the classic runner canvas is
//! 600x150) and all times are in milliseconds.

/// Target refresh rate of the frame loop.
pub const FPS: f64 = 60.0;

/// Milliseconds per frame at the target refresh rate.
pub const MS_PER_FRAME: f64 = 1000.0 / FPS;

/// Canvas width the game was tuned for.
pub const DEFAULT_WIDTH: f64 = 600.0;

/// Canvas height. The play field never grows vertically.
pub const DEFAULT_HEIGHT: f64 = 150.0;

/// Smallest canvas the session will lay itself out for.
pub const MIN_WIDTH: f64 = 120.0;
pub const MIN_HEIGHT: f64 = 150.0;

/// Distance between the ground line and the canvas bottom.
pub const BOTTOM_PAD: f64 = 10.0;

// ── Session timing ──────────────────────────────────────────────────

/// Running time before the first obstacle may appear.
pub const CLEAR_TIME: f64 = 3000.0;

/// Clear time multiplier while audio cues are on.
pub const AUDIO_CUE_CLEAR_TIME_FACTOR: f64 = 1.2;

/// Cooldown after a crash before restart input is honoured.
pub const GAMEOVER_CLEAR_TIME: f64 = 1200.0;

/// How long a night-mode inversion lasts.
pub const INVERT_FADE_DURATION: f64 = 12000.0;

/// Blinks performed on the waiting screen before the loop goes idle.
pub const MAX_BLINK_COUNT: u32 = 3;

/// Avatar flash after picking up a collectable, before the skin switch.
pub const ALT_MODE_FLASH_DURATION: f64 = 1000.0;

/// Fade-in of the alternate skin, in seconds.
pub const ALT_MODE_FADE_DURATION: f64 = 1.0;

/// Resize events are coalesced over this window.
pub const RESIZE_DEBOUNCE_MS: f64 = 250.0;

/// Base speed used to scale the audio-cue proximity threshold.
pub const AUDIO_CUE_BASE_SPEED: f64 = 6.0;

// ── Procedural generation ───────────────────────────────────────────

/// Same obstacle type may appear at most this many times in a row.
pub const MAX_OBSTACLE_DUPLICATION: usize = 2;

/// Resample attempts before falling back to the best eligible type.
pub const MAX_SPAWN_ATTEMPTS: usize = 32;

/// Probability per frame of spawning a cloud once the gap is clear.
pub const CLOUD_FREQUENCY: f64 = 0.5;

/// Cloud drift relative to the ground speed.
pub const BG_CLOUD_SPEED: f64 = 0.2;

pub const MAX_CLOUDS: usize = 6;

// ── Avatar ──────────────────────────────────────────────────────────

/// Resting x position after the intro slide-in.
pub const START_X_POS: f64 = 50.0;

/// Length of the intro slide-in.
pub const INTRO_DURATION: f64 = 1500.0;

/// Upper bound of the random delay between waiting-screen blinks.
pub const BLINK_TIMING: f64 = 7000.0;

/// Avatar flash cadence while a collectable is being picked up.
pub const FLASH_ON: f64 = 100.0;
pub const FLASH_OFF: f64 = 175.0;
