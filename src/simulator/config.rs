//! Simulation configuration.

use crate::core::SpeedMode;
use crate::skins::SkinId;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated sessions
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Games played per session; the autopilot restarts after each crash
    pub games_per_run: u32,

    /// Frame budget per session before timeout
    pub max_frames_per_run: u64,

    pub speed_mode: SpeedMode,
    pub audio_cues: bool,
    pub alt_skin: Option<SkinId>,

    /// Logical canvas width
    pub width: f64,

    /// How far ahead the autopilot reacts, in frames of travel at current speed
    pub reaction_frames: f64,

    /// Chance the autopilot ignores an obstacle entirely
    pub miss_chance: f64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            games_per_run: 3,
            max_frames_per_run: 200_000,
            speed_mode: SpeedMode::Normal,
            audio_cues: false,
            alt_skin: None,
            width: crate::core::DEFAULT_WIDTH,
            reaction_frames: 6.0,
            miss_chance: 0.02,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small batch for smoke testing
    pub fn quick() -> Self {
        Self {
            num_runs: 10,
            games_per_run: 2,
            max_frames_per_run: 20_000,
            ..Default::default()
        }
    }

    /// Reduced speed profile with audio cues, the accessibility setup
    pub fn accessibility() -> Self {
        Self {
            speed_mode: SpeedMode::Reduced,
            audio_cues: true,
            ..Default::default()
        }
    }

    /// Alternate skin enabled so collectables spawn
    pub fn alt_skin(skin: SkinId) -> Self {
        Self {
            alt_skin: Some(skin),
            ..Default::default()
        }
    }
}
