//! Difficulty profiles.
//!
//! A profile is an immutable bundle of speed, gap and jump tuning. The
//! session holds one by value and swaps the whole value when the player
//! toggles reduced speed, so no table is ever patched in place.

use serde::{Deserialize, Serialize};

/// Speed modes selectable by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedMode {
    #[default]
    Normal,
    Reduced,
}

impl SpeedMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Reduced => "Reduced",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Normal => Self::Reduced,
            Self::Reduced => Self::Normal,
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Self::Normal => DifficultyProfile::normal(),
            Self::Reduced => DifficultyProfile::reduced(),
        }
    }
}

/// Jump physics for the avatar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpPhysics {
    /// Velocity gained per elapsed frame (positive = downward).
    pub gravity: f64,
    /// Jump ends once the avatar rises above this y.
    pub max_jump_height: f64,
    /// Height above ground the avatar must clear before a release cuts the jump.
    pub min_jump_height: f64,
    pub initial_jump_velocity: f64,
    /// Velocity a released jump is clamped to.
    pub drop_velocity: f64,
    /// Displacement multiplier while speed dropping.
    pub speed_drop_coefficient: f64,
}

/// Immutable difficulty tuning for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub mode: SpeedMode,
    /// Speed at the start of every run.
    pub speed: f64,
    pub max_speed: f64,
    /// Added to the speed on each frame below the maximum.
    pub acceleration: f64,
    pub gap_coefficient: f64,
    /// Actual distance between night-mode inversions.
    pub invert_distance: u64,
    /// Speed scale on canvases narrower than the default width.
    pub narrow_speed_coefficient: f64,
    pub audio_cue_proximity_threshold: f64,
    pub audio_cue_proximity_threshold_narrow: f64,
    pub jump: JumpPhysics,
}

impl DifficultyProfile {
    pub fn normal() -> Self {
        Self {
            mode: SpeedMode::Normal,
            speed: 6.0,
            max_speed: 13.0,
            acceleration: 0.001,
            gap_coefficient: 0.6,
            invert_distance: 700,
            narrow_speed_coefficient: 1.2,
            audio_cue_proximity_threshold: 190.0,
            audio_cue_proximity_threshold_narrow: 250.0,
            jump: JumpPhysics {
                gravity: 0.6,
                max_jump_height: 30.0,
                min_jump_height: 30.0,
                initial_jump_velocity: -10.0,
                drop_velocity: -5.0,
                speed_drop_coefficient: 3.0,
            },
        }
    }

    pub fn reduced() -> Self {
        Self {
            mode: SpeedMode::Reduced,
            speed: 4.2,
            max_speed: 9.0,
            acceleration: 0.0005,
            gap_coefficient: 0.3,
            invert_distance: 350,
            narrow_speed_coefficient: 1.5,
            audio_cue_proximity_threshold: 170.0,
            audio_cue_proximity_threshold_narrow: 220.0,
            jump: JumpPhysics {
                gravity: 0.25,
                max_jump_height: 50.0,
                min_jump_height: 45.0,
                initial_jump_velocity: -20.0,
                drop_velocity: -5.0,
                speed_drop_coefficient: 3.0,
            },
        }
    }

    pub fn is_reduced(&self) -> bool {
        self.mode == SpeedMode::Reduced
    }

    /// Gap coefficient applied to spawned obstacles.
    ///
    /// Reduced speed doubles it so gaps stay comparable in time.
    pub fn effective_gap_coefficient(&self) -> f64 {
        if self.is_reduced() {
            self.gap_coefficient * 2.0
        } else {
            self.gap_coefficient
        }
    }

    /// Starting speed for a canvas of the given width.
    pub fn speed_for_width(&self, width: f64) -> f64 {
        use super::constants::DEFAULT_WIDTH;
        if width < DEFAULT_WIDTH && !self.is_reduced() {
            let narrow = self.speed * width / DEFAULT_WIDTH * self.narrow_speed_coefficient;
            self.speed.min(narrow)
        } else {
            self.speed
        }
    }

    /// Proximity threshold for the jump cue at the given speed.
    pub fn audio_cue_threshold(&self, speed: f64, narrow: bool) -> f64 {
        use super::constants::AUDIO_CUE_BASE_SPEED;
        let base = if narrow {
            self.audio_cue_proximity_threshold_narrow
        } else {
            self.audio_cue_proximity_threshold
        };
        base + base * (speed / AUDIO_CUE_BASE_SPEED).log10()
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_profile_values() {
        let p = DifficultyProfile::normal();
        assert!((p.speed - 6.0).abs() < f64::EPSILON);
        assert!((p.max_speed - 13.0).abs() < f64::EPSILON);
        assert!((p.acceleration - 0.001).abs() < f64::EPSILON);
        assert_eq!(p.invert_distance, 700);
        assert!(!p.is_reduced());
    }

    #[test]
    fn test_reduced_profile_is_slower() {
        let normal = DifficultyProfile::normal();
        let reduced = DifficultyProfile::reduced();
        assert!(reduced.speed < normal.speed);
        assert!(reduced.max_speed < normal.max_speed);
        assert!(reduced.jump.gravity < normal.jump.gravity);
        assert!((reduced.effective_gap_coefficient() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_speed_mode_toggle_and_profile() {
        assert_eq!(SpeedMode::Normal.toggled(), SpeedMode::Reduced);
        assert_eq!(SpeedMode::Reduced.profile().mode, SpeedMode::Reduced);
    }

    #[test]
    fn test_narrow_canvas_reduces_speed() {
        let p = DifficultyProfile::normal();
        assert!((p.speed_for_width(600.0) - 6.0).abs() < f64::EPSILON);
        // 6 * 300/600 * 1.2 = 3.6
        assert!((p.speed_for_width(300.0) - 3.6).abs() < 1e-9);
        // Reduced mode keeps its own speed on narrow canvases
        let r = DifficultyProfile::reduced();
        assert!((r.speed_for_width(300.0) - 4.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_audio_cue_threshold_grows_with_speed() {
        let p = DifficultyProfile::normal();
        assert!((p.audio_cue_threshold(6.0, false) - 190.0).abs() < 1e-9);
        assert!(p.audio_cue_threshold(12.0, false) > 190.0);
        assert!(p.audio_cue_threshold(6.0, true) > p.audio_cue_threshold(6.0, false));
    }
}
