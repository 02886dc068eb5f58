//! Avatar data structures.

use crate::core::constants::{BLINK_TIMING, DEFAULT_HEIGHT};
use crate::core::{Collidable, CollisionBox, DifficultyProfile, JumpPhysics};
use crate::skins::{AvatarSprite, SkinDefinition};
use rand::Rng;

/// Avatar animation poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Waiting,
    Running,
    Jumping,
    Ducking,
    Crashed,
}

impl Pose {
    /// Animation frame duration for this pose.
    pub fn ms_per_frame(&self) -> f64 {
        match self {
            Self::Waiting => 1000.0 / 3.0,
            Self::Running => 1000.0 / 12.0,
            Self::Jumping | Self::Crashed => 1000.0 / 60.0,
            Self::Ducking => 1000.0 / 8.0,
        }
    }
}

/// The player-controlled runner.
///
/// Only the avatar's own methods mutate it: `start_jump`, `end_jump`,
/// `set_duck`, `set_speed_drop`, `crash` and `reset`, plus the per-frame
/// `update` and `update_jump`.
#[derive(Debug, Clone)]
pub struct Avatar {
    pub sprite: AvatarSprite,
    pub physics: JumpPhysics,

    pub x: f64,
    pub y: f64,
    /// Where `reset` puts the avatar horizontally.
    pub x_initial: f64,
    pub ground_y: f64,
    /// Absolute y the avatar must pass before a release can cut the jump.
    pub min_jump_y: f64,
    /// Vertical velocity (negative = upward for normal skins).
    pub velocity: f64,

    pub pose: Pose,
    pub jumping: bool,
    pub ducking: bool,
    pub reached_min_height: bool,
    pub speed_drop: bool,
    pub playing_intro: bool,
    /// Completed jumps since the last reset.
    pub jump_count: u32,

    pub current_frame: usize,
    /// Time spent on the current animation frame.
    pub timer: f64,

    pub blink_delay: f64,
    pub blink_elapsed: f64,
    pub blink_count: u32,

    pub flashing: bool,
    pub flash_timer: f64,
}

impl Avatar {
    pub fn new(skin: &SkinDefinition, profile: &DifficultyProfile, rng: &mut impl Rng) -> Self {
        let sprite = skin.avatar;
        let physics = sprite.jump_physics(profile);
        let ground_y = DEFAULT_HEIGHT - sprite.height - skin.bottom_pad;
        let min_jump_y = if sprite.invert_jump {
            ground_y + physics.min_jump_height
        } else {
            ground_y - physics.min_jump_height
        };

        Self {
            sprite,
            physics,
            x: 0.0,
            y: ground_y,
            x_initial: 0.0,
            ground_y,
            min_jump_y,
            velocity: 0.0,
            pose: Pose::Waiting,
            jumping: false,
            ducking: false,
            reached_min_height: false,
            speed_drop: false,
            playing_intro: false,
            jump_count: 0,
            current_frame: 0,
            timer: 0.0,
            blink_delay: random_blink_delay(rng),
            blink_elapsed: 0.0,
            blink_count: 0,
            flashing: false,
            flash_timer: 0.0,
        }
    }

    /// Sprite width for the current pose.
    pub fn width(&self) -> f64 {
        if self.ducking && self.pose != Pose::Crashed {
            self.sprite.width_duck
        } else {
            self.sprite.width
        }
    }

    pub fn height(&self) -> f64 {
        self.sprite.height
    }

    /// Animation frames (sheet x offsets) for the current pose.
    pub fn frames(&self) -> &'static [f64] {
        match self.pose {
            Pose::Waiting => self.sprite.waiting_frames,
            Pose::Running => self.sprite.running_frames,
            Pose::Jumping => self.sprite.jumping_frames,
            Pose::Ducking => self.sprite.ducking_frames,
            Pose::Crashed => self.sprite.crashed_frames,
        }
    }

    pub fn on_ground(&self) -> bool {
        !self.jumping && (self.y - self.ground_y).abs() < f64::EPSILON
    }
}

impl Collidable for Avatar {
    fn bounds(&self) -> CollisionBox {
        CollisionBox::new(self.x, self.y, self.width(), self.height())
    }

    fn collision_boxes(&self) -> &[CollisionBox] {
        if self.ducking {
            self.sprite.ducking_boxes
        } else {
            self.sprite.running_boxes
        }
    }
}

/// Delay before the next waiting-screen blink, in (0, BLINK_TIMING].
pub fn random_blink_delay(rng: &mut impl Rng) -> f64 {
    (rng.gen::<f64>() * BLINK_TIMING).ceil().max(1.0)
}
