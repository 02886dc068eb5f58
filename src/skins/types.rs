//! Skin definition value objects.
//!
//! A skin bundles every sprite coordinate, hitbox and tuning value the
//! avatar and horizon need. Constructors take a `&'static SkinDefinition`
//! and derive owned state from it, so switching skins means building new
//! children rather than patching shared tables.

use crate::core::{CollisionBox, DifficultyProfile, JumpPhysics};
use serde::{Deserialize, Serialize};

/// Built-in skins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinId {
    Classic,
    Prairie,
    Inverted,
}

impl SkinId {
    pub const ALL: [SkinId; 3] = [SkinId::Classic, SkinId::Prairie, SkinId::Inverted];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Prairie => "prairie",
            Self::Inverted => "inverted",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Top-left corner of a sprite on the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePoint {
    pub x: f64,
    pub y: f64,
}

impl SpritePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Vertical placement of an obstacle type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YPlacement {
    Fixed(f64),
    /// One of several heights, picked per spawn.
    Choice(&'static [f64]),
}

impl YPlacement {
    /// First (lowest) height, used when variable heights are disabled.
    pub fn first(&self) -> f64 {
        match self {
            Self::Fixed(y) => *y,
            Self::Choice(ys) => ys.first().copied().unwrap_or(0.0),
        }
    }
}

/// One entry of a skin's obstacle catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleTypeDef {
    pub name: &'static str,
    pub width: f64,
    pub height: f64,
    pub y_pos: YPlacement,
    /// Heights used on narrow canvases, when they differ.
    pub y_pos_narrow: Option<&'static [f64]>,
    /// Groups of this type only spawn above this speed.
    pub multiple_speed: f64,
    pub min_gap: f64,
    pub min_speed: f64,
    pub collision_boxes: &'static [CollisionBox],
    pub num_frames: u32,
    pub frame_rate: f64,
    /// Speed relative to the ground; applied with a random sign.
    pub speed_offset: f64,
    /// Picked up instead of crashed into. Only spawned while alt mode is enabled.
    pub collectable: bool,
    pub sprite: SpritePoint,
}

impl ObstacleTypeDef {
    /// Copy tuned for the reduced-speed profile.
    pub fn adjusted_for(&self, profile: &DifficultyProfile) -> Self {
        if !profile.is_reduced() {
            return *self;
        }
        Self {
            multiple_speed: self.multiple_speed / 2.0,
            min_gap: self.min_gap * 1.5,
            min_speed: self.min_speed / 2.0,
            y_pos: YPlacement::Fixed(self.y_pos.first()),
            y_pos_narrow: None,
            ..*self
        }
    }
}

/// Jump tuning a skin imposes over the profile's defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpOverride {
    pub gravity: Option<f64>,
    pub max_jump_height: f64,
    pub min_jump_height: f64,
    pub initial_jump_velocity: f64,
}

/// Avatar sprite frames, dimensions and hitboxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarSprite {
    pub sprite: SpritePoint,
    pub waiting_frames: &'static [f64],
    pub running_frames: &'static [f64],
    pub jumping_frames: &'static [f64],
    pub crashed_frames: &'static [f64],
    pub ducking_frames: &'static [f64],
    pub width: f64,
    pub height: f64,
    pub width_duck: f64,
    pub height_duck: f64,
    pub width_jump: f64,
    pub jump_x_offset: f64,
    pub running_boxes: &'static [CollisionBox],
    pub ducking_boxes: &'static [CollisionBox],
    pub can_duck: bool,
    /// Jumps move towards larger y (the avatar hangs from a ceiling).
    pub invert_jump: bool,
    pub jump: Option<JumpOverride>,
}

impl AvatarSprite {
    /// Jump physics for this sprite under the given profile.
    ///
    /// Skin overrides are scaled by 1.5 on the reduced profile, gravity by
    /// 1/1.5.
    pub fn jump_physics(&self, profile: &DifficultyProfile) -> JumpPhysics {
        let base = profile.jump;
        let Some(o) = self.jump else {
            return base;
        };
        let reduced = profile.is_reduced();
        let scale = if reduced { 1.5 } else { 1.0 };
        let gravity = match o.gravity {
            Some(g) if reduced => g / 1.5,
            Some(g) => g,
            None => base.gravity,
        };
        JumpPhysics {
            gravity,
            max_jump_height: o.max_jump_height * scale,
            min_jump_height: o.min_jump_height * scale,
            initial_jump_velocity: o.initial_jump_velocity * scale,
            ..base
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudSprite {
    pub sprite: SpritePoint,
    pub width: f64,
    pub height: f64,
    pub min_gap: f64,
    pub max_gap: f64,
    /// Highest point a cloud may sit at (smallest y).
    pub max_sky_level: f64,
    pub min_sky_level: f64,
}

/// A decorative background element type (alt skins only).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundElDef {
    pub name: &'static str,
    pub width: f64,
    pub height: f64,
    pub source_x: f64,
    pub source_y: f64,
    /// Vertical offset from the configured baseline.
    pub offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundConfig {
    pub max_elements: usize,
    pub min_gap: f64,
    pub max_gap: f64,
    /// Fixed per-frame drift, independent of game speed.
    pub speed: f64,
    pub y_pos: f64,
}

/// One scrolling ground strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineDef {
    pub source_x: f64,
    pub source_y: f64,
    pub width: f64,
    pub height: f64,
    pub y_pos: f64,
}

/// Sheet positions of overlay sprites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySprites {
    pub moon: SpritePoint,
    pub star: SpritePoint,
    pub restart: SpritePoint,
    pub text: SpritePoint,
    pub horizon: SpritePoint,
}

/// Complete sprite table and tuning for one skin.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinDefinition {
    pub id: SkinId,
    pub avatar: AvatarSprite,
    pub obstacles: &'static [ObstacleTypeDef],
    pub max_gap_coefficient: f64,
    pub max_obstacle_length: u32,
    pub has_clouds: bool,
    pub bottom_pad: f64,
    pub cloud: CloudSprite,
    pub background_elements: &'static [BackgroundElDef],
    pub background_config: BackgroundConfig,
    pub lines: &'static [LineDef],
    pub overlays: OverlaySprites,
}

impl SkinDefinition {
    pub fn obstacle(&self, name: &str) -> Option<&ObstacleTypeDef> {
        self.obstacles.iter().find(|t| t.name == name)
    }

    pub fn has_collectable(&self) -> bool {
        self.obstacles.iter().any(|t| t.collectable)
    }
}
