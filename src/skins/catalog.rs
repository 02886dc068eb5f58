//! Built-in sprite tables.

use super::types::{
    AvatarSprite, BackgroundConfig, BackgroundElDef, CloudSprite, JumpOverride, LineDef,
    ObstacleTypeDef, OverlaySprites, SkinDefinition, SkinId, SpritePoint, YPlacement,
};
use crate::core::CollisionBox;

const fn cb(x: f64, y: f64, w: f64, h: f64) -> CollisionBox {
    CollisionBox::new(x, y, w, h)
}

const OVERLAYS: OverlaySprites = OverlaySprites {
    moon: SpritePoint::new(484.0, 2.0),
    star: SpritePoint::new(645.0, 2.0),
    restart: SpritePoint::new(2.0, 68.0),
    text: SpritePoint::new(655.0, 2.0),
    horizon: SpritePoint::new(2.0, 54.0),
};

const CLOUD: CloudSprite = CloudSprite {
    sprite: SpritePoint::new(86.0, 2.0),
    width: 46.0,
    height: 14.0,
    min_gap: 100.0,
    max_gap: 400.0,
    max_sky_level: 30.0,
    min_sky_level: 71.0,
};

// ── Classic ─────────────────────────────────────────────────────────

const CLASSIC_RUNNING_BOXES: [CollisionBox; 6] = [
    cb(22.0, 0.0, 17.0, 16.0),
    cb(1.0, 18.0, 30.0, 9.0),
    cb(10.0, 35.0, 14.0, 8.0),
    cb(1.0, 24.0, 29.0, 5.0),
    cb(5.0, 30.0, 21.0, 4.0),
    cb(9.0, 34.0, 15.0, 4.0),
];

const CLASSIC_DUCKING_BOXES: [CollisionBox; 1] = [cb(1.0, 18.0, 55.0, 25.0)];

const CACTUS_SMALL_BOXES: [CollisionBox; 3] = [cb(0.0, 7.0, 5.0, 27.0), cb(4.0, 0.0, 6.0, 34.0), cb(10.0, 4.0, 7.0, 14.0)];
const CACTUS_LARGE_BOXES: [CollisionBox; 3] = [cb(0.0, 12.0, 7.0, 38.0), cb(8.0, 0.0, 7.0, 49.0), cb(13.0, 10.0, 10.0, 38.0)];
const COLLECTABLE_BOXES: [CollisionBox; 1] = [cb(0.0, 0.0, 12.0, 38.0)];
const PTERODACTYL_BOXES: [CollisionBox; 5] = [
    cb(15.0, 15.0, 16.0, 5.0),
    cb(18.0, 21.0, 24.0, 6.0),
    cb(2.0, 14.0, 4.0, 3.0),
    cb(6.0, 10.0, 4.0, 7.0),
    cb(10.0, 8.0, 6.0, 9.0),
];

const CLASSIC_OBSTACLES: [ObstacleTypeDef; 4] = [
    ObstacleTypeDef {
        name: "CACTUS_SMALL",
        width: 17.0,
        height: 35.0,
        y_pos: YPlacement::Fixed(105.0),
        y_pos_narrow: None,
        multiple_speed: 4.0,
        min_gap: 120.0,
        min_speed: 0.0,
        collision_boxes: &CACTUS_SMALL_BOXES,
        num_frames: 1,
        frame_rate: 0.0,
        speed_offset: 0.0,
        collectable: false,
        sprite: SpritePoint::new(228.0, 2.0),
    },
    ObstacleTypeDef {
        name: "CACTUS_LARGE",
        width: 25.0,
        height: 50.0,
        y_pos: YPlacement::Fixed(90.0),
        y_pos_narrow: None,
        multiple_speed: 7.0,
        min_gap: 120.0,
        min_speed: 0.0,
        collision_boxes: &CACTUS_LARGE_BOXES,
        num_frames: 1,
        frame_rate: 0.0,
        speed_offset: 0.0,
        collectable: false,
        sprite: SpritePoint::new(332.0, 2.0),
    },
    ObstacleTypeDef {
        name: "PTERODACTYL",
        width: 46.0,
        height: 40.0,
        y_pos: YPlacement::Choice(&[100.0, 75.0, 50.0]),
        y_pos_narrow: Some(&[100.0, 50.0]),
        multiple_speed: 999.0,
        min_gap: 150.0,
        min_speed: 8.5,
        collision_boxes: &PTERODACTYL_BOXES,
        num_frames: 2,
        frame_rate: 1000.0 / 6.0,
        speed_offset: 0.8,
        collectable: false,
        sprite: SpritePoint::new(134.0, 2.0),
    },
    ObstacleTypeDef {
        name: "COLLECTABLE",
        width: 12.0,
        height: 38.0,
        y_pos: YPlacement::Fixed(90.0),
        y_pos_narrow: None,
        multiple_speed: 999.0,
        min_gap: 999.0,
        min_speed: 0.0,
        collision_boxes: &COLLECTABLE_BOXES,
        num_frames: 1,
        frame_rate: 0.0,
        speed_offset: 0.0,
        collectable: true,
        sprite: SpritePoint::new(2.0, 2.0),
    },
];

pub static CLASSIC: SkinDefinition = SkinDefinition {
    id: SkinId::Classic,
    avatar: AvatarSprite {
        sprite: SpritePoint::new(848.0, 2.0),
        waiting_frames: &[44.0, 0.0],
        running_frames: &[88.0, 132.0],
        jumping_frames: &[0.0],
        crashed_frames: &[220.0],
        ducking_frames: &[264.0, 323.0],
        width: 44.0,
        height: 47.0,
        width_duck: 59.0,
        height_duck: 25.0,
        width_jump: 44.0,
        jump_x_offset: 0.0,
        running_boxes: &CLASSIC_RUNNING_BOXES,
        ducking_boxes: &CLASSIC_DUCKING_BOXES,
        can_duck: true,
        invert_jump: false,
        jump: None,
    },
    obstacles: &CLASSIC_OBSTACLES,
    max_gap_coefficient: 1.5,
    max_obstacle_length: 3,
    has_clouds: true,
    bottom_pad: 10.0,
    cloud: CLOUD,
    background_elements: &[],
    background_config: BackgroundConfig {
        max_elements: 1,
        min_gap: 100.0,
        max_gap: 400.0,
        speed: 0.5,
        y_pos: 125.0,
    },
    lines: &[LineDef {
        source_x: 2.0,
        source_y: 52.0,
        width: 600.0,
        height: 12.0,
        y_pos: 127.0,
    }],
    overlays: OVERLAYS,
};

// ── Prairie ─────────────────────────────────────────────────────────

const PRAIRIE_BOXES: [CollisionBox; 4] = [
    cb(22.0, 0.0, 17.0, 16.0),
    cb(0.0, 16.0, 32.0, 9.0),
    cb(3.0, 24.0, 27.0, 6.0),
    cb(5.0, 30.0, 21.0, 4.0),
];

#[allow(clippy::too_many_arguments)]
const fn prairie_obstacle(
    name: &'static str,
    width: f64,
    height: f64,
    y: f64,
    multiple_speed: f64,
    min_gap: f64,
    min_speed: f64,
    collision_boxes: &'static [CollisionBox],
    sprite_x: f64,
) -> ObstacleTypeDef {
    ObstacleTypeDef {
        name,
        width,
        height,
        y_pos: YPlacement::Fixed(y),
        y_pos_narrow: None,
        multiple_speed,
        min_gap,
        min_speed,
        collision_boxes,
        num_frames: 1,
        frame_rate: 0.0,
        speed_offset: 0.0,
        collectable: false,
        sprite: SpritePoint::new(sprite_x, 2.0),
    }
}

const PRAIRIE_BOXES_1: [CollisionBox; 3] =
    [cb(0.0, 0.0, 3.0, 26.0), cb(3.0, 5.0, 8.0, 31.0), cb(11.0, 24.0, 11.0, 10.0)];
const PRAIRIE_BOXES_2: [CollisionBox; 3] =
    [cb(0.0, 0.0, 3.0, 26.0), cb(3.0, 5.0, 24.0, 31.0), cb(27.0, 24.0, 11.0, 10.0)];
const PRAIRIE_BOXES_3: [CollisionBox; 3] =
    [cb(0.0, 0.0, 3.0, 26.0), cb(3.0, 5.0, 40.0, 31.0), cb(27.0, 43.0, 11.0, 10.0)];
const PRAIRIE_BOXES_4: [CollisionBox; 3] =
    [cb(0.0, 0.0, 3.0, 26.0), cb(3.0, 3.0, 8.0, 31.0), cb(11.0, 24.0, 11.0, 10.0)];
const PRAIRIE_BOXES_5: [CollisionBox; 3] =
    [cb(0.0, 0.0, 4.0, 26.0), cb(4.0, 3.0, 26.0, 31.0), cb(30.0, 30.0, 12.0, 11.0)];
const PRAIRIE_BOXES_6: [CollisionBox; 3] =
    [cb(0.0, 0.0, 3.0, 26.0), cb(4.0, 3.0, 44.0, 39.0), cb(48.0, 24.0, 12.0, 11.0)];

const PRAIRIE_OBSTACLES: [ObstacleTypeDef; 6] = [
    prairie_obstacle("OBSTACLE_1", 24.0, 60.0, 106.0, 4.0, 70.0, 0.0, &PRAIRIE_BOXES_1, 631.0),
    prairie_obstacle("OBSTACLE_2", 40.0, 60.0, 106.0, 4.0, 90.0, 5.0, &PRAIRIE_BOXES_2, 656.0),
    prairie_obstacle("OBSTACLE_3", 57.0, 60.0, 106.0, 4.0, 100.0, 7.0, &PRAIRIE_BOXES_3, 697.0),
    prairie_obstacle("OBSTACLE_4", 27.0, 44.0, 102.0, 7.0, 110.0, 0.0, &PRAIRIE_BOXES_4, 754.0),
    prairie_obstacle("OBSTACLE_5", 45.0, 44.0, 102.0, 7.0, 120.0, 7.5, &PRAIRIE_BOXES_5, 781.0),
    prairie_obstacle("OBSTACLE_6", 63.0, 44.0, 102.0, 7.0, 140.0, 7.5, &PRAIRIE_BOXES_6, 826.0),
];

pub static PRAIRIE: SkinDefinition = SkinDefinition {
    id: SkinId::Prairie,
    avatar: AvatarSprite {
        sprite: SpritePoint::new(252.0, 2.0),
        waiting_frames: &[137.0, 183.0],
        running_frames: &[137.0, 183.0],
        jumping_frames: &[230.0],
        crashed_frames: &[335.0],
        ducking_frames: &[137.0, 183.0],
        width: 44.0,
        height: 49.0,
        width_duck: 44.0,
        height_duck: 49.0,
        width_jump: 59.0,
        jump_x_offset: 6.0,
        running_boxes: &PRAIRIE_BOXES,
        ducking_boxes: &PRAIRIE_BOXES,
        can_duck: false,
        invert_jump: false,
        jump: Some(JumpOverride {
            gravity: None,
            max_jump_height: 50.0,
            min_jump_height: 50.0,
            initial_jump_velocity: -10.0,
        }),
    },
    obstacles: &PRAIRIE_OBSTACLES,
    max_gap_coefficient: 0.56,
    max_obstacle_length: 1,
    has_clouds: true,
    bottom_pad: 10.0,
    cloud: CloudSprite {
        sprite: SpritePoint::new(890.0, 2.0),
        ..CLOUD
    },
    background_elements: &[BackgroundElDef {
        name: "BACKGROUND_0",
        width: 423.0,
        height: 93.0,
        source_x: 1.0,
        source_y: 120.0,
        offset: 4.0,
    }],
    background_config: BackgroundConfig {
        max_elements: 1,
        min_gap: 600.0,
        max_gap: 600.0,
        speed: 0.2,
        y_pos: 125.0,
    },
    lines: &[
        LineDef {
            source_x: 2.0,
            source_y: 54.0,
            width: 600.0,
            height: 12.0,
            y_pos: 125.0,
        },
        LineDef {
            source_x: 2.0,
            source_y: 84.0,
            width: 600.0,
            height: 12.0,
            y_pos: 138.0,
        },
    ],
    overlays: OVERLAYS,
};

// ── Inverted ────────────────────────────────────────────────────────

const INVERTED_BOXES: [CollisionBox; 4] = [
    cb(17.0, 4.0, 49.0, 9.0),
    cb(20.0, 17.0, 23.0, 4.0),
    cb(19.0, 20.0, 10.0, 7.0),
    cb(17.0, 13.0, 42.0, 4.0),
];

const INVERTED_BOXES_1: [CollisionBox; 1] = [cb(0.0, 2.0, 27.0, 8.0)];
const INVERTED_BOXES_2: [CollisionBox; 1] = [cb(0.0, 2.0, 52.0, 8.0)];
const INVERTED_BOXES_3: [CollisionBox; 1] = [cb(0.0, 2.0, 40.0, 14.0)];

const INVERTED_OBSTACLES: [ObstacleTypeDef; 3] = [
    ObstacleTypeDef {
        name: "OBSTACLE_1",
        width: 27.0,
        height: 11.0,
        y_pos: YPlacement::Fixed(80.0),
        y_pos_narrow: None,
        multiple_speed: 4.0,
        min_gap: 120.0,
        min_speed: 0.0,
        collision_boxes: &INVERTED_BOXES_1,
        num_frames: 1,
        frame_rate: 0.0,
        speed_offset: 0.0,
        collectable: false,
        sprite: SpritePoint::new(514.0, 2.0),
    },
    ObstacleTypeDef {
        name: "OBSTACLE_2",
        width: 54.0,
        height: 11.0,
        y_pos: YPlacement::Fixed(80.0),
        y_pos_narrow: None,
        multiple_speed: 4.0,
        min_gap: 140.0,
        min_speed: 7.0,
        collision_boxes: &INVERTED_BOXES_2,
        num_frames: 1,
        frame_rate: 0.0,
        speed_offset: 0.0,
        collectable: false,
        sprite: SpritePoint::new(543.0, 2.0),
    },
    ObstacleTypeDef {
        name: "OBSTACLE_3",
        width: 42.0,
        height: 16.0,
        y_pos: YPlacement::Fixed(76.0),
        y_pos_narrow: None,
        multiple_speed: 4.0,
        min_gap: 170.0,
        min_speed: 3.0,
        collision_boxes: &INVERTED_BOXES_3,
        num_frames: 1,
        frame_rate: 0.0,
        speed_offset: 0.0,
        collectable: false,
        sprite: SpritePoint::new(599.0, 2.0),
    },
];

pub static INVERTED: SkinDefinition = SkinDefinition {
    id: SkinId::Inverted,
    avatar: AvatarSprite {
        sprite: SpritePoint::new(252.0, 2.0),
        waiting_frames: &[0.0, 67.0],
        running_frames: &[0.0, 67.0],
        jumping_frames: &[133.5],
        crashed_frames: &[196.0],
        ducking_frames: &[0.0, 67.0],
        width: 65.0,
        height: 30.0,
        width_duck: 65.0,
        height_duck: 30.0,
        width_jump: 65.0,
        jump_x_offset: 0.0,
        running_boxes: &INVERTED_BOXES,
        ducking_boxes: &INVERTED_BOXES,
        can_duck: false,
        invert_jump: true,
        jump: Some(JumpOverride {
            gravity: Some(0.36),
            max_jump_height: 20.0,
            min_jump_height: 18.0,
            initial_jump_velocity: -20.0,
        }),
    },
    obstacles: &INVERTED_OBSTACLES,
    max_gap_coefficient: 0.56,
    max_obstacle_length: 1,
    has_clouds: false,
    bottom_pad: 43.0,
    cloud: CloudSprite {
        sprite: SpritePoint::new(888.0, 2.0),
        ..CLOUD
    },
    background_elements: &[
        BackgroundElDef {
            name: "BACKGROUND_0",
            width: 30.0,
            height: 32.0,
            source_x: 811.0,
            source_y: 2.0,
            offset: -65.0,
        },
        BackgroundElDef {
            name: "BACKGROUND_1",
            width: 40.0,
            height: 37.0,
            source_x: 842.0,
            source_y: 2.0,
            offset: -13.0,
        },
        BackgroundElDef {
            name: "BACKGROUND_2",
            width: 82.0,
            height: 33.0,
            source_x: 727.0,
            source_y: 2.0,
            offset: -40.0,
        },
    ],
    background_config: BackgroundConfig {
        max_elements: 3,
        min_gap: 100.0,
        max_gap: 400.0,
        speed: 0.5,
        y_pos: 100.0,
    },
    lines: &[
        LineDef {
            source_x: 2.0,
            source_y: 81.0,
            width: 600.0,
            height: 12.0,
            y_pos: 78.0,
        },
        LineDef {
            source_x: 2.0,
            source_y: 54.0,
            width: 600.0,
            height: 12.0,
            y_pos: 56.0,
        },
    ],
    overlays: OVERLAYS,
};

/// Built-in table for a skin id.
pub fn builtin(id: SkinId) -> &'static SkinDefinition {
    match id {
        SkinId::Classic => &CLASSIC,
        SkinId::Prairie => &PRAIRIE,
        SkinId::Inverted => &INVERTED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_match() {
        for id in SkinId::ALL {
            assert_eq!(builtin(id).id, id);
        }
    }

    #[test]
    fn test_only_classic_has_collectable() {
        assert!(CLASSIC.has_collectable());
        assert!(!PRAIRIE.has_collectable());
        assert!(!INVERTED.has_collectable());
    }

    #[test]
    fn test_catalog_boxes_fit_inside_sprites() {
        for id in SkinId::ALL {
            let skin = builtin(id);
            for t in skin.obstacles {
                assert!(!t.collision_boxes.is_empty(), "{} has no boxes", t.name);
                for b in t.collision_boxes {
                    assert!(b.width >= 0.0 && b.height >= 0.0);
                    assert!(b.x + b.width <= t.width + 1.0, "{} box too wide", t.name);
                }
            }
            assert!(!skin.lines.is_empty());
        }
    }

    #[test]
    fn test_pterodactyl_lookup() {
        let ptero = CLASSIC.obstacle("PTERODACTYL").expect("classic has pterodactyls");
        assert_eq!(ptero.num_frames, 2);
        assert!(matches!(ptero.y_pos, YPlacement::Choice(ys) if ys.len() == 3));
    }
}
