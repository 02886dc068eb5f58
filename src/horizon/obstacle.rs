//! Obstacles: spawned off-screen right, scrolled left, removed off-screen left.

use super::random_num;
use crate::core::constants::FPS;
use crate::core::{Collidable, CollisionBox};
use crate::skins::{ObstacleTypeDef, YPlacement};
use rand::Rng;

/// Inputs fixed at spawn time.
#[derive(Debug, Clone, Copy)]
pub struct SpawnParams {
    pub canvas_width: f64,
    pub speed: f64,
    pub gap_coefficient: f64,
    pub max_gap_coefficient: f64,
    pub max_obstacle_length: u32,
    /// Audio-cue mode doubles every gap.
    pub double_gap: bool,
    pub narrow: bool,
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleTypeDef,
    /// Number of sprites laid side by side (1..=3).
    pub size: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// Clear space required after this obstacle before the next spawns.
    pub gap: f64,
    pub speed_offset: f64,
    pub collision_boxes: Vec<CollisionBox>,
    pub current_frame: u32,
    pub timer: f64,
    pub remove: bool,
    pub following_created: bool,
    /// Audio cue already played for this obstacle.
    pub jump_alerted: bool,
}

/// Smallest gap allowed after an obstacle of `width` at `speed`.
///
/// Rounded up rather than to nearest, so a drawn gap is never below
/// `width * speed + type_min_gap * gap_coefficient`.
pub fn min_gap(width: f64, speed: f64, type_min_gap: f64, gap_coefficient: f64) -> f64 {
    (width * speed + type_min_gap * gap_coefficient).ceil()
}

impl Obstacle {
    pub fn new(kind: ObstacleTypeDef, params: &SpawnParams, rng: &mut impl Rng) -> Self {
        let max_len = params.max_obstacle_length.max(1);
        let mut size = rng.gen_range(1..=max_len);
        if size > 1 && kind.multiple_speed > params.speed {
            size = 1;
        }
        let width = kind.width * size as f64;

        let y = match (kind.y_pos, kind.y_pos_narrow) {
            (YPlacement::Choice(_), Some(narrow)) if params.narrow && !narrow.is_empty() => {
                narrow[rng.gen_range(0..narrow.len())]
            }
            (YPlacement::Choice(ys), _) if !ys.is_empty() => ys[rng.gen_range(0..ys.len())],
            (placement, _) => placement.first(),
        };

        let mut collision_boxes = kind.collision_boxes.to_vec();
        if size > 1 && collision_boxes.len() >= 3 {
            // Stretch the middle box across the repeated sprites, pin the last to the end.
            let first_w = collision_boxes[0].width;
            let last_w = collision_boxes[2].width;
            collision_boxes[1].width = (width - first_w - last_w).max(0.0);
            collision_boxes[2].x = width - last_w;
        }

        let speed_offset = if rng.gen_bool(0.5) {
            kind.speed_offset
        } else {
            -kind.speed_offset
        };

        let mut gap = Self::random_gap(width, kind.min_gap, params, rng);
        if params.double_gap {
            gap *= 2.0;
        }

        Self {
            kind,
            size,
            x: params.canvas_width + kind.width,
            y,
            width,
            gap,
            speed_offset,
            collision_boxes,
            current_frame: 0,
            timer: 0.0,
            remove: false,
            following_created: false,
            jump_alerted: false,
        }
    }

    fn random_gap(width: f64, type_min_gap: f64, params: &SpawnParams, rng: &mut impl Rng) -> f64 {
        let min = min_gap(width, params.speed, type_min_gap, params.gap_coefficient);
        let max = (min * params.max_gap_coefficient).round().max(min);
        random_num(rng, min, max)
    }

    /// Scroll left by the frame-rate independent distance for `dt`.
    pub fn update(&mut self, dt: f64, speed: f64) {
        if self.remove {
            return;
        }
        let speed = speed + self.speed_offset;
        self.x -= (speed * FPS / 1000.0 * dt).floor();

        if self.kind.num_frames > 1 {
            self.timer += dt;
            if self.timer >= self.kind.frame_rate {
                self.current_frame = (self.current_frame + 1) % self.kind.num_frames;
                self.timer = 0.0;
            }
        }

        if !self.is_visible() {
            self.remove = true;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.x + self.width > 0.0
    }

    pub fn is_collectable(&self) -> bool {
        self.kind.collectable
    }
}

impl Collidable for Obstacle {
    fn bounds(&self) -> CollisionBox {
        CollisionBox::new(self.x, self.y, self.width, self.kind.height)
    }

    fn collision_boxes(&self) -> &[CollisionBox] {
        &self.collision_boxes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skins::CLASSIC;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn params(speed: f64) -> SpawnParams {
        SpawnParams {
            canvas_width: 600.0,
            speed,
            gap_coefficient: 0.6,
            max_gap_coefficient: 1.5,
            max_obstacle_length: 3,
            double_gap: false,
            narrow: false,
        }
    }

    fn kind(name: &str) -> ObstacleTypeDef {
        *CLASSIC.obstacle(name).expect("known obstacle")
    }

    #[test]
    fn test_spawns_off_screen_right() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let o = Obstacle::new(kind("CACTUS_SMALL"), &params(6.0), &mut rng);
        assert!((o.x - 617.0).abs() < f64::EPSILON);
        assert!((o.y - 105.0).abs() < f64::EPSILON);
        assert!(o.is_visible());
    }

    #[test]
    fn test_min_gap_rounds_up() {
        assert!((min_gap(17.0, 6.1, 120.0, 0.6) - 176.0).abs() < f64::EPSILON);
        assert!((min_gap(10.0, 6.0, 100.0, 0.5) - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gap_respects_minimum() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..200 {
            let o = Obstacle::new(kind("CACTUS_LARGE"), &params(6.0), &mut rng);
            let min = o.width * 6.0 + 120.0 * 0.6;
            assert!(o.gap >= min, "gap {} below {}", o.gap, min);
            assert!(o.gap <= (min.ceil() * 1.5).round());
        }
    }

    #[test]
    fn test_low_speed_forbids_groups() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            // multipleSpeed 7 > 6
            let o = Obstacle::new(kind("CACTUS_LARGE"), &params(6.0), &mut rng);
            assert_eq!(o.size, 1);
        }
    }

    #[test]
    fn test_group_boxes_stretch() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut seen_group = false;
        for _ in 0..100 {
            let o = Obstacle::new(kind("CACTUS_SMALL"), &params(10.0), &mut rng);
            if o.size > 1 {
                seen_group = true;
                let last = o.collision_boxes[2];
                assert!((last.x + last.width - o.width).abs() < f64::EPSILON);
                assert!(o.collision_boxes[1].width > 6.0);
            }
        }
        assert!(seen_group);
    }

    #[test]
    fn test_double_gap() {
        let mut a = ChaCha8Rng::seed_from_u64(5);
        let mut b = ChaCha8Rng::seed_from_u64(5);
        let normal = Obstacle::new(kind("CACTUS_SMALL"), &params(6.0), &mut a);
        let doubled = Obstacle::new(
            kind("CACTUS_SMALL"),
            &SpawnParams {
                double_gap: true,
                ..params(6.0)
            },
            &mut b,
        );
        assert!((doubled.gap - normal.gap * 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_moves_left_and_flags_removal() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut o = Obstacle::new(kind("CACTUS_SMALL"), &params(6.0), &mut rng);
        let start = o.x;
        o.update(1000.0 / 60.0, 6.0);
        // floor(6 * 60 / 1000 * 16.67) = 6
        assert!((start - o.x - 6.0).abs() < f64::EPSILON);
        o.x = -o.width + 1.0;
        o.update(1000.0 / 60.0, 6.0);
        assert!(o.remove);
    }

    #[test]
    fn test_pterodactyl_animates_and_picks_height() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut o = Obstacle::new(kind("PTERODACTYL"), &params(9.0), &mut rng);
        assert!([100.0, 75.0, 50.0].contains(&o.y));
        assert!((o.speed_offset.abs() - 0.8).abs() < f64::EPSILON);
        o.update(200.0, 9.0);
        assert_eq!(o.current_frame, 1);
    }

    #[test]
    fn test_narrow_pterodactyl_heights() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..50 {
            let o = Obstacle::new(
                kind("PTERODACTYL"),
                &SpawnParams {
                    narrow: true,
                    ..params(9.0)
                },
                &mut rng,
            );
            assert!(o.y == 100.0 || o.y == 50.0);
        }
    }
}
