//! Axis-aligned collision boxes and the two-phase collision test.

/// Axis-aligned rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CollisionBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box with negative extents clamped to zero.
    pub fn sized(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, width.max(0.0), height.max(0.0))
    }

    /// Strict overlap test. Touching edges do not overlap.
    pub fn overlaps(&self, other: &CollisionBox) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Shrinks the box by `amount` on every side.
    pub fn inset(&self, amount: f64) -> Self {
        Self::sized(
            self.x + amount,
            self.y + amount,
            self.width - amount * 2.0,
            self.height - amount * 2.0,
        )
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Anything that takes part in collision detection.
pub trait Collidable {
    /// Outer sprite bounds in absolute canvas coordinates.
    fn bounds(&self) -> CollisionBox;

    /// Fine-grained boxes relative to the entity's top-left corner.
    fn collision_boxes(&self) -> &[CollisionBox];
}

/// Pair of absolute boxes that caused a collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionHit {
    pub avatar_box: CollisionBox,
    pub obstacle_box: CollisionBox,
}

/// Two-phase collision test between the avatar and one obstacle.
///
/// The coarse phase compares the outer bounds inset by one unit. Only when
/// those overlap are the fine boxes translated to absolute coordinates and
/// compared pairwise.
pub fn check_for_collision(
    avatar: &impl Collidable,
    obstacle: &impl Collidable,
) -> Option<CollisionHit> {
    let avatar_bounds = avatar.bounds();
    let obstacle_bounds = obstacle.bounds();

    if !avatar_bounds.inset(1.0).overlaps(&obstacle_bounds.inset(1.0)) {
        return None;
    }

    for avatar_box in avatar.collision_boxes() {
        let avatar_abs = avatar_box.translated(avatar_bounds.x, avatar_bounds.y);
        for obstacle_box in obstacle.collision_boxes() {
            let obstacle_abs = obstacle_box.translated(obstacle_bounds.x, obstacle_bounds.y);
            if avatar_abs.overlaps(&obstacle_abs) {
                return Some(CollisionHit {
                    avatar_box: avatar_abs,
                    obstacle_box: obstacle_abs,
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Thing {
        bounds: CollisionBox,
        boxes: Vec<CollisionBox>,
    }

    impl Collidable for Thing {
        fn bounds(&self) -> CollisionBox {
            self.bounds
        }
        fn collision_boxes(&self) -> &[CollisionBox] {
            &self.boxes
        }
    }

    #[test]
    fn test_overlap_basic() {
        let a = CollisionBox::new(0.0, 0.0, 10.0, 10.0);
        let b = CollisionBox::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = CollisionBox::new(0.0, 0.0, 10.0, 10.0);
        let b = CollisionBox::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = CollisionBox::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_sized_clamps_negative_extent() {
        let b = CollisionBox::sized(0.0, 0.0, -4.0, 3.0);
        assert!((b.width - 0.0).abs() < f64::EPSILON);
        assert!((b.height - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inset_shrinks_each_side() {
        let b = CollisionBox::new(10.0, 20.0, 30.0, 40.0).inset(1.0);
        assert_eq!(b, CollisionBox::new(11.0, 21.0, 28.0, 38.0));
    }

    #[test]
    fn test_fine_phase_rejects_coarse_false_positive() {
        // Outer bounds overlap but the fine boxes sit in opposite corners.
        let avatar = Thing {
            bounds: CollisionBox::new(0.0, 0.0, 20.0, 20.0),
            boxes: vec![CollisionBox::new(0.0, 0.0, 5.0, 5.0)],
        };
        let obstacle = Thing {
            bounds: CollisionBox::new(10.0, 10.0, 20.0, 20.0),
            boxes: vec![CollisionBox::new(10.0, 10.0, 5.0, 5.0)],
        };
        assert!(check_for_collision(&avatar, &obstacle).is_none());
    }

    #[test]
    fn test_fine_phase_reports_absolute_boxes() {
        let avatar = Thing {
            bounds: CollisionBox::new(50.0, 93.0, 44.0, 47.0),
            boxes: vec![CollisionBox::new(1.0, 18.0, 30.0, 9.0)],
        };
        let obstacle = Thing {
            bounds: CollisionBox::new(60.0, 105.0, 17.0, 35.0),
            boxes: vec![CollisionBox::new(4.0, 0.0, 6.0, 34.0)],
        };
        let hit = check_for_collision(&avatar, &obstacle).expect("boxes overlap");
        assert_eq!(hit.avatar_box, CollisionBox::new(51.0, 111.0, 30.0, 9.0));
        assert_eq!(hit.obstacle_box, CollisionBox::new(64.0, 105.0, 6.0, 34.0));
    }

    #[test]
    fn test_coarse_phase_uses_inset_bounds() {
        // One unit of overlap disappears once both bounds are inset.
        let avatar = Thing {
            bounds: CollisionBox::new(0.0, 0.0, 10.0, 10.0),
            boxes: vec![CollisionBox::new(0.0, 0.0, 10.0, 10.0)],
        };
        let obstacle = Thing {
            bounds: CollisionBox::new(9.0, 0.0, 10.0, 10.0),
            boxes: vec![CollisionBox::new(0.0, 0.0, 10.0, 10.0)],
        };
        assert!(check_for_collision(&avatar, &obstacle).is_none());
    }
}
