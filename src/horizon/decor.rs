//! Decorative parallax elements: clouds and skin background elements.

use super::random_num;
use crate::skins::{BackgroundConfig, BackgroundElDef, CloudSprite};
use rand::Rng;

/// Shared behaviour of gap-spawned decorations.
pub trait Decoration {
    /// Scroll left by `speed` units and flag removal once off-screen.
    fn advance(&mut self, speed: f64);
    fn x(&self) -> f64;
    fn gap(&self) -> f64;
    fn removed(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub gap: f64,
    pub remove: bool,
}

impl Cloud {
    pub fn new(sprite: &CloudSprite, container_width: f64, rng: &mut impl Rng) -> Self {
        Self {
            x: container_width,
            y: random_num(rng, sprite.max_sky_level, sprite.min_sky_level),
            width: sprite.width,
            height: sprite.height,
            gap: random_num(rng, sprite.min_gap, sprite.max_gap),
            remove: false,
        }
    }
}

impl Decoration for Cloud {
    fn advance(&mut self, speed: f64) {
        if self.remove {
            return;
        }
        self.x -= speed.ceil();
        if self.x + self.width <= 0.0 {
            self.remove = true;
        }
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn gap(&self) -> f64 {
        self.gap
    }

    fn removed(&self) -> bool {
        self.remove
    }
}

/// A large scenery sprite drifting at a fixed speed.
#[derive(Debug, Clone)]
pub struct BackgroundElement {
    pub def: BackgroundElDef,
    pub x: f64,
    pub y: f64,
    pub gap: f64,
    pub remove: bool,
}

impl BackgroundElement {
    pub fn new(
        def: BackgroundElDef,
        config: &BackgroundConfig,
        container_width: f64,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            def,
            x: container_width,
            y: config.y_pos - def.height + def.offset,
            gap: random_num(rng, config.min_gap, config.max_gap),
            remove: false,
        }
    }
}

impl Decoration for BackgroundElement {
    fn advance(&mut self, speed: f64) {
        if self.remove {
            return;
        }
        self.x -= speed;
        if self.x + self.def.width <= 0.0 {
            self.remove = true;
        }
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn gap(&self) -> f64 {
        self.gap
    }

    fn removed(&self) -> bool {
        self.remove
    }
}

/// Advance a decoration stream and maybe spawn the next element.
///
/// An empty stream always spawns. Otherwise a new element needs room
/// under `max`, the last element's gap cleared, and a frequency roll.
pub fn update_stream<D, R, F>(
    items: &mut Vec<D>,
    speed: f64,
    max: usize,
    container_width: f64,
    frequency: f64,
    rng: &mut R,
    mut spawn: F,
) where
    D: Decoration,
    R: Rng,
    F: FnMut(&mut R) -> Option<D>,
{
    if let Some(last) = items.last() {
        let last_x = last.x();
        let last_gap = last.gap();
        for item in items.iter_mut().rev() {
            item.advance(speed);
        }
        // Room check uses the position before this frame's scroll.
        if items.len() < max && container_width - last_x > last_gap && frequency > rng.gen::<f64>()
        {
            if let Some(item) = spawn(rng) {
                items.push(item);
            }
        }
    } else if let Some(item) = spawn(rng) {
        items.push(item);
    }
    items.retain(|item| !item.removed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skins::{CLASSIC, INVERTED};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_cloud_spawn_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let c = Cloud::new(&CLASSIC.cloud, 600.0, &mut rng);
            assert!((30.0..=71.0).contains(&c.y));
            assert!((100.0..=400.0).contains(&c.gap));
            assert!((c.x - 600.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_cloud_moves_at_least_one_unit() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut c = Cloud::new(&CLASSIC.cloud, 600.0, &mut rng);
        c.advance(0.02);
        assert!((c.x - 599.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_background_element_baseline() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let def = INVERTED.background_elements[0];
        let el = BackgroundElement::new(def, &INVERTED.background_config, 600.0, &mut rng);
        // 100 - 32 - 65
        assert!((el.y - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stream_caps_and_retires() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut clouds: Vec<Cloud> = Vec::new();
        for _ in 0..20_000 {
            update_stream(&mut clouds, 3.0, 6, 600.0, 0.5, &mut rng, |r| {
                Some(Cloud::new(&CLASSIC.cloud, 600.0, r))
            });
            assert!(clouds.len() <= 6);
            assert!(clouds.iter().all(|c| c.x + c.width > 0.0));
        }
    }

    #[test]
    fn test_stream_respects_gap() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut clouds: Vec<Cloud> = Vec::new();
        update_stream(&mut clouds, 1.0, 6, 600.0, 1.0, &mut rng, |r| {
            Some(Cloud::new(&CLASSIC.cloud, 600.0, r))
        });
        assert_eq!(clouds.len(), 1);
        // Gap is at least 100 so a single unit of scroll cannot make room.
        update_stream(&mut clouds, 1.0, 6, 600.0, 1.0, &mut rng, |r| {
            Some(Cloud::new(&CLASSIC.cloud, 600.0, r))
        });
        assert_eq!(clouds.len(), 1);
    }
}
