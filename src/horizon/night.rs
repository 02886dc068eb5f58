//! Night cycle: a fading moon with phases and a small star field.
//!
//! Purely cosmetic. Opacity moves by `FADE_SPEED` per frame towards 1 while
//! activated and towards 0 otherwise.

use super::random_num;
use rand::Rng;

pub const FADE_SPEED: f64 = 0.035;
pub const MOON_WIDTH: f64 = 20.0;
pub const MOON_HEIGHT: f64 = 40.0;
pub const MOON_SPEED: f64 = 0.25;
pub const NUM_STARS: usize = 2;
pub const STAR_SIZE: f64 = 9.0;
pub const STAR_SPEED: f64 = 0.3;
pub const STAR_MAX_Y: f64 = 70.0;

/// Sheet x offsets of the moon phases. Phase 3 is the full moon.
pub const PHASES: [f64; 7] = [140.0, 120.0, 100.0, 60.0, 40.0, 20.0, 0.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// Sheet y offset, one crop per star.
    pub source_y: f64,
}

#[derive(Debug, Clone)]
pub struct NightCycle {
    pub x: f64,
    pub y: f64,
    pub current_phase: usize,
    pub opacity: f64,
    pub stars: [Star; NUM_STARS],
    pub draw_stars: bool,
    pub container_width: f64,
}

impl NightCycle {
    pub fn new(container_width: f64, rng: &mut impl Rng) -> Self {
        let mut night = Self {
            x: container_width - 50.0,
            y: 30.0,
            current_phase: 0,
            opacity: 0.0,
            stars: [Star {
                x: 0.0,
                y: 0.0,
                source_y: 0.0,
            }; NUM_STARS],
            draw_stars: false,
            container_width,
        };
        night.place_stars(rng);
        night
    }

    pub fn update(&mut self, activated: bool, rng: &mut impl Rng) {
        if activated && self.opacity <= 0.0 {
            self.current_phase = (self.current_phase + 1) % PHASES.len();
        }

        if activated && self.opacity < 1.0 {
            self.opacity = (self.opacity + FADE_SPEED).min(1.0);
        } else if !activated && self.opacity > 0.0 {
            self.opacity = (self.opacity - FADE_SPEED).max(0.0);
        }

        if self.opacity > 0.0 {
            self.x = self.scroll(self.x, MOON_SPEED);
            if self.draw_stars {
                for i in 0..NUM_STARS {
                    self.stars[i].x = self.scroll(self.stars[i].x, STAR_SPEED);
                }
            }
        } else {
            self.place_stars(rng);
        }
        self.draw_stars = true;
    }

    fn scroll(&self, x: f64, speed: f64) -> f64 {
        if x < -MOON_WIDTH {
            self.container_width
        } else {
            x - speed
        }
    }

    /// Scatter one star per horizontal segment of the sky.
    pub fn place_stars(&mut self, rng: &mut impl Rng) {
        let segment = (self.container_width / NUM_STARS as f64).round();
        for (i, star) in self.stars.iter_mut().enumerate() {
            let start = segment * i as f64;
            star.x = random_num(rng, start, start + segment);
            star.y = random_num(rng, 0.0, STAR_MAX_Y);
            star.source_y = STAR_SIZE * i as f64;
        }
    }

    /// Moon crop width; the full moon is twice as wide.
    pub fn moon_width(&self) -> f64 {
        if self.current_phase == 3 {
            MOON_WIDTH * 2.0
        } else {
            MOON_WIDTH
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.current_phase = 0;
        self.opacity = 0.0;
        self.update(false, rng);
    }
}
