//! Scrolling ground line made of two leapfrogging segments.

use crate::core::constants::FPS;
use crate::skins::LineDef;
use rand::Rng;

/// Chance that a recycled segment shows the bumpy crop.
const BUMP_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct HorizonLine {
    pub def: LineDef,
    pub x: [f64; 2],
    /// Whether each segment shows the bumpy half of the strip.
    pub bumpy: [bool; 2],
}

impl HorizonLine {
    pub fn new(def: LineDef) -> Self {
        Self {
            def,
            x: [0.0, def.width],
            bumpy: [false, true],
        }
    }

    /// Sheet x of each segment's crop.
    pub fn source_x(&self, segment: usize) -> f64 {
        if self.bumpy[segment] {
            self.def.source_x + self.def.width
        } else {
            self.def.source_x
        }
    }

    pub fn update(&mut self, dt: f64, speed: f64, rng: &mut impl Rng) {
        let increment = (speed * FPS / 1000.0 * dt).floor();
        if self.x[0] <= 0.0 {
            self.scroll(0, increment, rng);
        } else {
            self.scroll(1, increment, rng);
        }
    }

    fn scroll(&mut self, lead: usize, increment: f64, rng: &mut impl Rng) {
        let trail = 1 - lead;
        let width = self.def.width;
        self.x[lead] -= increment;
        self.x[trail] = self.x[lead] + width;

        if self.x[lead] <= -width {
            self.x[lead] += width * 2.0;
            self.x[trail] = self.x[lead] - width;
            self.bumpy[lead] = rng.gen::<f64>() > BUMP_THRESHOLD;
        }
    }

    pub fn reset(&mut self) {
        self.x = [0.0, self.def.width];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skins::CLASSIC;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_segments_stay_adjacent() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut line = HorizonLine::new(CLASSIC.lines[0]);
        for _ in 0..5000 {
            line.update(1000.0 / 60.0, 9.0, &mut rng);
            let gap = (line.x[0] - line.x[1]).abs();
            assert!((gap - 600.0).abs() < f64::EPSILON);
            assert!(line.x[0] > -600.0 && line.x[1] > -600.0);
        }
    }

    #[test]
    fn test_reset_restores_origin() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut line = HorizonLine::new(CLASSIC.lines[0]);
        line.update(100.0, 6.0, &mut rng);
        line.reset();
        assert_eq!(line.x, [0.0, 600.0]);
    }

    #[test]
    fn test_source_crop() {
        let line = HorizonLine::new(CLASSIC.lines[0]);
        assert!((line.source_x(0) - 2.0).abs() < f64::EPSILON);
        assert!((line.source_x(1) - 602.0).abs() < f64::EPSILON);
    }
}
