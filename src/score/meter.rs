//! Distance meter: current score, achievement flashing and the high score.
//!
//! Distances handed in are raw scroll units; everything displayed is the
//! "actual" distance, `round(distance * 0.025)`.

use crate::core::CollisionBox;

pub const MAX_DISTANCE_UNITS: usize = 5;
pub const ACHIEVEMENT_DISTANCE: u64 = 100;
pub const COEFFICIENT: f64 = 0.025;
/// Half of one flash cycle in ms.
pub const FLASH_DURATION: f64 = 250.0;
pub const FLASH_ITERATIONS: u32 = 3;
pub const HIGH_SCORE_HIT_AREA_PADDING: f64 = 4.0;

pub const DIGIT_WIDTH: f64 = 10.0;
pub const DIGIT_HEIGHT: f64 = 13.0;
pub const DIGIT_DEST_WIDTH: f64 = 11.0;

/// Number of glyphs ahead of the high score digits ("H", "I", blank).
const HIGH_SCORE_PREFIX: usize = 3;

/// Convert a raw distance to the displayed score.
pub fn actual_distance(distance: f64) -> u64 {
    if distance > 0.0 {
        (distance * COEFFICIENT).round() as u64
    } else {
        0
    }
}

/// Zero-pad `value` to `units` digits, keeping the lowest digits on overflow.
fn padded(value: u64, units: usize) -> String {
    let text = format!("{value:0>units$}");
    text[text.len() - units..].to_string()
}

#[derive(Debug, Clone)]
pub struct ScoreTracker {
    pub x: f64,
    pub y: f64,
    max_score_units: usize,
    max_score: u64,
    digits: String,

    achievement: bool,
    flash_timer: f64,
    flash_iterations: u32,
    paint: bool,
    /// Last achievement milestone that requested a cue.
    last_achievement: u64,

    /// Raw distance of the best run, rounded up.
    high_score: u64,
    high_score_digits: String,
    high_score_flashing: bool,
    hs_flash_timer: f64,
    hs_flash_iterations: u32,
    hs_paint: bool,
}

impl ScoreTracker {
    pub fn new(canvas_width: f64) -> Self {
        let mut tracker = Self {
            x: 0.0,
            y: 5.0,
            max_score_units: MAX_DISTANCE_UNITS,
            max_score: 10u64.pow(MAX_DISTANCE_UNITS as u32) - 1,
            digits: padded(0, MAX_DISTANCE_UNITS),
            achievement: false,
            flash_timer: 0.0,
            flash_iterations: 0,
            paint: true,
            last_achievement: 0,
            high_score: 0,
            high_score_digits: padded(0, MAX_DISTANCE_UNITS),
            high_score_flashing: false,
            hs_flash_timer: 0.0,
            hs_flash_iterations: 0,
            hs_paint: true,
        };
        tracker.calc_x(canvas_width);
        tracker
    }

    /// Right-align the meter on a canvas of `canvas_width`.
    pub fn calc_x(&mut self, canvas_width: f64) {
        self.x = canvas_width - DIGIT_DEST_WIDTH * (self.max_score_units + 1) as f64;
    }

    /// Advance the meter. Returns true when a new achievement milestone was
    /// reached this frame and a score cue should play.
    pub fn update(&mut self, dt: f64, distance: f64) -> bool {
        self.paint = true;
        if self.achievement {
            self.update_achievement_flash(dt);
            return false;
        }

        let actual = actual_distance(distance);
        if actual > self.max_score && self.max_score_units == MAX_DISTANCE_UNITS {
            self.max_score_units += 1;
            self.max_score = self.max_score * 10 + 9;
        }

        if actual == 0 {
            self.digits = padded(0, self.max_score_units);
            return false;
        }

        self.digits = padded(actual, self.max_score_units);
        if actual % ACHIEVEMENT_DISTANCE == 0 && actual != self.last_achievement {
            self.achievement = true;
            self.flash_timer = 0.0;
            self.last_achievement = actual;
            tracing::debug!(score = actual, "achievement reached");
            return true;
        }
        false
    }

    fn update_achievement_flash(&mut self, dt: f64) {
        if self.flash_iterations <= FLASH_ITERATIONS {
            self.flash_timer += dt;
            if self.flash_timer < FLASH_DURATION {
                self.paint = false;
            } else if self.flash_timer > FLASH_DURATION * 2.0 {
                self.flash_timer = 0.0;
                self.flash_iterations += 1;
            }
        } else {
            self.achievement = false;
            self.flash_iterations = 0;
            self.flash_timer = 0.0;
        }
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn digit_count(&self) -> usize {
        self.max_score_units
    }

    /// Whether the score digits are drawn this frame.
    pub fn is_painted(&self) -> bool {
        self.paint
    }

    pub fn is_achievement(&self) -> bool {
        self.achievement
    }

    /// Stop any achievement flashing, as on a crash.
    pub fn clear_achievement(&mut self) {
        self.achievement = false;
        self.flash_iterations = 0;
        self.flash_timer = 0.0;
        self.paint = true;
    }

    // ── High score ──────────────────────────────────────────────────

    /// Raw high score distance.
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn high_score_actual(&self) -> u64 {
        actual_distance(self.high_score as f64)
    }

    pub fn high_score_digits(&self) -> &str {
        &self.high_score_digits
    }

    /// Set the high score from a raw distance.
    pub fn set_high_score(&mut self, distance: f64) {
        self.high_score = distance.max(0.0).ceil() as u64;
        self.high_score_digits = padded(self.high_score_actual(), self.max_score_units);
    }

    /// Record a finished run. Returns true when it set a new high score.
    pub fn record_run(&mut self, distance: f64) -> bool {
        if distance > self.high_score as f64 {
            self.set_high_score(distance);
            true
        } else {
            false
        }
    }

    /// Left edge of the high score glyphs.
    pub fn high_score_x(&self) -> f64 {
        self.x - (self.max_score_units * 2) as f64 * DIGIT_WIDTH
    }

    /// Hit area of the high score, padded for easier tapping.
    pub fn high_score_bounds(&self) -> CollisionBox {
        let glyphs = HIGH_SCORE_PREFIX + self.high_score_digits.len();
        CollisionBox::new(
            self.high_score_x() - HIGH_SCORE_HIT_AREA_PADDING,
            self.y,
            DIGIT_WIDTH * (glyphs + 1) as f64 + HIGH_SCORE_HIT_AREA_PADDING,
            DIGIT_HEIGHT + HIGH_SCORE_HIT_AREA_PADDING * 2.0,
        )
    }

    pub fn hit_high_score(&self, x: f64, y: f64) -> bool {
        self.high_score_bounds().contains_point(x, y)
    }

    /// Whether the high score is drawn this frame.
    pub fn high_score_visible(&self) -> bool {
        self.high_score > 0 && (!self.high_score_flashing || self.hs_paint)
    }

    pub fn is_high_score_flashing(&self) -> bool {
        self.high_score_flashing
    }

    pub fn start_high_score_flashing(&mut self) {
        self.high_score_flashing = true;
        self.hs_flash_timer = 0.0;
        self.hs_flash_iterations = 0;
        self.hs_paint = false;
    }

    /// Advance the reset-confirmation flashing; stops by itself.
    pub fn update_high_score_flash(&mut self, dt: f64) {
        if !self.high_score_flashing {
            return;
        }
        if self.hs_flash_iterations > FLASH_ITERATIONS * 2 {
            self.cancel_high_score_flashing();
            return;
        }
        self.hs_flash_timer += dt;
        self.hs_paint = true;
        if self.hs_flash_timer < FLASH_DURATION {
            self.hs_paint = false;
        } else if self.hs_flash_timer > FLASH_DURATION * 2.0 {
            self.hs_flash_timer = 0.0;
            self.hs_flash_iterations += 1;
        }
    }

    pub fn cancel_high_score_flashing(&mut self) {
        self.high_score_flashing = false;
        self.hs_flash_timer = 0.0;
        self.hs_flash_iterations = 0;
        self.hs_paint = true;
    }

    pub fn reset_high_score(&mut self) {
        self.set_high_score(0.0);
        self.cancel_high_score_flashing();
    }

    /// Back to zero for a new run.
    pub fn reset(&mut self) {
        self.clear_achievement();
        self.last_achievement = 0;
        self.update(0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Raw distance for a displayed score.
    fn raw(score: u64) -> f64 {
        score as f64 / COEFFICIENT
    }

    #[test]
    fn test_actual_distance() {
        assert_eq!(actual_distance(0.0), 0);
        assert_eq!(actual_distance(-5.0), 0);
        assert_eq!(actual_distance(40.0), 1);
        assert_eq!(actual_distance(59.0), 1);
        assert_eq!(actual_distance(61.0), 2);
    }

    #[test]
    fn test_zero_padded_digits() {
        let mut meter = ScoreTracker::new(600.0);
        assert_eq!(meter.digits(), "00000");
        meter.update(16.0, raw(42));
        assert_eq!(meter.digits(), "00042");
    }

    #[test]
    fn test_grows_to_six_digits() {
        let mut meter = ScoreTracker::new(600.0);
        meter.update(16.0, raw(100_001));
        assert_eq!(meter.digit_count(), 6);
        assert_eq!(meter.digits(), "100001");
        meter.calc_x(600.0);
        assert!((meter.x - (600.0 - 77.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_achievement_fires_once_per_crossing() {
        let mut meter = ScoreTracker::new(600.0);
        assert!(meter.update(16.0, raw(100)));
        assert!(meter.is_achievement());
        // Flash through to completion.
        for _ in 0..400 {
            assert!(!meter.update(16.0, raw(100)));
        }
        assert!(!meter.is_achievement());
        assert!(!meter.update(16.0, raw(100)));
        assert!(meter.update(16.0, raw(200)));
    }

    #[test]
    fn test_achievement_flash_hides_digits() {
        let mut meter = ScoreTracker::new(600.0);
        meter.update(16.0, raw(100));
        meter.update(100.0, raw(101));
        assert!(!meter.is_painted());
        meter.update(200.0, raw(101));
        assert!(meter.is_painted());
        // Frozen while flashing.
        assert_eq!(meter.digits(), "00100");
    }

    #[test]
    fn test_record_run_only_improves() {
        let mut meter = ScoreTracker::new(600.0);
        assert!(meter.record_run(1000.4));
        assert_eq!(meter.high_score(), 1001);
        assert_eq!(meter.high_score_digits(), "00025");
        assert!(!meter.record_run(500.0));
        assert_eq!(meter.high_score(), 1001);
    }

    #[test]
    fn test_high_score_bounds_hit() {
        let mut meter = ScoreTracker::new(600.0);
        meter.set_high_score(4000.0);
        let bounds = meter.high_score_bounds();
        assert!(meter.hit_high_score(bounds.x + 1.0, bounds.y + 1.0));
        assert!(!meter.hit_high_score(bounds.x - 1.0, bounds.y));
        // x = 534 - 100 - 4
        assert!((bounds.x - 430.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_high_score_flashing_stops() {
        let mut meter = ScoreTracker::new(600.0);
        meter.set_high_score(4000.0);
        meter.start_high_score_flashing();
        assert!(!meter.high_score_visible());
        for _ in 0..500 {
            meter.update_high_score_flash(16.0);
        }
        assert!(!meter.is_high_score_flashing());
        assert!(meter.high_score_visible());
    }

    #[test]
    fn test_reset_high_score() {
        let mut meter = ScoreTracker::new(600.0);
        meter.set_high_score(4000.0);
        meter.start_high_score_flashing();
        meter.reset_high_score();
        assert_eq!(meter.high_score(), 0);
        assert!(!meter.is_high_score_flashing());
        assert!(!meter.high_score_visible());
    }

    #[test]
    fn test_reset_rearms_achievement() {
        let mut meter = ScoreTracker::new(600.0);
        assert!(meter.update(16.0, raw(100)));
        meter.reset();
        assert_eq!(meter.digits(), "00000");
        assert!(meter.update(16.0, raw(100)));
    }
}
