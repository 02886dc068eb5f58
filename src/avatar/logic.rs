//! Avatar physics and animation.
//!
//! Jump integration is frame-rate independent: every update converts the
//! elapsed milliseconds into a fractional number of 60 Hz frames and
//! scales displacement and gravity by it.

use super::types::{random_blink_delay, Avatar, Pose};
use crate::core::constants::{FLASH_OFF, FLASH_ON, INTRO_DURATION, START_X_POS};
use rand::Rng;

impl Avatar {
    /// Advance animation timers by `dt` milliseconds.
    pub fn update(&mut self, dt: f64, rng: &mut impl Rng) {
        self.timer += dt;

        if self.playing_intro && self.x < START_X_POS {
            let step = (START_X_POS / INTRO_DURATION * dt).round();
            self.x = (self.x + step).min(START_X_POS);
            self.x_initial = self.x;
        }

        if self.pose == Pose::Waiting {
            self.blink(dt, rng);
        }

        if self.flashing {
            self.flash_timer += dt;
            if self.flash_timer >= FLASH_ON + FLASH_OFF {
                self.flash_timer = 0.0;
            }
        } else if self.timer >= self.pose.ms_per_frame() {
            let frame_count = self.frames().len().max(1);
            self.current_frame = (self.current_frame + 1) % frame_count;
            self.timer = 0.0;
        }
    }

    /// Switch pose, restarting its animation.
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.current_frame = 0;
        self.timer = 0.0;
        if pose == Pose::Waiting {
            self.blink_elapsed = 0.0;
        }
    }

    fn blink(&mut self, dt: f64, rng: &mut impl Rng) {
        self.blink_elapsed += dt;
        if self.blink_elapsed >= self.blink_delay && self.current_frame == 1 {
            self.blink_delay = random_blink_delay(rng);
            self.blink_elapsed = 0.0;
            self.blink_count += 1;
        }
    }

    /// Sheet x offset of the frame to draw.
    ///
    /// While waiting the eyes stay open until the blink delay elapses.
    pub fn display_frame(&self) -> f64 {
        let frames = self.frames();
        if frames.is_empty() {
            return 0.0;
        }
        if self.pose == Pose::Waiting && self.blink_elapsed < self.blink_delay {
            return frames[0];
        }
        frames[self.current_frame.min(frames.len() - 1)]
    }

    /// Whether the avatar is drawn this frame (it blinks out while flashing).
    pub fn is_visible(&self) -> bool {
        !self.flashing || self.flash_timer < FLASH_ON
    }

    pub fn set_flashing(&mut self, flashing: bool) {
        self.flashing = flashing;
        self.flash_timer = 0.0;
    }

    /// Begin the slide-in from the left edge.
    pub fn start_intro(&mut self) {
        self.playing_intro = true;
    }

    /// End the slide-in, snapping to the resting position.
    pub fn finish_intro(&mut self) {
        self.playing_intro = false;
        self.x = START_X_POS;
        self.x_initial = START_X_POS;
    }

    /// Start a jump. Faster runs launch harder.
    pub fn start_jump(&mut self, speed: f64) {
        if self.jumping {
            return;
        }
        self.set_pose(Pose::Jumping);
        self.velocity = self.physics.initial_jump_velocity - speed / 10.0;
        self.jumping = true;
        self.reached_min_height = false;
        self.speed_drop = false;
    }

    /// Cut the jump short once the minimum height has been reached.
    pub fn end_jump(&mut self) {
        if self.reached_min_height && self.velocity < self.physics.drop_velocity {
            self.velocity = self.physics.drop_velocity;
        }
    }

    /// Integrate one slice of the jump. Returns true when the avatar lands.
    pub fn update_jump(&mut self, dt: f64) -> bool {
        if !self.jumping {
            return false;
        }
        let frames_elapsed = dt / Pose::Jumping.ms_per_frame();
        let invert = self.sprite.invert_jump;

        if self.speed_drop {
            self.y +=
                (self.velocity * self.physics.speed_drop_coefficient * frames_elapsed).round();
        } else if invert {
            self.y -= (self.velocity * frames_elapsed).round();
        } else {
            self.y += (self.velocity * frames_elapsed).round();
        }
        self.velocity += self.physics.gravity * frames_elapsed;

        let past_min = if invert {
            self.y > self.min_jump_y
        } else {
            self.y < self.min_jump_y
        };
        if past_min || self.speed_drop {
            self.reached_min_height = true;
        }

        let past_max = if invert {
            self.y > self.ground_y + self.physics.max_jump_height
        } else {
            self.y < self.physics.max_jump_height
        };
        if past_max || self.speed_drop {
            self.end_jump();
        }

        let landed = if invert {
            self.y < self.ground_y
        } else {
            self.y > self.ground_y
        };
        if landed {
            self.land();
        }
        landed
    }

    fn land(&mut self) {
        let duck_held = self.speed_drop;
        self.y = self.ground_y;
        self.velocity = 0.0;
        self.jumping = false;
        self.reached_min_height = false;
        self.speed_drop = false;
        self.jump_count += 1;
        self.ducking = false;
        self.set_pose(Pose::Running);
        // A speed drop only survives while duck is held; land straight into a duck.
        if duck_held {
            self.set_duck(true);
        }
    }

    /// Abort the jump and fall fast.
    pub fn set_speed_drop(&mut self) {
        if !self.jumping {
            return;
        }
        self.speed_drop = true;
        self.velocity = 1.0;
    }

    /// Release a held speed drop without touching the jump.
    pub fn clear_speed_drop(&mut self) {
        self.speed_drop = false;
    }

    /// Duck or stand up. Ignored mid-air and for skins that cannot duck.
    pub fn set_duck(&mut self, ducking: bool) {
        if ducking {
            if self.jumping || !self.sprite.can_duck || self.pose == Pose::Ducking {
                return;
            }
            self.set_pose(Pose::Ducking);
            self.ducking = true;
        } else if self.pose == Pose::Ducking {
            self.set_pose(Pose::Running);
            self.ducking = false;
        }
    }

    pub fn crash(&mut self) {
        self.set_pose(Pose::Crashed);
        self.flashing = false;
    }

    /// Back to running on the ground at the initial x.
    pub fn reset(&mut self) {
        self.x = self.x_initial;
        self.y = self.ground_y;
        self.velocity = 0.0;
        self.jumping = false;
        self.ducking = false;
        self.reached_min_height = false;
        self.speed_drop = false;
        self.jump_count = 0;
        self.set_pose(Pose::Running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::MS_PER_FRAME;
    use crate::core::DifficultyProfile;
    use crate::skins::{CLASSIC, INVERTED, PRAIRIE};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn running_avatar() -> (Avatar, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut avatar = Avatar::new(&CLASSIC, &DifficultyProfile::normal(), &mut rng);
        avatar.finish_intro();
        avatar.reset();
        (avatar, rng)
    }

    fn jump_to_landing(avatar: &mut Avatar) -> u32 {
        let mut frames = 0;
        while !avatar.update_jump(MS_PER_FRAME) {
            frames += 1;
            assert!(frames < 600, "jump never landed");
        }
        frames
    }

    #[test]
    fn test_start_jump_sets_velocity_from_speed() {
        let (mut avatar, _) = running_avatar();
        avatar.start_jump(6.0);
        assert!(avatar.jumping);
        assert_eq!(avatar.pose, Pose::Jumping);
        assert!((avatar.velocity - (-10.6)).abs() < 1e-9);
    }

    #[test]
    fn test_jump_rises_then_lands() {
        let (mut avatar, _) = running_avatar();
        avatar.start_jump(6.0);
        avatar.update_jump(MS_PER_FRAME);
        assert!(avatar.y < avatar.ground_y);
        jump_to_landing(&mut avatar);
        assert!(!avatar.jumping);
        assert_eq!(avatar.pose, Pose::Running);
        assert!((avatar.y - avatar.ground_y).abs() < f64::EPSILON);
        assert_eq!(avatar.jump_count, 1);
    }

    #[test]
    fn test_early_release_shortens_jump() {
        let (mut full, _) = running_avatar();
        full.start_jump(6.0);
        let full_frames = jump_to_landing(&mut full);

        let (mut short, _) = running_avatar();
        short.start_jump(6.0);
        let mut frames = 0;
        loop {
            frames += 1;
            if short.update_jump(MS_PER_FRAME) {
                break;
            }
            if short.reached_min_height {
                short.end_jump();
            }
        }
        assert!(frames <= full_frames);
    }

    #[test]
    fn test_end_jump_before_min_height_is_ignored() {
        let (mut avatar, _) = running_avatar();
        avatar.start_jump(6.0);
        let v = avatar.velocity;
        avatar.end_jump();
        assert!((avatar.velocity - v).abs() < f64::EPSILON);
    }

    #[test]
    fn test_frame_rate_independence() {
        let (mut a, _) = running_avatar();
        let (mut b, _) = running_avatar();
        a.start_jump(6.0);
        b.start_jump(6.0);
        for _ in 0..4 {
            a.update_jump(MS_PER_FRAME);
        }
        b.update_jump(MS_PER_FRAME * 2.0);
        b.update_jump(MS_PER_FRAME * 2.0);
        assert!((a.velocity - b.velocity).abs() < 1e-9);
        assert!((a.y - b.y).abs() <= 2.0);
    }

    #[test]
    fn test_duck_disallowed_mid_air() {
        let (mut avatar, _) = running_avatar();
        avatar.start_jump(6.0);
        avatar.set_duck(true);
        assert!(!avatar.ducking);
        assert_eq!(avatar.pose, Pose::Jumping);
    }

    #[test]
    fn test_speed_drop_lands_into_duck() {
        let (mut avatar, _) = running_avatar();
        avatar.start_jump(6.0);
        avatar.update_jump(MS_PER_FRAME);
        avatar.set_speed_drop();
        assert!((avatar.velocity - 1.0).abs() < f64::EPSILON);
        jump_to_landing(&mut avatar);
        assert!(avatar.ducking);
        assert_eq!(avatar.pose, Pose::Ducking);
    }

    #[test]
    fn test_released_speed_drop_lands_running() {
        let (mut avatar, _) = running_avatar();
        avatar.start_jump(6.0);
        avatar.update_jump(MS_PER_FRAME);
        avatar.set_speed_drop();
        avatar.update_jump(MS_PER_FRAME);
        avatar.clear_speed_drop();
        jump_to_landing(&mut avatar);
        assert!(!avatar.ducking);
        assert_eq!(avatar.pose, Pose::Running);
    }

    #[test]
    fn test_duck_toggle() {
        let (mut avatar, _) = running_avatar();
        avatar.set_duck(true);
        assert_eq!(avatar.pose, Pose::Ducking);
        avatar.set_duck(false);
        assert_eq!(avatar.pose, Pose::Running);
        assert!(!avatar.ducking);
    }

    #[test]
    fn test_prairie_cannot_duck() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut avatar = Avatar::new(&PRAIRIE, &DifficultyProfile::normal(), &mut rng);
        avatar.reset();
        avatar.set_duck(true);
        assert!(!avatar.ducking);
    }

    #[test]
    fn test_inverted_jump_moves_down_and_returns() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut avatar = Avatar::new(&INVERTED, &DifficultyProfile::normal(), &mut rng);
        avatar.reset();
        avatar.start_jump(6.0);
        avatar.update_jump(MS_PER_FRAME);
        assert!(avatar.y > avatar.ground_y);
        jump_to_landing(&mut avatar);
        assert!((avatar.y - avatar.ground_y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_intro_slides_to_start_position() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut avatar = Avatar::new(&CLASSIC, &DifficultyProfile::normal(), &mut rng);
        avatar.start_intro();
        let mut elapsed = 0.0;
        while elapsed < INTRO_DURATION {
            avatar.update(MS_PER_FRAME, &mut rng);
            elapsed += MS_PER_FRAME;
        }
        assert!(avatar.x <= START_X_POS);
        assert!(avatar.x > 0.0);
        avatar.finish_intro();
        assert!((avatar.x - START_X_POS).abs() < f64::EPSILON);
    }

    #[test]
    fn test_waiting_blinks_are_counted() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut avatar = Avatar::new(&CLASSIC, &DifficultyProfile::normal(), &mut rng);
        for _ in 0..(60 * 30) {
            avatar.update(MS_PER_FRAME, &mut rng);
        }
        assert!(avatar.blink_count >= 1);
    }

    #[test]
    fn test_flashing_hides_avatar_periodically() {
        let (mut avatar, mut rng) = running_avatar();
        avatar.set_flashing(true);
        assert!(avatar.is_visible());
        avatar.update(FLASH_ON + 10.0, &mut rng);
        assert!(!avatar.is_visible());
    }

    #[test]
    fn test_reset_restores_ground_and_running() {
        let (mut avatar, _) = running_avatar();
        avatar.start_jump(6.0);
        avatar.update_jump(MS_PER_FRAME);
        avatar.reset();
        assert!(avatar.on_ground());
        assert_eq!(avatar.pose, Pose::Running);
        assert_eq!(avatar.jump_count, 0);
    }
}
