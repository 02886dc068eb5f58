//! Game over overlay: the "game over" text and the animated restart icon.

pub const RESTART_ANIM_DURATION: f64 = 875.0;
pub const LOGO_PAUSE_DURATION: f64 = 875.0;
/// Text swaps (alt text and back) in alt mode.
pub const FLASH_ITERATIONS: u32 = 5;
pub const ALT_TEXT_FLASH_DURATION: f64 = 1500.0;

/// Sheet x offsets of the restart icon frames.
pub const RESTART_FRAMES: [f64; 8] = [0.0, 36.0, 72.0, 108.0, 144.0, 180.0, 216.0, 252.0];
pub const MS_PER_RESTART_FRAME: f64 = RESTART_ANIM_DURATION / 8.0;

pub const TEXT_X: f64 = 0.0;
pub const TEXT_Y: f64 = 13.0;
pub const TEXT_WIDTH: f64 = 191.0;
pub const TEXT_HEIGHT: f64 = 11.0;
pub const RESTART_WIDTH: f64 = 36.0;
pub const RESTART_HEIGHT: f64 = 32.0;

pub const ALT_TEXT_X: f64 = 14.0;
pub const ALT_TEXT_Y: f64 = 2.0;
pub const ALT_TEXT_WIDTH: f64 = 108.0;
pub const ALT_TEXT_HEIGHT: f64 = 15.0;

#[derive(Debug, Clone)]
pub struct GameOverPanel {
    pub width: f64,
    pub height: f64,
    current_frame: usize,
    anim_timer: f64,
    flash_timer: f64,
    flash_counter: u32,
    original_text: bool,
    alt_mode_active: bool,
}

impl GameOverPanel {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            current_frame: 0,
            anim_timer: 0.0,
            flash_timer: 0.0,
            flash_counter: 0,
            original_text: true,
            alt_mode_active: false,
        }
    }

    pub fn update_dimensions(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.current_frame = RESTART_FRAMES.len() - 1;
    }

    pub fn set_alt_mode(&mut self, active: bool) {
        self.alt_mode_active = active;
    }

    /// Advance the restart animation and, in alt mode, the text flashing.
    pub fn update(&mut self, dt: f64) {
        self.anim_timer += dt;
        self.flash_timer += dt;

        if self.current_frame == 0 {
            if self.anim_timer > LOGO_PAUSE_DURATION {
                self.anim_timer = 0.0;
                self.current_frame = 1;
            }
        } else if self.anim_timer >= MS_PER_RESTART_FRAME {
            self.anim_timer = 0.0;
            // Wraps back to the paused logo frame.
            self.current_frame = (self.current_frame + 1) % RESTART_FRAMES.len();
        }

        if self.alt_mode_active
            && self.flash_counter < FLASH_ITERATIONS
            && self.flash_timer > ALT_TEXT_FLASH_DURATION
        {
            self.flash_timer = 0.0;
            self.original_text = !self.original_text;
            if self.original_text {
                self.flash_counter += 1;
            }
        }
    }

    pub fn restart_frame(&self) -> usize {
        self.current_frame
    }

    /// Sheet x offset of the current restart frame.
    pub fn restart_source_offset(&self) -> f64 {
        RESTART_FRAMES[self.current_frame]
    }

    pub fn showing_alt_text(&self) -> bool {
        !self.original_text
    }

    /// Top-left of the game over text.
    pub fn text_position(&self) -> (f64, f64) {
        let width = if self.original_text {
            TEXT_WIDTH
        } else {
            ALT_TEXT_WIDTH
        };
        (
            (self.width / 2.0 - width / 2.0).round(),
            ((self.height - 25.0) / 3.0).round(),
        )
    }

    /// Top-left of the restart icon.
    pub fn restart_position(&self) -> (f64, f64) {
        (self.width / 2.0 - RESTART_WIDTH / 2.0, self.height / 2.0)
    }

    pub fn reset(&mut self) {
        self.anim_timer = 0.0;
        self.current_frame = 0;
        self.flash_timer = 0.0;
        self.flash_counter = 0;
        self.original_text = true;
    }
}
