//! The game session: state machine, frame loop and input handling.
//!
//! A host drives the session with `pump(now)`, passing a millisecond
//! timestamp. Each pump drains the input queue, applies a debounced
//! resize, animates the game over overlay while crashed, and runs one
//! frame if the scheduler says one is due. The session never reads a
//! clock itself.

use super::host::{HighScoreHost, NoHighScoreHost};
use super::input::{self, InputSender};
use super::scheduler::{FrameScheduler, ResizeDebouncer};
use super::types::{GameState, InputAction, SessionOptions};
use crate::audio::{AudioCueSynthesizer, AudioOutput, SoundEffect};
use crate::avatar::{Avatar, Pose};
use crate::core::constants::{
    ALT_MODE_FADE_DURATION, ALT_MODE_FLASH_DURATION, AUDIO_CUE_CLEAR_TIME_FACTOR, CLEAR_TIME,
    DEFAULT_HEIGHT, DEFAULT_WIDTH, GAMEOVER_CLEAR_TIME, INTRO_DURATION, INVERT_FADE_DURATION,
    MAX_BLINK_COUNT, MIN_HEIGHT, MIN_WIDTH, MS_PER_FRAME,
};
use crate::core::{check_for_collision, DifficultyProfile, SpeedMode};
use crate::horizon::{Horizon, HorizonOptions};
use crate::score::{actual_distance, GameOverPanel, ScoreTracker};
use crate::skins::{catalog, AssetProvider, BuiltinAssets, SkinDefinition, SkinId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::mpsc;

/// Clamp a requested canvas size to something playable.
///
/// Arcade mode never grows past the default width. Height is fixed.
pub fn clamp_dimensions(width: f64, height: f64, arcade: bool) -> (f64, f64) {
    let mut width = width.max(MIN_WIDTH);
    if arcade {
        width = width.min(DEFAULT_WIDTH);
    }
    (width.floor(), height.clamp(MIN_HEIGHT, DEFAULT_HEIGHT))
}

pub struct GameSession {
    options: SessionOptions,
    profile: DifficultyProfile,
    /// Speed mode chosen mid-run, applied at the next start.
    pending_mode: Option<SpeedMode>,

    base_skin: &'static SkinDefinition,
    alt_skin: Option<&'static SkinDefinition>,
    alt_mode_active: bool,

    state: GameState,
    paused_from: GameState,
    width: f64,
    height: f64,

    avatar: Avatar,
    horizon: Horizon,
    score: ScoreTracker,
    game_over_panel: GameOverPanel,
    cues: AudioCueSynthesizer,
    effects: Vec<SoundEffect>,
    rng: ChaCha8Rng,

    scheduler: FrameScheduler,
    resize: ResizeDebouncer,
    input_tx: InputSender,
    input_rx: mpsc::Receiver<InputAction>,

    high_score_host: Box<dyn HighScoreHost>,
    high_score_synced: bool,

    last_frame: Option<f64>,
    overlay_time: Option<f64>,
    crash_time: f64,
    running_time: f64,
    intro_elapsed: f64,
    distance: f64,
    speed: f64,
    play_count: u32,

    inverted: bool,
    invert_timer: f64,
    invert_trigger: bool,

    /// Remaining avatar flash before the alternate skin takes over.
    alt_flash_timer: Option<f64>,
    /// Seconds since the alternate skin appeared.
    fade_in: f64,
    visible: bool,
}

impl GameSession {
    pub fn new(
        options: SessionOptions,
        assets: &dyn AssetProvider,
        high_score_host: Box<dyn HighScoreHost>,
    ) -> Self {
        let base_skin = assets.skin(SkinId::Classic).unwrap_or_else(|| {
            tracing::warn!("asset provider lacks the classic skin, using built-in tables");
            catalog::builtin(SkinId::Classic)
        });
        let alt_skin = options
            .alt_skin
            .filter(|id| *id != SkinId::Classic)
            .and_then(|id| {
                let skin = assets.skin(id);
                if skin.is_none() {
                    tracing::warn!(skin = id.name(), "alternate skin unavailable, alt mode disabled");
                }
                skin
            });

        let (width, height) = clamp_dimensions(options.width, options.height, options.arcade);
        let profile = options.speed_mode.profile();
        let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
        let (input_tx, input_rx) = input::channel();

        let horizon_options =
            horizon_options_for(alt_skin.is_some(), false, options.audio_cues, width < DEFAULT_WIDTH);
        let avatar = Avatar::new(base_skin, &profile, &mut rng);
        let horizon = Horizon::new(base_skin, width, &profile, horizon_options, &mut rng);

        let mut scheduler = FrameScheduler::new();
        // Waiting-screen blink loop.
        scheduler.schedule(0.0);

        Self {
            profile,
            pending_mode: None,
            base_skin,
            alt_skin,
            alt_mode_active: false,
            state: GameState::Waiting,
            paused_from: GameState::Running,
            width,
            height,
            avatar,
            horizon,
            score: ScoreTracker::new(width),
            game_over_panel: GameOverPanel::new(width, height),
            cues: AudioCueSynthesizer::new(options.audio_cues),
            effects: Vec::new(),
            rng,
            scheduler,
            resize: ResizeDebouncer::default(),
            input_tx,
            input_rx,
            high_score_host,
            high_score_synced: false,
            last_frame: None,
            overlay_time: None,
            crash_time: 0.0,
            running_time: 0.0,
            intro_elapsed: 0.0,
            distance: 0.0,
            speed: profile.speed_for_width(width),
            play_count: 0,
            inverted: false,
            invert_timer: 0.0,
            invert_trigger: false,
            alt_flash_timer: None,
            fade_in: 0.0,
            visible: true,
            options,
        }
    }

    /// Session on the built-in tables with no persistence.
    pub fn headless(options: SessionOptions) -> Self {
        Self::new(options, &BuiltinAssets, Box::new(NoHighScoreHost))
    }

    // ── Driving ─────────────────────────────────────────────────────

    /// Process queued input, pending resizes and a due frame.
    pub fn pump(&mut self, now: f64) {
        while let Ok(action) = self.input_rx.try_recv() {
            self.handle_action(action, now);
        }
        if let Some((width, height)) = self.resize.take_due(now) {
            self.adjust_dimensions(width, height);
        }
        if self.state == GameState::Crashed {
            self.update_overlays(now);
        }
        if self.scheduler.take_due(now) {
            self.update(now);
        }
    }

    /// Run one frame at `now` and schedule the next one if still active.
    pub fn update(&mut self, now: f64) {
        let mut dt = self.last_frame.map_or(0.0, |t| (now - t).max(0.0));

        if let Some(remaining) = self.alt_flash_timer {
            if remaining <= 0.0 {
                self.alt_flash_timer = None;
                self.avatar.set_flashing(false);
                self.enable_alt_game_mode();
            } else {
                self.alt_flash_timer = Some(remaining - dt);
                self.avatar.update(dt, &mut self.rng);
                dt = 0.0;
            }
        }
        self.last_frame = Some(now);

        if self.state.is_playing() {
            self.step(dt, now);
        }

        let blinking = self.state == GameState::Waiting && self.avatar.blink_count < MAX_BLINK_COUNT;
        if self.state.is_playing() || blinking {
            self.avatar.update(dt, &mut self.rng);
            self.scheduler.schedule(now + MS_PER_FRAME);
        }
    }

    fn step(&mut self, dt: f64, now: f64) {
        if self.alt_mode_active && self.fade_in <= ALT_MODE_FADE_DURATION {
            self.fade_in += dt / 1000.0;
        }

        if self.avatar.jumping {
            self.avatar.update_jump(dt);
        }

        self.running_time += dt;
        let has_obstacles = self.running_time > self.clear_time();
        let show_night = self.show_night();
        let speed = self.speed;

        if self.state == GameState::Intro {
            // The world holds still during the slide-in.
            self.horizon
                .update(0.0, speed, has_obstacles, show_night, &mut self.rng);
            self.intro_elapsed += dt;
            if self.intro_elapsed >= INTRO_DURATION {
                self.start_game();
            }
            self.cues.tick(dt);
            return;
        }

        self.horizon
            .update(dt, speed, has_obstacles, show_night, &mut self.rng);

        let mut collision = has_obstacles
            && self
                .horizon
                .lead_obstacle()
                .and_then(|lead| check_for_collision(&self.avatar, lead))
                .is_some();

        if self.cues.is_enabled() && has_obstacles {
            self.alert_lead_obstacle();
        }

        if collision
            && self.alt_skin.is_some()
            && self
                .horizon
                .lead_obstacle()
                .is_some_and(|lead| lead.is_collectable())
        {
            self.horizon.remove_first_obstacle();
            self.avatar.set_flashing(true);
            collision = false;
            self.alt_flash_timer = Some(ALT_MODE_FLASH_DURATION);
            self.running_time = 0.0;
            self.cues.collect();
            tracing::info!("collectable picked up");
        }

        if collision {
            self.game_over(now);
            // The meter may have skipped digits while flashing an achievement.
            self.score.update(dt, self.distance.ceil());
            return;
        }

        self.distance += self.speed * dt / MS_PER_FRAME;
        self.speed = (self.speed + self.profile.acceleration).min(self.profile.max_speed);

        if self.score.update(dt, self.distance.ceil()) && !self.cues.is_enabled() {
            self.effects.push(SoundEffect::Score);
        }

        if self.alt_skin.is_none() {
            self.update_night_mode(dt);
        }
        self.cues.tick(dt);
    }

    /// Single proximity cue per approaching obstacle.
    fn alert_lead_obstacle(&mut self) {
        let threshold = self.profile.audio_cue_threshold(self.speed, self.is_narrow());
        let Some(lead) = self.horizon.lead_obstacle_mut() else {
            return;
        };
        if lead.jump_alerted || lead.x >= threshold {
            return;
        }
        if !lead.is_collectable() {
            self.cues.jump();
        }
        lead.jump_alerted = true;
    }

    fn update_night_mode(&mut self, dt: f64) {
        if self.invert_timer > INVERT_FADE_DURATION {
            self.invert_timer = 0.0;
            self.invert_trigger = false;
            self.invert(false);
        } else if self.invert_timer > 0.0 {
            self.invert_timer += dt;
        } else {
            let actual = actual_distance(self.distance.ceil());
            if actual > 0 {
                self.invert_trigger = actual % self.profile.invert_distance == 0;
                if self.invert_trigger {
                    self.invert_timer = dt.max(f64::MIN_POSITIVE);
                    self.invert(false);
                }
            }
        }
    }

    fn invert(&mut self, reset: bool) {
        if reset {
            self.invert_timer = 0.0;
            self.inverted = false;
        } else {
            self.inverted = self.invert_trigger;
            tracing::debug!(inverted = self.inverted, "night mode toggled");
        }
    }

    fn update_overlays(&mut self, now: f64) {
        let dt = self.overlay_time.map_or(0.0, |t| (now - t).max(0.0));
        self.overlay_time = Some(now);
        self.game_over_panel.update(dt);
        self.score.update_high_score_flash(dt);
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Handle for pushing actions into this session's queue.
    pub fn input_sender(&self) -> InputSender {
        self.input_tx.clone()
    }

    /// Apply one input action immediately.
    pub fn handle_action(&mut self, action: InputAction, now: f64) {
        match action {
            InputAction::JumpPressed | InputAction::PointerPressed { .. } => {
                self.on_jump_pressed(now)
            }
            InputAction::DuckPressed => self.on_duck_pressed(now),
            InputAction::JumpReleased => self.on_jump_released(None, now),
            InputAction::PointerReleased { x, y } => self.on_jump_released(Some((x, y)), now),
            InputAction::DuckReleased => {
                self.avatar.clear_speed_drop();
                self.avatar.set_duck(false);
            }
            InputAction::Restart => {
                if self.state == GameState::Crashed && self.restart_ready(now) {
                    self.score.cancel_high_score_flashing();
                    self.restart(now);
                }
            }
        }
    }

    fn on_jump_pressed(&mut self, now: f64) {
        if matches!(self.state, GameState::Crashed | GameState::Paused) {
            return;
        }
        if self.state == GameState::Waiting {
            self.play_intro(now);
        }
        if !self.avatar.jumping && !self.avatar.ducking {
            if self.cues.is_enabled() {
                self.cues.cancel_footsteps();
            } else {
                self.effects.push(SoundEffect::ButtonPress);
            }
            self.avatar.start_jump(self.speed);
        }
    }

    fn on_duck_pressed(&mut self, now: f64) {
        if !self.state.is_playing() {
            return;
        }
        // Alternate skins cannot duck; the key jumps instead.
        if self.alt_mode_active {
            self.on_jump_pressed(now);
            return;
        }
        if self.avatar.jumping {
            self.avatar.set_speed_drop();
        } else if !self.avatar.ducking {
            self.avatar.set_duck(true);
        }
    }

    fn on_jump_released(&mut self, pointer: Option<(f64, f64)>, now: f64) {
        match self.state {
            GameState::Intro | GameState::Running => self.avatar.end_jump(),
            GameState::Crashed => match pointer {
                Some((x, y)) => self.handle_game_over_click(x, y, now),
                None => {
                    if self.restart_ready(now) {
                        self.score.cancel_high_score_flashing();
                        self.restart(now);
                    }
                }
            },
            GameState::Paused => {
                self.avatar.reset();
                self.play(now);
            }
            GameState::Waiting => {}
        }
    }

    /// Tapping the high score flashes it; tapping again while it flashes
    /// resets it. Anywhere else restarts.
    fn handle_game_over_click(&mut self, x: f64, y: f64, now: f64) {
        if self.score.hit_high_score(x, y) && self.score.high_score() > 0 {
            if self.score.is_high_score_flashing() {
                self.reset_high_score();
            } else {
                self.score.start_high_score_flashing();
            }
        } else if self.restart_ready(now) {
            self.score.cancel_high_score_flashing();
            self.restart(now);
        }
    }

    /// Whether the post-crash cooldown has elapsed.
    pub fn restart_ready(&self, now: f64) -> bool {
        self.state == GameState::Crashed && now - self.crash_time >= GAMEOVER_CLEAR_TIME
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// First activation: begin the slide-in.
    pub fn play_intro(&mut self, now: f64) {
        if self.state != GameState::Waiting {
            return;
        }
        self.apply_pending_profile();
        self.state = GameState::Intro;
        self.avatar.start_intro();
        self.intro_elapsed = 0.0;
        self.running_time = 0.0;
        self.last_frame = Some(now);
        self.scheduler.cancel();
        self.scheduler.schedule(now);
        tracing::info!("intro started");
    }

    fn start_game(&mut self) {
        self.avatar.finish_intro();
        self.state = GameState::Running;
        self.running_time = 0.0;
        self.play_count += 1;
        self.cues.background();
        tracing::info!(play_count = self.play_count, mode = self.profile.mode.name(), "run started");
    }

    fn game_over(&mut self, now: f64) {
        self.effects.push(SoundEffect::Hit);
        self.halt();
        self.state = GameState::Crashed;
        self.score.clear_achievement();
        self.avatar.crash();

        self.game_over_panel.set_alt_mode(self.alt_mode_active);
        self.game_over_panel.reset();

        if self.distance > self.score.high_score() as f64 {
            self.save_high_score(self.distance, false);
        }

        self.crash_time = now;
        self.last_frame = Some(now);
        self.overlay_time = Some(now);
        tracing::info!(
            score = actual_distance(self.distance),
            high_score = self.score.high_score_actual(),
            "crashed"
        );
    }

    fn halt(&mut self) {
        self.scheduler.cancel();
        self.cues.stop_all();
    }

    /// Pause a running session.
    pub fn stop(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.halt();
        self.paused_from = self.state;
        self.state = GameState::Paused;
        tracing::info!("paused");
    }

    /// Resume a paused session.
    pub fn play(&mut self, now: f64) {
        if self.state != GameState::Paused {
            return;
        }
        self.state = self.paused_from;
        self.avatar.set_pose(Pose::Running);
        self.last_frame = Some(now);
        self.scheduler.schedule(now);
        self.cues.background();
        tracing::info!("resumed");
    }

    /// Start a fresh run after a crash.
    pub fn restart(&mut self, now: f64) {
        if self.state != GameState::Crashed || self.scheduler.is_pending() {
            return;
        }
        self.play_count += 1;
        self.apply_pending_profile();
        self.running_time = 0.0;
        self.state = GameState::Running;
        self.distance = 0.0;
        self.speed = self.profile.speed_for_width(self.width);
        self.last_frame = Some(now);
        self.score.reset();
        self.horizon.reset(&mut self.rng);
        self.avatar.reset();
        self.effects.push(SoundEffect::ButtonPress);
        self.invert(true);
        self.game_over_panel.reset();
        self.cues.background();
        self.scheduler.schedule(now);
        tracing::info!(play_count = self.play_count, "restarted");
    }

    /// Focus or visibility change from the host.
    pub fn set_visible(&mut self, visible: bool, now: f64) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if !visible {
            self.stop();
        } else if self.state == GameState::Paused {
            self.avatar.reset();
            self.play(now);
        }
    }

    fn enable_alt_game_mode(&mut self) {
        let Some(skin) = self.alt_skin else {
            return;
        };
        self.alt_mode_active = true;
        self.rebuild_children();
        self.fade_in = 0.0;
        self.invert(true);
        self.cues.background();
        tracing::info!(skin = skin.id.name(), "alternate skin active");
    }

    fn horizon_options(&self) -> HorizonOptions {
        horizon_options_for(
            self.alt_skin.is_some(),
            self.alt_mode_active,
            self.cues.is_enabled(),
            self.is_narrow(),
        )
    }

    /// Replace avatar and horizon for the current skin and profile.
    fn rebuild_children(&mut self) {
        let skin = self.skin();
        let mut avatar = Avatar::new(skin, &self.profile, &mut self.rng);
        if self.state != GameState::Waiting {
            avatar.finish_intro();
            avatar.reset();
        }
        self.avatar = avatar;
        self.horizon = Horizon::new(
            skin,
            self.width,
            &self.profile,
            self.horizon_options(),
            &mut self.rng,
        );
    }

    fn apply_pending_profile(&mut self) {
        let Some(mode) = self.pending_mode.take() else {
            return;
        };
        if mode == self.profile.mode {
            return;
        }
        self.profile = mode.profile();
        self.options.speed_mode = mode;
        self.speed = self.profile.speed_for_width(self.width);
        self.rebuild_children();
        tracing::info!(mode = mode.name(), "speed mode applied");
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Choose a speed mode; it takes effect at the next start.
    pub fn set_speed_mode(&mut self, mode: SpeedMode) {
        self.pending_mode = Some(mode);
    }

    pub fn speed_mode(&self) -> SpeedMode {
        self.profile.mode
    }

    /// Mode that the next start will use.
    pub fn next_speed_mode(&self) -> SpeedMode {
        self.pending_mode.unwrap_or(self.profile.mode)
    }

    pub fn set_audio_cues(&mut self, enabled: bool) {
        self.cues.set_enabled(enabled);
        self.options.audio_cues = enabled;
        self.horizon.options.audio_cues = enabled;
        if enabled && self.state.is_playing() {
            self.cues.background();
        }
        tracing::info!(enabled, "audio cues toggled");
    }

    pub fn audio_cues_enabled(&self) -> bool {
        self.cues.is_enabled()
    }

    /// Queue a resize; applied once the debounce interval passes.
    pub fn request_resize(&mut self, width: f64, height: f64, now: f64) {
        self.resize.request(width, height, now);
    }

    fn adjust_dimensions(&mut self, width: f64, height: f64) {
        let (width, height) = clamp_dimensions(width, height, self.options.arcade);
        self.width = width;
        self.height = height;
        self.score.calc_x(width);
        self.horizon.resize(width, width < DEFAULT_WIDTH);
        self.game_over_panel.update_dimensions(width, height);
        tracing::info!(width, height, "resized");
    }

    // ── High score ──────────────────────────────────────────────────

    /// Stored high score delivered by the host at startup.
    ///
    /// A stored value below the session's current best is reported back
    /// instead of applied.
    pub fn initialize_high_score(&mut self, value: f64) {
        self.high_score_synced = true;
        let value = value.max(0.0).ceil();
        if value < self.score.high_score() as f64 {
            self.high_score_host
                .report_high_score(self.score.high_score());
            return;
        }
        self.score.set_high_score(value);
    }

    fn save_high_score(&mut self, distance: f64, reset: bool) {
        self.score.set_high_score(distance);
        if !self.high_score_synced {
            return;
        }
        if reset {
            self.high_score_host.reset_high_score();
        } else {
            self.high_score_host
                .report_high_score(self.score.high_score());
        }
    }

    pub fn reset_high_score(&mut self) {
        self.save_high_score(0.0, true);
        self.score.reset_high_score();
        tracing::info!("high score cleared");
    }

    // ── Audio ───────────────────────────────────────────────────────

    /// Hand queued effects and cue notes to an output.
    pub fn drain_audio(&mut self, out: &mut dyn AudioOutput) {
        for effect in self.effects.drain(..) {
            out.play_effect(effect);
        }
        for event in self.cues.take_pending() {
            out.play_notes(&event.notes);
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn avatar_mut(&mut self) -> &mut Avatar {
        &mut self.avatar
    }

    pub fn horizon(&self) -> &Horizon {
        &self.horizon
    }

    pub fn horizon_mut(&mut self) -> &mut Horizon {
        &mut self.horizon
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn game_over_panel(&self) -> &GameOverPanel {
        &self.game_over_panel
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_narrow(&self) -> bool {
        self.width < DEFAULT_WIDTH
    }

    /// Skin currently on screen.
    pub fn skin(&self) -> &'static SkinDefinition {
        self.alt_skin
            .filter(|_| self.alt_mode_active)
            .unwrap_or(self.base_skin)
    }

    pub fn alt_mode_enabled(&self) -> bool {
        self.alt_skin.is_some()
    }

    pub fn alt_mode_active(&self) -> bool {
        self.alt_mode_active
    }

    pub fn is_switching_skin(&self) -> bool {
        self.alt_flash_timer.is_some()
    }

    /// Global alpha while the alternate skin fades in.
    pub fn fade_alpha(&self) -> f64 {
        if self.alt_mode_active && self.fade_in <= ALT_MODE_FADE_DURATION {
            (self.fade_in / ALT_MODE_FADE_DURATION).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Night visuals: dark mode flips the inversion.
    pub fn show_night(&self) -> bool {
        self.options.dark_mode ^ self.inverted
    }

    pub fn dark_mode(&self) -> bool {
        self.options.dark_mode
    }

    pub fn clear_time(&self) -> f64 {
        if self.cues.is_enabled() {
            CLEAR_TIME * AUDIO_CUE_CLEAR_TIME_FACTOR
        } else {
            CLEAR_TIME
        }
    }

    pub fn running_time(&self) -> f64 {
        self.running_time
    }

    pub fn play_count(&self) -> u32 {
        self.play_count
    }

    pub fn crash_time(&self) -> f64 {
        self.crash_time
    }

    pub fn is_frame_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn next_frame_due(&self) -> Option<f64> {
        self.scheduler.due()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}

/// Collectables spawn only while the alternate skin is available but not
/// yet on screen.
fn horizon_options_for(
    alt_available: bool,
    alt_active: bool,
    audio_cues: bool,
    narrow: bool,
) -> HorizonOptions {
    HorizonOptions {
        alt_mode_enabled: alt_available && !alt_active,
        alt_mode_active: alt_active,
        audio_cues,
        narrow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::core::constants::START_X_POS;
    use crate::session::host::MemoryHighScore;
    use crate::skins::{ClassicOnlyAssets, CLASSIC};

    fn run_frames(session: &mut GameSession, now: &mut f64, frames: u32) {
        for _ in 0..frames {
            *now += MS_PER_FRAME;
            session.pump(*now);
        }
    }

    fn running_session() -> (GameSession, f64) {
        let mut session = GameSession::headless(SessionOptions::default());
        let mut now = 0.0;
        session.pump(now);
        session.handle_action(InputAction::JumpPressed, now);
        run_frames(&mut session, &mut now, 120);
        (session, now)
    }

    #[test]
    fn test_starts_waiting_with_blink_loop() {
        let session = GameSession::headless(SessionOptions::default());
        assert_eq!(session.state(), GameState::Waiting);
        assert!(session.is_frame_pending());
        assert!((session.speed() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_intro_then_running() {
        let (session, _) = running_session();
        assert_eq!(session.state(), GameState::Running);
        assert!((session.avatar().x - START_X_POS).abs() < f64::EPSILON);
        assert_eq!(session.play_count(), 1);
    }

    #[test]
    fn test_world_frozen_during_intro() {
        let mut session = GameSession::headless(SessionOptions::default());
        let mut now = 0.0;
        session.handle_action(InputAction::JumpPressed, now);
        run_frames(&mut session, &mut now, 30);
        assert_eq!(session.state(), GameState::Intro);
        assert!(session.distance().abs() < f64::EPSILON);
        assert!((session.speed() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pause_and_resume() {
        let (mut session, mut now) = running_session();
        session.set_visible(false, now);
        assert_eq!(session.state(), GameState::Paused);
        assert!(!session.is_frame_pending());
        let frozen = session.distance();
        run_frames(&mut session, &mut now, 10);
        assert!((session.distance() - frozen).abs() < f64::EPSILON);

        session.set_visible(true, now);
        assert_eq!(session.state(), GameState::Running);
        run_frames(&mut session, &mut now, 2);
        assert!(session.distance() > frozen);
    }

    #[test]
    fn test_jump_release_resumes_pause() {
        let (mut session, now) = running_session();
        session.stop();
        session.handle_action(InputAction::JumpReleased, now);
        assert_eq!(session.state(), GameState::Running);
    }

    #[test]
    fn test_crash_frame_refreshes_meter_digits() {
        let (mut session, mut now) = running_session();
        session.distance = 3_990.0;
        run_frames(&mut session, &mut now, 1);
        assert!(session.score().is_achievement());

        // Digits hold while the achievement flashes.
        run_frames(&mut session, &mut now, 20);
        assert_eq!(session.score().digits(), "00100");

        session.running_time = session.clear_time() + 1.0;
        let params = crate::horizon::SpawnParams {
            canvas_width: session.width(),
            speed: session.speed(),
            gap_coefficient: 0.6,
            max_gap_coefficient: 1.5,
            max_obstacle_length: 1,
            double_gap: false,
            narrow: false,
        };
        let mut cactus =
            crate::horizon::Obstacle::new(CLASSIC.obstacles[0], &params, &mut session.rng);
        cactus.x = session.avatar().x + 10.0;
        session.horizon.obstacles.insert(0, cactus);
        run_frames(&mut session, &mut now, 1);

        assert_eq!(session.state(), GameState::Crashed);
        let expected = format!("{:05}", actual_distance(session.distance()));
        assert_ne!(expected, "00100");
        assert_eq!(session.score().digits(), expected);
    }

    #[test]
    fn test_duck_while_running() {
        let (mut session, now) = running_session();
        session.handle_action(InputAction::DuckPressed, now);
        assert!(session.avatar().ducking);
        session.handle_action(InputAction::DuckReleased, now);
        assert!(!session.avatar().ducking);
    }

    #[test]
    fn test_speed_mode_applies_on_next_start() {
        let mut session = GameSession::headless(SessionOptions::default());
        session.set_speed_mode(SpeedMode::Reduced);
        assert_eq!(session.speed_mode(), SpeedMode::Normal);
        assert_eq!(session.next_speed_mode(), SpeedMode::Reduced);
        session.handle_action(InputAction::JumpPressed, 0.0);
        assert_eq!(session.speed_mode(), SpeedMode::Reduced);
        assert!((session.speed() - 4.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_narrow_canvas_slows_start() {
        let session = GameSession::headless(SessionOptions {
            width: 300.0,
            ..Default::default()
        });
        // 6 * 300 / 600 * 1.2
        assert!((session.speed() - 3.6).abs() < 1e-9);
        assert!(session.is_narrow());
    }

    #[test]
    fn test_resize_is_debounced_and_clamped() {
        let (mut session, mut now) = running_session();
        session.request_resize(50.0, 400.0, now);
        session.pump(now);
        assert!((session.width() - 600.0).abs() < f64::EPSILON);
        run_frames(&mut session, &mut now, 20);
        assert!((session.width() - MIN_WIDTH).abs() < f64::EPSILON);
        assert!((session.height() - DEFAULT_HEIGHT).abs() < f64::EPSILON);
        assert_eq!(session.state(), GameState::Running);
        assert!(session.is_frame_pending());
    }

    #[test]
    fn test_arcade_caps_width() {
        assert_eq!(clamp_dimensions(1200.0, 150.0, true), (600.0, 150.0));
        assert_eq!(clamp_dimensions(1200.0, 150.0, false), (1200.0, 150.0));
    }

    #[test]
    fn test_alt_mode_requires_assets() {
        let options = SessionOptions {
            alt_skin: Some(SkinId::Prairie),
            ..Default::default()
        };
        let missing = GameSession::new(
            options.clone(),
            &ClassicOnlyAssets,
            Box::new(NoHighScoreHost),
        );
        assert!(!missing.alt_mode_enabled());
        assert!(!missing.horizon().options.alt_mode_enabled);

        let present = GameSession::headless(options);
        assert!(present.alt_mode_enabled());
    }

    #[test]
    fn test_initialize_high_score_reports_lower_stored_value() {
        let host = MemoryHighScore::new();
        let mut session = GameSession::new(
            SessionOptions::default(),
            &BuiltinAssets,
            Box::new(host.clone()),
        );
        session.initialize_high_score(5000.2);
        assert_eq!(session.score().high_score(), 5001);
        session.initialize_high_score(100.0);
        assert_eq!(session.score().high_score(), 5001);
        assert_eq!(host.record().value, 5001);
        assert_eq!(host.record().reports, 1);
    }

    #[test]
    fn test_jump_plays_button_press_without_cues() {
        let mut session = GameSession::headless(SessionOptions::default());
        session.handle_action(InputAction::JumpPressed, 0.0);
        let mut out = RecordingAudio::default();
        session.drain_audio(&mut out);
        assert_eq!(out.effects, vec![SoundEffect::ButtonPress]);
        assert!(out.notes.is_empty());
    }

    #[test]
    fn test_audio_cue_mode_extends_clear_time() {
        let mut session = GameSession::headless(SessionOptions::default());
        assert!((session.clear_time() - CLEAR_TIME).abs() < f64::EPSILON);
        session.set_audio_cues(true);
        assert!((session.clear_time() - 3600.0).abs() < 1e-9);
        assert!(session.horizon().options.audio_cues);
    }
}
