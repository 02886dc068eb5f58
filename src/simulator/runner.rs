//! Headless simulation runner.
//!
//! Each run drives a real `GameSession` on a fake clock. An autopilot reads
//! the world, presses buttons on a virtual gamepad, and the gamepad poller
//! feeds the session's input queue exactly as a physical pad would. A
//! monitor checks the session after every frame.

use super::config::SimConfig;
use super::report::{GameStats, RunStats, SimReport};
use crate::core::constants::{MAX_OBSTACLE_DUPLICATION, MS_PER_FRAME};
use crate::score::meter::actual_distance;
use crate::session::gamepad::{DUCK_BUTTON, JUMP_BUTTON, RESTART_BUTTON};
use crate::session::{
    GameSession, GameState, GamepadPoller, GamepadSnapshot, GamepadSource, SessionOptions,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const EPSILON: f64 = 1e-6;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let seed = match config.seed {
            Some(seed) => seed.wrapping_add(run_idx as u64),
            None => rand::random(),
        };

        let run_stats = simulate_single_run(config, seed);

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Seed {}, Games {}, Best {}, Frames {}, Violations {}",
                run_idx + 1,
                config.num_runs,
                seed,
                run_stats.games.len(),
                run_stats.best_score,
                run_stats.frames,
                run_stats.violations.len()
            );
        }
        all_runs.push(run_stats);
    }

    SimReport::from_runs(all_runs, config.max_frames_per_run)
}

/// Play one session until `games_per_run` games end or the frame budget runs out.
pub fn simulate_single_run(config: &SimConfig, seed: u64) -> RunStats {
    let options = SessionOptions {
        width: config.width,
        speed_mode: config.speed_mode,
        audio_cues: config.audio_cues,
        alt_skin: config.alt_skin,
        seed,
        ..SessionOptions::default()
    };
    let mut session = GameSession::headless(options);
    let sender = session.input_sender();
    let mut poller = GamepadPoller::new();
    let mut pilot = Autopilot::new(config, seed);
    let mut monitor = Monitor::new(&session);

    let mut games = Vec::new();
    let mut game = GameTracker::default();
    let mut now = 0.0;
    let mut frames = 0;

    while frames < config.max_frames_per_run {
        pilot.decide(&session, now);
        poller.forward(&mut pilot, &sender);

        now += MS_PER_FRAME;
        frames += 1;
        session.pump(now);

        let previous = monitor.last_state;
        monitor.observe(&session, frames);
        game.observe(&session);

        if session.state() == GameState::Crashed && previous != GameState::Crashed {
            let stats = game.finish(&session);
            tracing::debug!(seed, score = stats.score, cause = ?stats.cause, "game over");
            games.push(stats);
            if games.len() as u32 >= config.games_per_run {
                break;
            }
        }
    }

    let timed_out = frames >= config.max_frames_per_run;
    if timed_out && session.state().is_playing() {
        games.push(game.finish(&session));
    }

    RunStats {
        seed,
        best_score: session.score().high_score_actual(),
        games,
        frames,
        timed_out,
        violations: monitor.violations,
    }
}

// ── Autopilot ───────────────────────────────────────────────────────

/// Virtual one-pad controller that reacts to the lead obstacle.
struct Autopilot {
    rng: ChaCha8Rng,
    reaction_frames: f64,
    miss_chance: f64,
    jump: bool,
    duck: bool,
    restart: bool,
    /// Spawn index of the obstacle last judged.
    judged: Option<u64>,
    ignoring: bool,
}

impl Autopilot {
    fn new(config: &SimConfig, seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed.rotate_left(17)),
            reaction_frames: config.reaction_frames,
            miss_chance: config.miss_chance.clamp(0.0, 1.0),
            jump: false,
            duck: false,
            restart: false,
            judged: None,
            ignoring: false,
        }
    }

    fn decide(&mut self, session: &GameSession, now: f64) {
        match session.state() {
            GameState::Waiting => self.jump = true,
            GameState::Intro | GameState::Running => self.steer(session),
            GameState::Crashed => {
                self.jump = false;
                self.duck = false;
                // Press then release; the release restarts.
                self.restart = !self.restart && session.restart_ready(now);
            }
            GameState::Paused => {}
        }
    }

    fn steer(&mut self, session: &GameSession) {
        self.restart = false;
        let avatar = session.avatar();
        let horizon = session.horizon();
        let first_index = horizon.spawned - horizon.obstacles.len() as u64;

        let ahead = horizon
            .obstacles
            .iter()
            .enumerate()
            .find(|(_, o)| o.x + o.width > avatar.x);
        let Some((offset, obstacle)) = ahead else {
            self.jump = false;
            self.duck = false;
            return;
        };

        let index = first_index + offset as u64;
        if self.judged != Some(index) {
            self.judged = Some(index);
            self.ignoring = obstacle.is_collectable() || self.rng.gen_bool(self.miss_chance);
        }
        if self.ignoring {
            self.jump = false;
            self.duck = false;
            return;
        }

        let gap = obstacle.x - (avatar.x + avatar.width());
        let in_range = gap <= session.speed() * self.reaction_frames;
        let duck_top = avatar.ground_y + avatar.height() - avatar.sprite.height_duck;
        let overhead = obstacle.y + obstacle.kind.height <= duck_top;

        if overhead {
            self.duck = in_range && !avatar.jumping;
            self.jump = false;
        } else {
            self.jump = in_range && !avatar.ducking;
            self.duck = false;
        }
    }
}

impl GamepadSource for Autopilot {
    fn snapshot(&mut self) -> Vec<Option<GamepadSnapshot>> {
        let mut buttons = vec![false; RESTART_BUTTON + 1];
        buttons[JUMP_BUTTON] = self.jump;
        buttons[DUCK_BUTTON] = self.duck;
        buttons[RESTART_BUTTON] = self.restart;
        vec![Some(GamepadSnapshot { buttons })]
    }
}

// ── Per-game tracking ───────────────────────────────────────────────

#[derive(Debug, Default)]
struct GameTracker {
    frames: u64,
    top_speed: f64,
    saw_night: bool,
    saw_alt_mode: bool,
}

impl GameTracker {
    fn observe(&mut self, session: &GameSession) {
        if session.state() != GameState::Running {
            return;
        }
        self.frames += 1;
        self.top_speed = self.top_speed.max(session.speed());
        self.saw_night |= session.is_inverted();
        self.saw_alt_mode |= session.alt_mode_active();
    }

    fn finish(&mut self, session: &GameSession) -> GameStats {
        let tracker = std::mem::take(self);
        let crashed = session.state() == GameState::Crashed;
        GameStats {
            score: actual_distance(session.distance()),
            frames: tracker.frames,
            top_speed: tracker.top_speed,
            jumps: session.avatar().jump_count,
            cause: crashed
                .then(|| session.horizon().lead_obstacle().map(|o| o.kind.name))
                .flatten(),
            night: tracker.saw_night,
            alt_mode: tracker.saw_alt_mode,
        }
    }
}

// ── Invariant monitor ───────────────────────────────────────────────

/// Checks session invariants frame by frame and records violations.
struct Monitor {
    last_state: GameState,
    last_distance: f64,
    last_high_score: u64,
    last_spawned: u64,
    last_alt_mode: bool,
    /// Most recent spawned type and how many times in a row it appeared.
    streak: Option<(&'static str, usize)>,
    violations: Vec<String>,
}

impl Monitor {
    fn new(session: &GameSession) -> Self {
        Self {
            last_state: session.state(),
            last_distance: session.distance(),
            last_high_score: session.score().high_score(),
            last_spawned: session.horizon().spawned,
            last_alt_mode: session.alt_mode_active(),
            streak: None,
            violations: Vec::new(),
        }
    }

    fn observe(&mut self, session: &GameSession, frame: u64) {
        let state = session.state();
        let distance = session.distance();

        if state == GameState::Running
            && self.last_state == GameState::Running
            && distance + EPSILON < self.last_distance
        {
            self.flag(frame, format!("distance went backwards: {:.1} -> {:.1}", self.last_distance, distance));
        }
        if state == GameState::Crashed
            && self.last_state == GameState::Crashed
            && (distance - self.last_distance).abs() > EPSILON
        {
            self.flag(frame, "distance changed after crash".to_string());
        }

        let max_speed = session.profile().max_speed;
        if session.speed() > max_speed + EPSILON {
            self.flag(frame, format!("speed {:.3} above max {:.3}", session.speed(), max_speed));
        }

        let high_score = session.score().high_score();
        if high_score < self.last_high_score {
            self.flag(frame, "high score decreased".to_string());
        }

        // A restart or skin switch rebuilds the horizon.
        let alt_mode = session.alt_mode_active();
        let restarted = self.last_state == GameState::Crashed && state != GameState::Crashed;
        if restarted || alt_mode != self.last_alt_mode {
            self.streak = None;
        }
        self.check_spawn(session, frame);

        self.last_state = state;
        self.last_distance = distance;
        self.last_high_score = high_score;
        self.last_alt_mode = alt_mode;
    }

    fn check_spawn(&mut self, session: &GameSession, frame: u64) {
        let horizon = session.horizon();
        let spawned = horizon.spawned;
        let fresh = spawned.saturating_sub(self.last_spawned);
        self.last_spawned = spawned;
        if fresh != 1 {
            if fresh > 1 {
                self.streak = None;
            }
            return;
        }
        let Some(newest) = horizon.obstacles.last() else {
            return;
        };

        if let [.., prev, _] = horizon.obstacles.as_slice() {
            let clear_of = prev.x + prev.width + prev.gap;
            if newest.x + EPSILON < clear_of {
                let message = format!(
                    "{} spawned at {:.1} inside gap of {} ending at {:.1}",
                    newest.kind.name, newest.x, prev.kind.name, clear_of
                );
                self.flag(frame, message);
            }
        }

        let name = newest.kind.name;
        let run = match self.streak {
            Some((last, run)) if last == name => run + 1,
            _ => 1,
        };
        self.streak = Some((name, run));
        if run > MAX_OBSTACLE_DUPLICATION {
            self.flag(frame, format!("{} spawned {} times in a row", name, run));
        }
    }

    fn flag(&mut self, frame: u64, message: String) {
        tracing::warn!(frame, %message, "invariant violated");
        self.violations.push(format!("frame {}: {}", frame, message));
    }
}
