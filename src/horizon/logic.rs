//! Horizon: ground lines, obstacle stream, decorations and the night cycle.
//!
//! The horizon owns the obstacle spawning policy. The session only ever
//! reads the lead obstacle for collision tests.

use super::decor::{update_stream, BackgroundElement, Cloud};
use super::ground::HorizonLine;
use super::night::NightCycle;
use super::obstacle::{Obstacle, SpawnParams};
use crate::core::constants::{
    BG_CLOUD_SPEED, CLOUD_FREQUENCY, MAX_CLOUDS, MAX_OBSTACLE_DUPLICATION, MAX_SPAWN_ATTEMPTS,
};
use crate::core::DifficultyProfile;
use crate::skins::{ObstacleTypeDef, SkinDefinition};
use rand::Rng;

/// Construction-time switches for a horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HorizonOptions {
    /// Collectables may spawn (alt mode enabled but not yet active).
    pub alt_mode_enabled: bool,
    /// Running on the alternate skin.
    pub alt_mode_active: bool,
    pub audio_cues: bool,
    pub narrow: bool,
}

#[derive(Debug, Clone)]
pub struct Horizon {
    pub skin: &'static SkinDefinition,
    /// Skin catalog tuned for the active profile.
    pub catalog: Vec<ObstacleTypeDef>,
    pub width: f64,
    pub gap_coefficient: f64,
    pub options: HorizonOptions,

    pub obstacles: Vec<Obstacle>,
    /// Recently spawned type names, most recent first.
    pub history: Vec<&'static str>,
    pub clouds: Vec<Cloud>,
    pub background_els: Vec<BackgroundElement>,
    last_background_el: Option<&'static str>,
    pub lines: Vec<HorizonLine>,
    pub night: NightCycle,

    /// Obstacles spawned since construction.
    pub spawned: u64,
}

impl Horizon {
    pub fn new(
        skin: &'static SkinDefinition,
        width: f64,
        profile: &DifficultyProfile,
        options: HorizonOptions,
        rng: &mut impl Rng,
    ) -> Self {
        let mut horizon = Self {
            skin,
            catalog: skin.obstacles.iter().map(|t| t.adjusted_for(profile)).collect(),
            width,
            gap_coefficient: profile.effective_gap_coefficient(),
            options,
            obstacles: Vec::new(),
            history: Vec::new(),
            clouds: Vec::new(),
            background_els: Vec::new(),
            last_background_el: None,
            lines: skin.lines.iter().copied().map(HorizonLine::new).collect(),
            night: NightCycle::new(width, rng),
            spawned: 0,
        };
        if skin.has_clouds {
            horizon.add_cloud(rng);
        }
        horizon
    }

    /// Advance every stream by `dt` milliseconds at `speed`.
    ///
    /// `update_obstacles` is false during the intro and before the clear
    /// time, which freezes spawning without freezing the scenery.
    pub fn update(
        &mut self,
        dt: f64,
        speed: f64,
        update_obstacles: bool,
        show_night: bool,
        rng: &mut impl Rng,
    ) {
        if self.options.alt_mode_active {
            self.update_background_els(rng);
        }

        for line in &mut self.lines {
            line.update(dt, speed, rng);
        }

        if !self.options.alt_mode_active || self.skin.has_clouds {
            self.night.update(show_night, rng);
            self.update_clouds(dt, speed, rng);
        }

        if update_obstacles {
            self.update_obstacles(dt, speed, rng);
        }
    }

    fn update_clouds(&mut self, dt: f64, speed: f64, rng: &mut impl Rng) {
        let cloud_speed = BG_CLOUD_SPEED / 1000.0 * dt * speed;
        let sprite = self.skin.cloud;
        let width = self.width;
        update_stream(
            &mut self.clouds,
            cloud_speed,
            MAX_CLOUDS,
            width,
            CLOUD_FREQUENCY,
            rng,
            |r| Some(Cloud::new(&sprite, width, r)),
        );
    }

    fn add_cloud(&mut self, rng: &mut impl Rng) {
        self.clouds.push(Cloud::new(&self.skin.cloud, self.width, rng));
    }

    fn update_background_els(&mut self, rng: &mut impl Rng) {
        let skin = self.skin;
        let width = self.width;
        let last = &mut self.last_background_el;
        update_stream(
            &mut self.background_els,
            skin.background_config.speed,
            skin.background_config.max_elements,
            width,
            CLOUD_FREQUENCY,
            rng,
            |r| {
                let defs = skin.background_elements;
                if defs.is_empty() {
                    return None;
                }
                let mut index = r.gen_range(0..defs.len());
                // Avoid showing the same element twice in a row.
                while defs.len() > 1 && Some(defs[index].name) == *last {
                    index = r.gen_range(0..defs.len());
                }
                *last = Some(defs[index].name);
                Some(BackgroundElement::new(
                    defs[index],
                    &skin.background_config,
                    width,
                    r,
                ))
            },
        );
    }

    fn update_obstacles(&mut self, dt: f64, speed: f64, rng: &mut impl Rng) {
        for obstacle in &mut self.obstacles {
            obstacle.update(dt, speed);
        }
        self.obstacles.retain(|o| !o.remove);

        let width = self.width;
        let needs_follower = match self.obstacles.last() {
            Some(last) => {
                !last.following_created
                    && last.is_visible()
                    && last.x + last.width + last.gap < width
            }
            None => true,
        };

        if needs_follower {
            if let Some(last) = self.obstacles.last_mut() {
                last.following_created = true;
            }
            self.add_new_obstacle(speed, rng);
        }
    }

    fn spawn_params(&self, speed: f64) -> SpawnParams {
        SpawnParams {
            canvas_width: self.width,
            speed,
            gap_coefficient: self.gap_coefficient,
            max_gap_coefficient: self.skin.max_gap_coefficient,
            max_obstacle_length: self.skin.max_obstacle_length,
            double_gap: self.options.audio_cues,
            narrow: self.options.narrow,
        }
    }

    /// Spawn one obstacle at the right edge, if any type is eligible.
    pub fn add_new_obstacle(&mut self, speed: f64, rng: &mut impl Rng) {
        let Some(index) = self.select_obstacle_type(speed, rng) else {
            return;
        };
        let kind = self.catalog[index];
        let params = self.spawn_params(speed);
        self.obstacles.push(Obstacle::new(kind, &params, rng));

        self.history.insert(0, kind.name);
        self.history.truncate(MAX_OBSTACLE_DUPLICATION);
        self.spawned += 1;
    }

    /// Catalog indices that may spawn at all under the current options.
    pub fn eligible_types(&self) -> Vec<usize> {
        self.catalog
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.collectable || self.options.alt_mode_enabled)
            .map(|(i, _)| i)
            .collect()
    }

    /// Pick a catalog index uniformly, resampling rejected picks.
    ///
    /// A pick is rejected when it would exceed the duplication limit or the
    /// speed is below the type's minimum. After `MAX_SPAWN_ATTEMPTS`
    /// rejections the first acceptable type wins; failing that, the
    /// non-repeating type with the lowest minimum speed.
    pub fn select_obstacle_type(&self, speed: f64, rng: &mut impl Rng) -> Option<usize> {
        let eligible = self.eligible_types();
        if eligible.is_empty() {
            return None;
        }

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let index = eligible[rng.gen_range(0..eligible.len())];
            if self.is_acceptable(index, speed) {
                return Some(index);
            }
        }

        if let Some(index) = eligible.iter().copied().find(|&i| self.is_acceptable(i, speed)) {
            return Some(index);
        }
        tracing::debug!(speed, "no obstacle type acceptable, using slowest non-repeating");
        eligible
            .iter()
            .copied()
            .filter(|&i| !self.duplicate_obstacle_check(self.catalog[i].name))
            .min_by(|&a, &b| {
                self.catalog[a]
                    .min_speed
                    .total_cmp(&self.catalog[b].min_speed)
            })
            .or_else(|| eligible.first().copied())
    }

    fn is_acceptable(&self, index: usize, speed: f64) -> bool {
        let kind = &self.catalog[index];
        !self.duplicate_obstacle_check(kind.name) && speed >= kind.min_speed
    }

    /// True when `name` already fills the duplication window.
    pub fn duplicate_obstacle_check(&self, name: &str) -> bool {
        let run = self.history.iter().take_while(|&&h| h == name).count();
        run >= MAX_OBSTACLE_DUPLICATION
    }

    pub fn lead_obstacle(&self) -> Option<&Obstacle> {
        self.obstacles.first()
    }

    pub fn lead_obstacle_mut(&mut self) -> Option<&mut Obstacle> {
        self.obstacles.first_mut()
    }

    pub fn remove_first_obstacle(&mut self) -> Option<Obstacle> {
        if self.obstacles.is_empty() {
            None
        } else {
            Some(self.obstacles.remove(0))
        }
    }

    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.obstacles.clear();
        self.history.clear();
        for line in &mut self.lines {
            line.reset();
        }
        self.night.reset(rng);
    }

    /// Re-layout for a new canvas width.
    pub fn resize(&mut self, width: f64, narrow: bool) {
        self.width = width;
        self.night.container_width = width;
        self.options.narrow = narrow;
    }
}
