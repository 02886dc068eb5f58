//! The scrolling world: obstacles, ground, clouds, scenery and night.

pub mod decor;
pub mod ground;
pub mod logic;
pub mod night;
pub mod obstacle;

pub use decor::{BackgroundElement, Cloud, Decoration};
pub use ground::HorizonLine;
pub use logic::{Horizon, HorizonOptions};
pub use night::NightCycle;
pub use obstacle::{min_gap, Obstacle, SpawnParams};

use rand::Rng;

/// Uniform integer in `[min, max]`, returned as f64.
pub(crate) fn random_num(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    let lo = min.floor() as i64;
    let hi = max.floor() as i64;
    if hi <= lo {
        return lo as f64;
    }
    rng.gen_range(lo..=hi) as f64
}
