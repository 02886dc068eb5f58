//! Headless autopilot simulator.
//!
//! Plays many seeded sessions without a terminal to check:
//! - How far a reasonable player gets at each speed profile
//! - Which obstacle types end runs
//! - That session invariants hold frame by frame (monotonic distance,
//!   speed cap, spawn spacing, duplication limit, high score)
//!
//! Sessions are real `GameSession`s driven through the gamepad input path.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{GameStats, RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
