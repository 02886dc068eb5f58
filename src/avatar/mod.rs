//! The player avatar: jump physics, ducking and the pose state machine.

pub mod logic;
pub mod types;

pub use types::{Avatar, Pose};
