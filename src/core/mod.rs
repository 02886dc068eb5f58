//! Simulation primitives shared by every component.

pub mod collision;
pub mod constants;
pub mod profile;

pub use collision::{check_for_collision, Collidable, CollisionBox, CollisionHit};
pub use constants::*;
pub use profile::{DifficultyProfile, JumpPhysics, SpeedMode};
