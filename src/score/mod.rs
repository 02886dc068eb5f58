//! Score display: distance meter, high score and the game over panel.

pub mod game_over;
pub mod meter;

pub use game_over::GameOverPanel;
pub use meter::{actual_distance, ScoreTracker};
