//! Dino Runner - side-scrolling endless runner.
//!
//! The simulation is terminal independent: `session::GameSession` owns the
//! world and is driven by timestamps and queued input. `render` turns a
//! session into draw calls and `ui` maps those onto a ratatui frame.

pub mod audio;
pub mod avatar;
pub mod core;
pub mod horizon;
pub mod render;
pub mod score;
pub mod session;
pub mod settings;
pub mod simulator;
pub mod skins;
pub mod ui;
pub mod utils;
