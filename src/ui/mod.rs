//! Terminal front end.

pub mod game_common;
pub mod notice_scene;
pub mod runner_scene;

pub use notice_scene::render_disabled_notice;
pub use runner_scene::{
    canvas_width_for, play_field, render_runner_scene, CellCanvas, CellMapping,
};
