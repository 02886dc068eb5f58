//! Rendering: a surface-agnostic draw pass over the session.

pub mod draw;
pub mod types;

pub use draw::{draw_session, obstacle_source};
pub use types::{Canvas, DrawCall, Rect, RecordingCanvas, Shade, SpriteKind};
