//! Disabled-mode notice.

use super::game_common::render_notice;
use super::runner_scene::TITLE;
use crate::session::DisabledNotice;
use ratatui::{layout::Rect, style::Color, Frame};

pub fn render_disabled_notice(frame: &mut Frame, area: Rect, notice: &DisabledNotice) {
    render_notice(frame, area, TITLE.trim(), &notice.message, Color::Gray);
}
