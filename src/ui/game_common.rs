//! Window chrome around the play field: border, status lines, side panel
//! and the full-screen notice.
//!
//! ```text
//! ┌─ Dino Runner ──────────────────────┬─ Run ───────┐
//! │ play field                         │ side panel  │
//! │ status text                        │             │
//! │ [key] action  [key] action         │             │
//! └────────────────────────────────────┴─────────────┘
//! ```

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub const SIDE_PANEL_WIDTH: u16 = 24;
pub const FIELD_MIN_HEIGHT: u16 = 10;
const STATUS_LINES: u16 = 2;

/// Areas inside the outer border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneChrome {
    pub field: Rect,
    pub status: Rect,
    pub panel: Rect,
}

impl SceneChrome {
    /// Split the inside of the outer border. Draws nothing, so the input
    /// thread can map mouse cells with the same geometry.
    pub fn split(outer: Rect) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(outer);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
            .split(inner);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(FIELD_MIN_HEIGHT), Constraint::Length(STATUS_LINES)])
            .split(columns[0]);
        let (field, status, panel) = (rows[0], rows[1], columns[1]);
        Self { field, status, panel }
    }

    /// Clear `outer`, draw the titled border and return the split.
    pub fn draw(frame: &mut Frame, outer: Rect, title: &str, accent: Color) -> Self {
        frame.render_widget(Clear, outer);
        frame.render_widget(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent)),
            outer,
        );
        Self::split(outer)
    }
}

/// One `[key] action` pair on the hint line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

pub const fn hint(key: &'static str, action: &'static str) -> KeyHint {
    KeyHint { key, action }
}

/// Headline plus key hints shown under the play field.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine<'a> {
    pub text: &'a str,
    pub color: Color,
    pub hints: Vec<KeyHint>,
}

impl StatusLine<'_> {
    fn hint_spans(&self) -> Vec<Span<'static>> {
        self.hints
            .iter()
            .enumerate()
            .flat_map(|(i, h)| {
                let sep = (i > 0).then(|| Span::raw("  "));
                sep.into_iter().chain([
                    Span::styled(h.key, Style::default().fg(Color::White)),
                    Span::styled(format!(" {}", h.action), Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let mut lines = vec![Line::styled(self.text, Style::default().fg(self.color))];
        if area.height >= STATUS_LINES && !self.hints.is_empty() {
            lines.push(Line::from(self.hint_spans()));
        }
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

/// Bordered side panel titled `title`. Returns the area for its lines.
pub fn side_panel(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Whole-screen notice replacing the scene. The message wraps to the frame.
pub fn render_notice(frame: &mut Frame, area: Rect, title: &str, message: &str, accent: Color) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::styled(title, Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::styled(message, Style::default().fg(Color::White)),
        Line::raw(""),
        Line::styled("[q] Quit", Style::default().fg(Color::DarkGray)),
    ];
    let wrap_width = inner.width.max(1) as usize;
    let height = text
        .iter()
        .map(|l| l.width().max(1).div_ceil(wrap_width) as u16)
        .sum::<u16>()
        .min(inner.height);
    let top = inner.y + inner.height.saturating_sub(height) / 2;

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        Rect::new(inner.x, top, inner.width, height),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_panel_width_and_status_lines() {
        let chrome = SceneChrome::split(Rect::new(0, 0, 120, 30));
        assert_eq!(chrome.panel.width, SIDE_PANEL_WIDTH);
        assert_eq!(chrome.status.height, STATUS_LINES);
        assert_eq!(chrome.field.x, 1);
        assert_eq!(chrome.field.y, 1);
        assert_eq!(chrome.field.height + chrome.status.height, 28);
        assert_eq!(chrome.field.width + chrome.panel.width, 118);
    }

    #[test]
    fn test_hint_spans_are_separated() {
        let status = StatusLine {
            text: "Run!",
            color: Color::White,
            hints: vec![hint("[Up]", "Jump"), hint("[q]", "Quit")],
        };
        let text: String = status
            .hint_spans()
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, "[Up] Jump  [q] Quit");
    }
}
