//! Terminal rendering of the runner.
//!
//! A `CellCanvas` rasterises the session's draw calls into a character grid
//! (roughly `UNITS_PER_COL` logical units per column), which is then stamped
//! row by row as Paragraph widgets.

use super::game_common::{hint, side_panel, SceneChrome, StatusLine};
use crate::avatar::Pose;
use crate::render::{draw_session, Canvas, Rect as CanvasRect, Shade, SpriteKind};
use crate::score::actual_distance;
use crate::session::{GameSession, GameState};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub const TITLE: &str = " Dino Runner ";
pub const UNITS_PER_COL: f64 = 6.0;

const GROUND_CHAR: char = '▓';
const GROUND_SUB: char = '░';
const NIGHT_BG: Color = Color::Rgb(20, 22, 36);

/// Logical canvas width for a play field `cols` cells wide.
pub fn canvas_width_for(cols: u16) -> f64 {
    cols as f64 * UNITS_PER_COL
}

/// Play field of the scene for a frame of `area`.
pub fn play_field(area: Rect) -> Rect {
    SceneChrome::split(area).field
}

/// Mapping between terminal cells and logical canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMapping {
    pub area: Rect,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl CellMapping {
    pub fn new(area: Rect, canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            area,
            canvas_width: canvas_width.max(1.0),
            canvas_height: canvas_height.max(1.0),
        }
    }

    fn col(&self, x: f64) -> i32 {
        (x / self.canvas_width * self.area.width as f64).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        (y / self.canvas_height * self.area.height as f64).floor() as i32
    }

    /// Canvas point at the centre of a terminal cell, if it lies on the field.
    pub fn to_canvas(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let a = self.area;
        if column < a.x || row < a.y || column >= a.x + a.width || row >= a.y + a.height {
            return None;
        }
        let cx = (column - a.x) as f64 + 0.5;
        let cy = (row - a.y) as f64 + 0.5;
        Some((
            cx * self.canvas_width / a.width as f64,
            cy * self.canvas_height / a.height as f64,
        ))
    }
}

/// Cell in the render buffer with foreground and background colors.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

pub struct CellCanvas {
    mapping: CellMapping,
    cells: Vec<Vec<Cell>>,
}

impl CellCanvas {
    pub fn new(mapping: CellMapping) -> Self {
        let row = vec![Cell::default(); mapping.area.width as usize];
        Self {
            cells: vec![row; mapping.area.height as usize],
            mapping,
        }
    }

    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(col)).map(|c| c.ch)
    }

    pub fn row_text(&self, row: usize) -> String {
        self.cells
            .get(row)
            .map(|r| r.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    fn put(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if col < 0 || row < 0 {
            return;
        }
        if let Some(cell) = self
            .cells
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    fn put_text(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, fg);
        }
    }

    /// Cell span covered by a canvas rectangle, at least one cell.
    fn span(&self, dest: CanvasRect) -> (i32, i32, i32, i32) {
        let left = self.mapping.col(dest.x);
        let top = self.mapping.row(dest.y);
        let right = self.mapping.col(dest.right() - 0.01).max(left);
        let bottom = self.mapping.row(dest.bottom() - 0.01).max(top);
        (left, top, right, bottom)
    }

    fn fill(&mut self, dest: CanvasRect, ch: char, fg: Color) {
        let (left, top, right, bottom) = self.span(dest);
        for row in top..=bottom {
            for col in left..=right {
                self.put(col, row, ch, fg);
            }
        }
    }

    fn draw_avatar(&mut self, pose: Pose, dest: CanvasRect, fg: Color) {
        let (left, top, right, bottom) = self.span(dest);
        for row in top..=bottom {
            for col in left..=right {
                let ch = match pose {
                    Pose::Ducking => '▄',
                    Pose::Crashed if row == top && col == right => 'x',
                    Pose::Running if row == bottom => {
                        if col == left {
                            '/'
                        } else if col == right {
                            '\\'
                        } else {
                            ' '
                        }
                    }
                    _ => '█',
                };
                if ch != ' ' {
                    self.put(col, row, ch, fg);
                }
            }
        }
    }

    /// Stamp the buffer into `area` row by row.
    pub fn stamp(&self, frame: &mut Frame) {
        let area = self.mapping.area;
        for (row_idx, row_data) in self.cells.iter().enumerate() {
            let mut spans: Vec<Span> = Vec::new();
            let mut current_fg = Color::Reset;
            let mut current_bg = Color::Reset;
            let mut current_text = String::new();

            for &cell in row_data.iter() {
                if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current_text),
                        Style::default().fg(current_fg).bg(current_bg),
                    ));
                }
                current_fg = cell.fg;
                current_bg = cell.bg;
                current_text.push(cell.ch);
            }
            if !current_text.is_empty() {
                spans.push(Span::styled(
                    current_text,
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }

            let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }
    }
}

fn faded(color: Color, alpha: f64) -> Color {
    if alpha < 0.75 {
        Color::DarkGray
    } else {
        color
    }
}

fn obstacle_glyph(name: &str, collectable: bool) -> (char, Color) {
    if collectable {
        ('*', Color::LightYellow)
    } else if name.contains("PTERODACTYL") {
        ('V', Color::Rgb(160, 80, 160))
    } else if name.contains("CACTUS") {
        ('|', Color::Rgb(60, 140, 60))
    } else {
        ('#', Color::Rgb(140, 110, 80))
    }
}

impl Canvas for CellCanvas {
    fn clear(&mut self) {
        for row in self.cells.iter_mut() {
            row.fill(Cell::default());
        }
    }

    fn fill_rect(&mut self, rect: CanvasRect, shade: Shade) {
        let bg = match shade {
            Shade::Day => Color::Reset,
            Shade::Night => NIGHT_BG,
        };
        let (left, top, right, bottom) = self.span(rect);
        for row in top.max(0)..=bottom {
            for col in left.max(0)..=right {
                if let Some(cell) = self
                    .cells
                    .get_mut(row as usize)
                    .and_then(|r| r.get_mut(col as usize))
                {
                    cell.bg = bg;
                }
            }
        }
    }

    fn draw_sprite(&mut self, kind: SpriteKind, _source: CanvasRect, dest: CanvasRect, alpha: f64) {
        if alpha < 0.3 {
            return;
        }
        let col = self.mapping.col(dest.x);
        let row = self.mapping.row(dest.y);
        match kind {
            SpriteKind::Avatar(pose) => {
                let fg = if pose == Pose::Crashed {
                    Color::LightRed
                } else {
                    Color::Gray
                };
                self.draw_avatar(pose, dest, faded(fg, alpha));
            }
            SpriteKind::Obstacle { name, collectable } => {
                let (ch, fg) = obstacle_glyph(name, collectable);
                self.fill(dest, ch, faded(fg, alpha));
            }
            SpriteKind::Cloud => {
                let mid = self.mapping.row(dest.y + dest.height / 2.0);
                let (left, _, right, _) = self.span(dest);
                for c in left..=right {
                    self.put(c, mid, '~', faded(Color::Gray, alpha));
                }
            }
            SpriteKind::BackgroundElement(_) => {
                self.fill(dest, '^', faded(Color::Rgb(70, 90, 70), alpha));
            }
            SpriteKind::HorizonLine => {
                let ground = self.mapping.row(dest.bottom() - 0.01);
                let (left, _, right, _) = self.span(dest);
                for c in left..=right {
                    self.put(c, ground, GROUND_CHAR, Color::Rgb(90, 90, 90));
                    if c % 5 == 0 {
                        self.put(c, ground + 1, GROUND_SUB, Color::Rgb(70, 70, 70));
                    }
                }
            }
            SpriteKind::Moon => self.put(col, row, '◐', faded(Color::White, alpha)),
            SpriteKind::Star => self.put(col, row, '·', faded(Color::White, alpha)),
            SpriteKind::Digit(glyph) => {
                let ch = match glyph {
                    10 => 'H',
                    11 => 'I',
                    d => char::from_digit(d as u32, 10).unwrap_or(' '),
                };
                self.put(col, row, ch, faded(Color::White, alpha));
            }
            SpriteKind::GameOverText { alt } => {
                let text = if alt { "G O O D  R U N" } else { "G A M E  O V E R" };
                let center = self.mapping.col(dest.x + dest.width / 2.0);
                let start = center - text.chars().count() as i32 / 2;
                self.put_text(start, row, text, Color::White);
            }
            SpriteKind::RestartButton => {
                let center = self.mapping.col(dest.x + dest.width / 2.0);
                self.put(center, row, '↻', Color::White);
            }
        }
    }
}

/// Render the runner scene. Returns the cell mapping of the play field.
pub fn render_runner_scene(frame: &mut Frame, area: Rect, session: &GameSession, now: f64) -> CellMapping {
    let chrome = SceneChrome::draw(frame, area, TITLE, Color::Gray);

    let mapping = CellMapping::new(chrome.field, session.width(), session.height());
    let mut canvas = CellCanvas::new(mapping);
    draw_session(session, &mut canvas);
    canvas.stamp(frame);

    if session.state() == GameState::Waiting {
        render_start_prompt(frame, chrome.field);
    }

    status_line(session, now).render(frame, chrome.status);
    render_info_panel(frame, chrome.panel, session);
    mapping
}

/// Headline and key hints for the current state.
fn status_line(session: &GameSession, now: f64) -> StatusLine<'static> {
    let (text, color, hints) = match session.state() {
        GameState::Waiting => (
            "Ready",
            Color::LightYellow,
            vec![
                hint("[Space/Up]", "Start"),
                hint("[s]", "Speed"),
                hint("[a]", "Audio cues"),
                hint("[q]", "Quit"),
            ],
        ),
        GameState::Intro | GameState::Running => {
            let down = if session.alt_mode_active() {
                "Jump"
            } else if session.avatar().ducking {
                "Stand"
            } else {
                "Duck"
            };
            (
                "Run!",
                Color::LightYellow,
                vec![hint("[Space/Up]", "Jump"), hint("[Down]", down), hint("[q]", "Quit")],
            )
        }
        GameState::Paused => (
            "Paused",
            Color::Yellow,
            vec![hint("[Space]", "Resume"), hint("[q]", "Quit")],
        ),
        GameState::Crashed if session.restart_ready(now) => (
            "Game over",
            Color::LightRed,
            vec![
                hint("[Enter/Space]", "Restart"),
                hint("[Click HI]", "Reset best"),
                hint("[q]", "Quit"),
            ],
        ),
        GameState::Crashed => (
            "Game over...",
            Color::DarkGray,
            vec![hint("[Click HI]", "Reset best"), hint("[q]", "Quit")],
        ),
    };
    StatusLine { text, color, hints }
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &GameSession) {
    let inner = side_panel(frame, area, " Run ");
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));

    let mode = if session.next_speed_mode() != session.speed_mode() {
        format!("{} → {}", session.speed_mode().name(), session.next_speed_mode().name())
    } else {
        session.speed_mode().name().to_string()
    };
    let on_off = |flag: bool| if flag { "on" } else { "off" };

    let lines: Vec<Line> = vec![
        Line::from(vec![
            label("Score: "),
            Span::styled(
                actual_distance(session.distance()).to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("Best:  "),
            Span::styled(
                session.score().high_score_actual().to_string(),
                Style::default().fg(Color::LightYellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            label("Speed: "),
            Span::styled(
                format!("{:.2}", session.speed()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![label("Mode:  "), Span::raw(mode)]),
        Line::from(vec![
            label("Cues:  "),
            Span::raw(on_off(session.audio_cues_enabled())),
        ]),
        Line::from(vec![label("Skin:  "), Span::raw(session.skin().id.name())]),
        Line::from(vec![
            label("Night: "),
            Span::raw(on_off(session.show_night())),
        ]),
        Line::from(""),
        Line::from(vec![label("State: "), Span::raw(session.state().name())]),
        Line::from(vec![
            label("Runs:  "),
            Span::raw(session.play_count().to_string()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// "Press Space to Start" centered on the play field.
fn render_start_prompt(frame: &mut Frame, area: Rect) {
    if area.height < 5 || area.width < 30 {
        return;
    }

    let center_y = area.y + area.height / 3;
    let prompt = "[ Press Space/Up to Start ]";
    let x = area.x + area.width.saturating_sub(prompt.len() as u16) / 2;

    let line = Paragraph::new(Line::from(vec![Span::styled(
        prompt,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )]));

    frame.render_widget(line, Rect::new(x, center_y, prompt.len() as u16, 1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionOptions;

    fn mapping() -> CellMapping {
        CellMapping::new(Rect::new(2, 1, 100, 15), 600.0, 150.0)
    }

    #[test]
    fn test_canvas_width_for_columns() {
        assert!((canvas_width_for(100) - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_canvas_maps_cell_centres() {
        let m = mapping();
        assert_eq!(m.to_canvas(2, 1), Some((3.0, 5.0)));
        assert_eq!(m.to_canvas(101, 15), Some((597.0, 145.0)));
        assert_eq!(m.to_canvas(1, 1), None);
        assert_eq!(m.to_canvas(102, 1), None);
    }

    #[test]
    fn test_sprite_fills_covered_cells() {
        let mut canvas = CellCanvas::new(mapping());
        canvas.draw_sprite(
            SpriteKind::Obstacle {
                name: "CACTUS_SMALL",
                collectable: false,
            },
            CanvasRect::new(0.0, 0.0, 17.0, 35.0),
            CanvasRect::new(60.0, 100.0, 17.0, 35.0),
            1.0,
        );
        assert_eq!(canvas.char_at(10, 10), Some('|'));
        assert_eq!(canvas.char_at(12, 13), Some('|'));
        assert_eq!(canvas.char_at(13, 10), Some(' '));
    }

    #[test]
    fn test_transparent_sprites_skipped() {
        let mut canvas = CellCanvas::new(mapping());
        canvas.draw_sprite(
            SpriteKind::Star,
            CanvasRect::new(0.0, 0.0, 9.0, 9.0),
            CanvasRect::new(30.0, 30.0, 9.0, 9.0),
            0.1,
        );
        assert_eq!(canvas.char_at(5, 3), Some(' '));
    }

    #[test]
    fn test_waiting_session_rasterises_ground_and_score() {
        let session = GameSession::headless(SessionOptions::default());
        let mut canvas = CellCanvas::new(mapping());
        draw_session(&session, &mut canvas);
        assert!(canvas.row_text(13).contains(GROUND_CHAR));
        // Digits are 11 units apart, so they do not sit in adjacent cells.
        assert_eq!(canvas.row_text(0).matches('0').count(), 5);
    }
}
