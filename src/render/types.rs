//! Drawing surface abstraction.

use crate::avatar::Pose;

/// Rectangle in logical canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// What a sprite blit depicts; lets non-bitmap surfaces pick a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Avatar(Pose),
    Obstacle {
        name: &'static str,
        collectable: bool,
    },
    Cloud,
    BackgroundElement(&'static str),
    HorizonLine,
    Moon,
    Star,
    /// Score glyph: 0-9, then 10 = "H" and 11 = "I".
    Digit(u8),
    GameOverText {
        alt: bool,
    },
    RestartButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Day,
    Night,
}

/// A 2D surface receiving fills and sprite blits.
pub trait Canvas {
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, shade: Shade);
    /// Copy `source` from the skin's sprite sheet to `dest`.
    fn draw_sprite(&mut self, kind: SpriteKind, source: Rect, dest: Rect, alpha: f64);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Fill(Rect, Shade),
    Sprite {
        kind: SpriteKind,
        source: Rect,
        dest: Rect,
        alpha: f64,
    },
}

/// Canvas that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprites(&self) -> impl Iterator<Item = (SpriteKind, Rect, Rect, f64)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Sprite {
                kind,
                source,
                dest,
                alpha,
            } => Some((*kind, *source, *dest, *alpha)),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&SpriteKind) -> bool) -> usize {
        self.sprites().filter(|(kind, ..)| pred(kind)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, shade: Shade) {
        self.calls.push(DrawCall::Fill(rect, shade));
    }

    fn draw_sprite(&mut self, kind: SpriteKind, source: Rect, dest: Rect, alpha: f64) {
        self.calls.push(DrawCall::Sprite {
            kind,
            source,
            dest,
            alpha,
        });
    }
}
