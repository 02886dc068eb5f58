//! Turns a session snapshot into draw calls.
//!
//! Layers are drawn back to front: sky, clouds, scenery, ground, obstacles,
//! avatar, score, then the game over panel.

use super::types::{Canvas, Rect, Shade, SpriteKind};
use crate::horizon::night::{MOON_HEIGHT, PHASES, STAR_SIZE};
use crate::horizon::{Horizon, Obstacle};
use crate::score::game_over::{
    ALT_TEXT_HEIGHT, ALT_TEXT_WIDTH, ALT_TEXT_X, ALT_TEXT_Y, RESTART_HEIGHT, RESTART_WIDTH,
    TEXT_HEIGHT, TEXT_WIDTH, TEXT_X, TEXT_Y,
};
use crate::score::meter::{DIGIT_DEST_WIDTH, DIGIT_HEIGHT, DIGIT_WIDTH};
use crate::score::ScoreTracker;
use crate::session::{GameSession, GameState};
use crate::skins::{OverlaySprites, SkinDefinition};

const HIGH_SCORE_ALPHA: f64 = 0.8;
const GLYPH_H: u8 = 10;
const GLYPH_I: u8 = 11;

/// Draw one frame of the session.
pub fn draw_session(session: &GameSession, canvas: &mut impl Canvas) {
    let skin = session.skin();
    let alpha = session.fade_alpha();
    let shade = if session.show_night() {
        Shade::Night
    } else {
        Shade::Day
    };

    canvas.clear();
    canvas.fill_rect(
        Rect::new(0.0, 0.0, session.width(), session.height()),
        shade,
    );

    draw_horizon(session.horizon(), skin, alpha, canvas);

    let avatar = session.avatar();
    if avatar.is_visible() {
        canvas.draw_sprite(
            SpriteKind::Avatar(avatar.pose),
            Rect::new(
                avatar.sprite.sprite.x + avatar.display_frame(),
                avatar.sprite.sprite.y,
                avatar.width(),
                avatar.height(),
            ),
            Rect::new(avatar.x, avatar.y, avatar.width(), avatar.height()),
            alpha,
        );
    }

    draw_score(session.score(), &skin.overlays, alpha, canvas);

    if session.state() == GameState::Crashed {
        draw_game_over(session, &skin.overlays, canvas);
    }
}

fn draw_horizon(horizon: &Horizon, skin: &SkinDefinition, alpha: f64, canvas: &mut impl Canvas) {
    let overlays = &skin.overlays;
    let night = &horizon.night;
    if night.is_visible() {
        let opacity = night.opacity * alpha;
        let moon_width = night.moon_width();
        canvas.draw_sprite(
            SpriteKind::Moon,
            Rect::new(
                overlays.moon.x + PHASES[night.current_phase],
                overlays.moon.y,
                moon_width,
                MOON_HEIGHT,
            ),
            Rect::new(night.x, night.y, moon_width, MOON_HEIGHT),
            opacity,
        );
        if night.draw_stars {
            for star in &night.stars {
                canvas.draw_sprite(
                    SpriteKind::Star,
                    Rect::new(
                        overlays.star.x,
                        overlays.star.y + star.source_y,
                        STAR_SIZE,
                        STAR_SIZE,
                    ),
                    Rect::new(star.x, star.y, STAR_SIZE, STAR_SIZE),
                    opacity,
                );
            }
        }
    }

    let cloud = &skin.cloud;
    for c in &horizon.clouds {
        canvas.draw_sprite(
            SpriteKind::Cloud,
            Rect::new(cloud.sprite.x, cloud.sprite.y, c.width, c.height),
            Rect::new(c.x, c.y, c.width, c.height),
            alpha,
        );
    }

    for el in &horizon.background_els {
        canvas.draw_sprite(
            SpriteKind::BackgroundElement(el.def.name),
            Rect::new(el.def.source_x, el.def.source_y, el.def.width, el.def.height),
            Rect::new(el.x, el.y, el.def.width, el.def.height),
            alpha,
        );
    }

    for line in &horizon.lines {
        let def = line.def;
        for segment in 0..2 {
            canvas.draw_sprite(
                SpriteKind::HorizonLine,
                Rect::new(line.source_x(segment), def.source_y, def.width, def.height),
                Rect::new(line.x[segment], def.y_pos, def.width, def.height),
                alpha,
            );
        }
    }

    for obstacle in horizon.obstacles.iter().filter(|o| o.is_visible()) {
        canvas.draw_sprite(
            SpriteKind::Obstacle {
                name: obstacle.kind.name,
                collectable: obstacle.is_collectable(),
            },
            obstacle_source(obstacle),
            Rect::new(obstacle.x, obstacle.y, obstacle.width, obstacle.kind.height),
            alpha,
        );
    }
}

/// Sheet crop of an obstacle; groups and animation frames sit side by side.
pub fn obstacle_source(obstacle: &Obstacle) -> Rect {
    let unit = obstacle.kind.width;
    let size = obstacle.size as f64;
    let mut x = unit * size * (0.5 * (size - 1.0)) + obstacle.kind.sprite.x;
    if obstacle.current_frame > 0 {
        x += unit * obstacle.current_frame as f64;
    }
    Rect::new(x, obstacle.kind.sprite.y, unit * size, obstacle.kind.height)
}

fn draw_glyph(
    glyph: u8,
    x: f64,
    y: f64,
    overlays: &OverlaySprites,
    alpha: f64,
    canvas: &mut impl Canvas,
) {
    canvas.draw_sprite(
        SpriteKind::Digit(glyph),
        Rect::new(
            overlays.text.x + DIGIT_WIDTH * glyph as f64,
            overlays.text.y,
            DIGIT_WIDTH,
            DIGIT_HEIGHT,
        ),
        Rect::new(x, y, DIGIT_WIDTH, DIGIT_HEIGHT),
        alpha,
    );
}

fn digit_values(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
}

fn draw_score(score: &ScoreTracker, overlays: &OverlaySprites, alpha: f64, canvas: &mut impl Canvas) {
    if score.is_painted() {
        for (i, digit) in digit_values(score.digits()).enumerate() {
            let x = score.x + i as f64 * DIGIT_DEST_WIDTH;
            draw_glyph(digit, x, score.y, overlays, alpha, canvas);
        }
    }

    if score.high_score_visible() {
        let origin = score.high_score_x();
        let hs_alpha = alpha * HIGH_SCORE_ALPHA;
        draw_glyph(GLYPH_H, origin, score.y, overlays, hs_alpha, canvas);
        draw_glyph(
            GLYPH_I,
            origin + DIGIT_DEST_WIDTH,
            score.y,
            overlays,
            hs_alpha,
            canvas,
        );
        // One blank glyph between the label and the digits.
        for (i, digit) in digit_values(score.high_score_digits()).enumerate() {
            let x = origin + (i + 3) as f64 * DIGIT_DEST_WIDTH;
            draw_glyph(digit, x, score.y, overlays, hs_alpha, canvas);
        }
    }
}

fn draw_game_over(session: &GameSession, overlays: &OverlaySprites, canvas: &mut impl Canvas) {
    let panel = session.game_over_panel();
    let (tx, ty) = panel.text_position();
    if panel.showing_alt_text() {
        canvas.draw_sprite(
            SpriteKind::GameOverText { alt: true },
            Rect::new(ALT_TEXT_X, ALT_TEXT_Y, ALT_TEXT_WIDTH, ALT_TEXT_HEIGHT),
            Rect::new(tx, ty, ALT_TEXT_WIDTH, ALT_TEXT_HEIGHT),
            1.0,
        );
    } else {
        canvas.draw_sprite(
            SpriteKind::GameOverText { alt: false },
            Rect::new(
                overlays.text.x + TEXT_X,
                overlays.text.y + TEXT_Y,
                TEXT_WIDTH,
                TEXT_HEIGHT,
            ),
            Rect::new(tx, ty, TEXT_WIDTH, TEXT_HEIGHT),
            1.0,
        );
    }

    let (rx, ry) = panel.restart_position();
    canvas.draw_sprite(
        SpriteKind::RestartButton,
        Rect::new(
            overlays.restart.x + panel.restart_source_offset(),
            overlays.restart.y,
            RESTART_WIDTH,
            RESTART_HEIGHT,
        ),
        Rect::new(rx, ry, RESTART_WIDTH, RESTART_HEIGHT),
        1.0,
    );
}
