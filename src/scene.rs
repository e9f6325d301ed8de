/// Scene composition — turns a `GameState` into a list of draw commands in
/// canvas coordinates.
///
/// Nothing here knows about terminals; `display` consumes the result. All
/// animation that depends on wall-clock time (the restart prompt blink)
/// takes the frame timestamp as an argument.

use crate::entities::{Explosion, GameState, GameStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in [0, 1].
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

pub const BACKGROUND: Rgba = Rgba::rgb(0x20, 0x21, 0x24);
pub const FOREGROUND: Rgba = Rgba::rgb(0xe8, 0xea, 0xed);
pub const EXPLOSION: Rgba = Rgba::rgb(255, 165, 0);
pub const PROMPT: Rgba = Rgba::rgb(255, 255, 0);

// ── Draw commands ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteId {
    Ship,
    Asteroid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSize {
    Normal,
    Large,
}

/// One primitive in canvas space. Boxes are given by their top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Full-surface opaque fill.
    Clear(Rgba),
    Sprite {
        sprite: SpriteId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgba,
    },
    /// `y` is the text baseline.
    Text {
        text: String,
        x: f64,
        y: f64,
        align: TextAlign,
        size: TextSize,
        color: Rgba,
    },
    /// Full-surface fill blended over everything drawn so far.
    Overlay(Rgba),
}

/// The two counters shown outside the drawing surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: String,
    pub high_score: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    pub scoreboard: ScoreBoard,
}

// ── Presentation helpers ──────────────────────────────────────────────────────

/// Zero-pad to five digits; longer numbers are shown in full.
pub fn pad_score(score: u32) -> String {
    format!("{score:05}")
}

/// Visual radius and opacity of an explosion: the disc grows from nothing
/// to full size while fading out.
pub fn explosion_visual(explosion: &Explosion, lifetime: u32) -> (f64, f64) {
    let remaining = explosion.life as f64 / lifetime.max(1) as f64;
    (explosion.radius * (1.0 - remaining), remaining)
}

/// Restart prompt opacity, oscillating on wall-clock time.
pub fn blink_alpha(now_ms: f64) -> f64 {
    (now_ms / 250.0).sin() * 0.5 + 0.5
}

// ── Composition ───────────────────────────────────────────────────────────────

pub fn compose(state: &GameState, now_ms: f64) -> Frame {
    let config = &state.config;
    let mut commands = vec![DrawCommand::Clear(BACKGROUND)];

    let ship = &state.ship;
    commands.push(DrawCommand::Sprite {
        sprite: SpriteId::Ship,
        x: ship.x - ship.width / 2.0,
        y: ship.y - ship.height / 2.0,
        width: ship.width,
        height: ship.height,
    });

    commands.extend(state.projectiles.iter().map(|p| DrawCommand::Rect {
        x: p.x - p.width / 2.0,
        y: p.y,
        width: p.width,
        height: p.height,
        color: FOREGROUND,
    }));

    commands.extend(state.obstacles.iter().map(|o| DrawCommand::Sprite {
        sprite: SpriteId::Asteroid,
        x: o.x - o.width / 2.0,
        y: o.y - o.height / 2.0,
        width: o.width,
        height: o.height,
    }));

    commands.extend(state.explosions.iter().map(|e| {
        let (radius, alpha) = explosion_visual(e, config.explosion_lifetime);
        DrawCommand::Circle {
            x: e.x,
            y: e.y,
            radius,
            color: EXPLOSION.with_alpha(alpha),
        }
    }));

    commands.push(DrawCommand::Text {
        text: format!("SCORE {}", state.score),
        x: 10.0,
        y: 30.0,
        align: TextAlign::Left,
        size: TextSize::Normal,
        color: FOREGROUND,
    });

    if state.status != GameStatus::Playing {
        push_game_over(&mut commands, state, now_ms);
    }

    Frame {
        commands,
        scoreboard: ScoreBoard {
            score: pad_score(state.score),
            high_score: pad_score(state.high_score),
        },
    }
}

fn push_game_over(commands: &mut Vec<DrawCommand>, state: &GameState, now_ms: f64) {
    let alpha = state.transition_progress;
    let cx = state.config.canvas_width / 2.0;
    let cy = state.config.canvas_height / 2.0;

    commands.push(DrawCommand::Overlay(BACKGROUND.with_alpha(alpha)));
    commands.push(DrawCommand::Text {
        text: "GAME OVER".to_string(),
        x: cx,
        y: cy - 50.0,
        align: TextAlign::Center,
        size: TextSize::Large,
        color: FOREGROUND.with_alpha(alpha),
    });
    commands.push(DrawCommand::Text {
        text: format!("FINAL SCORE {}", state.score),
        x: cx,
        y: cy,
        align: TextAlign::Center,
        size: TextSize::Normal,
        color: FOREGROUND.with_alpha(alpha),
    });

    if state.status == GameStatus::GameOverIdle {
        commands.push(DrawCommand::Text {
            text: "PRESS SPACE TO RESTART".to_string(),
            x: cx,
            y: cy + 50.0,
            align: TextAlign::Center,
            size: TextSize::Normal,
            color: PROMPT.with_alpha(blink_alpha(now_ms)),
        });
    }
}
