/// All game entity types — pure data, no logic.
///
/// Positions are in canvas units (origin top-left, y grows downward).

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Battlefield frozen while the game-over overlay fades in.
    GameOverTransition,
    /// Overlay fully shown; fire restarts.
    GameOverIdle,
}

// ── Player ship ───────────────────────────────────────────────────────────────

/// `x`/`y` is the centre of the sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// `x` is the horizontal centre, `y` the top edge. The anchor `(x, y)` is
/// what gets tested against asteroid boxes.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

// ── Asteroids ─────────────────────────────────────────────────────────────────

/// `x`/`y` is the centre of the box.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

/// Cosmetic burst left behind by a destroyed asteroid.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Remaining ticks to display.
    pub life: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub ship: Ship,
    /// Oldest first; order only matters for drawing.
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    /// Best score banked by a restart this session.
    pub high_score: u32,
    pub status: GameStatus,
    /// Game-over fade, 0 while playing and 1 once idle.
    pub transition_progress: f64,
    /// Host timestamp (ms) of the last shot.
    pub last_fire_ms: f64,
    pub config: GameConfig,
}
