/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (plus the input snapshot, frame timestamp or RNG handle where
/// needed) and returns a brand-new `GameState`.  Side effects are limited to
/// the injected RNG and log output.

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{Explosion, GameState, GameStatus, Obstacle, Projectile, Ship};
use crate::input::InputSnapshot;

// ── Constructors ─────────────────────────────────────────────────────────────

fn starting_ship(config: &GameConfig) -> Ship {
    Ship {
        x: config.canvas_width / 2.0,
        y: config.canvas_height - config.ship_bottom_offset,
        width: config.ship_width,
        height: config.ship_height,
        speed: config.ship_speed,
    }
}

/// Build the initial game state: ship centred, nothing else on the field.
pub fn init_state(config: GameConfig) -> GameState {
    GameState {
        ship: starting_ship(&config),
        projectiles: Vec::new(),
        obstacles: Vec::new(),
        explosions: Vec::new(),
        score: 0,
        high_score: 0,
        status: GameStatus::Playing,
        transition_progress: 0.0,
        last_fire_ms: 0.0,
        config,
    }
}

// ── Ship & weapon ────────────────────────────────────────────────────────────

/// Left and right are applied independently; each step is skipped if it
/// would push the hull past the canvas edge.
pub fn move_ship(state: &GameState, input: &InputSnapshot) -> GameState {
    let ship = &state.ship;
    let half = ship.width / 2.0;
    let mut x = ship.x;

    if input.left && x - ship.speed >= half {
        x -= ship.speed;
    }
    if input.right && x + ship.speed <= state.config.canvas_width - half {
        x += ship.speed;
    }

    GameState {
        ship: Ship { x, ..ship.clone() },
        ..state.clone()
    }
}

/// Spawn one projectile at the ship's nose if fire is held and the
/// cooldown (wall-clock, from the host timestamp) has elapsed.
pub fn fire_weapon(state: &GameState, input: &InputSnapshot, now_ms: f64) -> GameState {
    if !input.fire || now_ms - state.last_fire_ms < state.config.fire_cooldown_ms {
        return state.clone();
    }
    let config = &state.config;
    let mut projectiles = state.projectiles.clone();
    projectiles.push(Projectile {
        x: state.ship.x,
        y: state.ship.y - state.ship.height / 2.0,
        width: config.projectile_width,
        height: config.projectile_height,
        speed: config.projectile_speed,
    });
    GameState {
        projectiles,
        last_fire_ms: now_ms,
        ..state.clone()
    }
}

// ── Motion & pruning ─────────────────────────────────────────────────────────

/// Constant-velocity step: projectiles up, asteroids down.
pub fn integrate_motion(state: &GameState) -> GameState {
    let projectiles = state
        .projectiles
        .iter()
        .map(|p| Projectile {
            y: p.y - p.speed,
            ..p.clone()
        })
        .collect();
    let obstacles = state
        .obstacles
        .iter()
        .map(|o| Obstacle {
            y: o.y + o.speed,
            ..o.clone()
        })
        .collect();
    GameState {
        projectiles,
        obstacles,
        ..state.clone()
    }
}

/// Drop projectiles that have left through the top, then check the
/// asteroids. If any asteroid's bottom edge has reached the bottom of the
/// canvas the run is lost and the state switches to `GameOverTransition`.
pub fn prune(state: &GameState) -> GameState {
    let projectiles = state
        .projectiles
        .iter()
        .filter(|p| p.y + p.height >= 0.0)
        .cloned()
        .collect();
    let pruned = GameState {
        projectiles,
        ..state.clone()
    };

    let breached = pruned
        .obstacles
        .iter()
        .any(|o| o.y + o.height / 2.0 >= pruned.config.canvas_height);
    if !breached {
        return pruned;
    }

    info!(score = pruned.score, "asteroid reached the bottom, game over");
    GameState {
        status: GameStatus::GameOverTransition,
        transition_progress: 0.0,
        ..pruned
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// One Bernoulli trial per call. The roll is drawn even when the field is
/// full so the RNG stream does not depend on the asteroid count.
pub fn spawn_obstacle(state: &GameState, rng: &mut impl Rng) -> GameState {
    let config = &state.config;
    let roll: f64 = rng.gen();
    if roll >= config.asteroid_spawn_chance || state.obstacles.len() >= config.max_asteroids {
        return state.clone();
    }

    let width = config.asteroid_width;
    let height = config.asteroid_height;
    let x = rng.gen::<f64>() * (config.canvas_width - width) + width / 2.0;
    debug!(x, "asteroid spawned");

    let mut obstacles = state.obstacles.clone();
    obstacles.push(Obstacle {
        x,
        y: -height / 2.0,
        width,
        height,
        speed: config.asteroid_speed,
    });
    GameState {
        obstacles,
        ..state.clone()
    }
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Point-in-box: the projectile's anchor against the asteroid's box,
/// edges inclusive. The projectile's own extent is ignored.
pub fn is_colliding(projectile: &Projectile, obstacle: &Obstacle) -> bool {
    let half_w = obstacle.width / 2.0;
    let half_h = obstacle.height / 2.0;
    projectile.x >= obstacle.x - half_w
        && projectile.x <= obstacle.x + half_w
        && projectile.y >= obstacle.y - half_h
        && projectile.y <= obstacle.y + half_h
}

/// Both lists are scanned newest first. Each asteroid is destroyed by at
/// most one projectile, and a spent projectile cannot hit anything else.
pub fn resolve_collisions(state: &GameState) -> GameState {
    let config = &state.config;
    let mut obstacles = state.obstacles.clone();
    let mut projectiles = state.projectiles.clone();
    let mut explosions = state.explosions.clone();
    let mut score = state.score;

    for i in (0..obstacles.len()).rev() {
        let hit = (0..projectiles.len())
            .rev()
            .find(|&j| is_colliding(&projectiles[j], &obstacles[i]));
        if let Some(j) = hit {
            let obstacle = obstacles.remove(i);
            projectiles.remove(j);
            debug!(x = obstacle.x, y = obstacle.y, "asteroid destroyed");
            explosions.push(Explosion {
                x: obstacle.x,
                y: obstacle.y,
                radius: obstacle.width / 2.0,
                life: config.explosion_lifetime,
            });
            score = score.saturating_add(config.kill_reward);
        }
    }

    GameState {
        obstacles,
        projectiles,
        explosions,
        score,
        ..state.clone()
    }
}

/// Age every explosion by one tick and drop the spent ones. Explosions
/// created by this tick's collisions are aged here too.
pub fn update_explosions(state: &GameState) -> GameState {
    let explosions = state
        .explosions
        .iter()
        .filter(|e| e.life > 1)
        .map(|e| Explosion {
            life: e.life - 1,
            ..e.clone()
        })
        .collect();
    GameState {
        explosions,
        ..state.clone()
    }
}

// ── Game-over cycle ──────────────────────────────────────────────────────────

/// Accumulated steps within this distance of 1 count as complete.
const PROGRESS_EPSILON: f64 = 1e-9;

/// Advance the overlay fade; reaching full opacity makes the game idle.
pub fn advance_game_over(state: &GameState) -> GameState {
    let progress = state.transition_progress + state.config.transition_step;
    let progress = if progress >= 1.0 - PROGRESS_EPSILON {
        1.0
    } else {
        progress
    };
    let status = if progress >= 1.0 {
        GameStatus::GameOverIdle
    } else {
        GameStatus::GameOverTransition
    };
    GameState {
        transition_progress: progress,
        status,
        ..state.clone()
    }
}

/// Bank the score, clear the field and start a new run. The fire cooldown
/// carries over.
pub fn restart(state: &GameState) -> GameState {
    let high_score = state.high_score.max(state.score);
    info!(score = state.score, high_score, "restarting");
    GameState {
        high_score,
        last_fire_ms: state.last_fire_ms,
        ..init_state(state.config)
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  `now_ms` is the host's frame
/// timestamp; all randomness comes through `rng` so callers control
/// determinism (useful for tests with a seeded RNG).
pub fn tick(
    state: &GameState,
    input: &InputSnapshot,
    now_ms: f64,
    rng: &mut impl Rng,
) -> GameState {
    match state.status {
        GameStatus::Playing => {
            let state = move_ship(state, input);
            let state = fire_weapon(&state, input, now_ms);
            let state = integrate_motion(&state);
            let state = prune(&state);
            if state.status != GameStatus::Playing {
                return state;
            }
            let state = spawn_obstacle(&state, rng);
            let state = resolve_collisions(&state);
            update_explosions(&state)
        }
        GameStatus::GameOverTransition => advance_game_over(state),
        GameStatus::GameOverIdle if input.fire => restart(state),
        GameStatus::GameOverIdle => state.clone(),
    }
}
