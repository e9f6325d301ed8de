/// Tunable constants and host settings, loaded from an optional JSON file.
///
/// Every field has a default, so a file only needs to name what it changes:
///
/// ```json
/// { "game": { "max_asteroids": 6 }, "host": { "frame_ms": 20 } }
/// ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming a settings file.
pub const CONFIG_ENV: &str = "ASTEROID_DEFENSE_CONFIG";

/// Settings file picked up from the working directory when the variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "asteroid_defense.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ── Simulation constants ──────────────────────────────────────────────────────

/// Everything the simulation needs to know about the playfield.
/// Sizes and speeds are in canvas units; speeds are per tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,

    pub ship_width: f64,
    pub ship_height: f64,
    pub ship_speed: f64,
    /// Distance from the bottom edge to the ship's centre.
    pub ship_bottom_offset: f64,

    pub projectile_width: f64,
    pub projectile_height: f64,
    pub projectile_speed: f64,
    /// Minimum wall-clock interval between shots, in milliseconds.
    pub fire_cooldown_ms: f64,

    pub asteroid_width: f64,
    pub asteroid_height: f64,
    pub asteroid_speed: f64,
    pub max_asteroids: usize,
    /// Probability of a spawn attempt succeeding on any given tick.
    pub asteroid_spawn_chance: f64,

    pub kill_reward: u32,
    /// Ticks an explosion stays on screen.
    pub explosion_lifetime: u32,
    /// Added to the game-over fade each tick until it reaches 1.
    pub transition_step: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            ship_width: 40.0,
            ship_height: 40.0,
            ship_speed: 3.0,
            ship_bottom_offset: 40.0,
            projectile_width: 4.0,
            projectile_height: 12.0,
            projectile_speed: 8.0,
            fire_cooldown_ms: 500.0,
            asteroid_width: 40.0,
            asteroid_height: 40.0,
            asteroid_speed: 0.5,
            max_asteroids: 4,
            asteroid_spawn_chance: 0.02,
            kill_reward: 100,
            explosion_lifetime: 30,
            transition_step: 0.02,
        }
    }
}

impl GameConfig {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&'static str, f64); 8] = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("asteroid_width", self.asteroid_width),
            ("asteroid_height", self.asteroid_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        let non_negative: [(&'static str, f64); 5] = [
            ("ship_speed", self.ship_speed),
            ("ship_bottom_offset", self.ship_bottom_offset),
            ("projectile_speed", self.projectile_speed),
            ("fire_cooldown_ms", self.fire_cooldown_ms),
            ("asteroid_speed", self.asteroid_speed),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a non-negative number, got {value}"),
                });
            }
        }

        if self.ship_width > self.canvas_width || self.asteroid_width > self.canvas_width {
            return Err(ConfigError::Invalid {
                field: "canvas_width",
                reason: "narrower than the ship or an asteroid".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.asteroid_spawn_chance) {
            return Err(ConfigError::Invalid {
                field: "asteroid_spawn_chance",
                reason: format!("must lie in [0, 1], got {}", self.asteroid_spawn_chance),
            });
        }
        if self.max_asteroids == 0 {
            return Err(ConfigError::Invalid {
                field: "max_asteroids",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.transition_step > 0.0 && self.transition_step <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "transition_step",
                reason: format!("must lie in (0, 1], got {}", self.transition_step),
            });
        }
        if self.explosion_lifetime == 0 {
            return Err(ConfigError::Invalid {
                field: "explosion_lifetime",
                reason: "must be at least 1 tick".to_string(),
            });
        }
        Ok(())
    }
}

// ── Host settings ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Target frame period in milliseconds.
    pub frame_ms: u64,
    /// Frames a key stays held after its last press on terminals that
    /// never report releases.
    pub hold_window: u64,
    /// Directory holding `ship.txt` and `asteroid.txt`.
    pub asset_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            hold_window: 6,
            asset_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets")),
            log_file: std::env::temp_dir().join("asteroid_defense.log"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
    pub host: HostConfig,
}

impl Settings {
    pub fn from_json(path: &Path, text: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_json::from_str(text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.game.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &text)
    }

    /// Resolve settings from `ASTEROID_DEFENSE_CONFIG`, then the working
    /// directory, then defaults. Returns the file used, if any.
    pub fn discover() -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            return Ok((Self::load(&path)?, Some(path)));
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Ok((Self::load(&local)?, Some(local)));
        }
        Ok((Self::default(), None))
    }
}
