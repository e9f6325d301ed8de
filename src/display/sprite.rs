/// Text-art sprites loaded from the asset directory.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::scene::SpriteId;

pub const SHIP_FILE: &str = "ship.txt";
pub const ASTEROID_FILE: &str = "asteroid.txt";

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read sprite {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sprite {path} has no visible rows")]
    Empty { path: PathBuf },
}

/// Rectangular character art; short rows are padded with spaces.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteArt {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl SpriteArt {
    /// Blank lines above and below the art are dropped. Returns `None` when
    /// nothing is left.
    pub fn parse(text: &str) -> Option<Self> {
        let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        let first = lines.iter().position(|l| !l.is_empty())?;
        let last = lines.iter().rposition(|l| !l.is_empty())?;

        let mut rows: Vec<Vec<char>> = lines[first..=last]
            .iter()
            .map(|l| l.chars().collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, ' ');
        }
        Some(Self { rows, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Character at normalised coordinates `u`, `v` in `[0, 1)`.
    pub fn sample(&self, u: f64, v: f64) -> char {
        let pick = |t: f64, n: usize| ((t.clamp(0.0, 1.0) * n as f64) as usize).min(n - 1);
        let row = pick(v, self.height());
        let col = pick(u, self.width);
        self.rows[row][col]
    }
}

pub fn load_sprite(path: &Path) -> Result<SpriteArt, AssetError> {
    let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SpriteArt::parse(&text).ok_or_else(|| AssetError::Empty {
        path: path.to_path_buf(),
    })
}

/// Whatever sprites are available. A missing one is drawn as nothing.
#[derive(Clone, Debug, Default)]
pub struct Sprites {
    pub ship: Option<SpriteArt>,
    pub asteroid: Option<SpriteArt>,
}

impl Sprites {
    /// Load both sprites from `dir`, logging and skipping any that fail.
    pub fn load(dir: &Path) -> Self {
        let load = |name: &str| match load_sprite(&dir.join(name)) {
            Ok(art) => Some(art),
            Err(e) => {
                warn!(error = %e, "sprite unavailable, drawing blank");
                None
            }
        };
        Self {
            ship: load(SHIP_FILE),
            asteroid: load(ASTEROID_FILE),
        }
    }

    pub fn get(&self, id: SpriteId) -> Option<&SpriteArt> {
        match id {
            SpriteId::Ship => self.ship.as_ref(),
            SpriteId::Asteroid => self.asteroid.as_ref(),
        }
    }
}
