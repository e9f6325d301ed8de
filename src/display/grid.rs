/// Character-cell raster that draw commands are painted into.
///
/// The grid maps the canvas onto `cols × rows` cells with independent x/y
/// scale factors. Colours are blended by opacity against whatever is
/// already visible in a cell, which is how the game-over overlay fades the
/// frozen battlefield.

use crate::display::sprite::Sprites;
use crate::scene::{DrawCommand, Rgba, SpriteId, TextAlign, TextSize};

/// Solid block used for rect, circle and cleared-cell fills.
pub const FILL: char = '█';

const C_SHIP: Rgb = Rgb(0xe8, 0xea, 0xed);
const C_ASTEROID: Rgb = Rgb(0xb0, 0x8d, 0x6a);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgba> for Rgb {
    fn from(c: Rgba) -> Self {
        Rgb(c.r, c.g, c.b)
    }
}

/// Blend `over` onto `under` with `over`'s opacity.
pub fn blend(under: Rgb, over: Rgba) -> Rgb {
    let a = over.a.clamp(0.0, 1.0);
    let mix = |u: u8, o: u8| (u as f64 * (1.0 - a) + o as f64 * a).round() as u8;
    Rgb(mix(under.0, over.r), mix(under.1, over.g), mix(under.2, over.b))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    /// The colour a viewer sees in this cell.
    pub fn surface(&self) -> Rgb {
        if self.ch == FILL {
            self.fg
        } else {
            self.bg
        }
    }
}

pub struct CellGrid {
    cols: u16,
    rows: u16,
    scale_x: f64,
    scale_y: f64,
    cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(cols: u16, rows: u16, canvas_width: f64, canvas_height: f64) -> Self {
        let blank = Cell {
            ch: ' ',
            fg: Rgb(0, 0, 0),
            bg: Rgb(0, 0, 0),
        };
        Self {
            cols,
            rows,
            scale_x: cols as f64 / canvas_width,
            scale_y: rows as f64 / canvas_height,
            cells: vec![blank; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> Option<&mut Cell> {
        if col < self.cols && row < self.rows {
            self.cells
                .get_mut(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.cell(col, row).map(|c| c.ch))
            .collect()
    }

    /// Cell range `[start, end)` covered by a canvas interval, at least one
    /// cell wide when the interval overlaps the grid.
    fn span(start: f64, len: f64, scale: f64, limit: u16) -> Option<(u16, u16)> {
        let lo = (start * scale).floor();
        let hi = ((start + len) * scale).ceil().max(lo + 1.0);
        if hi <= 0.0 || lo >= limit as f64 {
            return None;
        }
        Some((lo.max(0.0) as u16, hi.min(limit as f64) as u16))
    }

    fn cell_rect(&self, x: f64, y: f64, w: f64, h: f64) -> Option<((u16, u16), (u16, u16))> {
        let cols = Self::span(x, w, self.scale_x, self.cols)?;
        let rows = Self::span(y, h, self.scale_y, self.rows)?;
        Some((cols, rows))
    }

    pub fn draw(&mut self, command: &DrawCommand, sprites: &Sprites) {
        match command {
            DrawCommand::Clear(color) => self.clear(*color),
            DrawCommand::Sprite {
                sprite,
                x,
                y,
                width,
                height,
            } => self.sprite(*sprite, sprites, *x, *y, *width, *height),
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color,
            } => self.fill_rect(*x, *y, *width, *height, *color),
            DrawCommand::Circle {
                x,
                y,
                radius,
                color,
            } => self.fill_circle(*x, *y, *radius, *color),
            DrawCommand::Text {
                text,
                x,
                y,
                align,
                size,
                color,
            } => self.text(text, *x, *y, *align, *size, *color),
            DrawCommand::Overlay(color) => self.overlay(*color),
        }
    }

    fn clear(&mut self, color: Rgba) {
        let rgb = Rgb::from(color);
        for cell in &mut self.cells {
            *cell = Cell {
                ch: ' ',
                fg: rgb,
                bg: rgb,
            };
        }
    }

    fn paint(&mut self, col: u16, row: u16, color: Rgba) {
        if let Some(cell) = self.cell_mut(col, row) {
            let fg = blend(cell.surface(), color);
            *cell = Cell {
                ch: FILL,
                fg,
                bg: cell.bg,
            };
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        let Some(((c0, c1), (r0, r1))) = self.cell_rect(x, y, w, h) else {
            return;
        };
        for row in r0..r1 {
            for col in c0..c1 {
                self.paint(col, row, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let Some(((c0, c1), (r0, r1))) =
            self.cell_rect(cx - radius, cy - radius, radius * 2.0, radius * 2.0)
        else {
            return;
        };
        let mut painted = false;
        for row in r0..r1 {
            for col in c0..c1 {
                let px = (col as f64 + 0.5) / self.scale_x;
                let py = (row as f64 + 0.5) / self.scale_y;
                if (px - cx).powi(2) + (py - cy).powi(2) <= radius * radius {
                    self.paint(col, row, color);
                    painted = true;
                }
            }
        }
        // Small discs still cover the cell holding their centre.
        if !painted && cx >= 0.0 && cy >= 0.0 {
            self.paint(
                (cx * self.scale_x) as u16,
                (cy * self.scale_y) as u16,
                color,
            );
        }
    }

    fn text(&mut self, text: &str, x: f64, y: f64, align: TextAlign, size: TextSize, color: Rgba) {
        let glyphs: Vec<char> = match size {
            TextSize::Normal => text.chars().collect(),
            // Large text is letter-spaced.
            TextSize::Large => text
                .chars()
                .flat_map(|c| [c, ' '])
                .take((text.chars().count() * 2).saturating_sub(1))
                .collect(),
        };
        let row = (y * self.scale_y).floor();
        if row < 0.0 || row >= self.rows as f64 {
            return;
        }
        let anchor = (x * self.scale_x).round() as i64;
        let start = match align {
            TextAlign::Left => anchor,
            TextAlign::Center => anchor - glyphs.len() as i64 / 2,
        };
        for (i, ch) in glyphs.into_iter().enumerate() {
            let col = start + i as i64;
            if ch == ' ' || col < 0 || col > u16::MAX as i64 {
                continue;
            }
            if let Some(cell) = self.cell_mut(col as u16, row as u16) {
                let under = cell.surface();
                *cell = Cell {
                    ch,
                    fg: blend(under, color),
                    bg: under,
                };
            }
        }
    }

    fn overlay(&mut self, color: Rgba) {
        for cell in &mut self.cells {
            cell.fg = blend(cell.fg, color);
            cell.bg = blend(cell.bg, color);
        }
    }

    /// Nearest-neighbour sample of the sprite art into the entity's cells.
    /// Sprites that have not loaded draw nothing.
    fn sprite(&mut self, id: SpriteId, sprites: &Sprites, x: f64, y: f64, w: f64, h: f64) {
        let Some(art) = sprites.get(id) else {
            return;
        };
        let Some(((c0, c1), (r0, r1))) = self.cell_rect(x, y, w, h) else {
            return;
        };
        // Sample against the unclipped rect so edge-clipped sprites keep
        // their proportions.
        let full_c0 = (x * self.scale_x).floor();
        let full_r0 = (y * self.scale_y).floor();
        let full_cols = (((x + w) * self.scale_x).ceil() - full_c0).max(1.0);
        let full_rows = (((y + h) * self.scale_y).ceil() - full_r0).max(1.0);
        let color = match id {
            SpriteId::Ship => C_SHIP,
            SpriteId::Asteroid => C_ASTEROID,
        };

        for row in r0..r1 {
            let v = (row as f64 - full_r0) / full_rows;
            for col in c0..c1 {
                let u = (col as f64 - full_c0) / full_cols;
                let ch = art.sample(u, v);
                if ch == ' ' {
                    continue;
                }
                if let Some(cell) = self.cell_mut(col, row) {
                    let under = cell.surface();
                    *cell = Cell {
                        ch,
                        fg: color,
                        bg: under,
                    };
                }
            }
        }
    }
}
