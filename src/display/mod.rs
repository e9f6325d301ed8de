/// Rendering layer — all terminal I/O lives here.
///
/// `render` receives a mutable writer and a composed [`Frame`].  No game
/// logic is performed; this module only translates draw commands into
/// terminal commands.
///
/// Layout: row 0 carries the score displays, the last row the controls
/// hint, and everything in between is the drawing surface.

pub mod grid;
pub mod sprite;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::config::GameConfig;
use crate::scene::Frame;

pub use grid::{CellGrid, Rgb};
pub use sprite::Sprites;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_HIGH: Color = Color::Yellow;
const C_HUD_SCORE: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

const HINT: &str = "← → / A D : Move   SPACE : Shoot   Q : Quit";

fn to_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Rasterise `frame` at the given terminal size, without touching a terminal.
pub fn rasterize(
    frame: &Frame,
    sprites: &Sprites,
    config: &GameConfig,
    cols: u16,
    rows: u16,
) -> CellGrid {
    let mut grid = CellGrid::new(cols, rows, config.canvas_width, config.canvas_height);
    for command in &frame.commands {
        grid.draw(command, sprites);
    }
    grid
}

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    frame: &Frame,
    sprites: &Sprites,
    config: &GameConfig,
    (width, height): (u16, u16),
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, frame, width)?;

    let surface_rows = height.saturating_sub(2);
    if surface_rows > 0 && width > 0 {
        let grid = rasterize(frame, sprites, config, width, surface_rows);
        draw_grid(out, &grid, 1)?;
    }

    draw_controls_hint(out, height)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, frame: &Frame, width: u16) -> std::io::Result<()> {
    // High score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
    out.queue(Print(format!("HI {}", frame.scoreboard.high_score)))?;

    // Current score — right
    let score = format!("SCORE {}", frame.scoreboard.score);
    let rx = width.saturating_sub(score.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score))?;

    Ok(())
}

// ── Surface ───────────────────────────────────────────────────────────────────

/// Emit the grid row by row, switching colours only when they change.
fn draw_grid<W: Write>(out: &mut W, grid: &CellGrid, top: u16) -> std::io::Result<()> {
    for row in 0..grid.rows() {
        out.queue(cursor::MoveTo(0, top + row))?;
        let mut current: Option<(Rgb, Rgb)> = None;
        let mut run = String::new();

        for col in 0..grid.cols() {
            let Some(cell) = grid.cell(col, row) else {
                continue;
            };
            let colors = (cell.fg, cell.bg);
            if current != Some(colors) {
                if !run.is_empty() {
                    out.queue(Print(&run))?;
                    run.clear();
                }
                out.queue(style::SetForegroundColor(to_color(cell.fg)))?;
                out.queue(style::SetBackgroundColor(to_color(cell.bg)))?;
                current = Some(colors);
            }
            run.push(cell.ch);
        }
        if !run.is_empty() {
            out.queue(Print(&run))?;
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(HINT))?;
    Ok(())
}
