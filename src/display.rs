//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable `Frame`.  No
//! game logic is performed; this module only scales field coordinates onto
//! the terminal grid and translates sprites into glyphs.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use daga_bomber::config::Config;
use daga_bomber::entities::Position;
use daga_bomber::frame::{Frame, Rgb, Sprite, SpriteKind};
use daga_bomber::DisplayError;

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_PLAYER: Color = Color::Blue;
const C_PLAYER_HURT: Color = Color::Red;
const C_BOMB_ARMED: Color = Color::DarkGrey;
const C_BOMB_EXPLODING: Color = Color::Red;
const C_MONSTER: Color = Color::DarkGreen;
const C_HEART: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

/// Fail early when the terminal cannot hold the play-field.
pub fn check_size(width: u16, height: u16) -> Result<(), DisplayError> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(DisplayError::TerminalTooSmall {
            width,
            height,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
        });
    }
    Ok(())
}

// ── Field → terminal mapping ──────────────────────────────────────────────────

/// Maps the playable part of the reference field (below the HUD band) onto
/// the bordered area: columns 1..w-2, rows 2..h-3.
pub struct Viewport {
    width: u16,
    height: u16,
    field_width: f32,
    field_top: f32,
    field_height: f32,
}

impl Viewport {
    pub fn new(width: u16, height: u16, config: &Config) -> Self {
        Viewport {
            width,
            height,
            field_width: config.field_width,
            field_top: config.header_height,
            field_height: config.field_height,
        }
    }

    fn cell(&self, pos: Position) -> (u16, u16) {
        let cols = self.width.saturating_sub(3) as f32;
        let rows = self.height.saturating_sub(5) as f32;
        let fx = (pos.x / self.field_width).clamp(0.0, 1.0);
        let fy = ((pos.y - self.field_top) / (self.field_height - self.field_top)).clamp(0.0, 1.0);
        (1 + (fx * cols).round() as u16, 2 + (fy * rows).round() as u16)
    }

    /// HUD column for an icon placed in the header band.
    fn header_col(&self, x: f32) -> u16 {
        let cols = self.width.saturating_sub(1) as f32;
        ((x / self.field_width).clamp(0.0, 1.0) * cols) as u16
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, view: &Viewport, frame: &Frame) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(rgb(frame.background)))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, view, frame)?;

    for sprite in &frame.sprites {
        draw_sprite(out, view, sprite, frame.player_hurt)?;
    }

    draw_controls_hint(out, view, frame)?;

    if frame.on_start {
        draw_banner(out, view, frame, &["DAGA BOMBER", "Press an arrow key or SPACE to start"])?;
    } else if frame.over {
        let score = format!("Score: {}   Best: {}", frame.hud.score, frame.hud.high_score);
        draw_banner(out, view, frame, &["GAME  OVER", score.as_str(), "R - Play Again  Q - Quit"])?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, frame: &Frame) -> std::io::Result<()> {
    let hud = &frame.hud;

    for icon in &frame.icons {
        let col = view.header_col(icon.pos.x);
        out.queue(cursor::MoveTo(col, 0))?;
        match icon.kind {
            SpriteKind::Compass => {
                out.queue(style::SetForegroundColor(C_BORDER))?;
                out.queue(Print("✥N"))?;
            }
            SpriteKind::Heart => {
                out.queue(style::SetForegroundColor(C_HEART))?;
                out.queue(Print("♥"))?;
                out.queue(style::SetForegroundColor(rgb(frame.text)))?;
                out.queue(Print(format!(" {:<4}", hud.life)))?;
            }
            _ => {}
        }
    }

    out.queue(style::SetForegroundColor(rgb(frame.text)))?;
    let timer = format!("Time: {:>3}", hud.countdown);
    out.queue(cursor::MoveTo(view.width / 4 + 2, 0))?;
    out.queue(Print(&timer))?;

    let bombs = format!("Bombs Remaining: {}", hud.bombs_remaining);
    out.queue(cursor::MoveTo(
        (view.width / 2).saturating_sub(bombs.chars().count() as u16 / 2) + 4,
        0,
    ))?;
    out.queue(style::SetForegroundColor(rgb(hud.bombs_color)))?;
    out.queue(Print(&bombs))?;

    let score = format!("Score:{:>4}  Hi:{:>4}", hud.score, hud.high_score);
    out.queue(cursor::MoveTo(
        view.width.saturating_sub(score.chars().count() as u16 + 1),
        0,
    ))?;
    out.queue(style::SetForegroundColor(rgb(frame.text)))?;
    out.queue(Print(&score))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Eight-way arrow for a heading.  0° is up, 90° is left.
fn heading_glyph(angle: f32) -> &'static str {
    const ARROWS: [&str; 8] = ["▲", "◤", "◀", "◣", "▼", "◢", "▶", "◥"];
    let index = ((angle + 22.5).rem_euclid(360.0) / 45.0) as usize % 8;
    ARROWS[index]
}

fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    sprite: &Sprite,
    player_hurt: bool,
) -> std::io::Result<()> {
    let (col, row) = view.cell(sprite.pos);
    match sprite.kind {
        SpriteKind::Player => {
            out.queue(cursor::MoveTo(col, row))?;
            let color = if player_hurt { C_PLAYER_HURT } else { C_PLAYER };
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(heading_glyph(sprite.rotation)))?;
        }
        SpriteKind::BombArmed => {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_BOMB_ARMED))?;
            out.queue(Print("●"))?;
        }
        SpriteKind::BombExploding => {
            // Blast:
            //   ░█░
            //   ███
            //   ░█░
            out.queue(style::SetForegroundColor(C_BOMB_EXPLODING))?;
            let top = row.saturating_sub(1).max(2);
            let bottom = (row + 1).min(view.height.saturating_sub(3));
            let left = col.saturating_sub(1).max(1);
            for (r, line) in [(top, "░█░"), (row, "███"), (bottom, "░█░")] {
                out.queue(cursor::MoveTo(left, r))?;
                out.queue(Print(line))?;
            }
        }
        SpriteKind::Monster => {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_MONSTER))?;
            out.queue(Print("Ѫ"))?;
        }
        SpriteKind::Compass | SpriteKind::Heart => {}
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport, frame: &Frame) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → : Turn   ↑ ↓ : Thrust   SPACE : Bomb   Q : Quit"))?;

    let fps = format!("FPS: {}", frame.hud.fps as u32);
    out.queue(cursor::MoveTo(
        view.width.saturating_sub(fps.chars().count() as u16 + 1),
        view.height.saturating_sub(1),
    ))?;
    out.queue(style::SetForegroundColor(rgb(frame.text)))?;
    out.queue(Print(&fps))?;
    Ok(())
}

// ── Start / game-over overlay ─────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    view: &Viewport,
    frame: &Frame,
    lines: &[&str],
) -> std::io::Result<()> {
    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, line) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        let color = if i == 0 { C_PLAYER_HURT } else { rgb(frame.text) };
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}
