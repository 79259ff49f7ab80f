//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Only the 20 visible rows are drawn; the two buffer rows above them stay
//! off-screen. Freshly locked cells glow in their kind's glow color and fade
//! back to the base color, and cleared rows flash briefly.

use crate::core::board::Cell as BoardCell;
use crate::core::{shape, ActivePiece, GameSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::{Phase, PieceKind, Rgb, BOARD_COLS, HIDDEN_ROWS, VISIBLE_ROWS};

/// Time for a lock glow to fade out
pub const GLOW_DECAY_MS: u64 = 600;
/// Length of the line-clear flash
pub const FLASH_MS: u64 = 280;

const PLAYFIELD_BG: Rgb = Rgb::hex(0x0b0b1e);
const GRID_FG: Rgb = Rgb::hex(0x2a2a48);
const BORDER_FG: Rgb = Rgb::hex(0xff4dd8);
const FLASH_BG: Rgb = Rgb::hex(0xf5f5ff);
const TEXT_FG: Rgb = Rgb::hex(0xe6e6f0);
const SCREEN_BG: Rgb = Rgb::hex(0x06060f);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Playfield origin on screen (top-left of the border).
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse the framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::new(' ', CellStyle::new(TEXT_FG, SCREEN_BG)));

        let w = BOARD_COLS as u16 * self.cell_w + 2;
        let h = VISIBLE_ROWS as u16 * self.cell_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        self.draw_border(fb, frame);
        self.draw_board(fb, frame, snap);
        self.draw_flash(fb, frame, snap);

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost = active.translated(0, ghost_y - active.y);
            let color = shape(active.kind).color.mix(PLAYFIELD_BG, 0.55);
            self.draw_piece(fb, frame, &ghost, '░', CellStyle::new(color, PLAYFIELD_BG).dim());
        }
        if let Some(active) = snap.active {
            let def = shape(active.kind);
            let style = CellStyle::new(def.color, PLAYFIELD_BG).bold();
            self.draw_piece(fb, frame, &active, '█', style);
        }

        self.draw_side_panel(fb, frame, snap, viewport);
        self.draw_overlay(fb, frame, snap);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        let style = CellStyle::new(BORDER_FG, SCREEN_BG);
        let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);
        fb.put_char(f.x, f.y, '╭', style);
        fb.put_char(right, f.y, '╮', style);
        fb.put_char(f.x, bottom, '╰', style);
        fb.put_char(right, bottom, '╯', style);
        for x in f.x + 1..right {
            fb.put_char(x, f.y, '─', style);
            fb.put_char(x, bottom, '─', style);
        }
        for y in f.y + 1..bottom {
            fb.put_char(f.x, y, '│', style);
            fb.put_char(right, y, '│', style);
        }
    }

    fn draw_board(&self, fb: &mut FrameBuffer, f: Frame, snap: &GameSnapshot) {
        for (row, cells) in snap.board.rows().enumerate().skip(HIDDEN_ROWS) {
            for (col, cell) in cells.iter().enumerate() {
                let (ch, style) = match cell {
                    Some(cell) => ('█', locked_style(cell, snap.now_ms)),
                    None => ('·', CellStyle::new(GRID_FG, PLAYFIELD_BG).dim()),
                };
                self.fill_cell(fb, f, col as i32, row as i32, ch, style);
            }
        }
    }

    fn draw_flash(&self, fb: &mut FrameBuffer, f: Frame, snap: &GameSnapshot) {
        let Some(effect) = &snap.recent_effect else {
            return;
        };
        let age = snap.now_ms.saturating_sub(effect.timestamp);
        if age >= FLASH_MS {
            return;
        }
        let strength = 1.0 - age as f32 / FLASH_MS as f32;
        let bg = PLAYFIELD_BG.mix(FLASH_BG, strength);
        for &row in &effect.rows {
            for col in 0..BOARD_COLS as i32 {
                self.fill_cell(fb, f, col, row as i32, ' ', CellStyle::new(bg, bg));
            }
        }
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, f: Frame, piece: &ActivePiece, ch: char, style: CellStyle) {
        for (x, y) in piece.cells() {
            self.fill_cell(fb, f, x, y, ch, style);
        }
    }

    /// Paint one board cell; hidden rows and out-of-range cells are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, f: Frame, x: i32, y: i32, ch: char, style: CellStyle) {
        let visible_y = y - HIDDEN_ROWS as i32;
        if !(0..BOARD_COLS as i32).contains(&x) || !(0..VISIBLE_ROWS as i32).contains(&visible_y) {
            return;
        }
        let px = f.x + 1 + x as u16 * self.cell_w;
        let py = f.y + 1 + visible_y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, f: Frame, snap: &GameSnapshot, viewport: Viewport) {
        let x = f.x.saturating_add(f.w).saturating_add(2);
        if x >= viewport.width || viewport.width - x < 10 {
            return;
        }

        let label = CellStyle::new(BORDER_FG, SCREEN_BG).bold();
        let value = CellStyle::new(TEXT_FG, SCREEN_BG);
        let mut y = f.y;

        for (name, n) in [
            ("SCORE", snap.stats.score),
            ("LEVEL", snap.stats.level),
            ("LINES", snap.stats.lines),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, n, value);
            y += 3;
        }

        if snap.stats.combo > 1 {
            fb.put_str(x, y, "COMBO x", label);
            fb.put_u32(x + 7, y, snap.stats.combo, value);
        }
        y += 2;

        fb.put_str(x, y, "HOLD", label);
        match snap.hold {
            Some(kind) => {
                let style = kind_style(kind);
                let style = if snap.can_hold { style } else { style.dim() };
                fb.put_str(x, y + 1, kind.as_str(), style);
            }
            None => fb.put_str(x, y + 1, "-", value),
        }
        y += 3;

        fb.put_str(x, y, "NEXT", label);
        for (i, kind) in snap.next_queue.iter().enumerate() {
            let style = if i == 0 { kind_style(*kind) } else { kind_style(*kind).dim() };
            fb.put_str(x, y + 1 + i as u16, kind.as_str(), style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, f: Frame, snap: &GameSnapshot) {
        let mid = f.y + f.h / 2;
        match snap.phase {
            Phase::Intro => {
                self.center_text(fb, f, mid - 1, "NEON TETRIS");
                self.center_text(fb, f, mid + 1, "ENTER TO START");
            }
            Phase::Countdown => {
                if let Some(secs) = snap.countdown_seconds() {
                    let digit = char::from_digit(secs.min(9) as u32, 10).unwrap_or('0');
                    let mut buf = [0u8; 4];
                    self.center_text(fb, f, mid, digit.encode_utf8(&mut buf));
                }
            }
            Phase::Paused => self.center_text(fb, f, mid, "PAUSED"),
            Phase::Over => {
                self.center_text(fb, f, mid - 1, "GAME OVER");
                self.center_text(fb, f, mid + 1, "ENTER TO RETRY");
            }
            Phase::Playing => {}
        }
    }

    fn center_text(&self, fb: &mut FrameBuffer, f: Frame, y: u16, text: &str) {
        let len = text.chars().count() as u16;
        let x = f.x + f.w.saturating_sub(len) / 2;
        fb.put_str(x, y, text, CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold());
    }
}

/// Base color blended toward the glow color while the lock is fresh.
fn locked_style(cell: &BoardCell, now_ms: u64) -> CellStyle {
    let def = shape(cell.kind);
    let age = now_ms.saturating_sub(cell.locked_at) as f32;
    let glow = cell.glow * (1.0 - age / GLOW_DECAY_MS as f32).max(0.0);
    CellStyle::new(def.color.mix(def.glow, glow), PLAYFIELD_BG)
}

fn kind_style(kind: PieceKind) -> CellStyle {
    CellStyle::new(shape(kind).color, SCREEN_BG).bold()
}
