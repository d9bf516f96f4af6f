//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{FrameBuffer, Glyph, Style};
use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

const BLOCK: char = '█';
const PLAYFIELD_BG: Color = Color::rgb(30, 30, 40);
const PANEL_BG: Color = Color::rgb(0, 0, 0);
const POWER_FG: Color = Color::rgb(255, 255, 0);

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

/// Lays out the playfield, side panel and overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square in most fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Top-left of the bordered playfield inside the framebuffer.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Width and height of the bordered playfield in terminal cells
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render a snapshot into an existing framebuffer (resized to `viewport`).
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let (frame_w, frame_h) = self.frame_size();
        let origin = Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
        };

        let border = Style::new(Color::rgb(200, 200, 200), PANEL_BG);
        self.draw_border(fb, origin, frame_w, frame_h, border);

        let empty = Style::new(Color::rgb(90, 90, 100), PLAYFIELD_BG).dim();
        for (row, cells) in snap.board.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, origin, row as i8, col as i8, *color),
                    None => self.fill_board_cell(fb, origin, row as u16, col as u16, '·', empty),
                }
            }
        }

        if let Some(active) = snap.active {
            for (row, col) in active.cells() {
                self.draw_block(fb, origin, row, col, active.color);
            }
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        if snap.game_over {
            self.draw_overlay(fb, origin, frame_w, frame_h, &["GAME OVER", "r restart", "q quit"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, o: Origin, w: u16, h: u16, style: Style) {
        if w < 2 || h < 2 {
            return;
        }
        let (right, bottom) = (o.x + w - 1, o.y + h - 1);

        fb.put(o.x, o.y, '┌', style);
        fb.put(right, o.y, '┐', style);
        fb.put(o.x, bottom, '└', style);
        fb.put(right, bottom, '┘', style);
        for x in o.x + 1..right {
            fb.put(x, o.y, '─', style);
            fb.put(x, bottom, '─', style);
        }
        for y in o.y + 1..bottom {
            fb.put(o.x, y, '│', style);
            fb.put(right, y, '│', style);
        }
    }

    /// Draw a colored block; cells above or outside the board are skipped.
    fn draw_block(&self, fb: &mut FrameBuffer, o: Origin, row: i8, col: i8, color: Color) {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return;
        }
        let style = Style::new(color, PLAYFIELD_BG).bold();
        self.fill_board_cell(fb, o, row as u16, col as u16, BLOCK, style);
    }

    fn fill_board_cell(&self, fb: &mut FrameBuffer, o: Origin, row: u16, col: u16, ch: char, style: Style) {
        let x = o.x + 1 + col * self.cell_w;
        let y = o.y + 1 + row * self.cell_h;
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        o: Origin,
        frame_w: u16,
    ) {
        let panel_x = o.x.saturating_add(frame_w).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = Style::default().bold();
        let value = Style::default();

        let mut y = o.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y, &next.shape, next.color);
        }
        y += 5;

        if snap.power_active {
            let style = Style::new(POWER_FG, PANEL_BG).bold();
            fb.put_str(panel_x, y, "POWER ACTIVE!", style);
            let secs = snap.power_remaining_ms.div_ceil(1000) as u32;
            let timer = Style::new(POWER_FG, PANEL_BG);
            fb.put_u32(panel_x, y + 1, secs, timer);
            let digits = secs.checked_ilog10().unwrap_or(0) as u16 + 1;
            fb.put(panel_x + digits, y + 1, 's', timer);
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: &Shape, color: Color) {
        let style = Style::new(color, PANEL_BG);
        for (r, c) in shape.filled() {
            let px = x + c as u16 * self.cell_w;
            fb.fill_rect(px, y + r as u16, self.cell_w, 1, BLOCK, style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, o: Origin, frame_w: u16, frame_h: u16, lines: &[&str]) {
        let style = Style::new(Color::rgb(255, 255, 255), PANEL_BG).bold();
        let top = o.y + (frame_h / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = o.x + frame_w.saturating_sub(text_w) / 2;
            fb.put_str(x, top + i as u16, text, style);
        }
    }
}
