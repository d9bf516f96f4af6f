//! TerminalRenderer: flushes a framebuffer to the real terminal.
//!
//! The first frame (and every frame after a resize or `invalidate`) is a
//! full redraw. Later frames only emit the runs of glyphs that changed.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Style};
use crate::types::Color;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen; `None` forces a full redraw.
    front: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            front: None,
            out: Vec::with_capacity(32 * 1024),
        }
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Restore the terminal. Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Draw `back` and swap it with the previously shown frame.
    ///
    /// On return `back` holds the old frame, ready to be rendered into again,
    /// so no frame is ever cloned.
    pub fn draw_swap(&mut self, back: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let mut front = match self.front.take() {
            Some(front) if front.width() == back.width() && front.height() == back.height() => {
                encode_diff_into(&front, back, &mut self.out)?;
                front
            }
            _ => {
                encode_full_into(back, &mut self.out)?;
                FrameBuffer::new(back.width(), back.height())
            }
        };
        self.flush()?;

        std::mem::swap(&mut front, back);
        self.front = Some(front);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.out)
            .context("write frame to stdout")?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-screen redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut pen: Option<Style> = None;
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let glyph = fb.get(x, y).unwrap_or_default();
            if pen != Some(glyph.style) {
                queue_style(out, glyph.style)?;
                pen = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
        if y + 1 < fb.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    queue_reset(out)
}

/// Encode only the glyph runs that differ between `prev` and `next`.
///
/// Both buffers must have the same dimensions; otherwise every row is redrawn.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen: Option<Style> = None;
    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let glyph = next.get(x + dx, y).unwrap_or_default();
            if pen != Some(glyph.style) {
                queue_style(out, glyph.style)?;
                pen = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
    }

    queue_reset(out)
}

fn queue_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetForegroundColor(term_color(style.fg)))?;
    out.queue(SetBackgroundColor(term_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn queue_reset(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// `(x, y, len)` runs of horizontally adjacent glyphs that changed.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let (w, h) = (next.width(), next.height());
    if prev.width() != w || prev.height() != h {
        return (0..h).map(|y| (0, y, w)).collect();
    }

    let differs = |x: u16, y: u16| prev.get(x, y) != next.get(x, y);
    let mut runs = Vec::new();
    for y in 0..h {
        let mut x = 0;
        while x < w {
            if !differs(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && differs(x, y) {
                x += 1;
            }
            runs.push((start, y, x - start));
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_runs_coalesce_adjacent_glyphs() {
        let prev = FrameBuffer::new(6, 2);
        let mut next = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            next.put(x, 0, '█', Style::default());
        }
        next.put(5, 1, '·', Style::default());

        assert_eq!(changed_runs(&prev, &next), vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn style_change_alone_is_a_change() {
        let prev = FrameBuffer::new(2, 1);
        let mut next = FrameBuffer::new(2, 1);
        next.put(0, 0, ' ', Style::default().bold());

        assert_eq!(changed_runs(&prev, &next), vec![(0, 0, 1)]);
    }

    #[test]
    fn identical_frames_encode_to_reset_only() {
        let fb = FrameBuffer::new(4, 4);
        let mut diff = Vec::new();
        encode_diff_into(&fb, &fb, &mut diff).unwrap();

        let mut reset = Vec::new();
        queue_reset(&mut reset).unwrap();
        assert_eq!(diff, reset);
    }

    #[test]
    fn full_redraw_contains_every_glyph() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "abc", Style::default());
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('a') && text.contains('b') && text.contains('c'));
    }

    #[test]
    fn term_color_maps_channels() {
        assert_eq!(
            term_color(Color::rgb(1, 2, 3)),
            style::Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
