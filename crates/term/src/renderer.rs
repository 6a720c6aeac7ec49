//! TerminalRenderer: flushes a canvas to a real terminal.
//!
//! Only rows that differ from the previous frame are rewritten. A size
//! change (or [`TerminalRenderer::invalidate`]) forces a full redraw.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame written to the terminal.
    shown: Canvas,
    full_redraw: bool,
    buf: Vec<u8>,
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
            shown: Canvas::default(),
            full_redraw: true,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.full_redraw = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.full_redraw = true;
    }

    pub fn draw(&mut self, canvas: &Canvas) -> Result<()> {
        let full = self.full_redraw
            || self.shown.width() != canvas.width()
            || self.shown.height() != canvas.height();

        self.buf.clear();
        if full {
            encode_frame_into(None, canvas, &mut self.buf)?;
        } else {
            encode_frame_into(Some(&self.shown), canvas, &mut self.buf)?;
        }
        self.flush_buf()?;

        self.shown.clone_from(canvas);
        self.full_redraw = false;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the rows of `next` that differ from `prev` into `out`.
///
/// With no previous frame the screen is cleared and every row written.
/// Returns the number of rows written.
pub fn encode_frame_into(prev: Option<&Canvas>, next: &Canvas, out: &mut Vec<u8>) -> Result<usize> {
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut written = 0;
    let mut current: Option<Style> = None;
    for y in 0..next.height() {
        let row = next.row(y);
        if prev.is_some_and(|p| p.row(y) == row) {
            continue;
        }

        out.queue(cursor::MoveTo(0, y))?;
        for glyph in row {
            if current != Some(glyph.style) {
                apply_style_into(out, glyph.style)?;
                current = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
        written += 1;
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(written)
}

fn apply_style_into(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(style.fg))?;
    out.queue(SetBackgroundColor(style.bg))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_writes_every_row() {
        let canvas = Canvas::new(4, 3);
        let mut out = Vec::new();
        assert_eq!(encode_frame_into(None, &canvas, &mut out).unwrap(), 3);
        assert!(!out.is_empty());
    }

    #[test]
    fn unchanged_rows_are_skipped() {
        let prev = Canvas::new(4, 3);
        let mut next = prev.clone();
        next.put(2, 1, 'X', Style::default());

        let mut out = Vec::new();
        assert_eq!(encode_frame_into(Some(&prev), &next, &mut out).unwrap(), 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('X'));
    }

    #[test]
    fn identical_frames_write_nothing_visible() {
        let canvas = Canvas::new(4, 3);
        let mut out = Vec::new();
        assert_eq!(encode_frame_into(Some(&canvas), &canvas, &mut out).unwrap(), 0);
    }
}
