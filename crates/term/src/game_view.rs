//! GameView: maps a `GameSnapshot` into a canvas.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crossterm::style::Color;

use crate::canvas::{Canvas, Style};
use crate::core::GameSnapshot;
use crate::types::PieceKind;

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

const PANEL_GAP: u16 = 2;
const PANEL_WIDTH: u16 = 14;

const BOARD_BG: Color = Color::Rgb {
    r: 30,
    g: 30,
    b: 40,
};

/// Board cell width in terminal columns; 2 roughly squares the cells.
pub struct GameView {
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

/// Top-left corner of the board frame.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render `snap` into `canvas`, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, canvas: &mut Canvas) {
        canvas.resize(viewport.width, viewport.height);
        canvas.clear();

        let frame_w = dim(snap.width).saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = dim(snap.height).saturating_add(2);
        let total_w = frame_w.saturating_add(PANEL_GAP + PANEL_WIDTH);
        let origin = Origin {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
        };

        draw_border(canvas, origin, frame_w, frame_h);

        // Cells past the viewport edge are never drawn.
        let cols = snap.width.min(usize::from(viewport.width / self.cell_w)) as i32;
        let rows = snap.height.min(usize::from(viewport.height)) as i32;
        let empty = Style::new(Color::DarkGrey, BOARD_BG);
        for row in 0..rows {
            for col in 0..cols {
                match snap.cell(col, row).and_then(PieceKind::from_color_id) {
                    Some(kind) => self.draw_block(canvas, origin, col, row, '█', piece_style(kind)),
                    None => self.draw_block(canvas, origin, col, row, '·', empty),
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_row) = snap.ghost_row {
                let drop = ghost_row - active.row;
                if drop > 0 {
                    let ghost = Style::new(Color::Grey, BOARD_BG);
                    for &(col, row) in &active.cells {
                        self.draw_visible(canvas, origin, snap, col, row + drop, '░', ghost);
                    }
                }
            }

            let style = piece_style(active.kind).bold();
            for &(col, row) in &active.cells {
                self.draw_visible(canvas, origin, snap, col, row, '█', style);
            }
        }

        let panel_x = origin.x.saturating_add(frame_w).saturating_add(PANEL_GAP);
        self.draw_panel(canvas, snap, panel_x, origin.y);

        if snap.game_over {
            let text = Style::new(Color::White, Color::Black).bold();
            let mid = origin.y.saturating_add(frame_h / 2);
            center_text(canvas, origin.x, frame_w, mid, "GAME OVER", text);
            center_text(canvas, origin.x, frame_w, mid.saturating_add(1), "r restart  q quit", text);
        }
    }

    /// Convenience helper that allocates a new canvas.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut canvas);
        canvas
    }

    /// Terminal position of a board cell, `None` past `u16` range.
    fn cell_origin(&self, origin: Origin, col: i32, row: i32) -> Option<(u16, u16)> {
        let col = u16::try_from(col).ok()?;
        let row = u16::try_from(row).ok()?;
        let x = col.checked_mul(self.cell_w)?.checked_add(origin.x)?.checked_add(1)?;
        let y = row.checked_add(origin.y)?.checked_add(1)?;
        Some((x, y))
    }

    fn draw_block(&self, canvas: &mut Canvas, origin: Origin, col: i32, row: i32, ch: char, style: Style) {
        if let Some((x, y)) = self.cell_origin(origin, col, row) {
            canvas.fill(x, y, self.cell_w, 1, ch, style);
        }
    }

    /// Skips cells above or outside the board.
    #[allow(clippy::too_many_arguments)]
    fn draw_visible(
        &self,
        canvas: &mut Canvas,
        origin: Origin,
        snap: &GameSnapshot,
        col: i32,
        row: i32,
        ch: char,
        style: Style,
    ) {
        let visible = col >= 0 && row >= 0 && (col as usize) < snap.width && (row as usize) < snap.height;
        if visible {
            self.draw_block(canvas, origin, col, row, ch, style);
        }
    }

    fn draw_panel(&self, canvas: &mut Canvas, snap: &GameSnapshot, x: u16, y: u16) {
        if x >= canvas.width() {
            return;
        }

        let label = Style::default().bold();
        let value = Style::default();

        let stats = [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("SPEED MS", snap.gravity_interval_ms),
        ];
        let mut line = y;
        for (name, stat) in stats {
            canvas.put_str(x, line, name, label);
            canvas.put_number(x, line + 1, stat, value);
            line += 3;
        }

        canvas.put_str(x, line, "NEXT", label);
        line += 1;
        let min_row = snap.next.shape.iter().map(|&(_, r)| r).min().unwrap_or(0);
        let style = piece_style(snap.next.kind);
        for &(col, row) in &snap.next.shape {
            let px = x + col as u16 * self.cell_w;
            let py = line + (row - min_row) as u16;
            canvas.fill(px, py, self.cell_w, 1, '█', style);
        }
    }
}

fn draw_border(canvas: &mut Canvas, origin: Origin, w: u16, h: u16) {
    let style = Style::new(Color::White, Color::Black);
    let (x, y) = (origin.x, origin.y);
    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);

    canvas.put(x, y, '┌', style);
    canvas.put(right, y, '┐', style);
    canvas.put(x, bottom, '└', style);
    canvas.put(right, bottom, '┘', style);
    canvas.fill(x + 1, y, w - 2, 1, '─', style);
    canvas.fill(x + 1, bottom, w - 2, 1, '─', style);
    canvas.fill(x, y + 1, 1, h - 2, '│', style);
    canvas.fill(right, y + 1, 1, h - 2, '│', style);
}

fn center_text(canvas: &mut Canvas, x: u16, w: u16, y: u16, text: &str, style: Style) {
    let len = text.chars().count() as u16;
    canvas.put_str(x.saturating_add(w.saturating_sub(len) / 2), y, text, style);
}

/// Board dimension clamped to terminal coordinates.
fn dim(cells: usize) -> u16 {
    u16::try_from(cells).unwrap_or(u16::MAX)
}

fn piece_style(kind: PieceKind) -> Style {
    let fg = match kind {
        PieceKind::I => Color::Cyan,
        PieceKind::O => Color::Yellow,
        PieceKind::T => Color::Magenta,
        PieceKind::S => Color::Green,
        PieceKind::Z => Color::Red,
        PieceKind::J => Color::Blue,
        PieceKind::L => Color::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
    };
    Style::new(fg, BOARD_BG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Command, InputFrame};
    use crate::core::{EngineConfig, Game, Sequence};

    fn game(kinds: &[PieceKind]) -> Game<Sequence> {
        Game::with_source(EngineConfig::default(), Sequence::new(kinds.iter().copied())).unwrap()
    }

    fn count(canvas: &Canvas, ch: char) -> usize {
        (0..canvas.height())
            .map(|y| canvas.row(y).iter().filter(|g| g.ch == ch).count())
            .sum()
    }

    fn has_text(canvas: &Canvas, text: &str) -> bool {
        (0..canvas.height()).any(|y| canvas.row_text(y).contains(text))
    }

    #[test]
    fn draws_border_active_ghost_and_preview() {
        let snap = game(&[PieceKind::O, PieceKind::T]).snapshot();
        let canvas = GameView::default().render(&snap, Viewport::new(60, 24));

        assert_eq!(count(&canvas, '┌'), 1);
        assert_eq!(count(&canvas, '┘'), 1);
        // Active square plus the T preview, two columns per cell.
        assert_eq!(count(&canvas, '█'), 16);
        assert_eq!(count(&canvas, '░'), 8);
        assert!(has_text(&canvas, "NEXT"));
        assert!(!has_text(&canvas, "GAME OVER"));
    }

    #[test]
    fn shows_locked_cells_and_score() {
        let mut g = game(&[PieceKind::O]);
        g.tick(0, InputFrame::new().with(Command::HardDrop)).unwrap();
        let canvas = GameView::default().render(&g.snapshot(), Viewport::new(60, 24));

        // Locked square, active square and preview.
        assert_eq!(count(&canvas, '█'), 24);
        assert!(has_text(&canvas, "36"));
    }

    #[test]
    fn shows_game_over_overlay() {
        let mut g = game(&[PieceKind::O]);
        while !g.is_game_over() {
            g.tick(0, InputFrame::new().with(Command::HardDrop)).unwrap();
        }
        let canvas = GameView::default().render(&g.snapshot(), Viewport::new(60, 24));
        assert!(has_text(&canvas, "GAME OVER"));
    }

    #[test]
    fn oversized_board_is_clipped_to_viewport() {
        let snap = GameSnapshot {
            width: 40_000,
            height: 70_000,
            board: vec![0; 16],
            ..GameSnapshot::default()
        };
        let canvas = GameView::default().render(&snap, Viewport::new(80, 24));

        assert_eq!((canvas.width(), canvas.height()), (80, 24));
        assert_eq!(count(&canvas, '┌'), 1);
        assert_eq!(count(&canvas, '┘'), 0);
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = game(&[PieceKind::I]).snapshot();
        let canvas = GameView::default().render(&snap, Viewport::new(5, 3));
        assert_eq!((canvas.width(), canvas.height()), (5, 3));
    }
}
