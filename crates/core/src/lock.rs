//! Lock & merge: committing the active piece into the board.

use tracing::debug;

use crate::board::Board;
use crate::pieces::{Piece, ShapeTable};

/// What happened when a piece was merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Cells written into the visible grid.
    pub cells_written: u8,
    /// At least one cell was still above row 0: the stack has overflowed.
    pub overflow: bool,
}

/// Write every cell of `piece` into `board` with the piece's color.
///
/// The piece must be at its last valid position. Cells above the board are
/// not written; their presence is reported as overflow, which ends the game.
pub fn merge_piece(board: &mut Board, piece: &Piece, shapes: &ShapeTable) -> MergeOutcome {
    let mut cells_written = 0;
    let mut overflow = false;

    for (col, row) in piece.cells(shapes) {
        if row < 0 {
            overflow = true;
        } else if board.set_cell(col, row, piece.kind) {
            cells_written += 1;
        }
    }

    debug!(
        kind = piece.kind.as_str(),
        col = piece.col,
        row = piece.row,
        overflow,
        "piece merged"
    );

    MergeOutcome {
        cells_written,
        overflow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, Rotation};

    #[test]
    fn merge_writes_piece_color() {
        let t = ShapeTable::standard().unwrap();
        let mut board = Board::default();
        let piece = Piece::new(PieceKind::T, Rotation::SPAWN, 3, 18);

        let outcome = merge_piece(&mut board, &piece, &t);

        assert_eq!(
            outcome,
            MergeOutcome {
                cells_written: 4,
                overflow: false
            }
        );
        for (col, row) in piece.cells(&t) {
            assert_eq!(board.get(col, row), Some(Some(PieceKind::T)));
        }
    }

    #[test]
    fn merge_above_board_is_overflow() {
        let t = ShapeTable::standard().unwrap();
        let mut board = Board::default();
        // Vertical I with its top two cells above row 0.
        let piece = Piece::new(PieceKind::I, Rotation::new(1), 0, -2);

        let outcome = merge_piece(&mut board, &piece, &t);

        assert!(outcome.overflow);
        assert_eq!(outcome.cells_written, 2);
        assert!(board.is_occupied(2, 0));
        assert!(board.is_occupied(2, 1));
    }
}
