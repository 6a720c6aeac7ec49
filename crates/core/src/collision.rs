//! Collision validator.
//!
//! [`is_valid_placement`] is the only placement predicate in the engine:
//! moves, rotations, drops, spawns and the game-over check all go through it.

use crate::board::Board;
use crate::pieces::{Piece, ShapeTable};

/// Whether `piece` fits on `board`.
///
/// A cell is rejected when its column is outside `[0, width)`, its row is at
/// or below the floor, or it lands on a locked cell. Cells above the board
/// (`row < 0`) only need a legal column.
#[inline]
pub fn is_valid_placement(piece: &Piece, shapes: &ShapeTable, board: &Board) -> bool {
    let width = board.width() as i32;
    let height = board.height() as i32;

    piece.cells(shapes).iter().all(|&(col, row)| {
        if col < 0 || col >= width || row >= height {
            return false;
        }
        row < 0 || !board.is_occupied(col, row)
    })
}

/// Rows `piece` can fall before its next downward step would be invalid.
pub fn drop_distance(piece: &Piece, shapes: &ShapeTable, board: &Board) -> i32 {
    let mut distance = 0;
    while is_valid_placement(&piece.shifted(0, distance + 1), shapes, board) {
        distance += 1;
    }
    distance
}
