//! Shape table and validator tests

use blockfall::core::{is_valid_placement, merge_piece, Board, Piece, ShapeTable};
use blockfall::types::{PieceKind, Rotation};

fn table() -> ShapeTable {
    ShapeTable::standard().unwrap()
}

#[test]
fn test_every_kind_has_four_cells_per_state() {
    let t = table();
    for kind in PieceKind::ALL {
        for r in 0..t.rotation_count(kind) {
            let shape = t.shape(kind, Rotation::new(r));
            let box_size = t.box_size(kind);
            assert!(shape
                .iter()
                .all(|&(c, row)| (0..box_size).contains(&c) && (0..box_size).contains(&row)));

            let mut unique = shape.to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 4, "{:?} state {}", kind, r);
        }
    }
}

#[test]
fn test_rotation_cycles_back_to_spawn() {
    let t = table();
    for kind in PieceKind::ALL {
        let spawn = Piece::spawn(kind, &t, 10);
        let mut piece = spawn;
        for _ in 0..t.rotation_count(kind) {
            piece = piece.rotated_cw(&t);
        }
        assert_eq!(piece.cells(&t), spawn.cells(&t), "{:?}", kind);
    }
}

#[test]
fn test_ccw_is_inverse_of_cw() {
    let t = table();
    for kind in PieceKind::ALL {
        for r in 0..t.rotation_count(kind) {
            let piece = Piece::new(kind, Rotation::new(r), 3, 5);
            assert_eq!(piece.rotated_ccw(&t).rotated_cw(&t), piece);
        }
    }
}

#[test]
fn test_spawn_is_centred_on_wide_board() {
    let t = table();
    assert_eq!(t.spawn_anchor(PieceKind::O, 16), (7, 0));
    assert_eq!(t.spawn_anchor(PieceKind::T, 16), (6, 0));
    assert_eq!(t.spawn_anchor(PieceKind::I, 16), (6, -1));
}

#[test]
fn test_validator_boundaries() {
    let t = table();
    let mut board = Board::default();
    let o = Piece::spawn(PieceKind::O, &t, 10);

    assert!(is_valid_placement(&o, &t, &board));
    assert!(is_valid_placement(&o.shifted(-4, 0), &t, &board));
    assert!(!is_valid_placement(&o.shifted(-5, 0), &t, &board));
    assert!(is_valid_placement(&o.shifted(4, 0), &t, &board));
    assert!(!is_valid_placement(&o.shifted(5, 0), &t, &board));
    assert!(is_valid_placement(&o.shifted(0, 18), &t, &board));
    assert!(!is_valid_placement(&o.shifted(0, 19), &t, &board));
    // Entirely above the board is fine as long as the columns are legal.
    assert!(is_valid_placement(&o.shifted(0, -5), &t, &board));

    board.set_cell(5, 1, PieceKind::L);
    assert!(!is_valid_placement(&o, &t, &board));
}

#[test]
fn test_merge_then_validate_rejects_same_spot() {
    let t = table();
    let mut board = Board::default();
    let piece = Piece::new(PieceKind::S, Rotation::SPAWN, 2, 18);
    assert!(is_valid_placement(&piece, &t, &board));

    let outcome = merge_piece(&mut board, &piece, &t);
    assert_eq!(outcome.cells_written, 4);
    assert!(!outcome.overflow);
    assert!(!is_valid_placement(&piece, &t, &board));
    assert_eq!(board.filled_count(), 4);
}
