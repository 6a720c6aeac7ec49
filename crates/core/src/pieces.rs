//! Pieces module - tetromino shapes, the rotation table and the active piece
//!
//! Every kind is defined once by its spawn shape inside a square bounding
//! box. The table derives the remaining rotation states by turning that box
//! 90° clockwise and stops at the first state whose footprint repeats, so
//! symmetric kinds keep only their distinct states (O: 1; I, S, Z: 2;
//! T, J, L: 4). There are no wall kicks: a rotation either fits where it is
//! or it is rejected.

use arrayvec::ArrayVec;

use crate::error::ConfigError;
use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the piece anchor, `(col, row)`
pub type MinoOffset = (i32, i32);

/// Shape of a piece - 4 mino offsets from the anchor, ordered by row then col
pub type PieceShape = [MinoOffset; 4];

/// Spawn-orientation definition of one kind.
#[derive(Debug, Clone, Copy)]
pub struct ShapeDef {
    pub kind: PieceKind,
    /// Side of the square box the shape rotates in.
    pub box_size: i32,
    pub cells: &'static [MinoOffset],
}

/// Standard tetromino definitions.
pub const STANDARD_SHAPES: [ShapeDef; 7] = [
    ShapeDef {
        kind: PieceKind::I,
        box_size: 4,
        cells: &[(0, 1), (1, 1), (2, 1), (3, 1)],
    },
    ShapeDef {
        kind: PieceKind::O,
        box_size: 2,
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    ShapeDef {
        kind: PieceKind::T,
        box_size: 3,
        cells: &[(1, 0), (0, 1), (1, 1), (2, 1)],
    },
    ShapeDef {
        kind: PieceKind::S,
        box_size: 3,
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1)],
    },
    ShapeDef {
        kind: PieceKind::Z,
        box_size: 3,
        cells: &[(0, 0), (1, 0), (1, 1), (2, 1)],
    },
    ShapeDef {
        kind: PieceKind::J,
        box_size: 3,
        cells: &[(0, 0), (0, 1), (1, 1), (2, 1)],
    },
    ShapeDef {
        kind: PieceKind::L,
        box_size: 3,
        cells: &[(2, 0), (0, 1), (1, 1), (2, 1)],
    },
];

#[derive(Debug, Clone)]
struct KindShapes {
    box_size: i32,
    /// Anchor row that puts the top-most spawn cell on row 0.
    spawn_row: i32,
    rotations: ArrayVec<PieceShape, 4>,
}

/// Immutable (kind, rotation) -> offsets lookup, built once per engine.
#[derive(Debug, Clone)]
pub struct ShapeTable {
    /// Indexed by `PieceKind::index()`.
    entries: Vec<KindShapes>,
}

impl ShapeTable {
    /// Table for the standard seven tetrominoes.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::from_defs(&STANDARD_SHAPES)
    }

    /// Build a table from spawn definitions. Every kind must be defined.
    pub fn from_defs(defs: &[ShapeDef]) -> Result<Self, ConfigError> {
        let mut entries = Vec::with_capacity(PieceKind::ALL.len());
        for kind in PieceKind::ALL {
            let def = defs
                .iter()
                .find(|d| d.kind == kind)
                .ok_or(ConfigError::MissingShape(kind))?;
            entries.push(build_kind(def)?);
        }
        Ok(Self { entries })
    }

    fn entry(&self, kind: PieceKind) -> &KindShapes {
        &self.entries[kind.index()]
    }

    /// Number of distinct rotation states of `kind`.
    pub fn rotation_count(&self, kind: PieceKind) -> u8 {
        self.entry(kind).rotations.len() as u8
    }

    /// Offsets for `kind` in `rotation` (index taken modulo the state count).
    pub fn shape(&self, kind: PieceKind, rotation: Rotation) -> &PieceShape {
        let rotations = &self.entry(kind).rotations;
        &rotations[rotation.index() % rotations.len()]
    }

    pub fn box_size(&self, kind: PieceKind) -> i32 {
        self.entry(kind).box_size
    }

    /// Largest bounding box; the board must be at least this wide.
    pub fn max_box_size(&self) -> i32 {
        self.entries.iter().map(|e| e.box_size).max().unwrap_or(0)
    }

    /// Spawn anchor for `kind` on a board `board_width` columns wide:
    /// horizontally centred, top-most cell on row 0.
    pub fn spawn_anchor(&self, kind: PieceKind, board_width: usize) -> (i32, i32) {
        let entry = self.entry(kind);
        let col = (board_width as i32 - entry.box_size) / 2;
        (col, entry.spawn_row)
    }
}

fn build_kind(def: &ShapeDef) -> Result<KindShapes, ConfigError> {
    let malformed = |reason| ConfigError::MalformedShape {
        kind: def.kind,
        reason,
    };

    if !(1..=4).contains(&def.box_size) {
        return Err(malformed("bounding box must be 1..=4 cells wide"));
    }
    if def.cells.is_empty() {
        return Err(malformed("shape has no cells"));
    }
    if def.cells.len() != 4 {
        return Err(malformed("a tetromino has exactly four cells"));
    }
    let in_box = |v: i32| (0..def.box_size).contains(&v);
    if def.cells.iter().any(|&(c, r)| !in_box(c) || !in_box(r)) {
        return Err(malformed("cell outside the bounding box"));
    }

    let mut base: PieceShape = [(0, 0); 4];
    base.copy_from_slice(def.cells);
    sort_cells(&mut base);
    if base.windows(2).any(|w| w[0] == w[1]) {
        return Err(malformed("duplicate cell"));
    }

    let mut rotations = ArrayVec::new();
    rotations.push(base);
    let mut current = base;
    for _ in 0..3 {
        current = rotate_cw_in_box(&current, def.box_size);
        // A quarter-turn group repeats back to state 0 first.
        if same_footprint(&current, &base) {
            break;
        }
        rotations.push(current);
    }

    let spawn_row = -base.iter().map(|&(_, r)| r).min().unwrap_or(0);

    Ok(KindShapes {
        box_size: def.box_size,
        spawn_row,
        rotations,
    })
}

fn sort_cells(shape: &mut PieceShape) {
    shape.sort_by_key(|&(c, r)| (r, c));
}

/// (c, r) -> (box - 1 - r, c), screen coordinates with row growing down.
fn rotate_cw_in_box(shape: &PieceShape, box_size: i32) -> PieceShape {
    let mut out = (*shape).map(|(c, r)| (box_size - 1 - r, c));
    sort_cells(&mut out);
    out
}

/// Equal up to translation.
fn same_footprint(a: &PieceShape, b: &PieceShape) -> bool {
    normalized(a) == normalized(b)
}

fn normalized(shape: &PieceShape) -> PieceShape {
    let min_c = shape.iter().map(|&(c, _)| c).min().unwrap_or(0);
    let min_r = shape.iter().map(|&(_, r)| r).min().unwrap_or(0);
    let mut out = (*shape).map(|(c, r)| (c - min_c, r - min_r));
    sort_cells(&mut out);
    out
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Anchor column.
    pub col: i32,
    /// Anchor row, negative while above the visible board.
    pub row: i32,
}

impl Piece {
    pub fn new(kind: PieceKind, rotation: Rotation, col: i32, row: i32) -> Self {
        Self {
            kind,
            rotation,
            col,
            row,
        }
    }

    /// A new piece at the spawn anchor in rotation 0.
    pub fn spawn(kind: PieceKind, shapes: &ShapeTable, board_width: usize) -> Self {
        let (col, row) = shapes.spawn_anchor(kind, board_width);
        Self::new(kind, Rotation::SPAWN, col, row)
    }

    pub fn color_id(&self) -> u8 {
        self.kind.color_id()
    }

    /// Offsets for the current rotation.
    pub fn shape<'a>(&self, shapes: &'a ShapeTable) -> &'a PieceShape {
        shapes.shape(self.kind, self.rotation)
    }

    /// Absolute `(col, row)` of each mino.
    pub fn cells(&self, shapes: &ShapeTable) -> [(i32, i32); 4] {
        let shape = *self.shape(shapes);
        shape.map(|(dc, dr)| (self.col + dc, self.row + dr))
    }

    pub fn shifted(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
            ..self
        }
    }

    pub fn rotated_cw(self, shapes: &ShapeTable) -> Self {
        Self {
            rotation: self.rotation.cw(shapes.rotation_count(self.kind)),
            ..self
        }
    }

    pub fn rotated_ccw(self, shapes: &ShapeTable) -> Self {
        Self {
            rotation: self.rotation.ccw(shapes.rotation_count(self.kind)),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ShapeTable {
        ShapeTable::standard().unwrap()
    }

    #[test]
    fn test_distinct_rotation_counts() {
        let t = table();
        assert_eq!(t.rotation_count(PieceKind::O), 1);
        assert_eq!(t.rotation_count(PieceKind::I), 2);
        assert_eq!(t.rotation_count(PieceKind::S), 2);
        assert_eq!(t.rotation_count(PieceKind::Z), 2);
        assert_eq!(t.rotation_count(PieceKind::T), 4);
        assert_eq!(t.rotation_count(PieceKind::J), 4);
        assert_eq!(t.rotation_count(PieceKind::L), 4);
    }

    #[test]
    fn test_t_rotation_states() {
        let t = table();
        assert_eq!(
            *t.shape(PieceKind::T, Rotation::new(1)),
            [(1, 0), (1, 1), (2, 1), (1, 2)]
        );
        assert_eq!(
            *t.shape(PieceKind::T, Rotation::new(2)),
            [(0, 1), (1, 1), (2, 1), (1, 2)]
        );
        assert_eq!(
            *t.shape(PieceKind::T, Rotation::new(3)),
            [(1, 0), (0, 1), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_i_vertical_state() {
        let t = table();
        assert_eq!(
            *t.shape(PieceKind::I, Rotation::new(1)),
            [(2, 0), (2, 1), (2, 2), (2, 3)]
        );
    }

    #[test]
    fn test_cw_then_ccw_is_identity() {
        let t = table();
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind, &t, 10);
            assert_eq!(piece.rotated_cw(&t).rotated_ccw(&t), piece);
            assert_eq!(piece.rotated_ccw(&t).rotated_cw(&t), piece);
        }
    }

    #[test]
    fn test_spawn_anchors() {
        let t = table();
        assert_eq!(t.spawn_anchor(PieceKind::I, 10), (3, -1));
        assert_eq!(t.spawn_anchor(PieceKind::O, 10), (4, 0));
        assert_eq!(t.spawn_anchor(PieceKind::T, 10), (3, 0));

        // Every spawn shape's top row lands on row 0.
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind, &t, 10);
            let top = piece.cells(&t).iter().map(|&(_, r)| r).min().unwrap();
            assert_eq!(top, 0, "{:?}", kind);
        }
    }

    #[test]
    fn test_piece_cells_are_absolute() {
        let t = table();
        let piece = Piece::new(PieceKind::O, Rotation::SPAWN, 2, 5);
        assert_eq!(piece.cells(&t), [(2, 5), (3, 5), (2, 6), (3, 6)]);
        assert_eq!(piece.shifted(-1, 2).cells(&t)[0], (1, 7));
    }

    #[test]
    fn test_malformed_definitions_rejected() {
        let mut defs = STANDARD_SHAPES;
        defs[2].cells = &[];
        assert!(matches!(
            ShapeTable::from_defs(&defs),
            Err(ConfigError::MalformedShape {
                kind: PieceKind::T,
                ..
            })
        ));

        let mut defs = STANDARD_SHAPES;
        defs[1].cells = &[(0, 0), (0, 0), (1, 0), (1, 1)];
        assert!(ShapeTable::from_defs(&defs).is_err());

        let mut defs = STANDARD_SHAPES;
        defs[0].box_size = 3;
        assert!(ShapeTable::from_defs(&defs).is_err());

        assert!(matches!(
            ShapeTable::from_defs(&STANDARD_SHAPES[..6]),
            Err(ConfigError::MissingShape(PieceKind::L))
        ));
    }
}
