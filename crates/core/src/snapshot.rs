//! Read-only view of a game for renderers and observers.
//!
//! A snapshot owns its data, so a renderer never borrows the engine.
//! [`crate::game_state::Game::snapshot_into`] refills an existing snapshot
//! in place, reusing the board buffer between frames.

use crate::pieces::PieceShape;
use crate::types::{PieceKind, Rotation};

/// Driver state machine phase.
///
/// `Spawning`, `Locking` and `Clearing` only hold inside a single `tick`
/// call; between ticks a game is always `Falling` or `GameOver`, so
/// snapshots show one of those two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Drawing and placing the next piece.
    #[default]
    Spawning,
    /// A piece is in play.
    Falling,
    /// The active piece is being merged into the board.
    Locking,
    /// Full rows are being removed and scored.
    Clearing,
    /// Terminal until `reset()`.
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Spawning => "spawning",
            Phase::Falling => "falling",
            Phase::Locking => "locking",
            Phase::Clearing => "clearing",
            Phase::GameOver => "game_over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i32,
    pub row: i32,
    /// Absolute `(col, row)` of each mino; rows may be negative.
    pub cells: [(i32, i32); 4],
}

/// Next-piece preview: the kind and its spawn-orientation offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextSnapshot {
    pub kind: PieceKind,
    pub shape: PieceShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major color ids, 0 = empty (see `PieceKind::color_id`).
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    /// Anchor row the active piece would rest at after a hard drop.
    pub ghost_row: Option<i32>,
    pub next: NextSnapshot,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub gravity_interval_ms: u32,
    pub phase: Phase,
    pub game_over: bool,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            board: Vec::new(),
            active: None,
            ghost_row: None,
            next: NextSnapshot {
                kind: PieceKind::I,
                shape: [(0, 0); 4],
            },
            score: 0,
            level: 0,
            lines: 0,
            gravity_interval_ms: 0,
            phase: Phase::default(),
            game_over: false,
        }
    }
}

impl GameSnapshot {
    /// Color id of a locked cell, or `None` outside the grid.
    pub fn cell(&self, col: i32, row: i32) -> Option<u8> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        self.board.get(row * self.width + col).copied()
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}
