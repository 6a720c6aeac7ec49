//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so the engine, the
//! input mapper and the terminal renderer can all share them.
//!
//! # Board Dimensions
//!
//! Standard playfield: 10 columns (0-9, left to right) by 20 rows (0-19, top
//! to bottom). Row indices above the visible board are negative.
//!
//! # Default Timing and Progression
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_GRAVITY_MS` | 1000 | Gravity interval at level 0 |
//! | `GRAVITY_STEP_MS` | 80 | Interval reduction per level |
//! | `GRAVITY_FLOOR_MS` | 100 | Gravity never gets faster than this |
//! | `LINES_PER_LEVEL` | 10 | Lines needed to advance one level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, InputFrame, PieceKind, Rotation};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.color_id(), 3);
//!
//! // Rotation indices wrap within the kind's distinct-state count.
//! assert_eq!(Rotation::SPAWN.cw(4), Rotation::new(1));
//! assert_eq!(Rotation::SPAWN.ccw(4), Rotation::new(3));
//!
//! // An input frame holds each command at most once.
//! let mut frame = InputFrame::new();
//! frame.push(Command::MoveLeft);
//! frame.push(Command::MoveLeft);
//! assert_eq!(frame.len(), 1);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Largest board accepted by config validation, in either dimension
pub const MAX_BOARD_DIM: usize = 256;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 0 (1000ms = 1 second per row)
pub const BASE_GRAVITY_MS: u32 = 1000;

/// Gravity interval reduction per level
pub const GRAVITY_STEP_MS: u32 = 80;

/// Fastest gravity interval; progression never goes below it
pub const GRAVITY_FLOOR_MS: u32 = 100;

/// Lines that must be cleared to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1) for higher levels.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points per row for a successful soft drop step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row travelled by a hard drop
pub const HARD_DROP_POINTS: u32 = 2;


/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, straight bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Color identifier written into snapshots (1..=7, 0 is empty).
    pub fn color_id(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`PieceKind::color_id`]. Returns `None` for 0 and unknown ids.
    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }
}

/// Rotation state index of a piece.
///
/// Index 0 is the spawn orientation. A kind has `R` distinct states
/// (1, 2 or 4) and indices wrap modulo `R`; the state count comes from the
/// shape table, so the index itself carries no kind information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rotation(u8);

impl Rotation {
    /// Spawn orientation.
    pub const SPAWN: Rotation = Rotation(0);

    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Rotate clockwise within `states` distinct states.
    pub fn cw(self, states: u8) -> Self {
        let n = states.max(1);
        Self((self.0 % n + 1) % n)
    }

    /// Rotate counter-clockwise within `states` distinct states.
    ///
    /// Computed directly, never as three clockwise steps.
    pub fn ccw(self, states: u8) -> Self {
        let n = states.max(1);
        Self((self.0 % n + n - 1) % n)
    }
}

/// Discrete commands an input collaborator can deliver in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop piece one cell down (locks if it cannot move)
    SoftDrop,
    /// Drop piece to its resting position and lock it
    HardDrop,
    /// End the session (handled by the session controller, not the engine)
    Quit,
}

impl Command {
    /// All commands in the order the engine applies them within a tick.
    pub const ALL: [Command; 7] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::RotateCw,
        Command::RotateCcw,
        Command::SoftDrop,
        Command::HardDrop,
        Command::Quit,
    ];

    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("rotateCcw"), Some(Command::RotateCcw));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::Quit => "quit",
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of commands received since the previous tick.
///
/// Stack-only bitset: pushing a command twice keeps one copy, so the engine
/// applies at most one command per input type per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    bits: u8,
}

impl InputFrame {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Builder-style variant of [`InputFrame::push`].
    pub fn with(mut self, command: Command) -> Self {
        self.push(command);
        self
    }

    pub fn push(&mut self, command: Command) {
        self.bits |= command.bit();
    }

    pub fn contains(&self, command: Command) -> bool {
        self.bits & command.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Commands in application order (see [`Command::ALL`]).
    pub fn iter(&self) -> impl Iterator<Item = Command> + '_ {
        Command::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<Command> for InputFrame {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        let mut frame = InputFrame::new();
        for command in iter {
            frame.push(command);
        }
        frame
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;
