//! Error types for engine construction and the game loop.

use derive_more::{Display, Error};

use crate::types::PieceKind;

/// Malformed configuration or shape data, detected before any tick runs.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[display("board dimensions {width}x{height} exceed the {max}x{max} limit")]
    BoardTooLarge { width: i32, height: i32, max: i32 },

    #[display("board width {width} is narrower than the widest piece ({required})")]
    BoardTooNarrow { width: i32, required: i32 },

    #[display("board height {height} is shallower than the tallest piece ({required})")]
    BoardTooShallow { height: i32, required: i32 },

    #[display("shape for {kind:?} is malformed: {reason}")]
    MalformedShape {
        kind: PieceKind,
        reason: &'static str,
    },

    #[display("shape table has no entry for {_0:?}")]
    MissingShape(#[error(not(source))] PieceKind),

    #[display("gravity floor must be positive and at most the base interval (base {base_ms}ms, floor {floor_ms}ms)")]
    InvalidGravity { base_ms: u32, floor_ms: u32 },

    #[display("gravity step must be positive")]
    InvalidGravityStep,

    #[display("progression period must be positive")]
    InvalidProgression,

    #[display("line scores must be non-decreasing and favor multi-line clears: {_0:?}")]
    ScoringNotConvex(#[error(not(source))] [u32; 5]),

    #[display("invalid config JSON: {_0}")]
    Parse(serde_json::Error),
}

/// Rejections from the game loop driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// The game has ended; only snapshots and `reset()` are accepted.
    #[display("game is over; reset() before ticking again")]
    GameOver,
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
