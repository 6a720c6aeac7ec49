//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block game: the board, the
//! shape table, placement validation, locking, line clears, scoring and the
//! tick-driven game loop. It has no dependencies on terminals or I/O, making it:
//!
//! - **Deterministic**: the same seed and input frames replay the same game
//! - **Testable**: every rule is reachable through [`Game::tick`]
//! - **Portable**: renderers only ever see a [`GameSnapshot`]
//! - **Fast**: ticks, validation and line clears do not allocate
//!
//! # Module Structure
//!
//! - [`board`]: grid storage and row removal
//! - [`pieces`]: shape table, rotation states and the active piece
//! - [`collision`]: the single placement predicate
//! - [`lock`]: merging a piece into the board
//! - [`scoring`]: line clear points, drop bonuses, levels and gravity
//! - [`rng`]: seedable piece sources
//! - [`game_state`]: the game loop driver
//! - [`snapshot`]: owned views for renderers
//! - [`config`] and [`error`]: engine settings and their failure modes
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineConfig, Game};
//! use blockfall_core::types::{Command, InputFrame};
//!
//! let mut game = Game::new(EngineConfig::default()).unwrap();
//!
//! let input = InputFrame::new()
//!     .with(Command::MoveRight)
//!     .with(Command::HardDrop);
//! let report = game.tick(16, input).unwrap();
//!
//! assert!(report.lock.is_some());
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The caller drives a fixed timestep (16ms by default) and passes the
//! elapsed time to every tick. Gravity starts at one row per 1000ms and
//! speeds up by 80ms per level down to a 100ms floor.

pub mod board;
pub mod collision;
pub mod config;
pub mod error;
pub mod game_state;
pub mod lock;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{drop_distance, is_valid_placement};
pub use config::{EngineConfig, GravityConfig, ProgressionRule, RandomizerKind};
pub use error::{ConfigError, GameError};
pub use game_state::{Game, LockEvent, TickReport};
pub use lock::{merge_piece, MergeOutcome};
pub use pieces::{Piece, PieceShape, ShapeTable};
pub use rng::{BagRandomizer, PieceSource, Randomizer, Sequence, SimpleRng, UniformRandomizer};
pub use scoring::{drop_score, line_clear_score, Progression};
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot, Phase};
