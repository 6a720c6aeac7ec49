//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws a snapshot into an
//! off-screen canvas, and the renderer flushes changed rows to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Keep drawing testable without a terminal
//! - Control the aspect ratio (2 chars wide per board cell by default)

pub mod canvas;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use canvas::{Canvas, Glyph, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
