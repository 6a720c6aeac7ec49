//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events to engine [`Command`](crate::types::Command)s
//! and collects them into the per-tick
//! [`InputFrame`](crate::types::InputFrame). Nothing here knows about the
//! board or the renderer.

pub mod collect;
pub mod map;

pub use blockfall_types as types;

pub use collect::{FrameCollector, SessionKey};
pub use map::{map_key, should_quit};
