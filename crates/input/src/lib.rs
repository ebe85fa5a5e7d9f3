//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. Key presses
//! drive the game directly: the main loop turns every press into a tick, so
//! no auto-repeat handling is needed here.

pub mod map;

pub use term_snake_types as types;

pub use map::{map_key, should_quit};
