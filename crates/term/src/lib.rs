//! Terminal "game renderer" module.
//!
//! A small rendering layer for the snake field. It renders a
//! `core::GameSnapshot` into a framebuffer of single-character cells and
//! flushes that framebuffer to the terminal, redrawing only what changed.
//!
//! - `fb`: styled character cells
//! - `game_view`: snapshot to framebuffer, pure and unit-tested
//! - `renderer`: raw mode, alternate screen, full and diff redraws

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use term_snake_core as core;
pub use term_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{glyph, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
