//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, state management, and simulation
//! logic. It has **no dependencies** on terminals, input devices or files:
//!
//! - **Deterministic**: Same seed and same ticks produce the same game
//! - **Testable**: Time is passed in explicitly, so item expiry can be
//!   driven by a simulated clock
//! - **Portable**: Can run in any environment (terminal, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: bordered field, obstacle layout, random empty-cell search
//! - [`items`]: temporal item registry (shorteners, decelerators, bonus cells)
//! - [`snake`]: snake body and locomotion
//! - [`session`]: tick state machine composing everything above
//! - [`config`]: session configuration and validation
//! - [`rng`]: seeded random source
//! - [`snapshot`]: renderable copy of a session
//!
//! # Game Rules
//!
//! - **Food**: +10 points, the snake grows by one and the game speeds up
//!   (tick delay shrinks by the step delay, down to the minimum delay)
//! - **Temporal items**: each food eaten rolls a 1-in-N chance per item kind;
//!   items vanish after their duration unless eaten first
//! - **Shortener**: +15 points, the snake loses its rear half
//! - **Decelerator**: +5 points, the tick delay returns to its starting value
//! - **Bonus points**: +50 points
//! - **Map change**: every time a score passes the next score step, all
//!   obstacles move to new random cells
//! - **Death**: running into the border, an obstacle, another snake or the
//!   own body. Turning back onto the own neck reverses the snake instead.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use term_snake_core::{GameConfig, GameSession, SessionState, TickEvent};
//!
//! let config = GameConfig {
//!     height: 12,
//!     width: 20,
//!     ..GameConfig::default()
//! };
//! let mut game = GameSession::new(config, 12345).unwrap();
//!
//! let report = game.tick(TickEvent::Timeout, Duration::from_millis(300));
//! assert_eq!(report.moves.len(), 1);
//! assert!(matches!(game.state(), SessionState::Running | SessionState::Ended));
//! ```
//!
//! # Timing
//!
//! The session never reads a clock. Callers pass the game time (a
//! `Duration` since the session started) to every tick; pausing records the
//! time and resuming pushes item expiries back by the paused span.

pub mod config;
pub mod grid;
pub mod items;
pub mod rng;
pub mod session;
pub mod snake;
pub mod snapshot;

pub use term_snake_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, GameConfig, ItemSettings};
pub use grid::Grid;
pub use items::{ItemRegistry, TemporalItem};
pub use rng::GameRng;
pub use session::{
    GameOutcome, GameSession, Movers, PlayerMove, SessionError, SessionState, TickEvent,
    TickReport,
};
pub use snake::Snake;
pub use snapshot::GameSnapshot;
