//! Terminal snake (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so the binary, the
//! integration tests and the benchmarks share one import path:
//! `term_snake::{core,input,scores,term,types}`.

pub use term_snake_core as core;
pub use term_snake_input as input;
pub use term_snake_scores as scores;
pub use term_snake_term as term;
pub use term_snake_types as types;
