//! Ciallo: a looping terminal ASCII animation player (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this
//! package re-exports them as `ciallo::{core, player, term, types}` and adds
//! the binary-facing pieces: command-line parsing, embedded assets and
//! logging setup.

pub mod assets;
pub mod cli;
pub mod logging;

pub use ciallo_core as core;
pub use ciallo_player as player;
pub use ciallo_term as term;
pub use ciallo_types as types;
