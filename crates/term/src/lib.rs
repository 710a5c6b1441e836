//! Terminal output for animation playback.
//!
//! Turns compiled delta plans into ANSI byte scripts and writes them to a
//! terminal (or any `Write` sink). Only plain cursor positioning, clearing
//! and cursor visibility sequences are used; there is no capability probing
//! and the terminal is left in cooked mode so Ctrl+C still raises SIGINT.

pub mod renderer;

pub use ciallo_core as core;
pub use ciallo_types as types;

pub use renderer::{
    encode_full_into, encode_patch_into, encode_plan_into, encode_plans, farewell, FrameScript,
    TerminalRenderer,
};
