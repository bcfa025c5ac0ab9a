//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::UiAction`]. Independent of
//! any UI framework and of the rules engine.

pub mod map;

pub use tui_match3_types as types;

pub use map::{handle_key_event, should_quit};
