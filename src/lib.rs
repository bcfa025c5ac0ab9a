//! TUI Match-3 (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof (`tui_match3::{core, term,
//! input, types}`) and holds the pieces only the terminal binary needs:
//! runtime configuration, the file logger and the status banner.

pub mod banner;
pub mod config;
pub mod logging;

pub use tui_match3_core as core;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;
