//! Terminal renderer for the match-3 game.
//!
//! A small, game-oriented rendering layer: the game view draws a snapshot
//! into a plain framebuffer, and the renderer flushes framebuffers to the
//! terminal, re-emitting only the cells that changed since the last frame.
//! No widget toolkit is involved.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: pure snapshot-to-framebuffer mapping
//! - [`renderer`]: crossterm output with diff flushing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, HudView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, ChangedRuns, TerminalRenderer};
