//! Core rules engine - pure, deterministic, and testable
//!
//! This crate contains the whole match-3 rule set: grid model, match
//! detection, the cascade engine, special-candy creation, move legality,
//! gravity and refill, solvability and reshuffle, scoring and level data.
//! It has **no dependencies** on terminal, timing or I/O code, making it:
//!
//! - **Deterministic**: the same seed and the same moves give the same game
//! - **Testable**: every rule is exercised by unit tests
//! - **Portable**: runs under any front end, or headless
//! - **Allocation-light**: cascades use a fixed-capacity work-list
//!
//! # Module Structure
//!
//! - [`board`]: 9x9 foreground/background grid and the colour comparison
//! - [`matcher`]: horizontal/vertical run measurement and the chain rescan
//! - [`cascade`]: recursive explosion propagation through special candies
//! - [`classifier`]: which special candy a match creates
//! - [`moves`]: swap legality, swap resolution, solvability probes
//! - [`settle`]: explosion side effects, gravity and refill
//! - [`shuffle`]: dead-board detection and reshuffle
//! - [`scoring`]: point values
//! - [`rng`]: 16-bit LFSR candy source
//! - [`levels`]: background layouts and move budgets
//! - [`game_state`]: one level in play, `apply_move`
//! - [`session`]: cursor/selection protocol and level progression
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{BuiltinLevels, GameState, LevelSource};
//!
//! let layout = BuiltinLevels.level(1).unwrap();
//! let mut game = GameState::new(&layout, 0xACE1);
//!
//! let (a, b) = game.hint().expect("fresh boards always have a move");
//! let outcome = game.apply_move(a, b).unwrap();
//!
//! assert!(outcome.accepted);
//! assert_eq!(game.moves_remaining(), 19);
//! assert!(game.score() > 0);
//! ```

pub mod board;
pub mod cascade;
pub mod classifier;
pub mod error;
pub mod events;
pub mod game_state;
pub mod levels;
pub mod matcher;
pub mod moves;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod settle;
pub mod shuffle;
pub mod snapshot;

pub use tui_match3_types as types;

pub use board::{candy_match, Grid};
pub use cascade::Cascade;
pub use error::{GameError, LevelError, Result};
pub use events::{EventLog, GameEvents};
pub use game_state::{GameState, MoveOutcome};
pub use levels::{BuiltinLevels, LevelLayout, LevelSource};
pub use moves::{move_is_possible, permitted_swap, successful_move};
pub use rng::Lfsr;
pub use session::PlaySession;
pub use shuffle::ShuffleOutcome;
pub use snapshot::GameSnapshot;
