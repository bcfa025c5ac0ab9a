//! Error types for caller mistakes and malformed level data.
//!
//! Ordinary rule outcomes (an illegal swap, a lost level) are values, not errors.

use thiserror::Error;

use crate::types::Coord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates ({}, {}) are outside the 9x9 grid", .0.x, .0.y)]
    InvalidCoords(Coord),
    #[error("cells ({}, {}) and ({}, {}) are not orthogonally adjacent", .0.x, .0.y, .1.x, .1.y)]
    NotAdjacent(Coord, Coord),
    #[error("the level is already finished")]
    LevelFinished,
    #[error("no level numbered {0}")]
    UnknownLevel(u32),
    #[error(transparent)]
    Level(#[from] LevelError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("level layout has {0} rows, expected 9")]
    WrongRowCount(usize),
    #[error("level row {row} has {len} cells, expected 9")]
    WrongRowLength { row: usize, len: usize },
    #[error("unknown level glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
    #[error("level moves budget must be positive")]
    EmptyMovesBudget,
}

pub type Result<T> = std::result::Result<T, GameError>;
