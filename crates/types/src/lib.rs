//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic, making them usable in any
//! context (rules engine, terminal rendering, input mapping).
//!
//! # Grid Dimensions
//!
//! The playfield is a fixed 9x9 grid:
//!
//! - **Width**: 9 columns (indexed 0-8, left to right)
//! - **Height**: 9 rows (indexed 0-8, top to bottom)
//! - **Refill row**: 0 (new candies enter from the top)
//!
//! # Packed Tile Codes
//!
//! Foreground cells are stored as a packed byte. The ranges matter: the match
//! detector and the special-candy classifier compare against them.
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0-5 | plain candy, colour = code |
//! | 6-11 | vertical striped, colour = code % 6 |
//! | 12-17 | horizontal striped, colour = code % 6 |
//! | 18-23 | wrapped, colour = code % 6 |
//! | 24 | swirl placeholder |
//! | 25 | cage placeholder |
//! | 26 | colourbomb |
//! | 31 | empty |
//!
//! Bit 7 ([`MARK_BIT`]) is the transient "marked for explosion" flag.
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Tile, Coord, GRID_SIZE};
//!
//! let striped = Tile::StripedH(2);
//! assert_eq!(striped.to_code(), 14);
//! assert_eq!(Tile::from_code(14), Some(striped));
//! assert_eq!(striped.color(), Some(2));
//!
//! assert!(Coord::new(3, 4).is_adjacent(Coord::new(3, 5)));
//! assert_eq!(GRID_SIZE, 9);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width and height in cells (9)
pub const GRID_SIZE: u8 = 9;

/// Total number of cells on the grid
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Number of candy colours
pub const COLOR_COUNT: u8 = 6;

/// First plain candy code
pub const PLAIN_TILES: u8 = 0;

/// First vertical-striped code
pub const V_TILES: u8 = 6;

/// First horizontal-striped code
pub const H_TILES: u8 = 12;

/// First wrapped code
pub const WRAP_TILES: u8 = 18;

/// Swirl placeholder; also the first non-colour code
pub const SWIRL_TILE: u8 = 24;

/// Cage placeholder
pub const CAGE_TILE: u8 = 25;

/// Colourbomb
pub const COLOURBOMB_TILE: u8 = 26;

/// Empty sentinel
pub const EMPTY_TILE: u8 = 31;

/// Transient "marked for explosion" flag, ORed into a packed code
pub const MARK_BIT: u8 = 0x80;

/// Jelly level that means "hole": no candy can ever occupy the cell
pub const HOLE_JELLY: u8 = 3;

/// A foreground tile.
///
/// This is the typed view of a packed code. The engine works on packed codes
/// internally and converts at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    /// Plain candy of the given colour (0-5)
    Color(u8),
    /// Striped candy that clears its column
    StripedV(u8),
    /// Striped candy that clears its row
    StripedH(u8),
    /// Wrapped candy that clears its 3x3 neighbourhood
    Wrapped(u8),
    /// Decorative foreground over a swirl background cell
    Swirl,
    /// Decorative cage foreground; cages themselves live in the background
    Cage,
    /// Clears every candy of the colour it is combined with
    Colorbomb,
    /// No candy present
    #[default]
    Empty,
}

impl Tile {
    /// Pack into the numeric code (mark bit clear).
    pub const fn to_code(self) -> u8 {
        match self {
            Tile::Color(c) => PLAIN_TILES + c % COLOR_COUNT,
            Tile::StripedV(c) => V_TILES + c % COLOR_COUNT,
            Tile::StripedH(c) => H_TILES + c % COLOR_COUNT,
            Tile::Wrapped(c) => WRAP_TILES + c % COLOR_COUNT,
            Tile::Swirl => SWIRL_TILE,
            Tile::Cage => CAGE_TILE,
            Tile::Colorbomb => COLOURBOMB_TILE,
            Tile::Empty => EMPTY_TILE,
        }
    }

    /// Unpack a numeric code. The mark bit is ignored.
    ///
    /// Returns `None` for the unused codes 27-30.
    pub const fn from_code(code: u8) -> Option<Self> {
        let code = code & !MARK_BIT;
        let color = code % COLOR_COUNT;
        match code {
            0..=5 => Some(Tile::Color(color)),
            6..=11 => Some(Tile::StripedV(color)),
            12..=17 => Some(Tile::StripedH(color)),
            18..=23 => Some(Tile::Wrapped(color)),
            SWIRL_TILE => Some(Tile::Swirl),
            CAGE_TILE => Some(Tile::Cage),
            COLOURBOMB_TILE => Some(Tile::Colorbomb),
            EMPTY_TILE => Some(Tile::Empty),
            _ => None,
        }
    }

    /// Colour index for colour-bearing tiles.
    pub const fn color(self) -> Option<u8> {
        match self {
            Tile::Color(c) | Tile::StripedV(c) | Tile::StripedH(c) | Tile::Wrapped(c) => {
                Some(c % COLOR_COUNT)
            }
            _ => None,
        }
    }

    /// True for striped, wrapped and colourbomb tiles.
    pub const fn is_special(self) -> bool {
        matches!(
            self,
            Tile::StripedV(_) | Tile::StripedH(_) | Tile::Wrapped(_) | Tile::Colorbomb
        )
    }

    pub const fn is_striped(self) -> bool {
        matches!(self, Tile::StripedV(_) | Tile::StripedH(_))
    }
}

/// Background layer of a cell.
///
/// Independent of the foreground: swaps never move it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Background {
    /// 0 = none, 1-2 = jelly layers, 3 = hole
    pub jelly: u8,
    pub cage: bool,
    pub swirl: bool,
}

impl Background {
    pub const HOLE: Background = Background {
        jelly: HOLE_JELLY,
        cage: false,
        swirl: false,
    };

    pub const fn jelly(level: u8) -> Self {
        Self {
            jelly: level,
            cage: false,
            swirl: false,
        }
    }

    pub const fn is_hole(&self) -> bool {
        self.jelly >= HOLE_JELLY
    }

    /// Jelly still to be cleared on this cell
    pub const fn has_jelly(&self) -> bool {
        self.jelly > 0 && self.jelly < HOLE_JELLY
    }

    /// Cage and swirl cells cannot take part in swaps
    pub const fn blocks_swap(&self) -> bool {
        self.cage || self.swirl
    }

    /// Cells whose candy never moves under gravity
    pub const fn is_fixed(&self) -> bool {
        self.cage || self.swirl
    }

    /// Packed form used in dirty notifications: jelly in bits 0-1, cage bit 2, swirl bit 3.
    pub const fn to_code(self) -> u8 {
        (self.jelly & 3) | ((self.cage as u8) << 2) | ((self.swirl as u8) << 3)
    }

    pub const fn from_code(code: u8) -> Self {
        Self {
            jelly: code & 3,
            cage: code & 4 != 0,
            swirl: code & 8 != 0,
        }
    }
}

/// Grid coordinate: `x` is the column, `y` the row (row 0 at the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub const fn in_bounds(self) -> bool {
        self.x < GRID_SIZE && self.y < GRID_SIZE
    }

    /// Row-major flat index. Callers must check [`Coord::in_bounds`] first.
    pub const fn index(self) -> usize {
        (self.y as usize) * (GRID_SIZE as usize) + (self.x as usize)
    }

    pub const fn from_index(index: usize) -> Self {
        Self {
            x: (index % GRID_SIZE as usize) as u8,
            y: (index / GRID_SIZE as usize) as u8,
        }
    }

    /// Orthogonally adjacent (no diagonals)
    pub const fn is_adjacent(self, other: Coord) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx + dy == 1
    }

    /// Step one cell in `dir`, returning `None` when leaving the grid.
    pub fn step(self, dir: Direction) -> Option<Coord> {
        let (dx, dy) = dir.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let next = Coord::new(x, y);
        next.in_bounds().then_some(next)
    }

    /// The up to four orthogonal neighbours inside the grid.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        Direction::ALL.into_iter().filter_map(move |dir| self.step(dir))
    }

    /// Every coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).map(Coord::from_index)
    }
}

/// Cursor / neighbour direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

/// Player actions that drive a play session
///
/// These actions are produced by the input layer and consumed by the
/// session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiAction {
    /// Move the cursor (and swap, when a cell is selected)
    Move(Direction),
    /// Toggle selection of the cell under the cursor
    Select,
    /// Reload the current level
    Restart,
    /// Advance to the next level (only after a win)
    NextLevel,
}

/// A cell whose foreground or background changed during a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirtyCell {
    pub coord: Coord,
    /// Packed foreground code (mark bit clear)
    pub tile: u8,
    /// Packed background code, see [`Background::to_code`]
    pub background: u8,
}

/// Presentation cue for the timing/sound collaborator.
///
/// The engine never waits on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Swap,
    IllegalSwap,
    /// Marked cells are about to be cleared
    Explosion { cells: u8 },
    /// Chain reaction of the given depth (1 = first rescan hit)
    Combo(u8),
    SpecialCreated(Tile),
    Decage,
    Deswirl,
    Dejelly,
    Reshuffle,
    LevelWon,
    LevelLost,
}
