//! Level provider - background layouts and move budgets
//!
//! A layout is written as nine rows of nine glyphs:
//!
//! | Glyph | Background |
//! |-------|------------|
//! | `.` | plain |
//! | `1` | jelly, one layer |
//! | `2` | jelly, two layers |
//! | `#` | hole |
//! | `C` | cage |
//! | `S` | swirl |
//!
//! Blank lines and surrounding whitespace are ignored.

use crate::error::LevelError;
use crate::types::{Background, Coord, CELL_COUNT, GRID_SIZE};

const ROWS: usize = GRID_SIZE as usize;

/// Background layout plus the number of moves allowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLayout {
    pub background: [Background; CELL_COUNT],
    pub moves: u32,
}

impl LevelLayout {
    /// All-plain layout
    pub fn plain(moves: u32) -> Self {
        Self {
            background: [Background::default(); CELL_COUNT],
            moves,
        }
    }

    pub fn parse(text: &str, moves: u32) -> Result<Self, LevelError> {
        if moves == 0 {
            return Err(LevelError::EmptyMovesBudget);
        }

        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != ROWS {
            return Err(LevelError::WrongRowCount(rows.len()));
        }

        let mut background = [Background::default(); CELL_COUNT];
        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != ROWS {
                return Err(LevelError::WrongRowLength { row: y, len });
            }
            for (x, glyph) in row.chars().enumerate() {
                let bg = match glyph {
                    '.' => Background::default(),
                    '1' => Background::jelly(1),
                    '2' => Background::jelly(2),
                    '#' => Background::HOLE,
                    'C' => Background {
                        cage: true,
                        ..Background::default()
                    },
                    'S' => Background {
                        swirl: true,
                        ..Background::default()
                    },
                    _ => return Err(LevelError::UnknownGlyph { glyph, x, y }),
                };
                background[Coord::new(x as u8, y as u8).index()] = bg;
            }
        }

        Ok(Self { background, moves })
    }

    pub fn jelly_count(&self) -> u32 {
        self.background.iter().filter(|bg| bg.has_jelly()).count() as u32
    }
}

/// Level data, addressed by 1-based level number
pub trait LevelSource {
    fn level(&self, number: u32) -> Option<LevelLayout>;

    /// Number of levels available
    fn count(&self) -> u32;
}

const LEVEL_1: &str = "
    .........
    .........
    .........
    .........
    .........
    .........
    .........
    11.....11
    222222222
";

const LEVEL_2: &str = "
    #.......#
    .........
    ..C...C..
    ...111...
    ..12221..
    ...111...
    ..C...C..
    .........
    #.......#
";

const LEVEL_3: &str = "
    .........
    .S.....S.
    .........
    ...CCC...
    11.C2C.11
    ...CCC...
    .........
    .S.....S.
    221...122
";

const LEVEL_4: &str = "
    ..#...#..
    ..#...#..
    .........
    .SS...SS.
    .........
    C.C.C.C.C
    1.1.1.1.1
    212121212
    222222222
";

/// The levels shipped with the game
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLevels;

impl BuiltinLevels {
    const TABLE: [(&'static str, u32); 4] = [(LEVEL_1, 20), (LEVEL_2, 25), (LEVEL_3, 30), (LEVEL_4, 35)];
}

impl LevelSource for BuiltinLevels {
    fn level(&self, number: u32) -> Option<LevelLayout> {
        let index = number.checked_sub(1)? as usize;
        let (text, moves) = Self::TABLE.get(index)?;
        match LevelLayout::parse(text, *moves) {
            Ok(layout) => Some(layout),
            Err(err) => {
                log::error!("built-in level {} is malformed: {}", number, err);
                None
            }
        }
    }

    fn count(&self) -> u32 {
        Self::TABLE.len() as u32
    }
}
