use serde::{Deserialize, Serialize};

use crate::types::{Coord, GRID_SIZE};

const N: usize = GRID_SIZE as usize;

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Packed foreground codes, `tiles[y][x]`
    pub tiles: [[u8; N]; N],
    /// Packed background codes, `background[y][x]`
    pub background: [[u8; N]; N],
    pub score: u64,
    pub moves_remaining: u32,
    pub jelly_remaining: u32,
    /// 1-based level number, 0 when not played from a level source
    pub level: u32,
    pub seed: u16,
    pub won: bool,
    pub lost: bool,
    pub cursor: Option<Coord>,
    pub selected: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn finished(&self) -> bool {
        self.won || self.lost
    }

    pub fn tile_at(&self, c: Coord) -> u8 {
        self.tiles[c.y as usize][c.x as usize]
    }

    pub fn background_at(&self, c: Coord) -> u8 {
        self.background[c.y as usize][c.x as usize]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            tiles: [[crate::types::EMPTY_TILE; N]; N],
            background: [[0; N]; N],
            score: 0,
            moves_remaining: 0,
            jelly_remaining: 0,
            level: 0,
            seed: 0,
            won: false,
            lost: false,
            cursor: None,
            selected: false,
        }
    }
}
