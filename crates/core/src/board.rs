//! Board module - the 9x9 foreground and background grids
//!
//! Foreground cells hold packed tile codes (see [`crate::types::Tile`]) with
//! bit 7 used as the transient "marked" flag during cascade resolution.
//! Background cells hold jelly level, cage and swirl flags and never move.
//!
//! Both layers use flat row-major arrays (`y * 9 + x`) for cache locality
//! and zero allocation.

use crate::types::{
    Background, Coord, Tile, CELL_COUNT, COLOR_COUNT, EMPTY_TILE, GRID_SIZE, MARK_BIT,
    SWIRL_TILE,
};

/// Colour comparison used by the match detector.
///
/// Strips the mark bit from both operands. True only when both are colour
/// codes (< 24) of the same colour; any non-colour operand yields false.
pub fn candy_match(a: u8, b: u8) -> bool {
    let a = a & !MARK_BIT;
    let b = b & !MARK_BIT;
    a < SWIRL_TILE && b < SWIRL_TILE && a % COLOR_COUNT == b % COLOR_COUNT
}

/// True for codes that carry a colour (plain, striped, wrapped)
pub fn is_color_code(code: u8) -> bool {
    code & !MARK_BIT < SWIRL_TILE
}

/// The playfield grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Packed foreground codes, row-major
    fg: [u8; CELL_COUNT],
    /// Background records, row-major
    bg: [Background; CELL_COUNT],
}

impl Grid {
    /// Create a grid with every cell empty and a plain background
    pub fn new() -> Self {
        Self {
            fg: [EMPTY_TILE; CELL_COUNT],
            bg: [Background::default(); CELL_COUNT],
        }
    }

    /// Create an empty foreground over the given background layout.
    ///
    /// Swirl cells receive the swirl placeholder; every other cell is empty.
    pub fn with_background(bg: [Background; CELL_COUNT]) -> Self {
        let mut fg = [EMPTY_TILE; CELL_COUNT];
        for (code, cell) in fg.iter_mut().zip(bg.iter()) {
            if cell.swirl {
                *code = SWIRL_TILE;
            }
        }
        Self { fg, bg }
    }

    /// Build from explicit rows of packed codes, `rows[y][x]`.
    ///
    /// Background is plain. Mainly useful for constructing scenarios.
    pub fn from_rows(rows: [[u8; GRID_SIZE as usize]; GRID_SIZE as usize]) -> Self {
        let mut grid = Self::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                grid.fg[y * GRID_SIZE as usize + x] = code & !MARK_BIT;
            }
        }
        grid
    }

    /// Raw packed code including the mark bit
    #[inline(always)]
    pub fn raw(&self, c: Coord) -> u8 {
        self.fg[c.index()]
    }

    /// Packed code with the mark bit stripped
    #[inline(always)]
    pub fn code(&self, c: Coord) -> u8 {
        self.fg[c.index()] & !MARK_BIT
    }

    pub fn tile(&self, c: Coord) -> Tile {
        Tile::from_code(self.code(c)).unwrap_or(Tile::Empty)
    }

    /// Bounds-checked read
    pub fn get(&self, c: Coord) -> Option<Tile> {
        c.in_bounds().then(|| self.tile(c))
    }

    /// Overwrite a cell's code. Clears the mark bit.
    pub fn set_code(&mut self, c: Coord, code: u8) {
        self.fg[c.index()] = code & !MARK_BIT;
    }

    pub fn set_tile(&mut self, c: Coord, tile: Tile) {
        self.set_code(c, tile.to_code());
    }

    pub fn is_empty(&self, c: Coord) -> bool {
        self.code(c) == EMPTY_TILE
    }

    pub fn is_marked(&self, c: Coord) -> bool {
        self.fg[c.index()] & MARK_BIT != 0
    }

    /// Set the mark bit. Returns false if it was already set.
    pub fn mark(&mut self, c: Coord) -> bool {
        let cell = &mut self.fg[c.index()];
        if *cell & MARK_BIT != 0 {
            return false;
        }
        *cell |= MARK_BIT;
        true
    }

    pub fn unmark(&mut self, c: Coord) {
        self.fg[c.index()] &= !MARK_BIT;
    }

    pub fn clear_marks(&mut self) {
        for cell in &mut self.fg {
            *cell &= !MARK_BIT;
        }
    }

    pub fn any_marked(&self) -> bool {
        self.fg.iter().any(|&cell| cell & MARK_BIT != 0)
    }

    pub fn marked_count(&self) -> usize {
        self.fg.iter().filter(|&&cell| cell & MARK_BIT != 0).count()
    }

    pub fn background(&self, c: Coord) -> Background {
        self.bg[c.index()]
    }

    pub fn background_mut(&mut self, c: Coord) -> &mut Background {
        &mut self.bg[c.index()]
    }

    /// Swap two foreground codes (marks travel with the code). Backgrounds stay.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        self.fg.swap(a.index(), b.index());
    }

    /// Number of cells with jelly left to clear
    pub fn jelly_remaining(&self) -> u32 {
        self.bg.iter().filter(|bg| bg.has_jelly()).count() as u32
    }

    pub fn codes(&self) -> &[u8; CELL_COUNT] {
        &self.fg
    }

    pub fn backgrounds(&self) -> &[Background; CELL_COUNT] {
        &self.bg
    }

    /// Write the foreground (marks stripped) as `out[y][x]`.
    pub fn write_u8_grid(&self, out: &mut [[u8; GRID_SIZE as usize]; GRID_SIZE as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.fg[y * GRID_SIZE as usize + x] & !MARK_BIT;
            }
        }
    }

    /// Write the packed backgrounds as `out[y][x]`.
    pub fn write_background_grid(&self, out: &mut [[u8; GRID_SIZE as usize]; GRID_SIZE as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.bg[y * GRID_SIZE as usize + x].to_code();
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
