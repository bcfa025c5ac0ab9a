//! Cascade engine - flood propagation of explosions through special candies
//!
//! `trigger` marks a cell for explosion and awards a point. What happens next
//! depends on the tile: striped candies sweep their row or column, wrapped
//! candies their 3x3 neighbourhood and colourbombs every candy of the
//! reference colour. Propagation uses an explicit work-list with the grid's
//! mark bit as the visited set, so each cell is expanded at most once and
//! cyclic chains (two striped candies crossing each other) terminate.
//!
//! Marks are left on the grid for the settle engine to consume.

use arrayvec::ArrayVec;

use crate::board::{candy_match, Grid};
use crate::scoring::{COMBO_POINTS, TRIGGER_POINTS};
use crate::types::{Coord, Tile, CELL_COUNT, GRID_SIZE};

/// One resolution pass over a grid, accumulating score.
pub struct Cascade<'a> {
    grid: &'a mut Grid,
    points: u32,
    work: ArrayVec<Coord, CELL_COUNT>,
}

impl<'a> Cascade<'a> {
    pub fn new(grid: &'a mut Grid) -> Self {
        Self {
            grid,
            points: 0,
            work: ArrayVec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        self.grid
    }

    /// Points awarded so far
    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn award(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }

    /// Mark `at` and everything its explosion reaches.
    ///
    /// Already-marked cells are ignored. Empty cells and swirl placeholders
    /// are marked (and scored) but do not propagate.
    pub fn trigger(&mut self, at: Coord, reference: u8) {
        if !self.visit(at) {
            return;
        }

        while let Some(c) = self.work.pop() {
            match self.grid.tile(c) {
                Tile::Colorbomb => {
                    self.explode_a_colour(reference);
                }
                Tile::StripedH(_) => {
                    for x in 0..GRID_SIZE {
                        self.visit(Coord::new(x, c.y));
                    }
                }
                Tile::StripedV(_) => {
                    for y in 0..GRID_SIZE {
                        self.visit(Coord::new(c.x, y));
                    }
                }
                Tile::Wrapped(_) => {
                    let (x0, x1) = (c.x.saturating_sub(1), (c.x + 1).min(GRID_SIZE - 1));
                    let (y0, y1) = (c.y.saturating_sub(1), (c.y + 1).min(GRID_SIZE - 1));
                    for y in y0..=y1 {
                        for x in x0..=x1 {
                            self.visit(Coord::new(x, y));
                        }
                    }
                }
                Tile::Color(_) | Tile::Cage | Tile::Swirl | Tile::Empty => {}
            }
        }
    }

    /// Mark a cell, score it and queue it for expansion.
    fn visit(&mut self, c: Coord) -> bool {
        if !self.grid.mark(c) {
            return false;
        }
        self.award(TRIGGER_POINTS);
        self.work.push(c);
        true
    }

    /// Mark every cell matching `reference`'s colour. Non-recursive and unscored.
    pub fn explode_a_colour(&mut self, reference: u8) -> u8 {
        let mut marked = 0;
        for c in Coord::all() {
            if candy_match(self.grid.raw(c), reference) && self.grid.mark(c) {
                marked += 1;
            }
        }
        marked
    }

    /// Striped-on-striped combo: sweep both rows and both columns of the pair.
    ///
    /// Returns false (and does nothing) unless both endpoints are striped.
    pub fn stripes_match(&mut self, a: Coord, b: Coord) -> bool {
        if !(self.grid.tile(a).is_striped() && self.grid.tile(b).is_striped()) {
            return false;
        }

        let reference = self.grid.code(a);
        for i in 0..GRID_SIZE {
            self.trigger(Coord::new(i, a.y), reference);
            self.trigger(Coord::new(b.x, i), reference);
            self.trigger(Coord::new(a.x, i), reference);
            self.trigger(Coord::new(i, b.y), reference);
        }
        self.award(COMBO_POINTS);
        true
    }

    /// Colourbomb combo: a colourbomb at either endpoint detonates with the
    /// other endpoint's colour.
    pub fn colourbomb_match(&mut self, a: Coord, b: Coord) -> bool {
        let (bomb, other) = if self.grid.tile(a) == Tile::Colorbomb {
            (a, b)
        } else if self.grid.tile(b) == Tile::Colorbomb {
            (b, a)
        } else {
            return false;
        };

        let other_code = self.grid.code(other);
        self.trigger(bomb, other_code);
        // A second colourbomb carries no colour; it is consumed with the first.
        self.trigger(other, other_code);
        self.award(COMBO_POINTS);
        true
    }
}
