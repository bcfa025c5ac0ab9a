//! Match detector - horizontal and vertical runs of same-coloured candies
//!
//! A run is measured from a starting cell against a reference code. The
//! starting cell always counts; the run then extends right (or down) while
//! [`candy_match`] holds, and independently left (or up). The forward extent is
//! resolved before the backward one so symmetric boards break ties the same way
//! every time.

use crate::board::{candy_match, Grid};
use crate::cascade::Cascade;
use crate::types::{Coord, GRID_SIZE};

/// Minimum run length that counts as a match
pub const MIN_RUN: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// An inclusive run of cells along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    /// Leftmost (or topmost) cell
    pub start: Coord,
    pub len: u8,
    pub axis: Axis,
}

impl Run {
    pub fn is_match(&self) -> bool {
        self.len >= MIN_RUN
    }

    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let Run { start, len, axis } = *self;
        (0..len).map(move |i| match axis {
            Axis::Horizontal => Coord::new(start.x + i, start.y),
            Axis::Vertical => Coord::new(start.x, start.y + i),
        })
    }
}

/// Measure the run through `at` against `code` along `axis`.
pub fn run_through(grid: &Grid, at: Coord, code: u8, axis: Axis) -> Run {
    let (along, across) = match axis {
        Axis::Horizontal => (at.x, at.y),
        Axis::Vertical => (at.y, at.x),
    };
    let cell = |i: u8| match axis {
        Axis::Horizontal => Coord::new(i, across),
        Axis::Vertical => Coord::new(across, i),
    };

    let mut last = along;
    for i in along + 1..GRID_SIZE {
        if !candy_match(grid.raw(cell(i)), code) {
            break;
        }
        last = i;
    }

    let mut first = along;
    for i in (0..along).rev() {
        if !candy_match(grid.raw(cell(i)), code) {
            break;
        }
        first = i;
    }

    Run {
        start: cell(first),
        len: last - first + 1,
        axis,
    }
}

/// Measure a run and, when `apply` is set and it is a match, send every cell
/// of it through the cascade engine. Returns the run length.
pub fn scan(cascade: &mut Cascade<'_>, at: Coord, code: u8, axis: Axis, apply: bool) -> u8 {
    let run = run_through(cascade.grid(), at, code, axis);
    if apply && run.is_match() {
        for c in run.cells() {
            cascade.trigger(c, code);
        }
    }
    run.len
}

/// Probe-only horizontal and vertical run lengths through `at`.
pub fn run_lengths(grid: &Grid, at: Coord, code: u8) -> (u8, u8) {
    (
        run_through(grid, at, code, Axis::Horizontal).len,
        run_through(grid, at, code, Axis::Vertical).len,
    )
}

/// True when any run of three or more exists anywhere on the grid.
pub fn has_standing_run(grid: &Grid) -> bool {
    Coord::all().any(|c| {
        let code = grid.code(c);
        let (h, v) = run_lengths(grid, c, code);
        h >= MIN_RUN || v >= MIN_RUN
    })
}

/// Chain-reaction rescan: every cell in row-major order, horizontal then
/// vertical, measured against its own tile and applied. Returns whether any
/// match was found.
pub fn rescan(cascade: &mut Cascade<'_>) -> bool {
    let mut found = false;
    for c in Coord::all() {
        let code = cascade.grid().raw(c);
        if scan(cascade, c, code, Axis::Horizontal, true) >= MIN_RUN {
            found = true;
        }
        if scan(cascade, c, code, Axis::Vertical, true) >= MIN_RUN {
            found = true;
        }
    }
    found
}
