//! Move validator - swap legality, resolution of a swap, and solvability probes
//!
//! # Swap pipeline
//!
//! 1. [`permitted_swap`] rejects swaps that can never be legal
//! 2. the foreground codes are exchanged
//! 3. the stripe combo and the colourbomb combo are tried
//! 4. runs through the new cell, then the old cell, are measured and applied
//! 5. each endpoint that matched is classified; a special candy overwrites it
//!    with the mark bit clear, so it survives its own cascade
//! 6. if nothing matched the swap is undone and the board is unchanged

use arrayvec::ArrayVec;

use crate::board::{is_color_code, Grid};
use crate::cascade::Cascade;
use crate::classifier::classify;
use crate::matcher::{run_lengths, scan, Axis, MIN_RUN};
use crate::types::{Coord, Tile, COLOURBOMB_TILE, COLOR_COUNT, EMPTY_TILE, GRID_SIZE};

/// Outcome of resolving one swap on the grid (before settling)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapResolution {
    pub accepted: bool,
    pub points: u32,
    /// A stripe or colourbomb combo fired
    pub combo: bool,
    /// Special candies placed at the endpoints
    pub created: ArrayVec<(Coord, Tile), 2>,
}

impl SwapResolution {
    fn rejected() -> Self {
        Self::default()
    }
}

/// Cheap legality filter, no board mutation.
///
/// Rejects identical plain candies, swaps across the special/ordinary boundary
/// that involve no colourbomb, and any cell that is caged, swirled or a hole.
pub fn permitted_swap(grid: &Grid, a: Coord, b: Coord) -> bool {
    let (ca, cb) = (grid.code(a), grid.code(b));

    if ca < COLOR_COUNT && ca == cb {
        return false;
    }

    let bomb = ca == COLOURBOMB_TILE || cb == COLOURBOMB_TILE;
    let empty = ca == EMPTY_TILE || cb == EMPTY_TILE;
    if is_color_code(ca) != is_color_code(cb) && !bomb && !empty {
        return false;
    }

    let (ba, bb) = (grid.background(a), grid.background(b));
    !(ba.blocks_swap() || bb.blocks_swap() || ba.is_hole() || bb.is_hole())
}

/// True when the tiles now sitting at `a` and `b` form a combo.
fn is_combo(grid: &Grid, a: Coord, b: Coord) -> bool {
    let (ta, tb) = (grid.tile(a), grid.tile(b));
    (ta.is_striped() && tb.is_striped()) || ta == Tile::Colorbomb || tb == Tile::Colorbomb
}

fn endpoint_matches(grid: &Grid, at: Coord) -> bool {
    let (h, v) = run_lengths(grid, at, grid.code(at));
    h >= MIN_RUN || v >= MIN_RUN
}

/// Resolve the swap `old` -> `new`, leaving explosions marked on the grid.
///
/// On rejection the grid is exactly as it was.
pub fn successful_move(grid: &mut Grid, old: Coord, new: Coord) -> SwapResolution {
    if !permitted_swap(grid, old, new) {
        return SwapResolution::rejected();
    }

    grid.swap(old, new);

    let mut resolution = SwapResolution::default();
    let mut cascade = Cascade::new(grid);

    if cascade.stripes_match(old, new) {
        resolution.combo = true;
    }
    if cascade.colourbomb_match(old, new) {
        resolution.combo = true;
    }
    let mut accepted = resolution.combo;

    for at in [new, old] {
        let code = cascade.grid().code(at);
        let h = scan(&mut cascade, at, code, Axis::Horizontal, true);
        let v = scan(&mut cascade, at, code, Axis::Vertical, true);

        if let Some(class) = classify(code, h, v) {
            accepted = true;
            cascade.award(class.points);
            if let Some(special) = class.created {
                cascade.grid_mut().set_tile(at, special);
                resolution.created.push((at, special));
            }
        }
    }

    resolution.points = cascade.points();

    if !accepted {
        grid.swap(old, new);
        debug_assert!(!grid.any_marked());
        return SwapResolution::rejected();
    }

    resolution.accepted = true;
    resolution
}

/// Would swapping `old` and `new` be accepted?
///
/// Swaps, probes and swaps back: the grid is left byte-for-byte unchanged.
pub fn move_is_possible(grid: &mut Grid, old: Coord, new: Coord) -> bool {
    if !permitted_swap(grid, old, new) {
        return false;
    }

    grid.swap(old, new);
    let possible =
        is_combo(grid, old, new) || endpoint_matches(grid, new) || endpoint_matches(grid, old);
    grid.swap(old, new);
    possible
}

/// Probe every horizontal and vertical neighbour pair.
pub fn has_possible_move(grid: &Grid) -> bool {
    let mut probe = grid.clone();
    Coord::all().any(|c| {
        let right = (c.x + 1 < GRID_SIZE).then(|| Coord::new(c.x + 1, c.y));
        let down = (c.y + 1 < GRID_SIZE).then(|| Coord::new(c.x, c.y + 1));
        [right, down]
            .into_iter()
            .flatten()
            .any(|n| move_is_possible(&mut probe, c, n))
    })
}

/// First possible move in row-major order, if any (used for hints).
pub fn find_possible_move(grid: &Grid) -> Option<(Coord, Coord)> {
    let mut probe = grid.clone();
    for c in Coord::all() {
        let right = (c.x + 1 < GRID_SIZE).then(|| Coord::new(c.x + 1, c.y));
        let down = (c.y + 1 < GRID_SIZE).then(|| Coord::new(c.x, c.y + 1));
        for n in [right, down].into_iter().flatten() {
            if move_is_possible(&mut probe, c, n) {
                return Some((c, n));
            }
        }
    }
    None
}
