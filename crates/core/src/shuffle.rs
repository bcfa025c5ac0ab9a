//! Solvability detection and reshuffle
//!
//! A board needs a reshuffle when no adjacent swap would be accepted. The
//! reshuffle permutes the plain candies on free cells (no cage, swirl or
//! hole) with a forward Fisher-Yates pass driven by the game RNG, and keeps
//! going until the board has a possible move and no standing run.
//!
//! Some layouts admit no such permutation (too few free candies, or all of
//! one colour). After [`SHUFFLE_ATTEMPTS`] permutations the plain candies are
//! repainted from the RNG instead, and after [`REPAINT_ATTEMPTS`] repaints
//! the board is reported as stuck.

use crate::board::Grid;
use crate::matcher::{has_standing_run, run_lengths, MIN_RUN};
use crate::moves::has_possible_move;
use crate::rng::Lfsr;
use crate::types::{Coord, Tile, CELL_COUNT};

pub const SHUFFLE_ATTEMPTS: u32 = 64;
pub const REPAINT_ATTEMPTS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleOutcome {
    /// A possible move already existed
    NotNeeded,
    Shuffled { passes: u32 },
    Repainted { passes: u32 },
    /// No arrangement with a possible move was found
    Stuck,
}

pub fn reshuffle_needed(grid: &Grid) -> bool {
    !has_possible_move(grid)
}

/// Plain candy on a cell free to move
fn is_shufflable(grid: &Grid, c: Coord) -> bool {
    let bg = grid.background(c);
    matches!(grid.tile(c), Tile::Color(_)) && !bg.is_fixed() && !bg.is_hole()
}

fn is_playable(grid: &Grid) -> bool {
    !has_standing_run(grid) && !reshuffle_needed(grid)
}

/// One forward pass: each eligible cell swaps with a uniformly drawn eligible
/// cell at or after it.
pub fn shuffle_pass(grid: &mut Grid, rng: &mut Lfsr) {
    for i in 0..CELL_COUNT {
        let here = Coord::from_index(i);
        if !is_shufflable(grid, here) {
            continue;
        }
        let there = loop {
            let j = i + rng.below(CELL_COUNT - i);
            let c = Coord::from_index(j);
            if is_shufflable(grid, c) {
                break c;
            }
        };
        grid.swap(here, there);
    }
}

/// Draw a colour for `c` that does not complete a run with its neighbours.
///
/// At most two colours are excluded per axis, so a free colour always exists.
pub fn draw_without_run(grid: &mut Grid, rng: &mut Lfsr, c: Coord) {
    loop {
        let color = rng.color();
        let (h, v) = run_lengths(grid, c, color);
        if h < MIN_RUN && v < MIN_RUN {
            grid.set_code(c, color);
            return;
        }
    }
}

/// Repaint every shufflable candy, avoiding runs.
pub fn repaint(grid: &mut Grid, rng: &mut Lfsr) {
    for c in Coord::all() {
        if is_shufflable(grid, c) {
            draw_without_run(grid, rng, c);
        }
    }
}

/// Reshuffle until the board is playable.
pub fn reshuffle(grid: &mut Grid, rng: &mut Lfsr) -> ShuffleOutcome {
    if !reshuffle_needed(grid) {
        return ShuffleOutcome::NotNeeded;
    }

    for passes in 1..=SHUFFLE_ATTEMPTS {
        shuffle_pass(grid, rng);
        if is_playable(grid) {
            log::info!("board reshuffled in {} pass(es)", passes);
            return ShuffleOutcome::Shuffled { passes };
        }
    }

    log::warn!(
        "no playable permutation after {} shuffles, repainting",
        SHUFFLE_ATTEMPTS
    );
    for passes in 1..=REPAINT_ATTEMPTS {
        repaint(grid, rng);
        if is_playable(grid) {
            return ShuffleOutcome::Repainted { passes };
        }
    }

    log::warn!("board has no possible move and cannot be repaired");
    ShuffleOutcome::Stuck
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Background, EMPTY_TILE, H_TILES};

    fn quiet_grid() -> Grid {
        let mut rows = [[0u8; 9]; 9];
        for (y, r) in rows.iter_mut().enumerate() {
            for (x, cell) in r.iter_mut().enumerate() {
                *cell = ((x + 2 * y) % 3) as u8;
            }
        }
        Grid::from_rows(rows)
    }

    fn colour_counts(grid: &Grid) -> [usize; 32] {
        let mut counts = [0; 32];
        for c in Coord::all() {
            counts[grid.code(c) as usize] += 1;
        }
        counts
    }

    #[test]
    fn quiet_board_needs_reshuffle() {
        assert!(reshuffle_needed(&quiet_grid()));
    }

    #[test]
    fn shuffle_pass_is_a_permutation() {
        let mut grid = quiet_grid();
        let before = colour_counts(&grid);
        let mut rng = Lfsr::new(77);
        shuffle_pass(&mut grid, &mut rng);
        assert_eq!(colour_counts(&grid), before);
    }

    #[test]
    fn fixed_and_special_cells_stay_put() {
        let mut grid = quiet_grid();
        let caged = Coord::new(4, 4);
        let special = Coord::new(0, 8);
        let hole = Coord::new(8, 0);
        grid.background_mut(caged).cage = true;
        grid.set_code(special, H_TILES + 3);
        *grid.background_mut(hole) = Background::HOLE;
        grid.set_code(hole, EMPTY_TILE);
        let caged_code = grid.code(caged);

        let mut rng = Lfsr::new(5);
        for _ in 0..10 {
            shuffle_pass(&mut grid, &mut rng);
        }

        assert_eq!(grid.code(caged), caged_code);
        assert_eq!(grid.code(special), H_TILES + 3);
        assert!(grid.is_empty(hole));
    }

    #[test]
    fn reshuffle_makes_quiet_board_playable() {
        let mut grid = quiet_grid();
        let mut rng = Lfsr::default();
        let outcome = reshuffle(&mut grid, &mut rng);
        assert!(matches!(
            outcome,
            ShuffleOutcome::Shuffled { .. } | ShuffleOutcome::Repainted { .. }
        ));
        assert!(!reshuffle_needed(&grid));
        assert!(!has_standing_run(&grid));
    }

    #[test]
    fn reshuffle_not_needed_leaves_board() {
        let mut grid = quiet_grid();
        grid.set_code(Coord::new(0, 4), 5);
        grid.set_code(Coord::new(1, 4), 5);
        grid.set_code(Coord::new(2, 5), 5);
        let before = grid.clone();
        let mut rng = Lfsr::default();
        assert_eq!(reshuffle(&mut grid, &mut rng), ShuffleOutcome::NotNeeded);
        assert_eq!(grid, before);
    }

    #[test]
    fn all_holes_is_stuck() {
        let mut grid = Grid::with_background([Background::HOLE; CELL_COUNT]);
        let mut rng = Lfsr::default();
        assert_eq!(reshuffle(&mut grid, &mut rng), ShuffleOutcome::Stuck);
    }

    #[test]
    fn draw_without_run_avoids_neighbours() {
        let mut grid = quiet_grid();
        grid.set_code(Coord::new(3, 3), 4);
        grid.set_code(Coord::new(4, 3), 4);
        let mut rng = Lfsr::new(9);
        for _ in 0..50 {
            draw_without_run(&mut grid, &mut rng, Coord::new(5, 3));
            assert_ne!(grid.code(Coord::new(5, 3)), 4);
        }
    }
}
