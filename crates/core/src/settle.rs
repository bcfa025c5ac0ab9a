//! Gravity/settle engine
//!
//! Runs after a cascade has marked cells for explosion:
//!
//! 1. **Explode**: every marked cell is cleared to empty. A cage on it is
//!    removed, a jelly layer under it is removed, and any swirl on one of its
//!    four neighbours is removed (one hop, no further propagation). A marked
//!    swirl placeholder is only unmarked and has none of these effects.
//! 2. **Gravity**: repeated top-down compaction passes until nothing moves.
//!    An empty, non-hole, non-fixed cell pulls the nearest candy above it,
//!    skipping holes. A caged or swirled cell above blocks the column; the
//!    cell beneath a blocker, or one with nothing above it, is refilled from
//!    the RNG.
//!
//! Every changed cell is reported to the event sink.

use crate::board::Grid;
use crate::events::{dirty_cell, GameEvents};
use crate::rng::Lfsr;
use crate::scoring::{CAGE_POINTS, JELLY_POINTS, SWIRL_POINTS};
use crate::types::{Coord, Cue, Tile, EMPTY_TILE, GRID_SIZE};

/// Tally of one settle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettleReport {
    pub points: u32,
    pub exploded: u8,
    pub decaged: u8,
    pub deswirled: u8,
    pub dejellied: u8,
    /// Candies that fell or were spawned
    pub filled: u8,
}

/// Where an empty cell gets its next candy from
enum Source {
    Cell(Coord),
    Spawn,
}

fn source_above(grid: &Grid, c: Coord) -> Source {
    for y in (0..c.y).rev() {
        let above = Coord::new(c.x, y);
        let bg = grid.background(above);
        if bg.is_hole() {
            continue;
        }
        if bg.is_fixed() {
            return Source::Spawn;
        }
        return Source::Cell(above);
    }
    Source::Spawn
}

/// Clear the marked cells and apply their background side effects.
pub fn explode(grid: &mut Grid, events: &mut dyn GameEvents) -> SettleReport {
    let mut report = SettleReport::default();

    for c in Coord::all() {
        if !grid.is_marked(c) {
            continue;
        }

        // Swirl placeholders are indestructible: no side effects either.
        if grid.tile(c) == Tile::Swirl {
            grid.unmark(c);
            continue;
        }
        grid.set_code(c, EMPTY_TILE);
        report.exploded += 1;

        if grid.background(c).cage {
            grid.background_mut(c).cage = false;
            report.points += CAGE_POINTS;
            report.decaged += 1;
            events.cue(Cue::Decage);
        }

        for n in c.neighbors() {
            if grid.background(n).swirl {
                grid.background_mut(n).swirl = false;
                grid.set_code(n, EMPTY_TILE);
                report.points += SWIRL_POINTS;
                report.deswirled += 1;
                events.cue(Cue::Deswirl);
                events.dirty(dirty_cell(grid, n));
            }
        }

        if grid.background(c).has_jelly() {
            grid.background_mut(c).jelly -= 1;
            report.points += JELLY_POINTS;
            report.dejellied += 1;
            events.cue(Cue::Dejelly);
        }

        events.dirty(dirty_cell(grid, c));
    }

    debug_assert!(!grid.any_marked());
    report
}

/// Compact columns and refill until no cell changes. Returns cells filled.
pub fn apply_gravity(grid: &mut Grid, rng: &mut Lfsr, events: &mut dyn GameEvents) -> u8 {
    let mut filled: u8 = 0;

    loop {
        let mut moved = false;

        for x in 0..GRID_SIZE {
            for y in (0..GRID_SIZE).rev() {
                let c = Coord::new(x, y);
                let bg = grid.background(c);
                if !grid.is_empty(c) || bg.is_hole() || bg.is_fixed() {
                    continue;
                }

                match source_above(grid, c) {
                    Source::Cell(from) => {
                        // An empty source fills on a later visit of this pass.
                        if grid.is_empty(from) {
                            continue;
                        }
                        grid.set_code(c, grid.code(from));
                        grid.set_code(from, EMPTY_TILE);
                        events.dirty(dirty_cell(grid, from));
                    }
                    Source::Spawn => {
                        grid.set_code(c, rng.color());
                    }
                }

                events.dirty(dirty_cell(grid, c));
                filled = filled.saturating_add(1);
                moved = true;
            }
        }

        if !moved {
            break;
        }
    }

    debug_assert!(Coord::all().all(|c| !grid.background(c).is_hole() || grid.is_empty(c)));
    filled
}

/// Explode then settle.
pub fn settle(grid: &mut Grid, rng: &mut Lfsr, events: &mut dyn GameEvents) -> SettleReport {
    let mut report = explode(grid, events);
    report.filled = apply_gravity(grid, rng, events);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;
    use crate::types::{Background, SWIRL_TILE};

    fn quiet_grid() -> Grid {
        let mut rows = [[0u8; 9]; 9];
        for (y, r) in rows.iter_mut().enumerate() {
            for (x, cell) in r.iter_mut().enumerate() {
                *cell = ((x + 2 * y) % 3) as u8;
            }
        }
        Grid::from_rows(rows)
    }

    fn no_empty_playable_cells(grid: &Grid) -> bool {
        Coord::all().all(|c| grid.background(c).is_hole() || !grid.is_empty(c))
    }

    #[test]
    fn jelly_one_cleared_once() {
        let mut grid = quiet_grid();
        let c = Coord::new(4, 8);
        grid.background_mut(c).jelly = 1;
        grid.mark(c);

        let mut log = EventLog::new();
        let report = explode(&mut grid, &mut log);

        assert_eq!(grid.background(c).jelly, 0);
        assert_eq!(grid.jelly_remaining(), 0);
        assert_eq!(report.points, 10);
        assert_eq!(log.cues(), &[Cue::Dejelly]);
    }

    #[test]
    fn cage_is_removed_by_one_explosion() {
        let mut grid = quiet_grid();
        let c = Coord::new(2, 2);
        *grid.background_mut(c) = Background { jelly: 2, cage: true, swirl: false };
        grid.mark(c);

        let report = explode(&mut grid, &mut ());

        assert!(!grid.background(c).cage);
        assert_eq!(grid.background(c).jelly, 1);
        assert_eq!(report.points, 20 + 10);
        assert!(grid.is_empty(c));
    }

    #[test]
    fn swirl_neighbour_removed_one_hop_only() {
        let mut grid = quiet_grid();
        let near = Coord::new(3, 4);
        let far = Coord::new(2, 4);
        for s in [near, far] {
            grid.background_mut(s).swirl = true;
            grid.set_code(s, SWIRL_TILE);
        }
        grid.mark(Coord::new(4, 4));

        let report = explode(&mut grid, &mut ());

        assert_eq!(report.deswirled, 1);
        assert_eq!(report.points, 10);
        assert!(!grid.background(near).swirl);
        assert!(grid.is_empty(near));
        assert!(grid.background(far).swirl);
        assert_eq!(grid.tile(far), Tile::Swirl);
    }

    #[test]
    fn marked_swirl_placeholder_stays() {
        let mut grid = quiet_grid();
        let s = Coord::new(0, 0);
        grid.background_mut(s).swirl = true;
        grid.set_code(s, SWIRL_TILE);
        grid.mark(s);

        explode(&mut grid, &mut ());

        assert_eq!(grid.tile(s), Tile::Swirl);
        assert!(!grid.is_marked(s));
    }

    #[test]
    fn marked_swirl_placeholder_has_no_side_effects() {
        let mut grid = quiet_grid();
        let s = Coord::new(4, 4);
        let near = Coord::new(5, 4);
        for c in [s, near] {
            grid.background_mut(c).swirl = true;
            grid.set_code(c, SWIRL_TILE);
        }
        grid.background_mut(s).jelly = 1;
        grid.mark(s);

        let mut log = EventLog::new();
        let report = explode(&mut grid, &mut log);

        assert_eq!(report, SettleReport::default());
        assert!(log.cues().is_empty());
        assert_eq!(grid.background(s).jelly, 1);
        assert!(grid.background(near).swirl);
        assert_eq!(grid.tile(near), Tile::Swirl);
    }

    #[test]
    fn column_compacts_and_refills_from_top() {
        let mut grid = quiet_grid();
        let above = grid.code(Coord::new(5, 6));
        grid.mark(Coord::new(5, 7));
        grid.mark(Coord::new(5, 8));

        let mut rng = Lfsr::default();
        let report = settle(&mut grid, &mut rng, &mut ());

        assert_eq!(report.exploded, 2);
        assert_eq!(grid.code(Coord::new(5, 8)), above);
        assert!(no_empty_playable_cells(&grid));
    }

    #[test]
    fn candies_fall_through_holes() {
        let mut grid = quiet_grid();
        let hole = Coord::new(1, 5);
        *grid.background_mut(hole) = Background::HOLE;
        grid.set_code(hole, EMPTY_TILE);
        let above = grid.code(Coord::new(1, 4));
        grid.mark(Coord::new(1, 6));

        let mut rng = Lfsr::default();
        settle(&mut grid, &mut rng, &mut ());

        assert_eq!(grid.code(Coord::new(1, 6)), above);
        assert!(grid.is_empty(hole));
        assert!(no_empty_playable_cells(&grid));
    }

    #[test]
    fn caged_cell_blocks_fall_and_spawns_beneath() {
        let mut grid = quiet_grid();
        let cage = Coord::new(7, 3);
        grid.background_mut(cage).cage = true;
        let caged_code = grid.code(cage);
        grid.mark(Coord::new(7, 4));

        let mut rng = Lfsr::new(0xACE1);
        settle(&mut grid, &mut rng, &mut ());

        assert_eq!(grid.code(cage), caged_code);
        // First colour drawn from 0xACE1 is 0.
        assert_eq!(grid.code(Coord::new(7, 4)), 0);
        assert!(no_empty_playable_cells(&grid));
    }

    #[test]
    fn dirty_stream_covers_every_changed_cell() {
        let mut grid = quiet_grid();
        grid.mark(Coord::new(0, 8));
        let mut log = EventLog::new();
        let mut rng = Lfsr::default();
        settle(&mut grid, &mut rng, &mut log);

        // The whole column shifted down by one.
        let cells = log.dirty_cells();
        assert_eq!(cells.len(), 9);
        for cell in cells {
            assert_eq!(cell.coord.x, 0);
            assert_eq!(cell.tile, grid.code(cell.coord));
        }
    }
}
