//! Game state - one level in play
//!
//! Owns the grid, the RNG and the score/moves/jelly counters, and runs the
//! full resolve cycle of a move:
//!
//! ```text
//! validate -> swap + combos + runs -> settle -> rescan -> settle -> ... -> bookkeeping -> reshuffle
//! ```
//!
//! A move is atomic: it is either rejected with the board untouched, or runs
//! to a settled (and, if needed, reshuffled) board before returning.

use crate::board::Grid;
use crate::cascade::Cascade;
use crate::error::{GameError, Result};
use crate::events::{dirty_cell, EventLog, GameEvents, Tee};
use crate::levels::LevelLayout;
use crate::matcher::rescan;
use crate::moves::{find_possible_move, move_is_possible, successful_move};
use crate::rng::Lfsr;
use crate::settle::settle;
use crate::shuffle::{draw_without_run, reshuffle, reshuffle_needed, ShuffleOutcome};
use crate::snapshot::GameSnapshot;
use crate::types::{Coord, Cue, DirtyCell, Tile};

/// Result of one `apply_move` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub accepted: bool,
    pub score_delta: u64,
    /// Final state of every cell the move touched, row-major
    pub dirty: Vec<DirtyCell>,
    pub cues: Vec<Cue>,
    /// Special candies created at the swap endpoints
    pub created: Vec<(Coord, Tile)>,
    /// Number of rescan rounds that found new matches
    pub chain: u8,
    pub jelly_remaining: u32,
    pub moves_remaining: u32,
    pub reshuffle: Option<ShuffleOutcome>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    rng: Lfsr,
    seed: u16,
    level: u32,
    score: u64,
    moves_remaining: u32,
    jelly_remaining: u32,
    moves_made: u32,
}

impl GameState {
    /// Populate a fresh board for `layout`.
    ///
    /// Candies are drawn so that no run stands at the start; the board is
    /// reshuffled if it happens to have no possible move.
    pub fn new(layout: &LevelLayout, seed: u16) -> Self {
        Self::for_level(layout, 0, seed)
    }

    pub fn for_level(layout: &LevelLayout, level: u32, seed: u16) -> Self {
        let mut grid = Grid::with_background(layout.background);
        let mut rng = Lfsr::new(seed);

        for c in Coord::all() {
            let bg = grid.background(c);
            if bg.is_hole() || bg.swirl {
                continue;
            }
            draw_without_run(&mut grid, &mut rng, c);
        }

        let shuffle = reshuffle(&mut grid, &mut rng);
        if shuffle == ShuffleOutcome::Stuck {
            log::warn!("level {} starts with no possible move", level);
        }

        let jelly_remaining = grid.jelly_remaining();
        log::info!(
            "level {} started: seed={:#06x} moves={} jelly={}",
            level,
            rng_seed(seed),
            layout.moves,
            jelly_remaining
        );

        Self {
            grid,
            rng,
            seed: rng_seed(seed),
            level,
            score: 0,
            moves_remaining: layout.moves,
            jelly_remaining,
            moves_made: 0,
        }
    }

    /// Start from an explicit grid, as-is. No population or reshuffle.
    pub fn from_grid(grid: Grid, moves: u32, seed: u16) -> Self {
        let jelly_remaining = grid.jelly_remaining();
        Self {
            grid,
            rng: Lfsr::new(seed),
            seed: rng_seed(seed),
            level: 0,
            score: 0,
            moves_remaining: moves,
            jelly_remaining,
            moves_made: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn jelly_remaining(&self) -> u32 {
        self.jelly_remaining
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn seed(&self) -> u16 {
        self.seed
    }

    pub fn is_won(&self) -> bool {
        self.jelly_remaining == 0
    }

    pub fn is_lost(&self) -> bool {
        self.moves_remaining == 0 && self.jelly_remaining > 0
    }

    pub fn is_finished(&self) -> bool {
        self.is_won() || self.is_lost()
    }

    /// Pure probe of a single swap
    pub fn move_is_possible(&self, a: Coord, b: Coord) -> bool {
        if !(a.in_bounds() && b.in_bounds() && a.is_adjacent(b)) {
            return false;
        }
        let mut probe = self.grid.clone();
        move_is_possible(&mut probe, a, b)
    }

    pub fn reshuffle_needed(&self) -> bool {
        reshuffle_needed(&self.grid)
    }

    /// Reshuffle now, if the board has no possible move.
    pub fn reshuffle(&mut self) -> ShuffleOutcome {
        reshuffle(&mut self.grid, &mut self.rng)
    }

    /// Some accepted swap, if one exists
    pub fn hint(&self) -> Option<(Coord, Coord)> {
        find_possible_move(&self.grid)
    }

    pub fn apply_move(&mut self, a: Coord, b: Coord) -> Result<MoveOutcome> {
        self.apply_move_observed(a, b, &mut ())
    }

    /// Apply a move, streaming dirty cells and cues to `events` as they happen.
    pub fn apply_move_observed(
        &mut self,
        a: Coord,
        b: Coord,
        events: &mut dyn GameEvents,
    ) -> Result<MoveOutcome> {
        for c in [a, b] {
            if !c.in_bounds() {
                return Err(GameError::InvalidCoords(c));
            }
        }
        if !a.is_adjacent(b) {
            return Err(GameError::NotAdjacent(a, b));
        }
        if self.is_finished() {
            return Err(GameError::LevelFinished);
        }

        let mut log = EventLog::new();
        let mut sink = Tee {
            first: &mut log,
            second: events,
        };

        let resolution = successful_move(&mut self.grid, a, b);
        if !resolution.accepted {
            sink.cue(Cue::IllegalSwap);
            log::debug!("swap ({},{})-({},{}) rejected", a.x, a.y, b.x, b.y);
            return Ok(MoveOutcome {
                accepted: false,
                score_delta: 0,
                dirty: Vec::new(),
                cues: log.cues().to_vec(),
                created: Vec::new(),
                chain: 0,
                jelly_remaining: self.jelly_remaining,
                moves_remaining: self.moves_remaining,
                reshuffle: None,
            });
        }

        let score_before = self.score;
        sink.cue(Cue::Swap);
        sink.dirty(dirty_cell(&self.grid, a));
        sink.dirty(dirty_cell(&self.grid, b));
        for &(_, special) in &resolution.created {
            sink.cue(Cue::SpecialCreated(special));
        }
        self.score += u64::from(resolution.points);

        let mut chain: u8 = 0;
        loop {
            let cells = self.grid.marked_count().min(u8::MAX as usize) as u8;
            sink.cue(Cue::Explosion { cells });
            let report = settle(&mut self.grid, &mut self.rng, &mut sink);
            self.score += u64::from(report.points);

            let mut cascade = Cascade::new(&mut self.grid);
            let found = rescan(&mut cascade);
            self.score += u64::from(cascade.points());
            if !found {
                break;
            }
            chain = chain.saturating_add(1);
            sink.cue(Cue::Combo(chain));
        }

        self.grid.clear_marks();
        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        self.moves_made += 1;
        self.jelly_remaining = self.grid.jelly_remaining();

        let mut shuffled = None;
        if self.is_won() {
            sink.cue(Cue::LevelWon);
            log::info!("level {} won with score {}", self.level, self.score);
        } else if self.is_lost() {
            sink.cue(Cue::LevelLost);
            log::info!("level {} lost with score {}", self.level, self.score);
        } else if reshuffle_needed(&self.grid) {
            let outcome = reshuffle(&mut self.grid, &mut self.rng);
            if matches!(
                outcome,
                ShuffleOutcome::Shuffled { .. } | ShuffleOutcome::Repainted { .. }
            ) {
                sink.cue(Cue::Reshuffle);
                for c in Coord::all() {
                    sink.dirty(dirty_cell(&self.grid, c));
                }
            }
            shuffled = Some(outcome);
        }

        let score_delta = self.score - score_before;
        log::debug!(
            "move {} ({},{})-({},{}): +{} chain={} jelly={} moves={}",
            self.moves_made,
            a.x,
            a.y,
            b.x,
            b.y,
            score_delta,
            chain,
            self.jelly_remaining,
            self.moves_remaining
        );

        let (dirty, cues) = log.into_parts();
        Ok(MoveOutcome {
            accepted: true,
            score_delta,
            dirty,
            cues,
            created: resolution.created.to_vec(),
            chain,
            jelly_remaining: self.jelly_remaining,
            moves_remaining: self.moves_remaining,
            reshuffle: shuffled,
        })
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.tiles);
        self.grid.write_background_grid(&mut out.background);
        out.score = self.score;
        out.moves_remaining = self.moves_remaining;
        out.jelly_remaining = self.jelly_remaining;
        out.level = self.level;
        out.seed = self.seed;
        out.won = self.is_won();
        out.lost = self.is_lost();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

fn rng_seed(seed: u16) -> u16 {
    Lfsr::new(seed).state()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::{BuiltinLevels, LevelSource};
    use crate::matcher::has_standing_run;

    fn level_one() -> LevelLayout {
        BuiltinLevels.level(1).unwrap()
    }

    #[test]
    fn fresh_board_is_full_quiet_and_playable() {
        let game = GameState::new(&level_one(), 0xACE1);
        let grid = game.grid();
        assert!(Coord::all().all(|c| !grid.is_empty(c)));
        assert!(!has_standing_run(grid));
        assert!(!game.reshuffle_needed());
        assert_eq!(game.moves_remaining(), 20);
        assert_eq!(game.jelly_remaining(), 13);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn same_seed_same_board() {
        let a = GameState::new(&level_one(), 4242);
        let b = GameState::new(&level_one(), 4242);
        assert_eq!(a.grid(), b.grid());
        let c = GameState::new(&level_one(), 4243);
        assert_ne!(a.grid(), c.grid());
    }

    #[test]
    fn caller_errors() {
        let mut game = GameState::new(&level_one(), 1);
        assert_eq!(
            game.apply_move(Coord::new(9, 0), Coord::new(8, 0)),
            Err(GameError::InvalidCoords(Coord::new(9, 0)))
        );
        assert_eq!(
            game.apply_move(Coord::new(0, 0), Coord::new(1, 1)),
            Err(GameError::NotAdjacent(Coord::new(0, 0), Coord::new(1, 1)))
        );
    }

    #[test]
    fn hinted_move_is_accepted_and_costs_one_move() {
        let mut game = GameState::new(&level_one(), 777);
        let (a, b) = game.hint().unwrap();
        let outcome = game.apply_move(a, b).unwrap();
        assert!(outcome.accepted);
        assert!(outcome.score_delta > 0);
        assert_eq!(outcome.moves_remaining, 19);
        assert_eq!(game.moves_made(), 1);
        assert_eq!(outcome.cues.first(), Some(&Cue::Swap));
        assert!(!game.grid().any_marked());
        assert!(!has_standing_run(game.grid()));
    }

    #[test]
    fn rejected_move_changes_nothing() {
        let mut rows = [[0u8; 9]; 9];
        for (y, r) in rows.iter_mut().enumerate() {
            for (x, cell) in r.iter_mut().enumerate() {
                *cell = ((x + 2 * y) % 3) as u8;
            }
        }
        let mut game = GameState::from_grid(Grid::from_rows(rows), 5, 1);
        let before = game.grid().clone();
        let outcome = game.apply_move(Coord::new(4, 4), Coord::new(4, 5)).unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.cues, vec![Cue::IllegalSwap]);
        assert_eq!(game.grid(), &before);
        assert_eq!(game.moves_remaining(), 5);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn no_moves_after_level_ends() {
        let layout = LevelLayout::plain(3);
        let mut game = GameState::new(&layout, 99);
        // No jelly on a plain layout: won from the start.
        assert!(game.is_won());
        let (a, b) = (Coord::new(0, 0), Coord::new(1, 0));
        assert_eq!(game.apply_move(a, b), Err(GameError::LevelFinished));
    }

    #[test]
    fn snapshot_mirrors_state() {
        let game = GameState::new(&level_one(), 31);
        let snap = game.snapshot();
        assert_eq!(snap.moves_remaining, 20);
        assert_eq!(snap.jelly_remaining, 13);
        assert_eq!(snap.background_at(Coord::new(0, 8)), 2);
        assert_eq!(snap.tile_at(Coord::new(3, 3)), game.grid().code(Coord::new(3, 3)));
        assert!(!snap.finished());
    }
}
