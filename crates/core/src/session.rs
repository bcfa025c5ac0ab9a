//! Play session - cursor, selection and level progression
//!
//! Front ends drive the engine through [`UiAction`]s:
//!
//! - `Move(dir)` moves the cursor one cell, clamped to the grid. If a cell was
//!   selected, the move is a swap attempt between the old and new cursor
//!   cells and the selection is cleared, whether or not the swap is accepted.
//! - `Select` toggles the selection on the cursor cell.
//! - `Restart` reloads the current level with the session seed.
//! - `NextLevel` advances once the current level is won.

use crate::error::{GameError, Result};
use crate::events::GameEvents;
use crate::game_state::{GameState, MoveOutcome};
use crate::levels::LevelSource;
use crate::snapshot::GameSnapshot;
use crate::types::{Coord, UiAction, GRID_SIZE};

pub struct PlaySession<L> {
    levels: L,
    level: u32,
    seed: u16,
    state: GameState,
    cursor: Coord,
    selected: bool,
    total_score: u64,
}

impl<L: LevelSource> PlaySession<L> {
    pub fn new(levels: L, level: u32, seed: u16) -> Result<Self> {
        let layout = levels.level(level).ok_or(GameError::UnknownLevel(level))?;
        let state = GameState::for_level(&layout, level, seed);
        Ok(Self {
            levels,
            level,
            seed,
            state,
            cursor: Coord::new(GRID_SIZE / 2, GRID_SIZE / 2),
            selected: false,
            total_score: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    /// Score banked from completed levels plus the current one
    pub fn total_score(&self) -> u64 {
        self.total_score + self.state.score()
    }

    pub fn has_next_level(&self) -> bool {
        self.level < self.levels.count()
    }

    pub fn apply_action(&mut self, action: UiAction) -> Result<Option<MoveOutcome>> {
        self.apply_action_observed(action, &mut ())
    }

    /// Returns the move outcome when the action was a swap attempt.
    pub fn apply_action_observed(
        &mut self,
        action: UiAction,
        events: &mut dyn GameEvents,
    ) -> Result<Option<MoveOutcome>> {
        match action {
            UiAction::Move(dir) => {
                let Some(next) = self.cursor.step(dir) else {
                    return Ok(None);
                };
                let from = std::mem::replace(&mut self.cursor, next);
                if !std::mem::take(&mut self.selected) || self.state.is_finished() {
                    return Ok(None);
                }
                self.state.apply_move_observed(from, next, events).map(Some)
            }
            UiAction::Select => {
                if !self.state.is_finished() {
                    self.selected = !self.selected;
                }
                Ok(None)
            }
            UiAction::Restart => {
                self.load(self.level)?;
                Ok(None)
            }
            UiAction::NextLevel => {
                if self.state.is_won() && self.has_next_level() {
                    self.total_score += self.state.score();
                    self.load(self.level + 1)?;
                }
                Ok(None)
            }
        }
    }

    fn load(&mut self, level: u32) -> Result<()> {
        let layout = self
            .levels
            .level(level)
            .ok_or(GameError::UnknownLevel(level))?;
        self.state = GameState::for_level(&layout, level, self.seed);
        self.level = level;
        self.selected = false;
        Ok(())
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
        out.cursor = Some(self.cursor);
        out.selected = self.selected;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}
