//! Event sinks for rendering and presentation timing.
//!
//! The engine pushes every cell change and every presentation cue into a
//! [`GameEvents`] sink as it resolves a move. Sinks must not call back into
//! the engine.

use crate::board::Grid;
use crate::types::{Coord, Cue, DirtyCell, CELL_COUNT};

pub trait GameEvents {
    /// A cell's foreground or background changed.
    fn dirty(&mut self, cell: DirtyCell);

    /// A presentation cue; the engine does not wait for it.
    fn cue(&mut self, cue: Cue);
}

/// Sink that drops everything
impl GameEvents for () {
    fn dirty(&mut self, _cell: DirtyCell) {}
    fn cue(&mut self, _cue: Cue) {}
}

/// Current state of a cell as a dirty notification
pub fn dirty_cell(grid: &Grid, c: Coord) -> DirtyCell {
    DirtyCell {
        coord: c,
        tile: grid.code(c),
        background: grid.background(c).to_code(),
    }
}

/// Collects the event stream of one move.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    dirty: Vec<DirtyCell>,
    cues: Vec<Cue>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Raw dirty stream, in emission order and with repeats
    pub fn dirty_stream(&self) -> &[DirtyCell] {
        &self.dirty
    }

    /// Final state of every touched cell, in row-major order.
    pub fn dirty_cells(&self) -> Vec<DirtyCell> {
        let mut latest: [Option<DirtyCell>; CELL_COUNT] = [None; CELL_COUNT];
        for cell in &self.dirty {
            latest[cell.coord.index()] = Some(*cell);
        }
        latest.into_iter().flatten().collect()
    }

    pub fn into_parts(self) -> (Vec<DirtyCell>, Vec<Cue>) {
        let dirty = self.dirty_cells();
        (dirty, self.cues)
    }
}

impl GameEvents for EventLog {
    fn dirty(&mut self, cell: DirtyCell) {
        self.dirty.push(cell);
    }

    fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

/// Forwards to two sinks.
pub struct Tee<'a, A: ?Sized, B: ?Sized> {
    pub first: &'a mut A,
    pub second: &'a mut B,
}

impl<A: GameEvents + ?Sized, B: GameEvents + ?Sized> GameEvents for Tee<'_, A, B> {
    fn dirty(&mut self, cell: DirtyCell) {
        self.first.dirty(cell);
        self.second.dirty(cell);
    }

    fn cue(&mut self, cue: Cue) {
        self.first.cue(cue);
        self.second.cue(cue);
    }
}
