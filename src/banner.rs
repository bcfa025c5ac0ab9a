//! Status banner: turns a move's presentation cues into a short-lived message.
//!
//! The engine never waits on cues; the front end shows the most notable one
//! for a fixed time and then clears it.

use std::time::{Duration, Instant};

use crate::types::{Cue, Tile};

pub const BANNER_TTL: Duration = Duration::from_millis(1500);

/// Most notable cue of a move, as display text
pub fn headline(cues: &[Cue]) -> Option<String> {
    let has = |want: Cue| cues.contains(&want);

    if has(Cue::LevelWon) {
        return Some("Level complete!".into());
    }
    if has(Cue::LevelLost) {
        return Some("Out of moves".into());
    }
    if has(Cue::Reshuffle) {
        return Some("No moves left, shuffling".into());
    }
    let chain = cues
        .iter()
        .filter_map(|cue| match cue {
            Cue::Combo(n) => Some(*n),
            _ => None,
        })
        .max();
    if let Some(n) = chain {
        return Some(format!("Combo x{}!", n + 1));
    }
    for cue in cues {
        if let Cue::SpecialCreated(tile) = cue {
            let name = match tile {
                Tile::Colorbomb => "Colour bomb!",
                Tile::Wrapped(_) => "Wrapped candy!",
                _ => "Striped candy!",
            };
            return Some(name.into());
        }
    }
    if has(Cue::IllegalSwap) {
        return Some("No match".into());
    }
    None
}

#[derive(Debug, Default)]
pub struct Banner {
    text: Option<String>,
    until: Option<Instant>,
}

impl Banner {
    pub fn show(&mut self, cues: &[Cue], now: Instant) {
        if let Some(text) = headline(cues) {
            self.text = Some(text);
            self.until = Some(now + BANNER_TTL);
        }
    }

    pub fn text(&self, now: Instant) -> Option<&str> {
        match self.until {
            Some(until) if now < until => self.text.as_deref(),
            _ => None,
        }
    }

    /// True once, when a shown message runs out.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.until {
            Some(until) if now >= until => {
                self.text = None;
                self.until = None;
                true
            }
            _ => false,
        }
    }
}
