//! Scoring module - point values for every scoring event
//!
//! | Event | Points |
//! |-------|--------|
//! | cell touched by a trigger | 1 |
//! | stripe or colourbomb combo | 3 |
//! | colourbomb or wrapped created | 20 |
//! | striped created | 10 |
//! | plain match (no special) | 5 |
//! | cage removed | 20 |
//! | swirl removed | 10 |
//! | jelly layer removed | 10 |
//!
//! Score only ever increases.

use crate::types::Tile;

pub const TRIGGER_POINTS: u32 = 1;
pub const COMBO_POINTS: u32 = 3;
pub const COLOURBOMB_POINTS: u32 = 20;
pub const WRAPPED_POINTS: u32 = 20;
pub const STRIPED_POINTS: u32 = 10;
pub const PLAIN_MATCH_POINTS: u32 = 5;
pub const CAGE_POINTS: u32 = 20;
pub const SWIRL_POINTS: u32 = 10;
pub const JELLY_POINTS: u32 = 10;

/// Points for resolving a swap endpoint that created `created` (or nothing).
pub fn creation_points(created: Option<Tile>) -> u32 {
    match created {
        Some(Tile::Colorbomb) => COLOURBOMB_POINTS,
        Some(Tile::Wrapped(_)) => WRAPPED_POINTS,
        Some(Tile::StripedH(_)) | Some(Tile::StripedV(_)) => STRIPED_POINTS,
        _ => PLAIN_MATCH_POINTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_points_table() {
        assert_eq!(creation_points(Some(Tile::Colorbomb)), 20);
        assert_eq!(creation_points(Some(Tile::Wrapped(3))), 20);
        assert_eq!(creation_points(Some(Tile::StripedH(0))), 10);
        assert_eq!(creation_points(Some(Tile::StripedV(5))), 10);
        assert_eq!(creation_points(None), 5);
    }
}
