//! Special-candy classifier
//!
//! Decides, from the horizontal and vertical run lengths through a swap
//! endpoint, which special candy (if any) replaces the candy there. Rules are
//! checked in priority order:
//!
//! 1. a run of 5 or more in either direction makes a colourbomb
//! 2. runs of 3 or more in both directions make a wrapped candy
//! 3. a horizontal run of 4 makes a horizontal-striped candy
//! 4. a vertical run of 4 makes a vertical-striped candy
//! 5. any other match is a plain resolution

use crate::matcher::MIN_RUN;
use crate::scoring::creation_points;
use crate::types::Tile;

/// Result of classifying one endpoint that took part in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Special candy to place at the endpoint, `None` for a plain match
    pub created: Option<Tile>,
    pub points: u32,
}

/// Classify an endpoint holding `code` with run lengths `h` and `v`.
///
/// Returns `None` when neither run is a match.
pub fn classify(code: u8, h: u8, v: u8) -> Option<Classification> {
    if h < MIN_RUN && v < MIN_RUN {
        return None;
    }

    let color = Tile::from_code(code).and_then(Tile::color);
    let created = match color {
        _ if h >= 5 || v >= 5 => Some(Tile::Colorbomb),
        Some(c) if h >= MIN_RUN && v >= MIN_RUN => Some(Tile::Wrapped(c)),
        Some(c) if h >= 4 => Some(Tile::StripedH(c)),
        Some(c) if v >= 4 => Some(Tile::StripedV(c)),
        _ => None,
    };

    Some(Classification {
        created,
        points: creation_points(created),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_runs_are_not_matches() {
        assert_eq!(classify(2, 2, 2), None);
        assert_eq!(classify(2, 1, 1), None);
    }

    #[test]
    fn five_in_a_row_beats_everything() {
        let c = classify(4, 5, 3).unwrap();
        assert_eq!(c.created, Some(Tile::Colorbomb));
        assert_eq!(c.points, 20);
        assert_eq!(classify(4, 1, 6).unwrap().created, Some(Tile::Colorbomb));
    }

    #[test]
    fn crossing_runs_make_wrapped() {
        let c = classify(3, 3, 4).unwrap();
        assert_eq!(c.created, Some(Tile::Wrapped(3)));
        assert_eq!(c.points, 20);
    }

    #[test]
    fn four_runs_make_striped_in_run_direction() {
        assert_eq!(classify(1, 4, 1).unwrap().created, Some(Tile::StripedH(1)));
        assert_eq!(classify(1, 2, 4).unwrap().created, Some(Tile::StripedV(1)));
        assert_eq!(classify(1, 4, 2).unwrap().points, 10);
    }

    #[test]
    fn colour_comes_from_special_codes_too() {
        // A vertical-striped colour-5 candy completing a horizontal 4.
        assert_eq!(classify(11, 4, 1).unwrap().created, Some(Tile::StripedH(5)));
    }

    #[test]
    fn plain_three_scores_five() {
        let c = classify(0, 3, 1).unwrap();
        assert_eq!(c.created, None);
        assert_eq!(c.points, 5);
    }
}
