//! RNG module - 16-bit LFSR candy source
//!
//! A Fibonacci linear-feedback shift register with taps at bits 0, 2, 3 and 5
//! (feedback polynomial x^16 + x^14 + x^13 + x^11 + 1). It is tiny, fully
//! deterministic and reproducible across platforms, which keeps whole games
//! replayable from a seed.
//!
//! Colours are drawn by masking each raw output to 3 bits and rejecting 6 and 7.

use crate::types::COLOR_COUNT;

/// Seed used when none is given, and in place of a zero seed.
pub const DEFAULT_SEED: u16 = 0xACE1;

/// 16-bit linear-feedback shift register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lfsr {
    state: u16,
}

impl Lfsr {
    /// Create a new RNG with the given seed
    pub fn new(seed: u16) -> Self {
        // All-zero is a fixed point of the feedback function
        let state = if seed == 0 {
            log::warn!("zero LFSR seed replaced with {:#06x}", DEFAULT_SEED);
            DEFAULT_SEED
        } else {
            seed
        };
        Self { state }
    }

    /// Advance one step and return the new register value
    pub fn next_raw(&mut self) -> u16 {
        let s = self.state;
        let bit = (s ^ (s >> 2) ^ (s >> 3) ^ (s >> 5)) & 1;
        self.state = (s >> 1) | (bit << 15);
        self.state
    }

    /// Uniform colour index in `0..COLOR_COUNT`
    pub fn color(&mut self) -> u8 {
        loop {
            let r = (self.next_raw() & 7) as u8;
            if r < COLOR_COUNT {
                return r;
            }
        }
    }

    /// Uniform value in `0..bound` by masked rejection sampling.
    ///
    /// `bound` must be non-zero and at most 2^16.
    pub fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0 && bound <= 1 << 16);
        if bound <= 1 {
            return 0;
        }
        let mask = bound.next_power_of_two() - 1;
        loop {
            let r = self.next_raw() as usize & mask;
            if r < bound {
                return r;
            }
        }
    }

    /// Current register value (for restarting with the same sequence)
    pub fn state(&self) -> u16 {
        self.state
    }
}

impl Default for Lfsr {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
