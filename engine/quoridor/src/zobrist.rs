//! Zobrist fingerprinting for board states.
//!
//! Keys are drawn from a `ChaCha20Rng` seeded with a fixed constant mixed
//! with the board size, so fingerprints are stable across processes and
//! reproducible between runs — a requirement for reproducible search and for
//! repetition counting that survives a state round-trip.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Fixed base seed for key generation. Changing this invalidates every
/// recorded fingerprint, so it is part of the engine's compatibility surface.
const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Per-feature random keys for one board size.
///
/// The fingerprint of a state is the XOR of the keys of its features: one
/// key per (pawn, cell) pair, one per set wall segment, and one for the draw
/// flag. Two states collide only if they differ and the XOR happens to
/// cancel, which at 64 bits is negligible for table sizes reached in play.
#[derive(Debug, PartialEq, Eq)]
pub struct ZobristKeys {
    n: usize,
    red_cells: Vec<u64>,
    blue_cells: Vec<u64>,
    v_walls: Vec<u64>,
    h_walls: Vec<u64>,
    draw: u64,
}

impl ZobristKeys {
    pub fn new(n: usize) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(ZOBRIST_SEED ^ (n as u64));
        let cells = n * n;
        let slots = (n - 1) * (n - 1);
        let mut fill = |len: usize| -> Vec<u64> {
            (0..len).map(|_| rng.next_u64()).collect()
        };
        let red_cells = fill(cells);
        let blue_cells = fill(cells);
        let v_walls = fill(slots);
        let h_walls = fill(slots);
        let draw = rng.next_u64();
        Self {
            n,
            red_cells,
            blue_cells,
            v_walls,
            h_walls,
            draw,
        }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn red_cell(&self, x: usize, y: usize) -> u64 {
        self.red_cells[x * self.n + y]
    }

    #[inline]
    pub fn blue_cell(&self, x: usize, y: usize) -> u64 {
        self.blue_cells[x * self.n + y]
    }

    #[inline]
    pub fn v_wall(&self, slot: usize) -> u64 {
        self.v_walls[slot]
    }

    #[inline]
    pub fn h_wall(&self, slot: usize) -> u64 {
        self.h_walls[slot]
    }

    #[inline]
    pub fn draw_flag(&self) -> u64 {
        self.draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_stable_across_instances() {
        let a = ZobristKeys::new(5);
        let b = ZobristKeys::new(5);
        assert_eq!(a.red_cell(2, 0), b.red_cell(2, 0));
        assert_eq!(a.v_wall(7), b.v_wall(7));
        assert_eq!(a.draw_flag(), b.draw_flag());
    }

    #[test]
    fn test_keys_differ_per_board_size() {
        let a = ZobristKeys::new(5);
        let b = ZobristKeys::new(9);
        assert_ne!(a.red_cell(0, 0), b.red_cell(0, 0));
    }

    #[test]
    fn test_keys_are_distinct() {
        let keys = ZobristKeys::new(5);
        assert_ne!(keys.red_cell(0, 0), keys.blue_cell(0, 0));
        assert_ne!(keys.v_wall(0), keys.h_wall(0));
    }
}
