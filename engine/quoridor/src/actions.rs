//! Action codec: the bidirectional mapping between flat action indices and
//! semantic moves, plus the index permutation used when flipping perspective.
//!
//! # Layout
//!
//! For a board of side `n`, the action space has `12 + 2(n-1)²` indices:
//!
//! | range                        | meaning                                   |
//! |------------------------------|-------------------------------------------|
//! | `0..12`                      | pawn moves, in the fixed order below       |
//! | `12..12+(n-1)²`              | vertical wall at slot `(x, y)`             |
//! | `12+(n-1)²..12+2(n-1)²`      | horizontal wall at slot `(x, y)`           |
//!
//! Wall slots are addressed `base + x·(n-1) + y`.
//!
//! The pawn order is `N, S, E, W, JN, JS, JE, JW, JNE, JSW, JNW, JSE` and is
//! load-bearing: the flip permutation swaps each direction with its
//! 180°-opposite, so the order must never change.

use crate::error::RuleError;

/// Number of pawn move/jump actions at the front of the action space.
pub const PAWN_ACTIONS: usize = 12;

/// Total number of actions for a board of side `n`.
pub fn action_size(n: usize) -> usize {
    PAWN_ACTIONS + 2 * (n - 1) * (n - 1)
}

/// Wall orientation at a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// One of the twelve pawn moves, in action-index order.
///
/// Orthogonal steps move one cell, straight jumps two cells over an adjacent
/// opponent, and diagonal jumps side-step an opponent whose straight jump is
/// blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PawnMove {
    North,
    South,
    East,
    West,
    JumpNorth,
    JumpSouth,
    JumpEast,
    JumpWest,
    JumpNorthEast,
    JumpSouthWest,
    JumpNorthWest,
    JumpSouthEast,
}

impl PawnMove {
    pub const ALL: [PawnMove; PAWN_ACTIONS] = [
        PawnMove::North,
        PawnMove::South,
        PawnMove::East,
        PawnMove::West,
        PawnMove::JumpNorth,
        PawnMove::JumpSouth,
        PawnMove::JumpEast,
        PawnMove::JumpWest,
        PawnMove::JumpNorthEast,
        PawnMove::JumpSouthWest,
        PawnMove::JumpNorthWest,
        PawnMove::JumpSouthEast,
    ];

    /// Action index of this move.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Displacement `(dx, dy)` applied to the mover's position.
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            PawnMove::North => (0, 1),
            PawnMove::South => (0, -1),
            PawnMove::East => (1, 0),
            PawnMove::West => (-1, 0),
            PawnMove::JumpNorth => (0, 2),
            PawnMove::JumpSouth => (0, -2),
            PawnMove::JumpEast => (2, 0),
            PawnMove::JumpWest => (-2, 0),
            PawnMove::JumpNorthEast => (1, 1),
            PawnMove::JumpSouthWest => (-1, -1),
            PawnMove::JumpNorthWest => (-1, 1),
            PawnMove::JumpSouthEast => (1, -1),
        }
    }

    /// The 180°-opposite move, used by the flip permutation.
    #[inline]
    pub fn flipped(self) -> PawnMove {
        match self {
            PawnMove::North => PawnMove::South,
            PawnMove::South => PawnMove::North,
            PawnMove::East => PawnMove::West,
            PawnMove::West => PawnMove::East,
            PawnMove::JumpNorth => PawnMove::JumpSouth,
            PawnMove::JumpSouth => PawnMove::JumpNorth,
            PawnMove::JumpEast => PawnMove::JumpWest,
            PawnMove::JumpWest => PawnMove::JumpEast,
            PawnMove::JumpNorthEast => PawnMove::JumpSouthWest,
            PawnMove::JumpSouthWest => PawnMove::JumpNorthEast,
            PawnMove::JumpNorthWest => PawnMove::JumpSouthEast,
            PawnMove::JumpSouthEast => PawnMove::JumpNorthWest,
        }
    }
}

/// A decoded action: either a pawn move or a wall placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(PawnMove),
    Wall {
        orientation: Orientation,
        x: usize,
        y: usize,
    },
}

impl Action {
    /// Decode a flat action index for a board of side `n`.
    pub fn decode(index: usize, n: usize) -> Result<Action, RuleError> {
        let size = action_size(n);
        if index >= size {
            return Err(RuleError::InvalidActionIndex {
                index,
                action_size: size,
            });
        }

        let slots = (n - 1) * (n - 1);
        if index < PAWN_ACTIONS {
            Ok(Action::Move(PawnMove::ALL[index]))
        } else if index < PAWN_ACTIONS + slots {
            let offset = index - PAWN_ACTIONS;
            Ok(Action::Wall {
                orientation: Orientation::Vertical,
                x: offset / (n - 1),
                y: offset % (n - 1),
            })
        } else {
            let offset = index - PAWN_ACTIONS - slots;
            Ok(Action::Wall {
                orientation: Orientation::Horizontal,
                x: offset / (n - 1),
                y: offset % (n - 1),
            })
        }
    }

    /// Encode this action back to its flat index.
    pub fn encode(self, n: usize) -> usize {
        match self {
            Action::Move(m) => m.index(),
            Action::Wall {
                orientation: Orientation::Vertical,
                x,
                y,
            } => PAWN_ACTIONS + x * (n - 1) + y,
            Action::Wall {
                orientation: Orientation::Horizontal,
                x,
                y,
            } => PAWN_ACTIONS + (n - 1) * (n - 1) + x * (n - 1) + y,
        }
    }
}

/// Map an action index through the 180° board flip.
///
/// Pawn moves swap with their opposite direction; wall slots rotate to
/// `(n-2-x, n-2-y)` within the same orientation. This permutation is an
/// involution: `flip_index(flip_index(a, n), n) == a`.
pub fn flip_index(index: usize, n: usize) -> Result<usize, RuleError> {
    let flipped = match Action::decode(index, n)? {
        Action::Move(m) => Action::Move(m.flipped()),
        Action::Wall { orientation, x, y } => Action::Wall {
            orientation,
            x: n - 2 - x,
            y: n - 2 - y,
        },
    };
    Ok(flipped.encode(n))
}

/// Apply the flip permutation to a whole legality/probability vector.
///
/// `out[flip_index(a)] = input[a]` for every index, so a vector expressed in
/// one player's frame becomes the same vector in the opponent's frame.
pub fn flip_vector<T: Copy + Default>(input: &[T], n: usize) -> Result<Vec<T>, RuleError> {
    let mut out = vec![T::default(); input.len()];
    for (index, &value) in input.iter().enumerate() {
        out[flip_index(index, n)?] = value;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_size() {
        assert_eq!(action_size(3), 20);
        assert_eq!(action_size(5), 44);
        assert_eq!(action_size(9), 140);
    }

    #[test]
    fn test_decode_pawn_moves() {
        assert_eq!(Action::decode(0, 5).unwrap(), Action::Move(PawnMove::North));
        assert_eq!(
            Action::decode(11, 5).unwrap(),
            Action::Move(PawnMove::JumpSouthEast)
        );
    }

    #[test]
    fn test_decode_walls() {
        // First vertical wall slot.
        assert_eq!(
            Action::decode(12, 5).unwrap(),
            Action::Wall {
                orientation: Orientation::Vertical,
                x: 0,
                y: 0
            }
        );
        // Vertical slot (3, 2) for n=5: 12 + 3*4 + 2 = 26.
        assert_eq!(
            Action::decode(26, 5).unwrap(),
            Action::Wall {
                orientation: Orientation::Vertical,
                x: 3,
                y: 2
            }
        );
        // First horizontal slot starts after the 16 vertical ones.
        assert_eq!(
            Action::decode(28, 5).unwrap(),
            Action::Wall {
                orientation: Orientation::Horizontal,
                x: 0,
                y: 0
            }
        );
    }

    #[test]
    fn test_decode_out_of_range() {
        assert_eq!(
            Action::decode(44, 5),
            Err(RuleError::InvalidActionIndex {
                index: 44,
                action_size: 44
            })
        );
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        for n in [3, 5, 9] {
            for index in 0..action_size(n) {
                let action = Action::decode(index, n).unwrap();
                assert_eq!(action.encode(n), index);
            }
        }
    }

    #[test]
    fn test_flip_index_involution() {
        for n in [3, 5, 9] {
            for index in 0..action_size(n) {
                let once = flip_index(index, n).unwrap();
                assert_eq!(flip_index(once, n).unwrap(), index, "n={n} index={index}");
            }
        }
    }

    #[test]
    fn test_flip_index_known_values() {
        // Pawn moves swap pairwise.
        assert_eq!(flip_index(0, 5).unwrap(), 1); // N -> S
        assert_eq!(flip_index(2, 5).unwrap(), 3); // E -> W
        assert_eq!(flip_index(8, 5).unwrap(), 9); // JNE -> JSW
        assert_eq!(flip_index(10, 5).unwrap(), 11); // JNW -> JSE

        // Wall slot (0, 0) rotates to (3, 3) for n=5.
        assert_eq!(flip_index(12, 5).unwrap(), 12 + 3 * 4 + 3);
    }

    #[test]
    fn test_flip_vector_moves_entries() {
        let n = 5;
        let mut input = vec![0u8; action_size(n)];
        input[0] = 1; // N
        input[12] = 2; // vertical wall (0, 0)
        let out = flip_vector(&input, n).unwrap();
        assert_eq!(out[1], 1);
        assert_eq!(out[12 + 3 * 4 + 3], 2);
        assert_eq!(out[0], 0);
    }
}
