//! Quoridor board rule engine.
//!
//! This crate owns the full rule set of an N×N Quoridor board: pawn moves and
//! jumps, wall placement with its connectivity invariant (every placed wall
//! must leave both pawns a path to their goal row), repetition draws, and the
//! player-symmetry canonicalization used by the search engine.
//!
//! # Coordinates
//!
//! Cells are addressed `(x, y)` with `x` the column and `y` the row, both in
//! `0..n`. "North" is `+y`. Red starts on row 0 and plays toward row `n-1`;
//! Blue starts on row `n-1` and plays toward row 0. Walls occupy an
//! `(n-1)×(n-1)` grid of slots between cells; see [`path`] for the exact
//! slot-to-edge mapping.
//!
//! # Action space
//!
//! A flat index space of size `12 + 2(n-1)²`: 12 pawn moves and jumps, then
//! vertical wall slots, then horizontal wall slots. [`Action`] is the codec.
//!
//! # Usage
//!
//! ```rust
//! use quoridor::{Board, Player, GameResult};
//!
//! let board = Board::new(5);
//! let valids = board.valid_actions(Player::Red);
//! let action = valids.iter().position(|&v| v).unwrap();
//! let next = board.apply_action(Player::Red, action).unwrap();
//! assert_eq!(next.game_result(Player::Blue), GameResult::Ongoing);
//! ```

pub mod actions;
pub mod board;
pub mod error;
pub mod path;
pub mod zobrist;

pub use actions::{Action, Orientation, PawnMove, PAWN_ACTIONS};
pub use board::{Board, GameResult, Player};
pub use error::RuleError;
pub use zobrist::ZobristKeys;

#[cfg(test)]
mod tests;
