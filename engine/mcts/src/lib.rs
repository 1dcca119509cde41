//! AlphaZero-style Monte Carlo tree search for the Quoridor rule engine.
//!
//! The search keeps its statistics in a transposition table keyed by board
//! fingerprint rather than in an explicit tree, so positions reached through
//! different move orders share one record. Selection uses PUCT with an
//! adaptive exploration coefficient; leaves are expanded by an [`Evaluator`]
//! oracle supplying priors and a value estimate; values back up with
//! alternating sign along the playout path.
//!
//! All positions inside the search are canonical (Red to move). Callers pass
//! raw boards plus the acting player; the returned action distribution is in
//! that player's canonical frame, matching what
//! [`Board::apply_action`](quoridor::Board::apply_action) accepts.
//!
//! # Usage
//!
//! ```rust
//! use mcts::{Mcts, MctsConfig, UniformEvaluator};
//! use quoridor::{Board, Player};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let config = MctsConfig::default().with_simulations(16);
//! let mut search = Mcts::new(config, UniformEvaluator::new());
//! let board = Board::new(5);
//! let mut rng = ChaCha20Rng::seed_from_u64(1);
//!
//! let probabilities = search
//!     .get_action_probabilities(&board, Player::Red, 1.0, true, &mut rng)
//!     .unwrap();
//! assert_eq!(probabilities.len(), board.action_size());
//! ```

pub mod config;
pub mod evaluator;
pub mod search;
pub mod table;

pub use config::MctsConfig;
pub use evaluator::{Evaluator, EvaluatorError, Prediction, UniformEvaluator};
pub use search::{Mcts, SearchError};
pub use table::{NodeStats, TranspositionTable};
