//! Position oracle: the policy/value interface the search expands leaves
//! with. In AlphaZero this is a neural network; [`UniformEvaluator`] stands
//! in for tests and baseline play.

use quoridor::{Board, Player};
use thiserror::Error;

/// Errors raised by an oracle implementation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("evaluation failed: {0}")]
    EvaluationFailed(String),
}

/// Oracle output for one canonical position.
///
/// `priors` has one entry per action index. The search masks it to the
/// position's valid actions and renormalizes, so implementations may emit
/// mass on invalid actions; they may not emit non-finite values or a vector
/// of the wrong length.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Unnormalized-to-lightly-normalized policy over the full action space.
    pub priors: Vec<f32>,

    /// Value estimate in `[-1, 1]` from the perspective of the player to
    /// move on the evaluated board.
    pub value: f32,
}

/// Position oracle consulted once per leaf expansion.
///
/// Boards handed to `predict` are always canonical (the player to move is
/// Red), so implementations never need to branch on perspective.
pub trait Evaluator {
    fn predict(&self, board: &Board) -> Result<Prediction, EvaluatorError>;
}

/// Uniform priors over the valid actions and a neutral value. Useful for
/// exercising the search without a model; with it, MCTS degrades to a
/// visit-count-guided minimax over the playout budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformEvaluator;

impl UniformEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for UniformEvaluator {
    fn predict(&self, board: &Board) -> Result<Prediction, EvaluatorError> {
        let valids = board.valid_actions(Player::Red);
        let num_valid = valids.iter().filter(|&&v| v).count();
        let mut priors = vec![0.0; valids.len()];
        if num_valid > 0 {
            let p = 1.0 / num_valid as f32;
            for (prior, &valid) in priors.iter_mut().zip(&valids) {
                if valid {
                    *prior = p;
                }
            }
        }
        Ok(Prediction { priors, value: 0.0 })
    }
}
