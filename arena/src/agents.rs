//! Players for the match driver.
//!
//! Agents always receive canonical boards (the player to move is Red) and
//! answer with an action index in that frame, which is exactly what
//! `Board::apply_action` accepts for the acting player.

use anyhow::{anyhow, bail, Result};
use mcts::{Mcts, MctsConfig, UniformEvaluator};
use quoridor::path::shortest_distances;
use quoridor::{Board, PawnMove, Player};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

pub trait Agent {
    fn name(&self) -> &str;

    /// Pick an action for a canonical board.
    fn choose_action(&mut self, board: &Board) -> Result<usize>;
}

/// Uniform choice over the valid actions.
pub struct RandomAgent {
    rng: ChaCha20Rng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_action(&mut self, board: &Board) -> Result<usize> {
        let candidates: Vec<usize> = board
            .valid_actions(Player::Red)
            .iter()
            .enumerate()
            .filter_map(|(index, &valid)| valid.then_some(index))
            .collect();
        if candidates.is_empty() {
            bail!("no valid actions to choose from");
        }
        Ok(candidates[self.rng.gen_range(0..candidates.len())])
    }
}

/// Walks the shortest path to the goal row, ignoring walls as a weapon.
/// A useful sanity baseline: any search worth its budget should beat it.
pub struct GreedyAgent;

impl GreedyAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for GreedyAgent {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_action(&mut self, board: &Board) -> Result<usize> {
        let n = board.n();
        let distances = shortest_distances(board.goal_row(Player::Red), board.walls());
        let position = board.position(Player::Red);
        let valids = board.valid_actions(Player::Red);

        // Legal pawn move with the smallest remaining distance, ties to the
        // lowest action index.
        let mut best: Option<(usize, u32)> = None;
        for mv in PawnMove::ALL {
            if !valids[mv.index()] {
                continue;
            }
            let (dx, dy) = mv.delta();
            let x = (position.0 as isize + dx) as usize;
            let y = (position.1 as isize + dy) as usize;
            let distance = distances[x * n + y];
            if best.map_or(true, |(_, top)| distance < top) {
                best = Some((mv.index(), distance));
            }
        }
        best.map(|(index, _)| index)
            .ok_or_else(|| anyhow!("no legal pawn move available"))
    }
}

/// Greedy-temperature MCTS with a uniform oracle. The transposition table
/// persists across moves and games, so later searches reuse earlier work.
pub struct MctsAgent {
    search: Mcts<UniformEvaluator>,
    rng: ChaCha20Rng,
}

impl MctsAgent {
    pub fn new(config: MctsConfig, seed: u64) -> Self {
        Self {
            search: Mcts::new(config, UniformEvaluator::new()),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for MctsAgent {
    fn name(&self) -> &str {
        "mcts"
    }

    fn choose_action(&mut self, board: &Board) -> Result<usize> {
        let probabilities =
            self.search
                .get_action_probabilities(board, Player::Red, 0.0, false, &mut self.rng)?;
        // Temperature zero returns a one-hot vector.
        probabilities
            .iter()
            .position(|&p| p > 0.5)
            .ok_or_else(|| anyhow!("search returned an empty distribution"))
    }
}
