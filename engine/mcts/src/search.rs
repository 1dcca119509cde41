//! The search loop: PUCT selection over transposition-table statistics,
//! oracle expansion at leaves, and sign-alternating value backup.
//!
//! Every playout walks canonical boards only: after each applied action the
//! successor is re-canonicalized for the next mover, so selection, expansion
//! and the oracle all see positions with Red to move.

use quoridor::{Board, GameResult, Player, RuleError};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Gamma};
use thiserror::Error;
use tracing::{trace, warn};

use crate::config::MctsConfig;
use crate::evaluator::{Evaluator, EvaluatorError};
use crate::table::{NodeStats, TranspositionTable};

/// Below this, the temperature is treated as exactly zero (argmax).
const TEMPERATURE_EPSILON: f32 = 1e-6;

/// Errors raised during search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The oracle broke its interface: wrong prior length or a non-finite
    /// number. Fatal; search results after this would be meaningless.
    #[error("oracle contract violated: {0}")]
    OracleContract(String),

    /// A non-terminal position produced no valid actions, which the rule
    /// engine guarantees cannot happen.
    #[error("no valid actions in a non-terminal position")]
    NoValidActions,

    /// The caller asked for action probabilities of a finished game.
    #[error("search started from a terminal position")]
    TerminalRoot,

    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Monte Carlo tree search over a [`TranspositionTable`].
///
/// The table lives as long as this value, so statistics accumulated while
/// choosing one move are reused when the same positions reappear later in
/// the match.
pub struct Mcts<E: Evaluator> {
    config: MctsConfig,
    evaluator: E,
    table: TranspositionTable,
}

impl<E: Evaluator> Mcts<E> {
    pub fn new(config: MctsConfig, evaluator: E) -> Self {
        Self {
            config,
            evaluator,
            table: TranspositionTable::new(),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    /// Run the configured number of playouts from `board` (as seen by
    /// `player`) and return the visit-count distribution over actions,
    /// expressed in `player`'s canonical frame.
    ///
    /// `temperature` zero yields a one-hot argmax over visit counts (ties to
    /// the lowest action index); positive temperatures yield counts raised
    /// to `1/temperature`, normalized. `root_noise` mixes Dirichlet noise
    /// into the root priors before the first playout, and only there.
    pub fn get_action_probabilities(
        &mut self,
        board: &Board,
        player: Player,
        temperature: f32,
        root_noise: bool,
        rng: &mut ChaCha20Rng,
    ) -> Result<Vec<f32>, SearchError> {
        let root = board.canonical(player);
        if self.table.terminal(&root) != GameResult::Ongoing {
            return Err(SearchError::TerminalRoot);
        }

        let fingerprint = root.fingerprint();
        if !self.table.contains(fingerprint) {
            self.expand(&root, fingerprint)?;
        }
        if root_noise && self.config.dirichlet_alpha > 0.0 && self.config.dirichlet_epsilon > 0.0 {
            self.mix_root_noise(fingerprint, rng);
        }

        for _ in 0..self.config.num_simulations {
            self.playout(&root)?;
        }

        let stats = self
            .table
            .stats(fingerprint)
            .ok_or(SearchError::NoValidActions)?;
        trace!(
            simulations = self.config.num_simulations,
            positions = self.table.len(),
            "search complete"
        );
        Ok(extract_probabilities(stats, temperature))
    }

    /// One playout. Returns the backed-up value from the perspective of the
    /// player to move on `board` (which is always canonical Red).
    fn playout(&mut self, board: &Board) -> Result<f32, SearchError> {
        match self.table.terminal(board) {
            GameResult::Ongoing => {}
            GameResult::Win => return Ok(1.0),
            GameResult::Loss => return Ok(-1.0),
            GameResult::Draw => return Ok(0.0),
        }

        let fingerprint = board.fingerprint();
        if !self.table.contains(fingerprint) {
            // Leaf: expand once and back the oracle's value up as-is.
            return self.expand(board, fingerprint);
        }

        let action = {
            let stats = self
                .table
                .stats(fingerprint)
                .ok_or(SearchError::NoValidActions)?;
            puct_select(&self.config, stats)?
        };

        let next = board.apply_action(Player::Red, action)?;
        let child = next.canonical(Player::Blue);
        // The child's value is from the opponent's perspective.
        let value = -self.playout(&child)?;

        if let Some(stats) = self.table.stats_mut(fingerprint) {
            stats.record(action, value);
        }
        Ok(value)
    }

    /// Expand a leaf: consult the oracle, mask and renormalize its priors to
    /// the valid actions, store the statistics record, and return the value
    /// estimate.
    fn expand(&mut self, board: &Board, fingerprint: u64) -> Result<f32, SearchError> {
        let prediction = self.evaluator.predict(board)?;

        let action_size = board.action_size();
        if prediction.priors.len() != action_size {
            return Err(SearchError::OracleContract(format!(
                "prior vector has length {}, expected {}",
                prediction.priors.len(),
                action_size
            )));
        }
        if !prediction.value.is_finite() || prediction.priors.iter().any(|p| !p.is_finite()) {
            return Err(SearchError::OracleContract(
                "prediction contains a non-finite number".to_string(),
            ));
        }

        let valids = board.valid_actions(Player::Red);
        let num_valid = valids.iter().filter(|&&v| v).count();
        if num_valid == 0 {
            return Err(SearchError::NoValidActions);
        }

        let mut priors: Vec<f32> = prediction
            .priors
            .iter()
            .zip(&valids)
            .map(|(&p, &valid)| if valid { p } else { 0.0 })
            .collect();
        let mass: f32 = priors.iter().sum();
        if mass > 0.0 {
            for prior in &mut priors {
                *prior /= mass;
            }
        } else {
            warn!(
                fingerprint,
                "oracle assigned zero mass to every valid action, using uniform priors"
            );
            let uniform = 1.0 / num_valid as f32;
            for (prior, &valid) in priors.iter_mut().zip(&valids) {
                *prior = if valid { uniform } else { 0.0 };
            }
        }

        self.table.insert(fingerprint, NodeStats::new(valids, priors));
        Ok(prediction.value)
    }

    /// Mix Dirichlet(α) noise into the root priors, over valid actions only.
    /// Generated as normalized Gamma(α, 1) variates.
    fn mix_root_noise(&mut self, fingerprint: u64, rng: &mut ChaCha20Rng) {
        let alpha = self.config.dirichlet_alpha;
        let epsilon = self.config.dirichlet_epsilon;
        let gamma = match Gamma::new(alpha as f64, 1.0) {
            Ok(gamma) => gamma,
            Err(_) => return, // alpha validated positive by the caller
        };
        let Some(stats) = self.table.stats_mut(fingerprint) else {
            return;
        };

        let noise: Vec<f64> = stats
            .valids
            .iter()
            .map(|&valid| if valid { gamma.sample(rng) } else { 0.0 })
            .collect();
        let total: f64 = noise.iter().sum();
        if total <= 0.0 {
            return;
        }

        for (action, prior) in stats.priors.iter_mut().enumerate() {
            if stats.valids[action] {
                *prior = (1.0 - epsilon) * *prior + epsilon * (noise[action] / total) as f32;
            }
        }
    }
}

/// PUCT: mean value plus prior-weighted exploration bonus. Ties go to the
/// lowest action index.
fn puct_select(config: &MctsConfig, stats: &NodeStats) -> Result<usize, SearchError> {
    let coefficient = config.exploration_coefficient(stats.visit_count);
    let sqrt_total = (stats.visit_count as f32 + 1e-8).sqrt();

    let mut best: Option<(usize, f32)> = None;
    for action in 0..stats.valids.len() {
        if !stats.valids[action] {
            continue;
        }
        let visits = stats.edge_visits[action] as f32;
        let score = stats.mean_value(action)
            + coefficient * stats.priors[action] * sqrt_total / (1.0 + visits);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((action, score));
        }
    }
    best.map(|(action, _)| action)
        .ok_or(SearchError::NoValidActions)
}

/// Turn visit counts into an action distribution at the given temperature.
fn extract_probabilities(stats: &NodeStats, temperature: f32) -> Vec<f32> {
    let mut probabilities = vec![0.0f32; stats.edge_visits.len()];

    if temperature <= TEMPERATURE_EPSILON {
        let mut best: Option<(usize, u32)> = None;
        for (action, &visits) in stats.edge_visits.iter().enumerate() {
            if stats.valids[action] && best.map_or(true, |(_, top)| visits > top) {
                best = Some((action, visits));
            }
        }
        if let Some((action, _)) = best {
            probabilities[action] = 1.0;
        }
        return probabilities;
    }

    let inverse = 1.0 / temperature;
    let mut total = 0.0f32;
    for (action, &visits) in stats.edge_visits.iter().enumerate() {
        if stats.valids[action] && visits > 0 {
            let weight = (visits as f32).powf(inverse);
            probabilities[action] = weight;
            total += weight;
        }
    }

    if total > 0.0 {
        for probability in &mut probabilities {
            *probability /= total;
        }
    } else {
        // No playout has run yet; spread evenly over the valid actions.
        let num_valid = stats.valids.iter().filter(|&&v| v).count() as f32;
        for (probability, &valid) in probabilities.iter_mut().zip(&stats.valids) {
            if valid {
                *probability = 1.0 / num_valid;
            }
        }
    }
    probabilities
}
