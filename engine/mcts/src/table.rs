//! Transposition table: per-position search statistics keyed by the board's
//! Zobrist fingerprint, so positions reached through different move orders
//! share one statistics record.

use std::collections::HashMap;

use quoridor::{Board, GameResult, Player};

/// Search statistics for one canonical position.
///
/// Mean action values are always derived as `edge_values[a] / edge_visits[a]`
/// and never stored, so they cannot drift out of sync with the counts.
#[derive(Debug, Clone)]
pub struct NodeStats {
    /// Legality bits at this position, fixed at expansion time.
    pub valids: Vec<bool>,
    /// Oracle priors masked to `valids` and renormalized.
    pub priors: Vec<f32>,
    /// Per-action visit counts.
    pub edge_visits: Vec<u32>,
    /// Per-action summed backed-up values.
    pub edge_values: Vec<f32>,
    /// Total playouts that passed through this position after expansion.
    pub visit_count: u32,
}

impl NodeStats {
    pub fn new(valids: Vec<bool>, priors: Vec<f32>) -> Self {
        let len = valids.len();
        Self {
            valids,
            priors,
            edge_visits: vec![0; len],
            edge_values: vec![0.0; len],
            visit_count: 0,
        }
    }

    /// Mean backed-up value of an action, 0.0 before its first visit.
    #[inline]
    pub fn mean_value(&self, action: usize) -> f32 {
        let visits = self.edge_visits[action];
        if visits == 0 {
            0.0
        } else {
            self.edge_values[action] / visits as f32
        }
    }

    /// Record one playout through `action` backing up `value`.
    pub fn record(&mut self, action: usize, value: f32) {
        self.edge_visits[action] += 1;
        self.edge_values[action] += value;
        self.visit_count += 1;
    }
}

/// Fingerprint-keyed store of node statistics plus a terminal-result cache.
///
/// Retained for the lifetime of an [`Mcts`](crate::Mcts) value, so statistics
/// accumulated for one move carry over to later moves of the same match.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    stats: HashMap<u64, NodeStats>,
    terminals: HashMap<u64, GameResult>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, fingerprint: u64) -> bool {
        self.stats.contains_key(&fingerprint)
    }

    pub fn stats(&self, fingerprint: u64) -> Option<&NodeStats> {
        self.stats.get(&fingerprint)
    }

    pub fn stats_mut(&mut self, fingerprint: u64) -> Option<&mut NodeStats> {
        self.stats.get_mut(&fingerprint)
    }

    pub fn insert(&mut self, fingerprint: u64, stats: NodeStats) {
        self.stats.insert(fingerprint, stats);
    }

    /// Terminal status of a canonical board, from the mover's perspective,
    /// memoized by fingerprint.
    pub fn terminal(&mut self, board: &Board) -> GameResult {
        let fingerprint = board.fingerprint();
        *self
            .terminals
            .entry(fingerprint)
            .or_insert_with(|| board.game_result(Player::Red))
    }

    /// Number of expanded positions.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
