//! Rule engine error types.

use thiserror::Error;

/// Errors raised by the board rule engine.
///
/// Both variants indicate caller bugs: the engine never converts a bad
/// request into a no-op or a substitute move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The action index is outside `[0, 12 + 2(n-1)²)`.
    #[error("action index {index} out of range for action space of size {action_size}")]
    InvalidActionIndex { index: usize, action_size: usize },

    /// The action index is in range but its legality bit is zero in the
    /// current position (occupied wall slot, blocked step, wall that would
    /// seal a pawn in, no walls remaining, ...).
    #[error("action {index} is not legal in this position")]
    IllegalAction { index: usize },
}
