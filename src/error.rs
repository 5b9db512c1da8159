//! Error types for the puzzle solver and the colony optimizer.

use thiserror::Error;

/// Errors reported by the engines in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The board is not a valid sliding-tile configuration.
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// A move cannot be applied to the board it was given.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// The open list ran dry before the goal was reached.
    #[error("no solution found after expanding {expanded} states")]
    Unsolvable {
        /// Number of states expanded before giving up.
        expanded: usize,
    },

    /// The configured expansion budget was used up.
    #[error("expansion budget exhausted after {expanded} states")]
    BudgetExhausted {
        /// Number of states expanded.
        expanded: usize,
    },

    /// The point set cannot be optimized.
    #[error("invalid points: {0}")]
    InvalidPoints(String),

    /// A configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
