//! Game error types.
//!
//! Domain failures are typed so callers can tell an exhausted data pool from
//! bad player input without string matching. File-level loaders wrap these in
//! `anyhow` with path context.

use thiserror::Error;

/// Errors produced by the fermidle game logic.
#[derive(Debug, Error, PartialEq)]
pub enum FermidleError {
    /// The dataset holds no questions to pick from.
    #[error("dataset is empty")]
    EmptyDataset,

    /// No two values in the pool can be compared with each other.
    #[error("no comparable pair among {pool} values")]
    NoComparablePair { pool: usize },

    /// The player's guess is not a positive, finite number.
    #[error("invalid guess {0}: guesses must be positive")]
    InvalidGuess(f64),

    /// A question in the dataset breaks a load-time invariant.
    #[error("invalid question at index {index}: {reason}")]
    InvalidQuestion { index: usize, reason: String },

    /// A value has no order of magnitude (zero, negative, or not finite).
    #[error("value {0} has no order of magnitude")]
    InvalidValue(f64),

    /// Two quantities with different units were divided.
    #[error("cannot divide {left} by {right}")]
    UnitMismatch { left: String, right: String },
}

impl FermidleError {
    /// Returns `true` if the error comes from player input rather than data.
    pub fn is_user_error(&self) -> bool {
        matches!(self, FermidleError::InvalidGuess(_))
    }
}
