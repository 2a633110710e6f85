use std::result::Result as StdResult;

use thiserror::Error;

/// Domain-level errors raised by core validation and parsing.
#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Invalid interaction type: {0}")]
    InvalidInteractionType(String),

    #[error("Invalid message role: {0}")]
    InvalidMessageRole(String),

    #[error("Invalid focus block status: {0}")]
    InvalidFocusBlockStatus(String),

    #[error("Invalid streak metric: {0}")]
    InvalidStreakMetric(String),

    #[error("Invalid badge code: {0}")]
    InvalidBadgeCode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, CoachError>;
