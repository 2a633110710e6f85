//! Typed error enum for the service layer.
//!
//! Unifies storage and LLM failures with the course rules enforced here, so
//! the HTTP layer can map each failure mode to a status without downcasting.

use coach_core::CoachError;
use coach_llm::LlmError;
use coach_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying storage, LLM and validation failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// LLM API call failed.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Caller provided invalid input (week out of range, bad rating, blank text).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Referenced record does not exist or belongs to another user.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Required backend (LLM API key) is not configured.
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl ServiceError {
    pub(crate) fn user_not_found(user_id: &str) -> Self {
        Self::NotFound { entity: "user", id: user_id.to_owned() }
    }

    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Storage(StorageError::NotFound { .. }))
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_duplicate())
    }
}

impl From<CoachError> for ServiceError {
    fn from(err: CoachError) -> Self {
        match err {
            CoachError::InvalidInput(msg) => Self::InvalidInput(msg),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}
