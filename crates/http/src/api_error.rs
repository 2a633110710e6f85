//! Typed API error for HTTP handlers.
//!
//! Converts service errors into the JSON envelope with a status code.
//! Client-facing messages are Czech; server-side detail goes to the log only.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use coach_service::ServiceError;
use coach_storage::StorageError;

use crate::api_types::ApiResponse;

pub const USER_NOT_FOUND: &str = "Uživatel nenalezen";
pub const PATTERN_NOT_FOUND: &str = "Vzorec nenalezen";
pub const AI_NOT_CONFIGURED: &str = "AI kouč není nakonfigurován";

/// API error with HTTP status code and client message.
///
/// `Internal` logs the real error server-side and returns the route's
/// generic failure message to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: Invalid input from caller.
    BadRequest(String),
    /// 404 Not Found: User or record doesn't exist.
    NotFound(String),
    /// 422 Unprocessable Entity: Uniqueness conflict.
    UnprocessableEntity(String),
    /// 500 Internal Server Error: Storage or upstream failure.
    Internal { message: &'static str, source: anyhow::Error },
    /// 503 Service Unavailable: Backend not configured or temporarily unreachable.
    ServiceUnavailable(String),
}

impl ApiError {
    /// Classify a service failure; `failure` is the route's generic message.
    pub fn from_service(err: ServiceError, failure: &'static str) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::NotFound { entity, .. }
            | ServiceError::Storage(StorageError::NotFound { entity, .. }) => {
                Self::NotFound(not_found_message(entity).to_owned())
            },
            ServiceError::NotConfigured(ref detail) => {
                tracing::warn!(detail = %detail, "required backend not configured");
                Self::ServiceUnavailable(AI_NOT_CONFIGURED.to_owned())
            },
            ref e if e.is_duplicate() => Self::UnprocessableEntity(failure.to_owned()),
            ref e if e.is_transient() => {
                tracing::warn!(error = %e, "transient storage failure");
                Self::ServiceUnavailable(failure.to_owned())
            },
            other => Self::Internal { message: failure, source: other.into() },
        }
    }
}

fn not_found_message(entity: &str) -> &'static str {
    match entity {
        "pattern" => PATTERN_NOT_FOUND,
        _ => USER_NOT_FOUND,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::Internal { message, source } => {
                tracing::error!(error = ?source, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_owned())
            },
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };
        (status, Json(ApiResponse::<()>::failure(message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Attach the route's failure message to a service result.
pub trait ServiceResultExt<T> {
    fn or_api(self, failure: &'static str) -> Result<T, ApiError>;
}

impl<T> ServiceResultExt<T> for Result<T, ServiceError> {
    fn or_api(self, failure: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from_service(e, failure))
    }
}
