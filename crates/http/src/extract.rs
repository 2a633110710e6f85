//! Caller identity from the `x-user-id` header.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use coach_core::DEMO_USER_ID;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The calling user's id. Falls back to the demo user when the header is
/// missing, blank or not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

impl<S: Send + Sync> FromRequestParts<S> for UserId {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEMO_USER_ID);
        Ok(Self(id.to_owned()))
    }
}
