use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use chrono::Utc;
use coach_core::InteractionMode;
use coach_llm::CoachReply;
use coach_service::CoachChatInput;

use crate::AppState;
use crate::api_error::{ApiError, ServiceResultExt};
use crate::api_types::{ApiResponse, HistoryQuery, HistoryResponse};
use crate::extract::UserId;

const CHAT_FAILED: &str = "Chyba při komunikaci s AI koučem";
const HISTORY_FAILED: &str = "Chyba při načítání historie";

pub async fn chat(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    payload: Result<Json<CoachChatInput>, JsonRejection>,
) -> Result<Json<ApiResponse<CoachReply>>, ApiError> {
    let Json(input) = payload?;
    let reply = state.coach_service.chat(&user_id, &input, Utc::now()).await.or_api(CHAT_FAILED)?;
    Ok(Json(ApiResponse::ok(reply)))
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<HistoryResponse>>, ApiError> {
    let Query(query) = query?;
    let mode = match query.interaction_type.as_deref() {
        None | Some("") => InteractionMode::AdHoc,
        Some(raw) => raw.parse().map_err(|e: coach_core::CoachError| ApiError::BadRequest(e.to_string()))?,
    };
    let messages = state
        .coach_service
        .history(&user_id, mode, query.week)
        .await
        .or_api(HISTORY_FAILED)?;
    Ok(Json(ApiResponse::ok(HistoryResponse { messages })))
}
