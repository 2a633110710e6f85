use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use chrono::Utc;
use coach_core::{PatternInput, ProcrastinationPattern};

use crate::AppState;
use crate::api_error::{ApiError, ServiceResultExt};
use crate::api_types::{ApiResponse, PatternIdQuery};
use crate::extract::UserId;

const LOAD_FAILED: &str = "Chyba při načítání vzorců prokrastinace";
const SAVE_FAILED: &str = "Chyba při ukládání vzorce prokrastinace";
const DELETE_FAILED: &str = "Chyba při mazání vzorce";
const MISSING_ID: &str = "ID vzorce není specifikováno";
const SAVED: &str = "Vzorec prokrastinace úspěšně uložen";
const DELETED: &str = "Vzorec úspěšně smazán";

pub async fn list_patterns(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
) -> Result<Json<ApiResponse<Vec<ProcrastinationPattern>>>, ApiError> {
    let patterns = state.pattern_service.list(&user_id).await.or_api(LOAD_FAILED)?;
    Ok(Json(ApiResponse::ok(patterns)))
}

pub async fn create_pattern(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    payload: Result<Json<PatternInput>, JsonRejection>,
) -> Result<Json<ApiResponse<ProcrastinationPattern>>, ApiError> {
    let Json(input) = payload?;
    let pattern = state
        .pattern_service
        .create(&user_id, &input, Utc::now())
        .await
        .or_api(SAVE_FAILED)?;
    Ok(Json(ApiResponse::ok(pattern).with_message(SAVED)))
}

pub async fn delete_pattern(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    query: Result<Query<PatternIdQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Query(query) = query?;
    let id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(MISSING_ID.to_owned()))?;
    state.pattern_service.delete(&user_id, &id).await.or_api(DELETE_FAILED)?;
    Ok(Json(ApiResponse { success: true, data: None, error: None, message: Some(DELETED.to_owned()) }))
}
