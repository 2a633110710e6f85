use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use coach_core::{DailyEntry, DailyEntryInput, parse_calendar_date};

use crate::AppState;
use crate::api_error::{ApiError, ServiceResultExt};
use crate::api_types::{ApiResponse, TrackerQuery};
use crate::extract::UserId;

const LOAD_FAILED: &str = "Chyba při načítání trackeru";
const SAVE_FAILED: &str = "Chyba při ukládání denního záznamu";
const SAVED: &str = "Denní záznam úspěšně uložen";

pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    query: Result<Query<TrackerQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<DailyEntry>>>, ApiError> {
    let Query(query) = query?;
    let date = query
        .date
        .as_deref()
        .map(parse_calendar_date)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let entries = state
        .tracker_service
        .list_entries(&user_id, date, query.week)
        .await
        .or_api(LOAD_FAILED)?;
    Ok(Json(ApiResponse::ok(entries)))
}

pub async fn save_entry(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    payload: Result<Json<DailyEntryInput>, JsonRejection>,
) -> Result<Json<ApiResponse<DailyEntry>>, ApiError> {
    let Json(input) = payload?;
    let entry = state.tracker_service.save_entry(&user_id, &input).await.or_api(SAVE_FAILED)?;
    Ok(Json(ApiResponse::ok(entry).with_message(SAVED)))
}
