use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::Utc;
use coach_core::{OperatingSystem, OperatingSystemInput};

use crate::AppState;
use crate::api_error::{ApiError, ServiceResultExt};
use crate::api_types::ApiResponse;
use crate::extract::UserId;

const LOAD_FAILED: &str = "Chyba při načítání pracovního OS";
const SAVE_FAILED: &str = "Chyba při ukládání pracovního OS";
const SAVED: &str = "Pracovní operační systém úspěšně uložen";

pub async fn get_operating_system(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
) -> Result<Json<ApiResponse<Option<OperatingSystem>>>, ApiError> {
    let os = state.operating_system_service.get(&user_id).await.or_api(LOAD_FAILED)?;
    Ok(Json(ApiResponse::ok(os)))
}

pub async fn save_operating_system(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    payload: Result<Json<OperatingSystemInput>, JsonRejection>,
) -> Result<Json<ApiResponse<OperatingSystem>>, ApiError> {
    let Json(input) = payload?;
    let os = state
        .operating_system_service
        .save(&user_id, &input, Utc::now())
        .await
        .or_api(SAVE_FAILED)?;
    Ok(Json(ApiResponse::ok(os).with_message(SAVED)))
}
