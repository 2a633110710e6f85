use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::Utc;
use coach_core::{CourseState, CourseStateUpdate};

use crate::AppState;
use crate::api_error::{ApiError, ServiceResultExt};
use crate::api_types::ApiResponse;
use crate::extract::UserId;

const LOAD_FAILED: &str = "Chyba při načítání stavu kurzu";
const SAVE_FAILED: &str = "Chyba při ukládání stavu kurzu";
const SAVED: &str = "Stav kurzu úspěšně uložen";

pub async fn get_course_state(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
) -> Result<Json<ApiResponse<Option<CourseState>>>, ApiError> {
    let course = state.course_service.get_state(&user_id).await.or_api(LOAD_FAILED)?;
    Ok(Json(ApiResponse::ok(course)))
}

pub async fn update_course_state(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    payload: Result<Json<CourseStateUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<CourseState>>, ApiError> {
    let Json(update) = payload?;
    let course = state
        .course_service
        .update(&user_id, &update, Utc::now())
        .await
        .or_api(SAVE_FAILED)?;
    Ok(Json(ApiResponse::ok(course).with_message(SAVED)))
}
