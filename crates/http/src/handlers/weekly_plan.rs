use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use chrono::Utc;
use coach_core::{FIRST_WEEK, WeeklyPlan, WeeklyPlanInput};

use crate::AppState;
use crate::api_error::{ApiError, ServiceResultExt};
use crate::api_types::{ApiResponse, WeekQuery};
use crate::extract::UserId;

const LOAD_FAILED: &str = "Chyba při načítání týdenního plánu";
const SAVE_FAILED: &str = "Chyba při ukládání týdenního plánu";
const SAVED: &str = "Týdenní plán úspěšně uložen";

pub async fn get_plan(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    query: Result<Query<WeekQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Option<WeeklyPlan>>>, ApiError> {
    let Query(query) = query?;
    let week = query.week.unwrap_or(FIRST_WEEK);
    let plan = state.plan_service.get_plan(&user_id, week).await.or_api(LOAD_FAILED)?;
    Ok(Json(ApiResponse::ok(plan)))
}

pub async fn save_plan(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    payload: Result<Json<WeeklyPlanInput>, JsonRejection>,
) -> Result<Json<ApiResponse<WeeklyPlan>>, ApiError> {
    let Json(input) = payload?;
    let plan = state
        .plan_service
        .save_plan(&user_id, &input, Utc::now())
        .await
        .or_api(SAVE_FAILED)?;
    Ok(Json(ApiResponse::ok(plan).with_message(SAVED)))
}
