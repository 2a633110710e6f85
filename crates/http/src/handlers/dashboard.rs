use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use coach_service::Dashboard;

use super::today;
use crate::AppState;
use crate::api_error::{ApiError, ServiceResultExt};
use crate::api_types::ApiResponse;
use crate::extract::UserId;

const LOAD_FAILED: &str = "Chyba při načítání dashboardu";

pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
) -> Result<Json<ApiResponse<Dashboard>>, ApiError> {
    let dashboard = state.dashboard_service.dashboard(&user_id, today()).await.or_api(LOAD_FAILED)?;
    Ok(Json(ApiResponse::ok(dashboard)))
}
