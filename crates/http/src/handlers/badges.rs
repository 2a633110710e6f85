use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use coach_core::Badge;

use crate::AppState;
use crate::api_types::ApiResponse;

pub async fn list_badges(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<Badge>>> {
    Json(ApiResponse::ok(state.badge_service.catalog()))
}
