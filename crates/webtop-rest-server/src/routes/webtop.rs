//! Webtop lifecycle routes

use axum::Json;
use axum::extract::State;

use webtop_protocol::ApiResponse;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/v1/webtop/initialize
pub async fn initialize(State(state): State<AppState>) -> Result<Json<ApiResponse>, ApiError> {
    let message = state.session.initialize(&state.webtop_url).await?;
    Ok(Json(ApiResponse::success(message)))
}

/// POST /api/v1/webtop/shutdown
pub async fn shutdown(State(state): State<AppState>) -> Result<Json<ApiResponse>, ApiError> {
    state.session.shutdown().await?;
    Ok(Json(ApiResponse::success("Webtop session shut down")))
}
