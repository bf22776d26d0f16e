//! Screen routes

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::json;

use webtop_automation::capture;
use webtop_protocol::ApiResponse;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScreenCaptureParams {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// GET /api/v1/screen/size
///
/// Reports the webtop viewport size, not the physical display.
pub async fn size(State(state): State<AppState>) -> Result<Json<ApiResponse>, ApiError> {
    let viewport = state.session.viewport().await?;
    Ok(Json(ApiResponse::success_with_data(
        "Webtop viewport size",
        json!({
            "width": viewport.width,
            "height": viewport.height,
        }),
    )))
}

/// GET /api/v1/screen/capture
///
/// Captures the webtop viewport from the desktop, or a webtop-relative
/// region of it when all of x/y/width/height are given.
pub async fn capture(
    State(state): State<AppState>,
    Query(params): Query<ScreenCaptureParams>,
) -> Result<Json<ApiResponse>, ApiError> {
    let region = match (params.x, params.y, params.width, params.height) {
        (Some(x), Some(y), Some(w), Some(h)) => Some((x, y, w, h)),
        (None, None, None, None) => None,
        _ => {
            return Err(ApiError::bad_request(
                "x, y, width and height must be provided together",
            ));
        }
    };

    let viewport = state.session.viewport().await?;
    let (sx, sy, width, height) = match region {
        Some((x, y, w, h)) => {
            let (sx, sy) = viewport.region_to_screen(x, y, w, h)?;
            (sx, sy, w as u32, h as u32)
        }
        None => (
            viewport.x.round() as i32,
            viewport.y.round() as i32,
            viewport.width as u32,
            viewport.height as u32,
        ),
    };

    let shot = tokio::task::spawn_blocking(move || capture::capture_region(sx, sy, width, height))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(ApiResponse::success_with_data(
        "Screen captured",
        json!({
            "image": shot.to_base64(),
            "width": shot.width,
            "height": shot.height,
            "format": "png",
        }),
    )))
}
