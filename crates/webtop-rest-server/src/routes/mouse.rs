//! Mouse routes
//!
//! Coordinates in request bodies are webtop-relative and are translated
//! through the live viewport before injection.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use webtop_automation::input;
use webtop_protocol::{ApiResponse, MouseButton, ScrollDirection};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MouseMovePayload {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Deserialize)]
pub struct MouseClickPayload {
    #[serde(default)]
    pub button: MouseButton,
    #[serde(default)]
    pub double: bool,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct MouseScrollPayload {
    pub direction: ScrollDirection,
    pub amount: i32,
}

/// POST /api/v1/mouse/move
pub async fn move_mouse(
    State(state): State<AppState>,
    Json(payload): Json<MouseMovePayload>,
) -> Result<Json<ApiResponse>, ApiError> {
    let viewport = state.session.viewport().await?;
    let (sx, sy) = viewport.to_screen(payload.x, payload.y)?;

    input::run(move |c| c.move_mouse(sx, sy)).await?;
    Ok(Json(ApiResponse::success(format!(
        "Mouse moved to ({}, {})",
        payload.x, payload.y
    ))))
}

/// POST /api/v1/mouse/click
pub async fn click(
    State(state): State<AppState>,
    Json(payload): Json<MouseClickPayload>,
) -> Result<Json<ApiResponse>, ApiError> {
    if let (Some(x), Some(y)) = (payload.x, payload.y) {
        let viewport = state.session.viewport().await?;
        let (sx, sy) = viewport.to_screen(x, y)?;
        input::run(move |c| c.move_mouse(sx, sy)).await?;
    }

    let button = payload.button;
    let double = payload.double;
    input::run(move |c| c.click(button, double)).await?;

    Ok(Json(ApiResponse::success(format!(
        "Mouse {} {}clicked",
        button.as_str(),
        if double { "double " } else { "" }
    ))))
}

/// POST /api/v1/mouse/scroll
pub async fn scroll(
    State(state): State<AppState>,
    Json(payload): Json<MouseScrollPayload>,
) -> Result<Json<ApiResponse>, ApiError> {
    if payload.amount <= 0 {
        return Err(ApiError::bad_request(
            "Invalid scroll parameters. Amount must be a positive number.",
        ));
    }

    // Wheel events go to the frontmost window; make that the webtop.
    state.session.bring_to_front().await?;

    let direction = payload.direction;
    let amount = payload.amount;
    input::run(move |c| c.scroll(direction, amount)).await?;

    Ok(Json(ApiResponse::success(format!(
        "Mouse scrolled {} by {}",
        direction.as_str(),
        amount
    ))))
}
