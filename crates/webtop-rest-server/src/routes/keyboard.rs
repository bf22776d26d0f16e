//! Keyboard routes
//!
//! Both routes raise the webtop window first so the typed input lands on it.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use webtop_automation::input;
use webtop_protocol::ApiResponse;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct KeyboardTypePayload {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct KeyboardPressPayload {
    pub key: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

/// POST /api/v1/keyboard/type
pub async fn type_text(
    State(state): State<AppState>,
    Json(payload): Json<KeyboardTypePayload>,
) -> Result<Json<ApiResponse>, ApiError> {
    state.session.bring_to_front().await?;

    let text = payload.text.clone();
    input::run(move |c| c.type_text(&text)).await?;

    Ok(Json(ApiResponse::success(format!(
        "Text typed: {}",
        payload.text
    ))))
}

/// POST /api/v1/keyboard/press
pub async fn press_key(
    State(state): State<AppState>,
    Json(payload): Json<KeyboardPressPayload>,
) -> Result<Json<ApiResponse>, ApiError> {
    state.session.bring_to_front().await?;

    let key = payload.key.clone();
    let modifiers = payload.modifiers.clone();
    input::run(move |c| c.key_tap(&key, &modifiers)).await?;

    let message = if payload.modifiers.is_empty() {
        format!("Key pressed: {}", payload.key)
    } else {
        format!(
            "Key pressed: {} with modifiers: {}",
            payload.key,
            payload.modifiers.join("+")
        )
    };
    Ok(Json(ApiResponse::success(message)))
}
