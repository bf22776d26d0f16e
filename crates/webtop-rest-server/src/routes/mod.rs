//! HTTP route definitions
//!
//! ## Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//!
//! /api/v1
//!   POST /webtop/initialize      - Launch the browser and open the webtop
//!   POST /webtop/shutdown        - Close the browser
//!   POST /mouse/move             - Move the cursor (webtop coordinates)
//!   POST /mouse/click            - Click, optionally positioning first
//!   POST /mouse/scroll           - Scroll up/down by a positive amount
//!   POST /keyboard/type          - Type a string of text
//!   POST /keyboard/press         - Tap a key with optional modifiers
//!   GET  /screen/size            - Webtop viewport size
//!   GET  /screen/capture         - PNG capture of the viewport or a region
//! ```

pub mod keyboard;
pub mod mouse;
pub mod screen;
pub mod webtop;

use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use webtop_protocol::ApiResponse;

use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/webtop/initialize", post(webtop::initialize))
        .route("/webtop/shutdown", post(webtop::shutdown))
        .route("/mouse/move", post(mouse::move_mouse))
        .route("/mouse/click", post(mouse::click))
        .route("/mouse/scroll", post(mouse::scroll))
        .route("/keyboard/type", post(keyboard::type_text))
        .route("/keyboard/press", post(keyboard::press_key))
        .route("/screen/size", get(screen::size))
        .route("/screen/capture", get(screen::capture));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<ApiResponse> {
    Json(ApiResponse::success("Webtop bridge is running"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_router() -> Router {
        router(AppState::new("http://localhost:3000/"))
    }

    fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/mouse/teleport")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_mouse_move_without_session_is_500() {
        let response = test_router()
            .oneshot(json_post(
                "/api/v1/mouse/move",
                serde_json::json!({"x": 10, "y": 20}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_mouse_move_rejects_non_numeric_coordinates() {
        let response = test_router()
            .oneshot(json_post(
                "/api/v1/mouse/move",
                serde_json::json!({"x": "ten", "y": 20}),
            ))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_scroll_rejects_unknown_direction() {
        let response = test_router()
            .oneshot(json_post(
                "/api/v1/mouse/scroll",
                serde_json::json!({"direction": "sideways", "amount": 3}),
            ))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_scroll_rejects_non_positive_amount() {
        let response = test_router()
            .oneshot(json_post(
                "/api/v1/mouse/scroll",
                serde_json::json!({"direction": "up", "amount": 0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_keyboard_type_without_session_is_500() {
        let response = test_router()
            .oneshot(json_post(
                "/api/v1/keyboard/type",
                serde_json::json!({"text": "hello"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_screen_size_without_session_is_500() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/screen/size")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_screen_capture_rejects_partial_region() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/screen/capture?x=10&y=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_webtop_shutdown_without_session_is_ok() {
        let response = test_router()
            .oneshot(json_post("/api/v1/webtop/shutdown", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
