//! MCP tool request types
//!
//! This module contains all request types used by MCP tool handlers.

use rmcp::schemars;
use serde::Deserialize;

/// Request for initialize_webtop tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InitializeWebtopRequest {
    #[schemars(description = "Webtop URL to open (defaults to the server's configured URL)")]
    pub url: Option<String>,
}

/// Request for navigate tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NavigateRequest {
    #[schemars(description = "URL to navigate the webtop browser to")]
    pub url: String,
}

/// Request for screenshot tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScreenshotRequest {
    #[schemars(
        description = "Absolute path to save the screenshot to (e.g. /tmp/screenshot.png). When omitted, the image is returned as base64 content."
    )]
    pub path: Option<String>,
}

/// Request for move_mouse tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MoveMouseRequest {
    #[schemars(description = "X coordinate, relative to the webtop viewport")]
    pub x: f64,
    #[schemars(description = "Y coordinate, relative to the webtop viewport")]
    pub y: f64,
}

/// Request for click tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClickRequest {
    #[schemars(description = "Mouse button: 'left', 'right', or 'middle' (default: 'left')")]
    pub button: Option<String>,
    #[schemars(description = "Whether to double-click (default: false)")]
    pub double: Option<bool>,
    #[schemars(description = "Optional webtop-relative X coordinate to move to before clicking")]
    pub x: Option<f64>,
    #[schemars(description = "Optional webtop-relative Y coordinate to move to before clicking")]
    pub y: Option<f64>,
}

/// Request for type_text tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TypeTextRequest {
    #[schemars(description = "Text to type into the webtop")]
    pub text: String,
}

/// Request for key_tap tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct KeyTapRequest {
    #[schemars(description = "Key to tap (e.g. 'enter', 'a', 'f5', 'escape')")]
    pub key: String,
    #[schemars(description = "Modifier keys to hold (e.g. ['control'], ['shift', 'alt'])")]
    pub modifiers: Option<Vec<String>>,
}

/// Request for scroll tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScrollRequest {
    #[schemars(description = "Horizontal scroll amount in pixels (positive scrolls right)")]
    pub delta_x: Option<i32>,
    #[schemars(description = "Vertical scroll amount in pixels (positive scrolls down)")]
    pub delta_y: Option<i32>,
}

/// Request for drag tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DragRequest {
    #[schemars(description = "Target X coordinate, relative to the webtop viewport")]
    pub x: f64,
    #[schemars(description = "Target Y coordinate, relative to the webtop viewport")]
    pub y: f64,
    #[schemars(description = "Mouse button to drag with: 'left', 'right', or 'middle' (default: 'left')")]
    pub button: Option<String>,
}

/// Request for capture_screen tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CaptureScreenRequest {
    #[schemars(description = "Webtop-relative X origin of the capture region (optional)")]
    pub x: Option<f64>,
    #[schemars(description = "Webtop-relative Y origin of the capture region (optional)")]
    pub y: Option<f64>,
    #[schemars(description = "Width of the capture region (optional)")]
    pub width: Option<f64>,
    #[schemars(description = "Height of the capture region (optional)")]
    pub height: Option<f64>,
    #[schemars(
        description = "Absolute path to save the image to. When omitted, the image is returned as base64 content."
    )]
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_request_all_fields_optional() {
        let req: ClickRequest = serde_json::from_str("{}").unwrap();
        assert!(req.button.is_none());
        assert!(req.double.is_none());
        assert!(req.x.is_none());
    }

    #[test]
    fn test_key_tap_request_with_modifiers() {
        let req: KeyTapRequest =
            serde_json::from_str(r#"{"key": "c", "modifiers": ["control"]}"#).unwrap();
        assert_eq!(req.key, "c");
        assert_eq!(req.modifiers.as_deref(), Some(&["control".to_string()][..]));
    }

    #[test]
    fn test_move_mouse_request_requires_coordinates() {
        assert!(serde_json::from_str::<MoveMouseRequest>(r#"{"x": 10}"#).is_err());
        let req: MoveMouseRequest = serde_json::from_str(r#"{"x": 10, "y": 20.5}"#).unwrap();
        assert_eq!(req.y, 20.5);
    }

    #[test]
    fn test_scroll_request_deltas_optional() {
        let req: ScrollRequest = serde_json::from_str(r#"{"delta_y": -120}"#).unwrap();
        assert_eq!(req.delta_y, Some(-120));
        assert!(req.delta_x.is_none());
    }
}
