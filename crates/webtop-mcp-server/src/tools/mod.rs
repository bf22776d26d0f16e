//! MCP tool implementations
//!
//! This module contains the actual implementation logic for MCP tools.
//! The main.rs file contains thin wrappers that delegate to these
//! implementations.

pub mod keyboard;
pub mod mouse;
pub mod screen;
pub mod webtop;

use serde_json::json;

use webtop_automation::{InputController, InputError};
use webtop_protocol::MouseButton;

/// Common result type for tool implementations
pub type ToolResult = String;

/// Helper to create a success JSON response
pub fn success_response(message: impl Into<String>) -> ToolResult {
    json!({
        "success": true,
        "message": message.into()
    })
    .to_string()
}

/// Helper to create an error JSON response
pub fn error_response(error_type: &str, message: impl Into<String>) -> ToolResult {
    json!({
        "error": error_type,
        "message": message.into()
    })
    .to_string()
}

/// Parse an optional button name, defaulting to left
pub fn parse_button(button: Option<&str>) -> MouseButton {
    match button {
        Some("right") => MouseButton::Right,
        Some("middle") => MouseButton::Middle,
        _ => MouseButton::Left,
    }
}

/// Run an input-injection operation on the blocking pool
pub async fn run_input<T, F>(f: F) -> Result<T, String>
where
    F: FnOnce(&mut InputController) -> Result<T, InputError> + Send + 'static,
    T: Send + 'static,
{
    webtop_automation::input::run(f).await.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_shape() {
        let resp: serde_json::Value =
            serde_json::from_str(&success_response("mouse moved")).unwrap();
        assert_eq!(resp["success"], true);
        assert_eq!(resp["message"], "mouse moved");
    }

    #[test]
    fn test_error_response_shape() {
        let resp: serde_json::Value =
            serde_json::from_str(&error_response("mouse_error", "boom")).unwrap();
        assert_eq!(resp["error"], "mouse_error");
        assert_eq!(resp["message"], "boom");
    }

    #[test]
    fn test_parse_button_defaults_to_left() {
        assert_eq!(parse_button(None), MouseButton::Left);
        assert_eq!(parse_button(Some("nonsense")), MouseButton::Left);
        assert_eq!(parse_button(Some("right")), MouseButton::Right);
        assert_eq!(parse_button(Some("middle")), MouseButton::Middle);
    }
}
