//! Keyboard tool implementations (type_text, key_tap)
//!
//! Both tools raise the webtop window first; typed input goes to whatever
//! window has focus, and that must be the webtop.

use webtop_automation::SessionManager;

use super::{ToolResult, error_response, run_input, success_response};

/// Type a string of text into the webtop
pub async fn type_text(session: &SessionManager, text: &str) -> ToolResult {
    if let Err(e) = session.bring_to_front().await {
        return error_response("session_error", e.to_string());
    }

    let owned = text.to_string();
    match run_input(move |c| c.type_text(&owned)).await {
        Ok(()) => success_response(format!("Text typed: {}", text)),
        Err(e) => error_response("keyboard_error", format!("Failed to type text: {}", e)),
    }
}

/// Tap a key, optionally with modifier keys held
pub async fn key_tap(session: &SessionManager, key: &str, modifiers: Vec<String>) -> ToolResult {
    if let Err(e) = session.bring_to_front().await {
        return error_response("session_error", e.to_string());
    }

    let owned_key = key.to_string();
    let mods = modifiers.clone();
    match run_input(move |c| c.key_tap(&owned_key, &mods)).await {
        Ok(()) => {
            if modifiers.is_empty() {
                success_response(format!("Key pressed: {}", key))
            } else {
                success_response(format!(
                    "Key pressed: {} with modifiers: {}",
                    key,
                    modifiers.join("+")
                ))
            }
        }
        Err(e) => error_response(
            "keyboard_error",
            format!("Failed to press key {}: {}", key, e),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_type_text_without_session_reports_error() {
        let session = SessionManager::new();
        let resp: serde_json::Value =
            serde_json::from_str(&type_text(&session, "hello").await).unwrap();
        assert_eq!(resp["error"], "session_error");
    }

    #[tokio::test]
    async fn test_key_tap_without_session_reports_error() {
        let session = SessionManager::new();
        let resp: serde_json::Value =
            serde_json::from_str(&key_tap(&session, "enter", vec![]).await).unwrap();
        assert_eq!(resp["error"], "session_error");
    }
}
