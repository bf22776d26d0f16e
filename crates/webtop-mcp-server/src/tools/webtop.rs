//! Webtop session lifecycle and browser tools

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rmcp::model::Content;

use webtop_automation::SessionManager;

use super::{ToolResult, error_response, success_response};

/// Launch the browser and open the webtop page
pub async fn initialize(session: &SessionManager, url: &str) -> ToolResult {
    match session.initialize(url).await {
        Ok(message) => success_response(message),
        Err(e) => error_response(
            "initialize_error",
            format!("Failed to initialize webtop: {}", e),
        ),
    }
}

/// Close the browser
pub async fn shutdown(session: &SessionManager) -> ToolResult {
    match session.shutdown().await {
        Ok(()) => success_response("Webtop session shut down"),
        Err(e) => error_response(
            "shutdown_error",
            format!("Failed to shut down webtop: {}", e),
        ),
    }
}

/// Navigate the webtop browser to a URL
pub async fn navigate(session: &SessionManager, url: &str) -> ToolResult {
    match session.navigate(url).await {
        Ok(()) => success_response(format!("Navigated to {}", url)),
        Err(e) => error_response(
            "navigation_error",
            format!("Failed to navigate to {}: {}", url, e),
        ),
    }
}

/// Title of the current page
pub async fn get_title(session: &SessionManager) -> ToolResult {
    match session.title().await {
        Ok(title) => success_response(format!("Page title: {}", title)),
        Err(e) => error_response("title_error", format!("Failed to get page title: {}", e)),
    }
}

/// CDP screenshot of the webtop page
pub async fn screenshot(
    session: &SessionManager,
    path: Option<&str>,
) -> Result<Content, ToolResult> {
    let data = session
        .page_screenshot()
        .await
        .map_err(|e| error_response("screenshot_error", format!("Failed to take screenshot: {}", e)))?;

    match path {
        Some(path) => {
            tokio::fs::write(path, &data).await.map_err(|e| {
                error_response(
                    "screenshot_error",
                    format!("Failed to save screenshot to {}: {}", path, e),
                )
            })?;
            Ok(Content::text(success_response(format!(
                "Screenshot saved to {}",
                path
            ))))
        }
        None => Ok(Content::image(BASE64.encode(&data), "image/png")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_navigate_without_session_reports_error() {
        let session = SessionManager::new();
        let resp: serde_json::Value =
            serde_json::from_str(&navigate(&session, "http://example.com").await).unwrap();
        assert_eq!(resp["error"], "navigation_error");
        assert!(
            resp["message"]
                .as_str()
                .unwrap()
                .contains("not initialized")
        );
    }

    #[tokio::test]
    async fn test_shutdown_without_session_succeeds() {
        let session = SessionManager::new();
        let resp: serde_json::Value =
            serde_json::from_str(&shutdown(&session).await).unwrap();
        assert_eq!(resp["success"], true);
    }

    #[tokio::test]
    async fn test_screenshot_without_session_reports_error() {
        let session = SessionManager::new();
        let err = screenshot(&session, None).await.unwrap_err();
        let resp: serde_json::Value = serde_json::from_str(&err).unwrap();
        assert_eq!(resp["error"], "screenshot_error");
    }
}
