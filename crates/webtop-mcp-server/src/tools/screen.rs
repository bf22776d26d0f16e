//! Screen tool implementations (get_screen_size, capture_screen)

use rmcp::model::Content;

use webtop_automation::{SessionManager, capture};

use super::{ToolResult, error_response, success_response};

/// Physical size of the primary display
pub async fn get_screen_size() -> ToolResult {
    let result = tokio::task::spawn_blocking(capture::screen_size).await;
    match result {
        Ok(Ok((width, height))) => success_response(format!("Screen size: {}x{}", width, height)),
        Ok(Err(e)) => error_response("screen_error", format!("Failed to get screen size: {}", e)),
        Err(e) => error_response("screen_error", e.to_string()),
    }
}

/// Desktop capture of the webtop viewport, or a region inside it
///
/// The region, when given, is webtop-relative and must fit inside the
/// viewport. Without a region the whole viewport is captured.
pub async fn capture_screen(
    session: &SessionManager,
    region: Option<(f64, f64, f64, f64)>,
    path: Option<&str>,
) -> Result<Content, ToolResult> {
    let viewport = session
        .viewport()
        .await
        .map_err(|e| error_response("session_error", e.to_string()))?;

    let (sx, sy, width, height) = match region {
        Some((x, y, w, h)) => {
            let (sx, sy) = viewport
                .region_to_screen(x, y, w, h)
                .map_err(|e| error_response("out_of_bounds", e.to_string()))?;
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
        .map_err(|e| error_response("capture_error", e.to_string()))?
        .map_err(|e| error_response("capture_error", format!("Failed to capture screen: {}", e)))?;

    match path {
        Some(path) => {
            tokio::fs::write(path, &shot.data).await.map_err(|e| {
                error_response(
                    "capture_error",
                    format!("Failed to save capture to {}: {}", path, e),
                )
            })?;
            Ok(Content::text(success_response(format!(
                "Screen capture ({}x{}) saved to {}",
                shot.width, shot.height, path
            ))))
        }
        None => Ok(Content::image(shot.to_base64(), "image/png")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_capture_without_session_reports_error() {
        let session = SessionManager::new();
        let err = capture_screen(&session, None, None).await.unwrap_err();
        let resp: serde_json::Value = serde_json::from_str(&err).unwrap();
        assert_eq!(resp["error"], "session_error");
    }
}
