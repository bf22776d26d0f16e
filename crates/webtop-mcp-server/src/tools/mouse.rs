//! Mouse tool implementations (move_mouse, click, scroll, drag,
//! get_mouse_position)
//!
//! All coordinates arriving here are webtop-relative; they are translated
//! through the live viewport rectangle before any input is injected, and
//! out-of-viewport points are rejected.

use webtop_automation::SessionManager;
use webtop_protocol::Viewport;

use super::{ToolResult, error_response, parse_button, run_input, success_response};

async fn viewport(session: &SessionManager) -> Result<Viewport, ToolResult> {
    session
        .viewport()
        .await
        .map_err(|e| error_response("session_error", e.to_string()))
}

/// Move the cursor to a webtop-relative position
pub async fn move_mouse(session: &SessionManager, x: f64, y: f64) -> ToolResult {
    let viewport = match viewport(session).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let (sx, sy) = match viewport.to_screen(x, y) {
        Ok(p) => p,
        Err(e) => return error_response("out_of_bounds", e.to_string()),
    };

    match run_input(move |c| c.move_mouse(sx, sy)).await {
        Ok(()) => success_response(format!("Mouse moved to ({}, {})", x, y)),
        Err(e) => error_response("mouse_error", format!("Failed to move mouse: {}", e)),
    }
}

/// Click at the current position, optionally moving to webtop coordinates
/// first
pub async fn click(
    session: &SessionManager,
    button: Option<&str>,
    double: bool,
    x: Option<f64>,
    y: Option<f64>,
) -> ToolResult {
    let btn = parse_button(button);

    if let (Some(x), Some(y)) = (x, y) {
        let viewport = match viewport(session).await {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let (sx, sy) = match viewport.to_screen(x, y) {
            Ok(p) => p,
            Err(e) => return error_response("out_of_bounds", e.to_string()),
        };
        if let Err(e) = run_input(move |c| c.move_mouse(sx, sy)).await {
            return error_response("mouse_error", format!("Failed to move mouse: {}", e));
        }
    }

    match run_input(move |c| c.click(btn, double)).await {
        Ok(()) => success_response(format!(
            "Mouse {} {}clicked",
            btn.as_str(),
            if double { "double " } else { "" }
        )),
        Err(e) => error_response("mouse_error", format!("Failed to click mouse: {}", e)),
    }
}

/// Scroll by signed pixel deltas
pub async fn scroll(session: &SessionManager, delta_x: i32, delta_y: i32) -> ToolResult {
    // Make sure the wheel events land on the webtop window.
    if let Err(e) = session.bring_to_front().await {
        return error_response("session_error", e.to_string());
    }

    match run_input(move |c| c.scroll_by(delta_x, delta_y)).await {
        Ok(()) => success_response(format!("Scrolled by ({}, {})", delta_x, delta_y)),
        Err(e) => error_response("scroll_error", format!("Failed to scroll: {}", e)),
    }
}

/// Drag from the current position to a webtop-relative position
pub async fn drag(session: &SessionManager, x: f64, y: f64, button: Option<&str>) -> ToolResult {
    let btn = parse_button(button);
    let viewport = match viewport(session).await {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let (sx, sy) = match viewport.to_screen(x, y) {
        Ok(p) => p,
        Err(e) => return error_response("out_of_bounds", e.to_string()),
    };

    match run_input(move |c| c.drag_to(sx, sy, btn)).await {
        Ok(()) => success_response(format!("Dragged to ({}, {})", x, y)),
        Err(e) => error_response("drag_error", format!("Failed to drag: {}", e)),
    }
}

/// Current cursor position in screen coordinates
pub async fn get_mouse_position() -> ToolResult {
    match run_input(|c| c.location()).await {
        Ok((x, y)) => success_response(format!("Mouse position: ({}, {})", x, y)),
        Err(e) => error_response(
            "mouse_error",
            format!("Failed to get mouse position: {}", e),
        ),
    }
}
