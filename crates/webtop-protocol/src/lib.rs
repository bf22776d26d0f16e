//! Shared types for the webtop automation bridge
//!
//! This crate defines the types used by both bridge surfaces (the MCP stdio
//! server and the REST server): mouse/scroll enums, the webtop viewport
//! rectangle with webtop-to-screen coordinate translation, and the JSON
//! response envelope of the REST API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default webtop URL when `WEBTOP_URL` is not set
pub const DEFAULT_WEBTOP_URL: &str = "http://localhost:3000/";

/// Resolve the webtop URL from the environment
pub fn default_webtop_url() -> String {
    std::env::var("WEBTOP_URL").unwrap_or_else(|_| DEFAULT_WEBTOP_URL.to_string())
}

/// Mouse button identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Lowercase name used in response messages
    pub fn as_str(&self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
        }
    }
}

/// Scroll direction for the REST scroll operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollDirection::Up => "up",
            ScrollDirection::Down => "down",
        }
    }
}

/// Errors produced by webtop-to-screen coordinate translation
#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    /// Point lies outside the webtop viewport
    #[error("Coordinates ({x}, {y}) are outside the webtop viewport ({width}x{height})")]
    OutsideViewport {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    /// Capture region extends past the webtop viewport
    #[error("Capture region ({x}, {y}, {width}x{height}) is outside the webtop viewport")]
    RegionOutsideViewport {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    /// Viewport has no area, nothing can be translated into it
    #[error("Webtop viewport is empty ({width}x{height})")]
    EmptyViewport { width: f64, height: f64 },
}

/// Screen-coordinate rectangle of the webtop page content
///
/// `x`/`y` are absolute screen coordinates of the top-left corner of the page
/// body inside the automation-controlled browser window. All tool and route
/// parameters are webtop-relative and must be translated through this
/// rectangle before any input is injected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Whether a webtop-relative point falls inside the viewport
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && x <= self.width && y >= 0.0 && y <= self.height
    }

    /// Translate a webtop-relative point to absolute screen coordinates
    ///
    /// Points outside the viewport are rejected so input is never injected
    /// onto whatever happens to surround the browser window.
    pub fn to_screen(&self, x: f64, y: f64) -> Result<(i32, i32), CoordinateError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(CoordinateError::EmptyViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !self.contains(x, y) {
            return Err(CoordinateError::OutsideViewport {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(((self.x + x).round() as i32, (self.y + y).round() as i32))
    }

    /// Translate a webtop-relative capture region to screen coordinates
    ///
    /// Returns the screen position of the region origin; the caller keeps the
    /// width/height. The whole region must fit inside the viewport.
    pub fn region_to_screen(
        &self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(i32, i32), CoordinateError> {
        if x < 0.0 || y < 0.0 || width <= 0.0 || height <= 0.0
            || x + width > self.width
            || y + height > self.height
        {
            return Err(CoordinateError::RegionOutsideViewport {
                x,
                y,
                width,
                height,
            });
        }
        Ok(((self.x + x).round() as i32, (self.y + y).round() as i32))
    }
}

/// Response status of the REST envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// JSON envelope returned by every REST route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiResponse {
    /// Success with a message and no payload
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Success carrying a JSON payload
    pub fn success_with_data(message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Error with a message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            x: 100.0,
            y: 80.0,
            width: 1280.0,
            height: 720.0,
        }
    }

    #[test]
    fn test_to_screen_translates_origin() {
        let (x, y) = viewport().to_screen(0.0, 0.0).unwrap();
        assert_eq!((x, y), (100, 80));
    }

    #[test]
    fn test_to_screen_translates_interior_point() {
        let (x, y) = viewport().to_screen(640.0, 360.0).unwrap();
        assert_eq!((x, y), (740, 440));
    }

    #[test]
    fn test_to_screen_accepts_edges() {
        assert!(viewport().to_screen(1280.0, 720.0).is_ok());
    }

    #[test]
    fn test_to_screen_rejects_negative() {
        let err = viewport().to_screen(-1.0, 10.0).unwrap_err();
        assert!(matches!(err, CoordinateError::OutsideViewport { .. }));
        assert!(err.to_string().contains("1280x720"));
    }

    #[test]
    fn test_to_screen_rejects_past_edge() {
        assert!(viewport().to_screen(1280.1, 0.0).is_err());
        assert!(viewport().to_screen(0.0, 721.0).is_err());
    }

    #[test]
    fn test_to_screen_rejects_empty_viewport() {
        let vp = Viewport {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        };
        assert!(matches!(
            vp.to_screen(0.0, 0.0),
            Err(CoordinateError::EmptyViewport { .. })
        ));
    }

    #[test]
    fn test_region_to_screen_inside() {
        let (x, y) = viewport().region_to_screen(10.0, 20.0, 100.0, 100.0).unwrap();
        assert_eq!((x, y), (110, 100));
    }

    #[test]
    fn test_region_to_screen_rejects_overflow() {
        let err = viewport()
            .region_to_screen(1200.0, 0.0, 100.0, 50.0)
            .unwrap_err();
        assert!(matches!(err, CoordinateError::RegionOutsideViewport { .. }));
    }

    #[test]
    fn test_region_to_screen_rejects_zero_size() {
        assert!(viewport().region_to_screen(0.0, 0.0, 0.0, 10.0).is_err());
    }

    #[test]
    fn test_mouse_button_deserializes_lowercase() {
        let button: MouseButton = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(button, MouseButton::Right);
        assert_eq!(button.as_str(), "right");
    }

    #[test]
    fn test_scroll_direction_rejects_unknown() {
        assert!(serde_json::from_str::<ScrollDirection>("\"sideways\"").is_err());
    }

    #[test]
    fn test_api_response_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::success("ok")).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "ok");
        assert!(json.get("data").is_none());

        let json = serde_json::to_value(ApiResponse::error("boom")).unwrap();
        assert_eq!(json["status"], "error");
    }

    #[test]
    fn test_default_webtop_url_fallback() {
        // The env var is not set in the test environment
        if std::env::var("WEBTOP_URL").is_err() {
            assert_eq!(default_webtop_url(), DEFAULT_WEBTOP_URL);
        }
    }
}
