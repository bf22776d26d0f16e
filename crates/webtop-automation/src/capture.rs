//! Desktop screen capture
//!
//! Captures the primary display (or a region of it) as PNG. The capture
//! engine yields RGBA buffers directly, so no channel reordering is needed
//! before encoding.

use std::io::Cursor;

use screenshots::Screen;
use screenshots::image::ImageOutputFormat;
use thiserror::Error;

/// Screen capture errors
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("No monitor found")]
    NoMonitor,
}

/// A captured frame, PNG-encoded
#[derive(Debug)]
pub struct Screenshot {
    /// PNG image data
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Screenshot {
    /// PNG data as base64
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

fn primary_screen() -> Result<Screen, CaptureError> {
    let screens = Screen::all().map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
    screens
        .into_iter()
        .find(|s| s.display_info.is_primary)
        .or_else(|| Screen::all().ok()?.into_iter().next())
        .ok_or(CaptureError::NoMonitor)
}

fn encode_png(image: &screenshots::image::RgbaImage) -> Result<Screenshot, CaptureError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageOutputFormat::Png)
        .map_err(|e| CaptureError::EncodingFailed(e.to_string()))?;

    Ok(Screenshot {
        data: buffer.into_inner(),
        width: image.width(),
        height: image.height(),
    })
}

/// Capture the entire primary display
pub fn capture_screen() -> Result<Screenshot, CaptureError> {
    let screen = primary_screen()?;
    let image = screen
        .capture()
        .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
    encode_png(&image)
}

/// Capture a region of the primary display, in screen coordinates
pub fn capture_region(x: i32, y: i32, width: u32, height: u32) -> Result<Screenshot, CaptureError> {
    let screen = primary_screen()?;
    let image = screen
        .capture_area(x, y, width, height)
        .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
    encode_png(&image)
}

/// Dimensions of the primary display
pub fn screen_size() -> Result<(u32, u32), CaptureError> {
    let screen = primary_screen()?;
    Ok((screen.display_info.width, screen.display_info.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screenshot_base64_roundtrip() {
        use base64::Engine;

        let shot = Screenshot {
            data: vec![0x89, 0x50, 0x4e, 0x47],
            width: 1,
            height: 1,
        };
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(shot.to_base64())
            .unwrap();
        assert_eq!(decoded, shot.data);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CaptureError::NoMonitor.to_string(), "No monitor found");
        assert!(
            CaptureError::CaptureFailed("x".into())
                .to_string()
                .contains("Capture failed")
        );
    }
}
