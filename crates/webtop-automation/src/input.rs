//! OS-level mouse and keyboard injection
//!
//! Thin wrapper over `enigo`. Callers translate webtop-relative coordinates
//! to screen coordinates before anything here runs; this module only injects.

use std::thread;
use std::time::Duration;

use enigo::{Axis, Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use thiserror::Error;

use webtop_protocol::{MouseButton, ScrollDirection};

/// Settle delay between the press/move/release steps of composite gestures
const GESTURE_STEP_DELAY: Duration = Duration::from_millis(50);

/// Input injection errors
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Input failed: {0}")]
    Failed(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Scroll delta for the up/down + amount scroll shape
///
/// Matches the original arithmetic: "up" scrolls content up, which is a
/// negative wheel delta.
pub fn vertical_delta(direction: ScrollDirection, amount: i32) -> i32 {
    match direction {
        ScrollDirection::Up => -amount,
        ScrollDirection::Down => amount,
    }
}

fn button(btn: MouseButton) -> Button {
    match btn {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
        MouseButton::Middle => Button::Middle,
    }
}

/// Mouse and keyboard controller
pub struct InputController {
    enigo: Enigo,
}

impl InputController {
    pub fn new() -> Result<Self, InputError> {
        let enigo =
            Enigo::new(&Settings::default()).map_err(|e| InputError::Failed(e.to_string()))?;
        Ok(Self { enigo })
    }

    /// Move the cursor to an absolute screen position
    pub fn move_mouse(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| InputError::Failed(e.to_string()))
    }

    /// Current cursor position in screen coordinates
    pub fn location(&self) -> Result<(i32, i32), InputError> {
        self.enigo
            .location()
            .map_err(|e| InputError::Failed(e.to_string()))
    }

    /// Click at the current position; `double` is two clicks with a short
    /// settle delay
    pub fn click(&mut self, btn: MouseButton, double: bool) -> Result<(), InputError> {
        self.enigo
            .button(button(btn), Direction::Click)
            .map_err(|e| InputError::Failed(e.to_string()))?;
        if double {
            thread::sleep(GESTURE_STEP_DELAY);
            self.enigo
                .button(button(btn), Direction::Click)
                .map_err(|e| InputError::Failed(e.to_string()))?;
        }
        Ok(())
    }

    /// Drag from the current position to an absolute screen position
    pub fn drag_to(&mut self, x: i32, y: i32, btn: MouseButton) -> Result<(), InputError> {
        self.enigo
            .button(button(btn), Direction::Press)
            .map_err(|e| InputError::Failed(e.to_string()))?;
        thread::sleep(GESTURE_STEP_DELAY);
        self.move_mouse(x, y)?;
        thread::sleep(GESTURE_STEP_DELAY);
        self.enigo
            .button(button(btn), Direction::Release)
            .map_err(|e| InputError::Failed(e.to_string()))
    }

    /// Scroll vertically by direction and positive amount
    pub fn scroll(&mut self, direction: ScrollDirection, amount: i32) -> Result<(), InputError> {
        self.scroll_by(0, vertical_delta(direction, amount))
    }

    /// Scroll by signed pixel deltas on both axes
    pub fn scroll_by(&mut self, delta_x: i32, delta_y: i32) -> Result<(), InputError> {
        if delta_x != 0 {
            self.enigo
                .scroll(delta_x, Axis::Horizontal)
                .map_err(|e| InputError::Failed(e.to_string()))?;
        }
        if delta_y != 0 {
            self.enigo
                .scroll(delta_y, Axis::Vertical)
                .map_err(|e| InputError::Failed(e.to_string()))?;
        }
        Ok(())
    }

    /// Type a string of text
    pub fn type_text(&mut self, text: &str) -> Result<(), InputError> {
        self.enigo
            .text(text)
            .map_err(|e| InputError::Failed(e.to_string()))
    }

    /// Tap a key, optionally while holding modifier keys
    ///
    /// Modifiers are pressed in order, the key is clicked, then the
    /// modifiers are released in reverse order.
    pub fn key_tap(&mut self, key: &str, modifiers: &[String]) -> Result<(), InputError> {
        let key = parse_key(key)?;
        let mods = modifiers
            .iter()
            .map(|m| parse_key(m))
            .collect::<Result<Vec<_>, _>>()?;

        for m in &mods {
            self.enigo
                .key(*m, Direction::Press)
                .map_err(|e| InputError::Failed(e.to_string()))?;
        }
        let result = self
            .enigo
            .key(key, Direction::Click)
            .map_err(|e| InputError::Failed(e.to_string()));
        for m in mods.iter().rev() {
            self.enigo
                .key(*m, Direction::Release)
                .map_err(|e| InputError::Failed(e.to_string()))?;
        }
        result
    }
}

/// Run an input operation on the blocking pool with a fresh controller
///
/// Controllers are cheap to construct; building one per operation avoids
/// sharing a non-Send handle across threads.
pub async fn run<T, F>(f: F) -> Result<T, InputError>
where
    F: FnOnce(&mut InputController) -> Result<T, InputError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut controller = InputController::new()?;
        f(&mut controller)
    })
    .await
    .map_err(|e| InputError::Failed(e.to_string()))?
}

/// Parse a key name to an enigo key
pub fn parse_key(key: &str) -> Result<Key, InputError> {
    let k = match key.to_lowercase().as_str() {
        "enter" | "return" => Key::Return,
        "tab" => Key::Tab,
        "space" => Key::Space,
        "backspace" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "escape" | "esc" => Key::Escape,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        "up" => Key::UpArrow,
        "down" => Key::DownArrow,
        "left" => Key::LeftArrow,
        "right" => Key::RightArrow,
        "ctrl" | "control" => Key::Control,
        "alt" => Key::Alt,
        "shift" => Key::Shift,
        "meta" | "cmd" | "command" | "win" | "super" => Key::Meta,
        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Unicode(c),
                _ => return Err(InputError::InvalidKey(key.to_string())),
            }
        }
    };
    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert!(matches!(parse_key("enter"), Ok(Key::Return)));
        assert!(matches!(parse_key("Return"), Ok(Key::Return)));
        assert!(matches!(parse_key("ESC"), Ok(Key::Escape)));
        assert!(matches!(parse_key("pagedown"), Ok(Key::PageDown)));
        assert!(matches!(parse_key("f11"), Ok(Key::F11)));
    }

    #[test]
    fn test_parse_modifier_aliases() {
        assert!(matches!(parse_key("ctrl"), Ok(Key::Control)));
        assert!(matches!(parse_key("control"), Ok(Key::Control)));
        assert!(matches!(parse_key("command"), Ok(Key::Meta)));
        assert!(matches!(parse_key("super"), Ok(Key::Meta)));
    }

    #[test]
    fn test_parse_single_characters() {
        assert!(matches!(parse_key("a"), Ok(Key::Unicode('a'))));
        assert!(matches!(parse_key("7"), Ok(Key::Unicode('7'))));
        assert!(matches!(parse_key("@"), Ok(Key::Unicode('@'))));
    }

    #[test]
    fn test_parse_unknown_key_fails() {
        let err = parse_key("notakey").unwrap_err();
        assert!(matches!(err, InputError::InvalidKey(_)));
        assert!(err.to_string().contains("notakey"));
    }

    #[test]
    fn test_vertical_delta_direction() {
        assert_eq!(vertical_delta(ScrollDirection::Up, 5), -5);
        assert_eq!(vertical_delta(ScrollDirection::Down, 5), 5);
    }
}
