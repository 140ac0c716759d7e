//! Per-frame input state fed by the host.
//!
//! The host owns the window and its event loop. Once per frame it calls
//! [`InputState::begin_frame`] with the pointer position, then reports
//! what happened since the previous frame: button edges, key repeats,
//! typed text and scrolling. The UI reads the result during dispatch.
//!
//! ```
//! use trellis::input::{InputState, Key, MouseButton};
//! use trellis_core::vec2;
//!
//! let mut input = InputState::new();
//! input.begin_frame(vec2(10.0, 10.0));
//! input.press(MouseButton::Left);
//! input.type_text("a");
//!
//! assert!(input.just_pressed(MouseButton::Left));
//! assert_eq!(input.click_pos(), vec2(10.0, 10.0));
//!
//! input.begin_frame(vec2(12.0, 10.0));
//! assert!(!input.just_pressed(MouseButton::Left));
//! assert!(input.is_down(MouseButton::Left));
//! assert!(input.typed().is_empty());
//! # let _ = Key::Enter;
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use trellis_core::Vec2;

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [Self::Left, Self::Right, Self::Middle];
}

/// Keys the widgets react to. Printable characters arrive as typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Tab,
}

/// Either a mouse button or a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Mouse(MouseButton),
    Key(Key),
}

impl From<MouseButton> for Button {
    fn from(b: MouseButton) -> Self {
        Self::Mouse(b)
    }
}

impl From<Key> for Button {
    fn from(k: Key) -> Self {
        Self::Key(k)
    }
}

/// Pointer, button and keyboard state for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    mouse_pos: Vec2,
    prev_mouse_pos: Vec2,
    click_pos: Vec2,
    down: HashSet<Button>,
    just_pressed: HashSet<Button>,
    just_released: HashSet<Button>,
    repeated: HashSet<Button>,
    typed: String,
    scroll: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame with the pointer at `pointer`.
    ///
    /// The previous position is kept for enter/leave detection, and all
    /// per-frame edges, typed text and scroll are cleared.
    pub fn begin_frame(&mut self, pointer: Vec2) {
        self.prev_mouse_pos = self.mouse_pos;
        self.mouse_pos = pointer;
        self.just_pressed.clear();
        self.just_released.clear();
        self.repeated.clear();
        self.typed.clear();
        self.scroll = Vec2::ZERO;
    }

    /// Moves the pointer without starting a new frame.
    pub fn set_mouse_pos(&mut self, pointer: Vec2) {
        self.mouse_pos = pointer;
    }

    /// Reports that a button went down this frame. A mouse press also
    /// records the click position.
    pub fn press(&mut self, button: impl Into<Button>) {
        let button = button.into();
        if matches!(button, Button::Mouse(_)) {
            self.click_pos = self.mouse_pos;
        }
        self.down.insert(button);
        self.just_pressed.insert(button);
    }

    /// Reports that a button went up this frame.
    pub fn release(&mut self, button: impl Into<Button>) {
        let button = button.into();
        self.down.remove(&button);
        self.just_released.insert(button);
    }

    /// Reports an auto-repeat of a held key.
    pub fn repeat(&mut self, button: impl Into<Button>) {
        self.repeated.insert(button.into());
    }

    /// Appends typed text.
    pub fn type_text(&mut self, text: &str) {
        self.typed.push_str(text);
    }

    pub fn scroll_by(&mut self, delta: Vec2) {
        self.scroll += delta;
    }

    pub fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    pub fn prev_mouse_pos(&self) -> Vec2 {
        self.prev_mouse_pos
    }

    /// Pointer position at the last mouse press.
    pub fn click_pos(&self) -> Vec2 {
        self.click_pos
    }

    pub fn is_down(&self, button: impl Into<Button>) -> bool {
        self.down.contains(&button.into())
    }

    pub fn just_pressed(&self, button: impl Into<Button>) -> bool {
        self.just_pressed.contains(&button.into())
    }

    pub fn just_released(&self, button: impl Into<Button>) -> bool {
        self.just_released.contains(&button.into())
    }

    pub fn repeated(&self, button: impl Into<Button>) -> bool {
        self.repeated.contains(&button.into())
    }

    /// Pressed this frame or auto-repeated.
    pub fn pressed_or_repeated(&self, button: impl Into<Button>) -> bool {
        let button = button.into();
        self.just_pressed.contains(&button) || self.repeated.contains(&button)
    }

    /// Text typed this frame.
    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    pub fn mouse_moved(&self) -> bool {
        self.mouse_pos != self.prev_mouse_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::vec2;

    #[test]
    fn test_edges_last_one_frame() {
        let mut input = InputState::new();
        input.begin_frame(Vec2::ZERO);
        input.press(Key::Backspace);
        input.repeat(Key::Backspace);
        input.scroll_by(vec2(0.0, 1.0));
        assert!(input.pressed_or_repeated(Key::Backspace));
        assert_eq!(input.scroll(), vec2(0.0, 1.0));

        input.begin_frame(Vec2::ZERO);
        assert!(!input.pressed_or_repeated(Key::Backspace));
        assert!(input.is_down(Key::Backspace));
        assert!(input.scroll().is_zero());

        input.release(Key::Backspace);
        assert!(input.just_released(Key::Backspace));
        assert!(!input.is_down(Key::Backspace));
    }

    #[test]
    fn test_click_pos_only_on_mouse_press() {
        let mut input = InputState::new();
        input.begin_frame(vec2(5.0, 5.0));
        input.press(MouseButton::Right);
        input.begin_frame(vec2(50.0, 50.0));
        input.press(Key::Enter);
        assert_eq!(input.click_pos(), vec2(5.0, 5.0));
    }

    #[test]
    fn test_mouse_moved() {
        let mut input = InputState::new();
        input.begin_frame(vec2(1.0, 1.0));
        assert!(input.mouse_moved());
        input.begin_frame(vec2(1.0, 1.0));
        assert!(!input.mouse_moved());
    }
}
