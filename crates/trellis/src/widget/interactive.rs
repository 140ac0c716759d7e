//! User callbacks attached to widgets.
//!
//! Callbacks receive the [`Ui`] and the id of the widget they are attached
//! to, so they can read and change any widget, open popups or close
//! windows. A callback is taken out of its slot while it runs, which means
//! it may freely replace its own slot.

use std::fmt;

use trellis_core::Vec2;

use super::WidgetId;
use crate::input::MouseButton;
use crate::ui::Ui;

/// A plain widget callback.
pub type Callback = Box<dyn FnMut(&mut Ui, WidgetId)>;
/// A callback for mouse button events.
pub type ButtonCallback = Box<dyn FnMut(&mut Ui, WidgetId, MouseButton)>;
/// A callback for scroll events, given the scroll delta.
pub type WheelCallback = Box<dyn FnMut(&mut Ui, WidgetId, Vec2)>;
/// A key callback. Returning `true` stops key propagation.
pub type KeyCallback = Box<dyn FnMut(&mut Ui, WidgetId) -> bool>;

/// Notifications widgets raise about themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// A push button was clicked.
    Pressed,
    /// A line edit's text changed.
    TextChanged,
    /// Enter was pressed in a line edit.
    EditingFinished,
}

/// Optional raw input callbacks. Empty slots do nothing.
#[derive(Default)]
pub struct Interactive {
    pub on_mouse_in: Option<Callback>,
    pub on_mouse_out: Option<Callback>,
    pub on_mouse_move: Option<Callback>,
    pub on_mouse_down: Option<ButtonCallback>,
    pub on_mouse_up: Option<ButtonCallback>,
    pub on_mouse_click: Option<ButtonCallback>,
    pub on_mouse_wheel: Option<WheelCallback>,
    pub on_keys: Option<KeyCallback>,
}

impl fmt::Debug for Interactive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interactive")
            .field("on_mouse_in", &self.on_mouse_in.is_some())
            .field("on_mouse_out", &self.on_mouse_out.is_some())
            .field("on_mouse_move", &self.on_mouse_move.is_some())
            .field("on_mouse_down", &self.on_mouse_down.is_some())
            .field("on_mouse_up", &self.on_mouse_up.is_some())
            .field("on_mouse_click", &self.on_mouse_click.is_some())
            .field("on_mouse_wheel", &self.on_mouse_wheel.is_some())
            .field("on_keys", &self.on_keys.is_some())
            .finish()
    }
}

// Slot accessors used by dispatch to take a callback out and put it back.

pub(crate) fn mouse_in(i: &mut Interactive) -> &mut Option<Callback> {
    &mut i.on_mouse_in
}

pub(crate) fn mouse_out(i: &mut Interactive) -> &mut Option<Callback> {
    &mut i.on_mouse_out
}

pub(crate) fn mouse_move(i: &mut Interactive) -> &mut Option<Callback> {
    &mut i.on_mouse_move
}

pub(crate) fn mouse_down(i: &mut Interactive) -> &mut Option<ButtonCallback> {
    &mut i.on_mouse_down
}

pub(crate) fn mouse_up(i: &mut Interactive) -> &mut Option<ButtonCallback> {
    &mut i.on_mouse_up
}

pub(crate) fn mouse_click(i: &mut Interactive) -> &mut Option<ButtonCallback> {
    &mut i.on_mouse_click
}

pub(crate) fn mouse_wheel(i: &mut Interactive) -> &mut Option<WheelCallback> {
    &mut i.on_mouse_wheel
}

pub(crate) fn keys(i: &mut Interactive) -> &mut Option<KeyCallback> {
    &mut i.on_keys
}
