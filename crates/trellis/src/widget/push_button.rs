//! Push button widget.

use trellis_style::WidgetKind;

use super::{EventContext, Notification, PaintContext, Widget, WidgetEvent};
use crate::input::MouseButton;

/// A button raising [`Notification::Pressed`] when released with the left
/// button after being pressed on.
///
/// Moving the pointer out while pressed cancels the press.
#[derive(Debug, Clone, Copy, Default)]
pub struct PushButton {
    hilited: bool,
    pressed: bool,
}

impl PushButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pointer is over the button.
    pub fn is_hilited(&self) -> bool {
        self.hilited
    }

    /// Whether the left button went down on the button and is still held.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl Widget for PushButton {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Button
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let state = ctx.state(self.pressed, self.hilited);
        ctx.draw_background(WidgetKind::Button, state);
        ctx.draw_label(WidgetKind::Button, state);
    }

    fn event(&mut self, event: &WidgetEvent, ctx: &mut EventContext<'_>) -> bool {
        match *event {
            WidgetEvent::MouseIn => {
                self.hilited = true;
                true
            }
            WidgetEvent::MouseOut => {
                self.hilited = false;
                self.pressed = false;
                true
            }
            WidgetEvent::MouseDown(MouseButton::Left) => {
                self.pressed = true;
                true
            }
            WidgetEvent::MouseUp(MouseButton::Left) => {
                if std::mem::take(&mut self.pressed) {
                    ctx.notify(Notification::Pressed);
                }
                true
            }
            _ => false,
        }
    }
}
