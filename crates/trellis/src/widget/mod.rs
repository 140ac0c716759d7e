//! Widget system for Trellis.
//!
//! Every node of the UI tree is a [`WidgetNode`]: the shared
//! [`WidgetBase`] state, the user's [`Interactive`] callbacks, the
//! notification handlers and a boxed [`Widget`] holding the behaviour of
//! the concrete type.
//!
//! # Key Types
//!
//! - [`Widget`] - Behaviour trait implemented by each concrete widget
//! - [`PaintContext`] - Drawing context passed to [`Widget::paint`]
//! - [`EventContext`] - Input context passed to [`Widget::event`]
//! - [`WidgetEvent`] - The events dispatch delivers
//!
//! # Widgets
//!
//! - [`Panel`] - Background, image and text
//! - [`PushButton`] - Clickable button raising [`Notification::Pressed`]
//! - [`LineEdit`] - Single line text input
//! - [`PopupMenu`] - A popup column of option buttons
//!
//! # Writing a widget
//!
//! A widget never holds a reference to itself or to the UI. Paint and
//! event methods receive everything they need in their context, and
//! request UI-level changes (focus, notifications) through
//! [`EventContext`].
//!
//! ```
//! use trellis::widget::{EventContext, Notification, Widget, WidgetEvent};
//! use trellis::input::MouseButton;
//! use trellis_style::WidgetKind;
//!
//! #[derive(Default)]
//! struct Counter {
//!     clicks: u32,
//! }
//!
//! impl Widget for Counter {
//!     fn kind(&self) -> WidgetKind {
//!         WidgetKind::Button
//!     }
//!
//!     fn event(&mut self, event: &WidgetEvent, ctx: &mut EventContext<'_>) -> bool {
//!         if *event == WidgetEvent::MouseClick(MouseButton::Left) {
//!             self.clicks += 1;
//!             ctx.base.text = self.clicks.to_string();
//!             ctx.notify(Notification::Pressed);
//!             return true;
//!         }
//!         false
//!     }
//! }
//! ```

mod base;
pub mod interactive;
mod line_edit;
mod panel;
mod popup_menu;
mod push_button;


use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use trellis_core::{Align, NodeId, Rect, Vec2};
use trellis_render::{Surface, TextMetrics};
use trellis_style::{DrawExtras, DrawState, Theme, WidgetKind};

use crate::clock::FrameClock;
use crate::input::{InputState, MouseButton};

pub use base::WidgetBase;
pub use interactive::{ButtonCallback, Callback, Interactive, KeyCallback, Notification, WheelCallback};
pub use line_edit::{DEFAULT_TEXT_LIMIT, LineEdit};
pub use panel::Panel;
pub use popup_menu::{MenuHandler, MenuOption, PopupMenu};
pub use push_button::PushButton;

/// Handle to a widget in a [`Ui`](crate::ui::Ui).
pub type WidgetId = NodeId;

/// Custom drawing run after the widget's own visuals, given its global rect.
pub type DrawHook = Box<dyn FnMut(&mut dyn Surface, Rect)>;

static_assertions::assert_impl_all!(WidgetId: Copy, Send, Sync);
static_assertions::assert_impl_all!(WidgetEvent: Copy, Send);

/// Events dispatch delivers to widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetEvent {
    /// The pointer entered the widget's rectangle.
    MouseIn,
    /// The pointer left the widget's rectangle.
    MouseOut,
    /// The pointer moved inside the widget's rectangle.
    MouseMove,
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    /// Press and release happened close enough together.
    MouseClick(MouseButton),
    MouseWheel(Vec2),
    /// Keys were pressed, repeated or typed this frame.
    Keys,
}

/// UI-level changes a widget requests while handling an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Effect {
    Focus(Option<WidgetId>),
    Notify(WidgetId, Notification),
}

/// Behaviour of a concrete widget type.
pub trait Widget: Any {
    /// The theme entry this widget is drawn with.
    fn kind(&self) -> WidgetKind;

    /// Draws this widget without its children.
    ///
    /// The default draws the kind's background and the label.
    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let state = ctx.state(false, false);
        ctx.draw_background(self.kind(), state);
        ctx.draw_label(self.kind(), state);
    }

    /// Reacts to an input event. Returns `true` if the event was handled.
    ///
    /// For [`WidgetEvent::Keys`] a handled event stops propagation and
    /// skips the user's key callback.
    fn event(&mut self, _event: &WidgetEvent, _ctx: &mut EventContext<'_>) -> bool {
        false
    }
}

/// A node of the UI tree.
pub struct WidgetNode {
    pub base: WidgetBase,
    pub interactive: Interactive,
    pub(crate) handlers: HashMap<Notification, Callback>,
    pub(crate) on_draw: Option<DrawHook>,
    pub(crate) widget: Box<dyn Widget>,
}

impl WidgetNode {
    pub(crate) fn new(base: WidgetBase, widget: Box<dyn Widget>) -> Self {
        Self {
            base,
            interactive: Interactive::default(),
            handlers: HashMap::new(),
            on_draw: None,
            widget,
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.widget.kind()
    }

    /// The concrete widget, if it is a `T`.
    pub fn downcast_ref<T: Widget>(&self) -> Option<&T> {
        let widget: &dyn Any = &*self.widget;
        widget.downcast_ref()
    }

    pub fn downcast_mut<T: Widget>(&mut self) -> Option<&mut T> {
        let widget: &mut dyn Any = &mut *self.widget;
        widget.downcast_mut()
    }
}

impl fmt::Debug for WidgetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetNode")
            .field("kind", &self.kind())
            .field("base", &self.base)
            .field("interactive", &self.interactive)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("on_draw", &self.on_draw.is_some())
            .finish()
    }
}

/// Context passed to [`Widget::paint`].
pub struct PaintContext<'a> {
    pub surface: &'a mut dyn Surface,
    pub base: &'a mut WidgetBase,
    /// The widget's rectangle in surface coordinates.
    pub rect: Rect,
    pub theme: &'a Theme,
    /// Whether the widget holds keyboard focus.
    pub focused: bool,
    pub clock: &'a FrameClock,
}

impl PaintContext<'_> {
    /// Draw state from the disabled flag and the widget's own flags.
    pub fn state(&self, active: bool, hover: bool) -> DrawState {
        DrawState::resolve(self.base.disabled, active, hover)
    }

    /// Current value of the theme cursor's pulse, in `0..=1`.
    pub fn pulse(&self) -> f32 {
        self.clock.pulse(self.theme.cursor.pulse_interval)
    }

    /// Draws the theme's drawer for `kind` in `state` over the whole rect.
    ///
    /// The widget's particle group, if any, is handed to particle drawers.
    pub fn draw_background(&mut self, kind: WidgetKind, state: DrawState) {
        let Some(drawer) = self.theme.drawer(kind, state) else {
            return;
        };
        let mut extras = DrawExtras::new(self.clock.total_time(), self.base.particles.as_mut());
        drawer.draw(&mut *self.surface, self.rect, &mut extras);
    }

    /// Draws the widget's image left-aligned in the padded rect and its
    /// text centered in the remaining space.
    pub fn draw_label(&mut self, kind: WidgetKind, state: DrawState) {
        let pad = self.theme.pad;
        let mut area = self.rect.expanded(-pad);
        if let Some(image) = &self.base.image
            && let Some(size) = self.surface.image_size(image)
        {
            let dst = Rect::from_min_size(Vec2::ZERO, size).aligned_in(area, Align::Left);
            self.surface.draw_image_stretched(image, dst, None);
            area.min.x = dst.max.x + pad;
        }
        if self.base.text.is_empty() {
            return;
        }
        let color = self.theme.text_color_for(kind, state);
        self.surface
            .draw_text(&self.base.text, &self.theme.title_font, area, color, Align::Center);
    }

    /// Draws the theme cursor with its bottom-left corner at `offset` from
    /// the rect's bottom-left corner.
    pub fn draw_cursor(&mut self, offset: Vec2, height: f32) {
        let pulse = self.pulse();
        let pos = self.rect.min + offset;
        self.theme.cursor.draw(&mut *self.surface, pos, height, pulse);
    }
}

/// Context passed to [`Widget::event`].
pub struct EventContext<'a> {
    /// The widget receiving the event.
    pub id: WidgetId,
    pub base: &'a mut WidgetBase,
    pub input: &'a InputState,
    pub metrics: &'a dyn TextMetrics,
    pub theme: &'a Theme,
    /// The widget's rectangle in surface coordinates.
    pub rect: Rect,
    /// Whether the widget held keyboard focus when the event arrived.
    pub focused: bool,
    pub(crate) effects: &'a mut Vec<Effect>,
}

impl EventContext<'_> {
    /// Gives keyboard focus to this widget.
    pub fn request_focus(&mut self) {
        self.effects.push(Effect::Focus(Some(self.id)));
        self.focused = true;
    }

    /// Drops keyboard focus, whoever holds it.
    pub fn clear_focus(&mut self) {
        self.effects.push(Effect::Focus(None));
        self.focused = false;
    }

    /// Raises a notification. Its handler runs once the event is handled.
    pub fn notify(&mut self, notification: Notification) {
        self.effects.push(Effect::Notify(self.id, notification));
    }
}
