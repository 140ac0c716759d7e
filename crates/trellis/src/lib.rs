//! Trellis - a retained-mode widget toolkit drawn on an abstract surface.
//!
//! Widgets form a tree owned by a [`Ui`]. Each frame the host reports the
//! pointer and button edges, and [`Ui::frame`] routes them to widgets,
//! paints the tree through a [`render::Surface`] and runs queued work.
//! Popups sit on a stack above the tree and take input first.
//!
//! This is the umbrella crate: it re-exports the geometry and tree types
//! of `trellis-core`, and the drawing and styling crates as [`render`] and
//! [`style`].
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use trellis::render::RecordingSurface;
//! use trellis::style::themes;
//! use trellis::{MouseButton, Rect, Ui, WidgetBase, vec2};
//!
//! let mut ui = Ui::new(Rect::from_size(320.0, 240.0), themes::plain());
//! let button = ui
//!     .add_button(None, WidgetBase::new(Rect::new(10.0, 10.0, 90.0, 40.0)).with_text("Go"))
//!     .unwrap();
//!
//! let pressed = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&pressed);
//! ui.on_press(button, move |_, _| flag.set(true));
//!
//! let mut surface = RecordingSurface::new();
//! for down in [true, false] {
//!     ui.begin_frame(vec2(20.0, 20.0));
//!     if down {
//!         ui.input_mut().press(MouseButton::Left);
//!     } else {
//!         ui.input_mut().release(MouseButton::Left);
//!     }
//!     ui.frame(&mut surface);
//! }
//! assert!(pressed.get());
//! ```

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod ui;
pub mod widget;

pub use trellis_core::*;

/// Surfaces, colors, fonts and image sheets.
pub mod render {
    pub use trellis_render::*;
}

/// Themes, drawers and particles.
pub mod style {
    pub use trellis_style::*;
}

pub use app::{App, InputSource};
pub use clock::{FrameClock, FrameLimiter};
pub use config::{SurfaceConfig, UiConfig, WindowConfig};
pub use error::{Error, Result};
pub use input::{Button, InputState, Key, MouseButton};
pub use ui::{EventsHook, Task, Ui};
pub use widget::{
    LineEdit, MenuOption, Notification, Panel, PopupMenu, PushButton, Widget, WidgetBase,
    WidgetEvent, WidgetId,
};
