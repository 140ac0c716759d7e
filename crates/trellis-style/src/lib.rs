//! Theming for Trellis.
//!
//! A [`Theme`] maps every (widget kind, draw state) pair to a [`Drawer`]
//! and carries the fonts, colors and padding that go with it. Drawers are
//! a closed set:
//!
//! - [`PlainRect`]: a fill and an optional outline
//! - [`TexturedPanel`]: a nine-slice image, stretched or tiled
//! - [`MultiDrawer`]: several drawers layered in order
//! - [`ParticleDrawer`]: the widget's [`ParticleGroup`], stepped and drawn
//!
//! The [`themes`] module has two ready-made themes: [`themes::plain`],
//! which needs no assets, and [`themes::stone`], which loads a font and an
//! image sheet.
//!
//! # Example
//!
//! ```
//! use trellis_core::Rect;
//! use trellis_render::RecordingSurface;
//! use trellis_style::{DrawExtras, DrawState, WidgetKind, themes};
//!
//! let theme = themes::plain();
//! let mut surface = RecordingSurface::new();
//!
//! if let Some(drawer) = theme.drawer(WidgetKind::Button, DrawState::Hover) {
//!     drawer.draw(&mut surface, Rect::from_size(80.0, 24.0), &mut DrawExtras::at(0.0));
//! }
//! assert!(!surface.commands().is_empty());
//! ```

pub mod cursor;
pub mod drawer;
pub mod error;
pub mod logging;
pub mod particles;
pub mod textured;
pub mod theme;
pub mod themes;

pub use cursor::RectCursor;
pub use drawer::{DrawExtras, Drawer, MultiDrawer, ParticleDrawer, PlainRect};
pub use error::{Error, Result};
pub use particles::{
    BorderPlacer, GlitterEdge, Particle, ParticleData, ParticleGenerator, ParticleGroup, Placer,
};
pub use textured::{CenterFill, TexturedPanel};
pub use theme::{DrawState, DrawerKey, Theme, WidgetKind};
