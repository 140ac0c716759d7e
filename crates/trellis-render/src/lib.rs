//! Drawing layer for Trellis.
//!
//! Widgets never talk to a graphics API directly. They paint through the
//! [`Surface`] trait, which a backend implements with a handful of
//! primitives: solid and outlined rectangles, aligned text, and parts of
//! named images. Everything else (stretched, aligned and centered images,
//! loading image sheets) is provided on top of those primitives.
//!
//! # Resources
//!
//! Images live in atlases described by an [`ImageSheetConfig`]. Fonts are
//! registered by name from TrueType/OpenType files and measured with
//! [`FontRegistry`]. Unknown names never fail a draw call.
//!
//! # Headless drawing
//!
//! [`RecordingSurface`] keeps draw calls as [`DrawCommand`] values:
//!
//! ```
//! use trellis_core::{Align, Rect};
//! use trellis_render::{Color, DrawCommand, RecordingSurface, Surface};
//!
//! let mut surface = RecordingSurface::new();
//! surface.fill_rect(Rect::from_size(10.0, 10.0), Color::WHITE);
//! surface.draw_text("OK", "title", Rect::from_size(100.0, 20.0), Color::BLACK, Align::Center);
//!
//! assert_eq!(surface.commands().len(), 2);
//! assert!(matches!(surface.commands()[1], DrawCommand::Text { .. }));
//! ```

pub mod color;
pub mod error;
pub mod font;
pub mod logging;
pub mod recording;
pub mod sheet;
pub mod surface;

pub use color::Color;
pub use error::{RenderError, RenderResult};
pub use font::{FixedMetrics, FontFace, FontRegistry};
pub use recording::{DrawCommand, RecordingSurface};
pub use sheet::{ImageAtlas, ImageSheetConfig, SheetConfig};
pub use surface::{Surface, TextMetrics};
