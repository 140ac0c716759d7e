//! The drawing surface abstraction.
//!
//! A [`Surface`] is whatever the widgets paint on: a window, an offscreen
//! canvas, or the [`RecordingSurface`](crate::RecordingSurface) used in
//! tests. Backends implement the handful of required primitives. The image
//! helpers have default implementations built on
//! [`Surface::draw_image_part`].
//!
//! Missing resources never fail a draw call. An unknown image name draws
//! nothing and an unknown font measures with fallback metrics.

use std::path::Path;

use trellis_core::{Align, Rect, Vec2};

use crate::color::Color;
use crate::error::RenderResult;
use crate::logging::targets;
use crate::sheet::{ImageAtlas, ImageSheetConfig};

/// Text measurement, split out so input handling can measure without
/// borrowing the surface mutably.
pub trait TextMetrics {
    /// Bounding rectangle of `text` set in `font`, with `min` at the
    /// origin.
    fn text_rect(&self, text: &str, font: &str) -> Rect;

    /// Width of `text` set in `font`.
    fn text_width(&self, text: &str, font: &str) -> f32 {
        self.text_rect(text, font).width()
    }
}

/// A 2D target the widget tree renders onto.
pub trait Surface: TextMetrics {
    /// Fills `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outlines `rect` with lines `thickness` pixels wide, drawn inside the
    /// rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: f32);

    /// Draws `text` aligned inside `rect`. Empty text draws nothing.
    fn draw_text(&mut self, text: &str, font: &str, rect: Rect, color: Color, align: Align);

    /// Pixel size of a registered image.
    fn image_size(&self, name: &str) -> Option<Vec2>;

    /// Copies the `src` part of an image (image-local, y-up) into `dst`,
    /// scaling as needed. `tint` multiplies the image colors.
    fn draw_image_part(&mut self, name: &str, src: Rect, dst: Rect, tint: Option<Color>);

    /// Registers a font file under `name`.
    fn register_font(&mut self, name: &str, path: &Path, size: f32) -> RenderResult<()>;

    /// Registers every region of an atlas as a named image.
    fn register_atlas(&mut self, atlas: ImageAtlas) -> RenderResult<()>;

    /// Loads a JSON sheet description and registers its images.
    fn load_images(&mut self, config_path: &Path) -> RenderResult<()> {
        let config = ImageSheetConfig::load(config_path)?;
        let atlas = config.build_atlas()?;
        self.register_atlas(atlas)
    }

    /// Draws a whole image scaled into `dst`.
    fn draw_image_stretched(&mut self, name: &str, dst: Rect, tint: Option<Color>) {
        match self.image_size(name) {
            Some(size) => self.draw_image_part(name, Rect::from_min_size(Vec2::ZERO, size), dst, tint),
            None => missing_image(name),
        }
    }

    /// Draws an image at its natural size, aligned inside `rect`.
    fn draw_image_aligned(&mut self, name: &str, rect: Rect, align: Align, tint: Option<Color>) {
        match self.image_size(name) {
            Some(size) => {
                let dst = Rect::from_min_size(Vec2::ZERO, size).aligned_in(rect, align);
                self.draw_image_stretched(name, dst, tint);
            }
            None => missing_image(name),
        }
    }

    /// Draws an image at its natural size centered on `pos`.
    fn draw_image(&mut self, name: &str, pos: Vec2, tint: Option<Color>) {
        match self.image_size(name) {
            Some(size) => {
                let dst = Rect::from_min_size(Vec2::ZERO, size).with_center(pos);
                self.draw_image_stretched(name, dst, tint);
            }
            None => missing_image(name),
        }
    }

    /// Clears the whole surface. Backends without a clear operation may
    /// ignore this.
    fn clear(&mut self, _color: Color) {}

    /// Shows the finished frame.
    fn present(&mut self) {}
}

fn missing_image(name: &str) {
    tracing::trace!(target: targets::DRAW, name, "image not registered; skipping draw");
}
