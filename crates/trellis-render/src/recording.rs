//! A headless surface that records draw calls.
//!
//! [`RecordingSurface`] keeps every draw as a [`DrawCommand`] instead of
//! producing pixels. Tests use it to assert what a widget painted, and
//! hosts can use it to snapshot a frame or drive a software renderer.

use std::collections::HashMap;
use std::path::Path;

use trellis_core::{Align, Rect, Vec2};

use crate::color::Color;
use crate::error::RenderResult;
use crate::font::{FixedMetrics, FontRegistry};
use crate::logging::targets;
use crate::sheet::ImageAtlas;
use crate::surface::{Surface, TextMetrics};

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        thickness: f32,
    },
    /// Text with its final, already aligned, bounding rectangle.
    Text {
        text: String,
        font: String,
        rect: Rect,
        color: Color,
    },
    Image {
        name: String,
        src: Rect,
        dst: Rect,
        tint: Option<Color>,
    },
    Present,
}

/// A [`Surface`] that stores draw calls in memory.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    fonts: FontRegistry,
    images: HashMap<String, Rect>,
}

impl RecordingSurface {
    /// Creates a surface whose unknown fonts use the 7×13 fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface with custom fallback text metrics.
    pub fn with_metrics(metrics: FixedMetrics) -> Self {
        Self {
            fonts: FontRegistry::with_fallback(metrics),
            ..Self::default()
        }
    }

    /// Registers an image of the given size without an atlas file.
    pub fn insert_image(&mut self, name: impl Into<String>, size: Vec2) {
        self.images
            .insert(name.into(), Rect::from_min_size(Vec2::ZERO, size));
    }

    pub fn fonts_mut(&mut self) -> &mut FontRegistry {
        &mut self.fonts
    }

    /// Commands recorded since the last [`take_commands`](Self::take_commands).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns and clears the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded text strings, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Destination rectangles of every draw of image `name`.
    pub fn image_draws(&self, name: &str) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { name: n, dst, .. } if n == name => Some(*dst),
                _ => None,
            })
            .collect()
    }

    /// Rectangles of every solid fill with `color`.
    pub fn fills(&self, color: Color) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl TextMetrics for RecordingSurface {
    fn text_rect(&self, text: &str, font: &str) -> Rect {
        Rect::from_min_size(Vec2::ZERO, self.fonts.measure(font, text))
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            thickness,
        });
    }

    fn draw_text(&mut self, text: &str, font: &str, rect: Rect, color: Color, align: Align) {
        if text.is_empty() {
            return;
        }
        let rect = self.text_rect(text, font).aligned_in(rect, align);
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            font: font.to_string(),
            rect,
            color,
        });
    }

    fn image_size(&self, name: &str) -> Option<Vec2> {
        self.images.get(name).map(Rect::size)
    }

    fn draw_image_part(&mut self, name: &str, src: Rect, dst: Rect, tint: Option<Color>) {
        if !self.images.contains_key(name) {
            tracing::trace!(target: targets::DRAW, name, "image not registered; skipping draw");
            return;
        }
        self.commands.push(DrawCommand::Image {
            name: name.to_string(),
            src,
            dst,
            tint,
        });
    }

    fn register_font(&mut self, name: &str, path: &Path, size: f32) -> RenderResult<()> {
        self.fonts.load(name, path, size)
    }

    fn register_atlas(&mut self, atlas: ImageAtlas) -> RenderResult<()> {
        tracing::debug!(
            target: targets::ASSETS,
            atlas = %atlas.file.display(),
            images = atlas.len(),
            "atlas registered"
        );
        for (name, region) in atlas.iter() {
            self.images.insert(name.to_string(), region);
        }
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::vec2;

    #[test]
    fn test_text_is_aligned() {
        let mut surface = RecordingSurface::new();
        surface.draw_text("ab", "any", Rect::new(0.0, 0.0, 100.0, 33.0), Color::BLACK, Align::Center);
        match &surface.commands()[0] {
            DrawCommand::Text { rect, .. } => {
                assert_eq!(*rect, Rect::new(43.0, 10.0, 57.0, 23.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let mut surface = RecordingSurface::new();
        surface.draw_text("", "any", Rect::from_size(10.0, 10.0), Color::BLACK, Align::Left);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_missing_image_draws_nothing() {
        let mut surface = RecordingSurface::new();
        surface.draw_image("nope", vec2(5.0, 5.0), None);
        surface.draw_image_stretched("nope", Rect::from_size(5.0, 5.0), None);
        assert!(surface.commands().is_empty());
        assert_eq!(surface.image_size("nope"), None);
    }

    #[test]
    fn test_image_helpers_route_through_part() {
        let mut surface = RecordingSurface::new();
        surface.insert_image("star", vec2(4.0, 2.0));

        surface.draw_image("star", vec2(10.0, 10.0), None);
        surface.draw_image_aligned("star", Rect::from_size(20.0, 20.0), Align::TopRight, None);

        assert_eq!(
            surface.image_draws("star"),
            vec![Rect::new(8.0, 9.0, 12.0, 11.0), Rect::new(16.0, 18.0, 20.0, 20.0)]
        );
    }

    #[test]
    fn test_register_atlas() {
        let mut surface = RecordingSurface::new();
        let mut atlas = ImageAtlas::new("atlas.png", vec2(32.0, 32.0));
        atlas.insert("tile", Rect::new(0.0, 16.0, 16.0, 32.0));
        surface.register_atlas(atlas).unwrap();
        assert_eq!(surface.image_size("tile"), Some(vec2(16.0, 16.0)));
    }
}
