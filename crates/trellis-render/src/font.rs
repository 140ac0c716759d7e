//! Font loading and text measurement.
//!
//! Glyph rasterization belongs to the drawing backend; this module only
//! knows how wide a run of text is. [`FontFace`] measures with the advance
//! widths from a TrueType/OpenType file, and any font name that was never
//! registered falls back to [`FixedMetrics`], the 7×13 cell of a basic
//! bitmap font.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use trellis_core::{Vec2, vec2};
use ttf_parser::Face;

use crate::error::{RenderError, RenderResult};
use crate::logging::targets;

/// Monospace metrics used for unknown fonts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl FixedMetrics {
    /// The 7×13 fallback cell.
    pub const DEFAULT: Self = Self {
        advance: 7.0,
        line_height: 13.0,
    };

    pub fn measure(&self, text: &str) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }
        vec2(self.advance * text.chars().count() as f32, self.line_height)
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A parsed font scaled to a pixel size.
#[derive(Clone)]
pub struct FontFace {
    data: Vec<u8>,
    size: f32,
    scale: f32,
    line_height: f32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes", &self.data.len())
            .field("size", &self.size)
            .field("line_height", &self.line_height)
            .finish()
    }
}

impl FontFace {
    /// Reads and validates a font file.
    pub fn load(path: impl AsRef<Path>, size: f32) -> RenderResult<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| RenderError::io(path, e))?;
        Self::from_bytes(data, size).map_err(|e| RenderError::font(path, e))
    }

    /// Validates font data already in memory.
    pub fn from_bytes(data: Vec<u8>, size: f32) -> Result<Self, ttf_parser::FaceParsingError> {
        let (scale, line_height) = {
            let face = Face::parse(&data, 0)?;
            let scale = size / f32::from(face.units_per_em().max(1));
            let line_height = (f32::from(face.ascender()) - f32::from(face.descender())) * scale;
            (scale, line_height)
        };
        Ok(Self {
            data,
            size,
            scale,
            line_height,
        })
    }

    /// Pixel size the face was loaded at.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Width and line height of `text`. Characters without a glyph
    /// contribute nothing.
    pub fn measure(&self, text: &str) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }
        let Ok(face) = Face::parse(&self.data, 0) else {
            return Vec2::ZERO;
        };
        let units: u32 = text
            .chars()
            .filter_map(|c| face.glyph_index(c))
            .filter_map(|g| face.glyph_hor_advance(g))
            .map(u32::from)
            .sum();
        vec2(units as f32 * self.scale, self.line_height)
    }
}

/// Fonts registered under names.
#[derive(Debug, Default)]
pub struct FontRegistry {
    faces: HashMap<String, FontFace>,
    fallback: FixedMetrics,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `fallback` for names that were never registered.
    pub fn with_fallback(fallback: FixedMetrics) -> Self {
        Self {
            faces: HashMap::new(),
            fallback,
        }
    }

    /// Loads a font file and registers it as `name`.
    pub fn load(&mut self, name: &str, path: impl AsRef<Path>, size: f32) -> RenderResult<()> {
        let path = path.as_ref();
        let face = FontFace::load(path, size)?;
        tracing::debug!(target: targets::ASSETS, name, path = %path.display(), size, "font registered");
        self.insert(name, face);
        Ok(())
    }

    pub fn insert(&mut self, name: impl Into<String>, face: FontFace) {
        self.faces.insert(name.into(), face);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.faces.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&FontFace> {
        self.faces.get(name)
    }

    /// Size of `text` in `font`.
    pub fn measure(&self, font: &str, text: &str) -> Vec2 {
        match self.faces.get(font) {
            Some(face) => face.measure(text),
            None => self.fallback.measure(text),
        }
    }
}
