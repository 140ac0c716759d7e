//! Error types for the render crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while registering drawing resources.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Reading a file failed.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON description could not be parsed.
    #[error("invalid image sheet description '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An atlas image could not be read.
    #[error("failed to read atlas image '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A font file is not a usable TrueType/OpenType font.
    #[error("invalid font '{path}': {source}")]
    Font {
        path: PathBuf,
        #[source]
        source: ttf_parser::FaceParsingError,
    },

    /// A sheet starts outside the atlas.
    #[error(
        "sheet offset ({x_offset}, {y_offset}) with tile {width}x{height} exceeds atlas size {atlas_width}x{atlas_height}"
    )]
    SheetOutOfBounds {
        x_offset: f32,
        y_offset: f32,
        width: f32,
        height: f32,
        atlas_width: f32,
        atlas_height: f32,
    },
}

impl RenderError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON parse error.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Create an atlas image error.
    pub fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }

    /// Create a font parse error.
    pub fn font(path: impl Into<PathBuf>, source: ttf_parser::FaceParsingError) -> Self {
        Self::Font {
            path: path.into(),
            source,
        }
    }
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
