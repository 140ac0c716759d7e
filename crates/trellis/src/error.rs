//! Error types for the widget toolkit.

use std::path::PathBuf;

use thiserror::Error;
use trellis_core::TreeError;
use trellis_render::RenderError;

/// Result type alias for toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the toolkit.
#[derive(Debug, Error)]
pub enum Error {
    /// A widget handle was stale or a reparent would form a cycle.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Registering drawing resources failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Building a theme failed.
    #[error(transparent)]
    Style(#[from] trellis_style::Error),

    /// A configuration file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON configuration file is malformed.
    #[error("invalid JSON config '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A TOML configuration file is malformed.
    #[error("invalid TOML config '{path}': {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON config error.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Create a TOML config error.
    pub fn toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Toml {
            path: path.into(),
            source,
        }
    }
}
