//! Error types for theme construction.

use thiserror::Error;
use trellis_render::RenderError;

use crate::theme::{DrawState, WidgetKind};

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a theme.
#[derive(Debug, Error)]
pub enum Error {
    /// Registering a font or image sheet failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A theme has no drawer for a widget kind, not even a normal one.
    #[error("theme has no drawer for {kind:?} in state {state:?}")]
    MissingDrawer { kind: WidgetKind, state: DrawState },
}

impl Error {
    /// Create a missing drawer error.
    pub fn missing_drawer(kind: WidgetKind, state: DrawState) -> Self {
        Self::MissingDrawer { kind, state }
    }
}
