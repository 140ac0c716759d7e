//! State shared by every widget.

use std::sync::Arc;

use trellis_core::Rect;
use trellis_style::{ParticleGroup, Theme};

/// Visual and interactive state common to all widgets.
///
/// The rectangle is relative to the parent's rectangle. Top-level widgets
/// (the root and popups) use surface coordinates.
#[derive(Debug, Default)]
pub struct WidgetBase {
    pub rect: Rect,
    pub text: String,
    pub tooltip: String,
    /// Shown by line edits while their text is empty.
    pub placeholder: String,
    /// Registered image drawn next to the text.
    pub image: Option<String>,
    /// Disabled widgets are drawn dimmed and get no button or key events.
    pub disabled: bool,
    /// Phantom widgets skip their own visuals. Children and draw hooks
    /// still render.
    pub phantom: bool,
    /// Overrides the UI theme for this widget.
    pub theme: Option<Arc<Theme>>,
    /// Particles stepped and drawn by the theme's particle drawers.
    pub particles: Option<ParticleGroup>,
}

impl WidgetBase {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn phantom(mut self, phantom: bool) -> Self {
        self.phantom = phantom;
        self
    }

    pub fn with_theme(mut self, theme: Arc<Theme>) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_particles(mut self, particles: ParticleGroup) -> Self {
        self.particles = Some(particles);
        self
    }
}
