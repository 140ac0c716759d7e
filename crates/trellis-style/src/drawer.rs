//! Drawers: strategies that paint a widget's rectangle.

use trellis_core::Rect;
use trellis_render::{Color, Surface};

use crate::particles::ParticleGroup;
use crate::textured::TexturedPanel;

/// Per-draw context passed to drawers.
#[derive(Debug, Default)]
pub struct DrawExtras<'a> {
    /// Seconds since the UI started.
    pub time: f64,
    /// The widget's particle group, if it has one.
    pub particles: Option<&'a mut ParticleGroup>,
}

impl<'a> DrawExtras<'a> {
    pub fn new(time: f64, particles: Option<&'a mut ParticleGroup>) -> Self {
        Self { time, particles }
    }

    /// Extras with no particle group.
    pub fn at(time: f64) -> Self {
        Self {
            time,
            particles: None,
        }
    }
}

/// One way of drawing a rectangular widget background.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawer {
    PlainRect(PlainRect),
    Textured(TexturedPanel),
    Multi(MultiDrawer),
    Particles(ParticleDrawer),
}

impl Drawer {
    /// Draws into `rect`, which is in surface coordinates.
    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect, extras: &mut DrawExtras<'_>) {
        match self {
            Self::PlainRect(d) => d.draw(surface, rect),
            Self::Textured(d) => d.draw(surface, rect),
            Self::Multi(d) => d.draw(surface, rect, extras),
            Self::Particles(d) => d.draw(surface, rect, extras),
        }
    }
}

impl From<PlainRect> for Drawer {
    fn from(d: PlainRect) -> Self {
        Self::PlainRect(d)
    }
}

impl From<TexturedPanel> for Drawer {
    fn from(d: TexturedPanel) -> Self {
        Self::Textured(d)
    }
}

impl From<MultiDrawer> for Drawer {
    fn from(d: MultiDrawer) -> Self {
        Self::Multi(d)
    }
}

impl From<ParticleDrawer> for Drawer {
    fn from(d: ParticleDrawer) -> Self {
        Self::Particles(d)
    }
}

/// A filled rectangle with an optional outline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlainRect {
    pub back_color: Option<Color>,
    pub border_size: f32,
    /// Distance from the rectangle edge to the outline.
    pub border_inset: f32,
    pub border_color: Option<Color>,
}

impl PlainRect {
    /// A borderless rectangle filled with `color`.
    pub fn filled(color: Color) -> Self {
        Self {
            back_color: Some(color),
            ..Self::default()
        }
    }

    /// Adds an outline.
    pub fn with_border(mut self, color: Color, size: f32) -> Self {
        self.border_color = Some(color);
        self.border_size = size;
        self
    }

    pub fn with_inset(mut self, inset: f32) -> Self {
        self.border_inset = inset;
        self
    }

    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect) {
        if let Some(color) = self.back_color {
            surface.fill_rect(rect, color);
        }
        if let Some(color) = self.border_color
            && self.border_size > 0.0
        {
            surface.stroke_rect(rect.expanded(-self.border_inset), color, self.border_size);
        }
    }
}

/// Several drawers applied in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiDrawer {
    pub drawers: Vec<Drawer>,
}

impl MultiDrawer {
    pub fn new(drawers: impl IntoIterator<Item = Drawer>) -> Self {
        Self {
            drawers: drawers.into_iter().collect(),
        }
    }

    /// A copy with `drawer` appended.
    pub fn and(&self, drawer: impl Into<Drawer>) -> Self {
        let mut out = self.clone();
        out.drawers.push(drawer.into());
        out
    }

    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect, extras: &mut DrawExtras<'_>) {
        for drawer in &self.drawers {
            drawer.draw(surface, rect, extras);
        }
    }
}

/// Steps and draws the widget's particle group.
///
/// The group is fitted to the drawn rectangle first, so generators follow
/// the widget when it moves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticleDrawer;

impl ParticleDrawer {
    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect, extras: &mut DrawExtras<'_>) {
        let time = extras.time;
        let Some(group) = extras.particles.as_deref_mut() else {
            return;
        };
        group.fit(rect);
        group.process(time);
        group.draw(surface);
    }
}
