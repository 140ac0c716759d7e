//! Text cursor drawing.

use serde::{Deserialize, Serialize};
use trellis_core::{Rect, Vec2};
use trellis_render::{Color, Surface};

/// A solid bar cursor that pulses between two colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectCursor {
    pub color1: Color,
    pub color2: Color,
    pub width: f32,
    /// Seconds for one pulse from `color1` to `color2` and back.
    pub pulse_interval: f64,
}

impl Default for RectCursor {
    fn default() -> Self {
        Self {
            color1: Color::BLACK,
            color2: Color::TRANSPARENT,
            width: 2.0,
            pulse_interval: 1.0,
        }
    }
}

impl RectCursor {
    /// Draws the cursor with its bottom-left corner at `pos`.
    ///
    /// `pulse` is the clock's pulse value for this cursor's interval, in
    /// `[0, 1]`.
    pub fn draw(&self, surface: &mut dyn Surface, pos: Vec2, height: f32, pulse: f32) {
        let color = self.color1.lerp(self.color2, pulse);
        surface.fill_rect(
            Rect::new(pos.x, pos.y, pos.x + self.width, pos.y + height),
            color,
        );
    }
}
