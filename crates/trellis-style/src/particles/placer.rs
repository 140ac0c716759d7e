use rand::{Rng, RngCore};
use trellis_core::{Rect, Vec2, vec2};

/// Chooses where a new particle appears.
pub trait Placer: Send {
    fn place(&self, rect: Rect, rng: &mut dyn RngCore) -> Vec2;
}

/// Places particles uniformly along the rectangle's perimeter.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderPlacer;

impl BorderPlacer {
    /// Maps a distance along the perimeter to a point. The perimeter runs
    /// along the bottom edge, then the top, the left and the right.
    pub fn point_at(rect: Rect, dist: f32) -> Vec2 {
        let w = rect.width();
        let h = rect.height();
        let local = if dist < w {
            vec2(dist, 0.0)
        } else if dist < w * 2.0 {
            vec2(dist - w, h)
        } else if dist < w * 2.0 + h {
            vec2(0.0, dist - w * 2.0)
        } else {
            vec2(w, dist - w * 2.0 - h)
        };
        local + rect.min
    }
}

impl Placer for BorderPlacer {
    fn place(&self, rect: Rect, rng: &mut dyn RngCore) -> Vec2 {
        let perimeter = 2.0 * (rect.width() + rect.height());
        let dist = rng.r#gen::<f32>() * perimeter;
        Self::point_at(rect, dist)
    }
}
