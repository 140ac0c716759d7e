//! Nine-slice textured panels.
//!
//! A single image is cut into nine parts by four margins:
//!
//! ```text
//!       left        right
//!      |           |
//!   [1][    2     ][3]___ top
//!   [4][    5     ][6]___ bottom
//!   [7][    8     ][9]
//! ```
//!
//! Corners (1, 3, 7, 9) are drawn at their natural size. Edges (2, 4, 6, 8)
//! are stretched or tiled along their long axis, and the center (5) is
//! stretched or tiled depending on both flags and the [`CenterFill`]
//! policy. The last tile in a row or column is clipped to the space left.

use serde::{Deserialize, Serialize};
use trellis_core::Rect;
use trellis_render::{Color, Surface};

/// How the center part is filled when both tiling flags are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterFill {
    /// Tile in both directions, like the edges.
    #[default]
    FollowEdges,
    /// Stretch a single copy over the whole center.
    Stretch,
}

/// A panel drawn from one image with fixed corners.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TexturedPanel {
    /// Name of the registered image.
    pub image: String,

    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,

    /// Tile the top, bottom and center parts horizontally.
    pub tile_horizontal: bool,
    /// Tile the left, right and center parts vertically.
    pub tile_vertical: bool,
    pub center: CenterFill,

    /// Tint applied to every part.
    pub color: Option<Color>,
}

/// Offset and length of each tile covering `span` with tiles of `tile`.
fn tiles(tile: f32, span: f32) -> Vec<(f32, f32)> {
    if tile <= 0.0 || span <= 0.0 {
        return Vec::new();
    }
    let count = (span / tile).floor() as usize;
    let mut out = Vec::with_capacity(count + 1);
    let mut at = 0.0;
    for _ in 0..=count {
        let len = if at + tile > span { span - at } else { tile };
        if len > 0.0 {
            out.push((at, len));
        }
        at += len;
    }
    out
}

impl TexturedPanel {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }

    /// Sets the same margin on all four sides.
    pub fn with_margins(mut self, margin: f32) -> Self {
        self.left = margin;
        self.bottom = margin;
        self.right = margin;
        self.top = margin;
        self
    }

    /// Tiles edges and center in both directions.
    pub fn tiled(mut self) -> Self {
        self.tile_horizontal = true;
        self.tile_vertical = true;
        self
    }

    pub fn with_center(mut self, center: CenterFill) -> Self {
        self.center = center;
        self
    }

    pub fn with_tint(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn draw(&self, surface: &mut dyn Surface, rect: Rect) {
        let Some(size) = surface.image_size(&self.image) else {
            return;
        };

        // Column and row boundaries, in image and in target space.
        let xi = [0.0, self.left, size.x - self.right, size.x];
        let yi = [0.0, self.bottom, size.y - self.top, size.y];
        let xr = [rect.min.x, rect.min.x + self.left, rect.max.x - self.right, rect.max.x];
        let yr = [rect.min.y, rect.min.y + self.bottom, rect.max.y - self.top, rect.max.y];

        let mut part = |src: Rect, dst: Rect| {
            surface.draw_image_part(&self.image, src, dst, self.color);
        };

        // Corners.
        for (c, r) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
            part(
                Rect::new(xi[c], yi[r], xi[c + 1], yi[r + 1]),
                Rect::new(xr[c], yr[r], xr[c + 1], yr[r + 1]),
            );
        }

        let h_tiles = tiles(xi[2] - xi[1], xr[2] - xr[1]);
        let v_tiles = tiles(yi[2] - yi[1], yr[2] - yr[1]);

        // Top and bottom edges.
        for r in [0, 2] {
            if self.tile_horizontal {
                for &(x, w) in &h_tiles {
                    part(
                        Rect::new(xi[1], yi[r], xi[1] + w, yi[r + 1]),
                        Rect::new(xr[1] + x, yr[r], xr[1] + x + w, yr[r + 1]),
                    );
                }
            } else {
                part(
                    Rect::new(xi[1], yi[r], xi[2], yi[r + 1]),
                    Rect::new(xr[1], yr[r], xr[2], yr[r + 1]),
                );
            }
        }

        // Left and right edges.
        for c in [0, 2] {
            if self.tile_vertical {
                for &(y, h) in &v_tiles {
                    part(
                        Rect::new(xi[c], yi[1], xi[c + 1], yi[1] + h),
                        Rect::new(xr[c], yr[1] + y, xr[c + 1], yr[1] + y + h),
                    );
                }
            } else {
                part(
                    Rect::new(xi[c], yi[1], xi[c + 1], yi[2]),
                    Rect::new(xr[c], yr[1], xr[c + 1], yr[2]),
                );
            }
        }

        // Center.
        let stretch_center = match (self.tile_horizontal, self.tile_vertical) {
            (false, false) => true,
            (true, true) => self.center == CenterFill::Stretch,
            _ => false,
        };
        if stretch_center {
            part(
                Rect::new(xi[1], yi[1], xi[2], yi[2]),
                Rect::new(xr[1], yr[1], xr[2], yr[2]),
            );
        } else if self.tile_horizontal && self.tile_vertical {
            for &(y, h) in &v_tiles {
                for &(x, w) in &h_tiles {
                    part(
                        Rect::new(xi[1], yi[1], xi[1] + w, yi[1] + h),
                        Rect::new(xr[1] + x, yr[1] + y, xr[1] + x + w, yr[1] + y + h),
                    );
                }
            }
        } else if self.tile_horizontal {
            for &(x, w) in &h_tiles {
                part(
                    Rect::new(xi[1], yi[1], xi[1] + w, yi[2]),
                    Rect::new(xr[1] + x, yr[1], xr[1] + x + w, yr[2]),
                );
            }
        } else {
            for &(y, h) in &v_tiles {
                part(
                    Rect::new(xi[1], yi[1], xi[2], yi[1] + h),
                    Rect::new(xr[1], yr[1] + y, xr[2], yr[1] + y + h),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::vec2;
    use trellis_render::{DrawCommand, RecordingSurface};

    fn setup() -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        // 4px margins around a 8x8 center.
        surface.insert_image("panel", vec2(16.0, 16.0));
        surface
    }

    fn parts(surface: &RecordingSurface) -> Vec<(Rect, Rect)> {
        surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { src, dst, .. } => Some((*src, *dst)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_tiles_clip_last() {
        assert_eq!(tiles(8.0, 20.0), vec![(0.0, 8.0), (8.0, 8.0), (16.0, 4.0)]);
        assert_eq!(tiles(8.0, 16.0), vec![(0.0, 8.0), (8.0, 8.0)]);
        assert!(tiles(0.0, 16.0).is_empty());
        assert!(tiles(8.0, -2.0).is_empty());
    }

    #[test]
    fn test_stretched_draws_nine_parts() {
        let mut surface = setup();
        TexturedPanel::new("panel")
            .with_margins(4.0)
            .draw(&mut surface, Rect::new(0.0, 0.0, 40.0, 20.0));

        let parts = parts(&surface);
        assert_eq!(parts.len(), 9);
        // Bottom-left corner keeps its size.
        assert_eq!(parts[0], (Rect::new(0.0, 0.0, 4.0, 4.0), Rect::new(0.0, 0.0, 4.0, 4.0)));
        // Center is stretched over the whole inner area.
        assert_eq!(
            *parts.last().unwrap(),
            (Rect::new(4.0, 4.0, 12.0, 12.0), Rect::new(4.0, 4.0, 36.0, 16.0))
        );
    }

    #[test]
    fn test_tiled_center_follows_edges() {
        let mut surface = setup();
        TexturedPanel::new("panel")
            .with_margins(4.0)
            .tiled()
            .draw(&mut surface, Rect::new(0.0, 0.0, 28.0, 20.0));

        // Inner area is 20x12: 3 columns (8, 8, 4) and 2 rows (8, 4).
        // 4 corners + 2*3 horizontal edges + 2*2 vertical edges + 3*2 center.
        let parts = parts(&surface);
        assert_eq!(parts.len(), 4 + 6 + 4 + 6);
        let (src, dst) = *parts.last().unwrap();
        assert_eq!(src, Rect::new(4.0, 4.0, 8.0, 8.0));
        assert_eq!(dst, Rect::new(20.0, 12.0, 24.0, 16.0));
    }

    #[test]
    fn test_tiled_center_stretch_policy() {
        let mut surface = setup();
        TexturedPanel::new("panel")
            .with_margins(4.0)
            .tiled()
            .with_center(CenterFill::Stretch)
            .draw(&mut surface, Rect::new(0.0, 0.0, 28.0, 20.0));

        let parts = parts(&surface);
        assert_eq!(parts.len(), 4 + 6 + 4 + 1);
        assert_eq!(parts.last().unwrap().1, Rect::new(4.0, 4.0, 24.0, 16.0));
    }

    #[test]
    fn test_tint_is_forwarded() {
        let mut surface = setup();
        TexturedPanel::new("panel")
            .with_tint(Color::rgb(0.7, 0.7, 0.7))
            .draw(&mut surface, Rect::from_size(16.0, 16.0));
        assert!(surface.commands().iter().all(|c| matches!(
            c,
            DrawCommand::Image { tint: Some(t), .. } if *t == Color::rgb(0.7, 0.7, 0.7)
        )));
    }

    #[test]
    fn test_missing_image_draws_nothing() {
        let mut surface = RecordingSurface::new();
        TexturedPanel::new("nope").draw(&mut surface, Rect::from_size(16.0, 16.0));
        assert!(surface.commands().is_empty());
    }
}
