//! Image sheet descriptions and atlas layout.
//!
//! An atlas is one big image holding many small ones. A sheet is a run of
//! equally sized tiles inside the atlas, described by its starting offset,
//! tile size and the names to give each tile. Sheets are usually kept in a
//! JSON file next to the atlas:
//!
//! ```json
//! {
//!     "file": "theme-stone.png",
//!     "sheets": [
//!         { "x_offset": 0, "y_offset": 0, "width": 32, "height": 32,
//!           "names": ["stone-pn", "stone-bt", "", "stone-le"] }
//!     ]
//! }
//! ```
//!
//! Offsets are measured from the atlas's top-left corner, like image
//! editors show them. The computed regions are in y-up surface space with
//! the origin at the atlas's bottom-left corner, ready to be used as source
//! rectangles.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use trellis_core::{Rect, Vec2, vec2};

use crate::error::{RenderError, RenderResult};
use crate::logging::targets;

/// Description of an atlas file and the sheets inside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSheetConfig {
    /// Atlas image path. Relative paths are resolved against the directory
    /// of the description file by [`ImageSheetConfig::load`].
    pub file: PathBuf,
    #[serde(default)]
    pub sheets: Vec<SheetConfig>,
}

/// One run of uniformly sized tiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    pub x_offset: f32,
    pub y_offset: f32,
    pub width: f32,
    pub height: f32,
    /// Tile names, left to right. An empty name ends the current row.
    #[serde(default)]
    pub names: Vec<String>,
}

impl ImageSheetConfig {
    /// Parses a description from JSON text. The atlas path is kept as is.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Reads a JSON description file.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
        let mut config: Self =
            serde_json::from_str(&text).map_err(|e| RenderError::json(path, e))?;
        if config.file.is_relative()
            && let Some(dir) = path.parent()
        {
            config.file = dir.join(&config.file);
        }
        tracing::debug!(
            target: targets::ASSETS,
            path = %path.display(),
            atlas = %config.file.display(),
            sheets = config.sheets.len(),
            "loaded image sheet description"
        );
        Ok(config)
    }

    /// Reads the atlas dimensions from the image file header.
    pub fn atlas_size(&self) -> RenderResult<Vec2> {
        let (w, h) =
            image::image_dimensions(&self.file).map_err(|e| RenderError::image(&self.file, e))?;
        Ok(vec2(w as f32, h as f32))
    }

    /// Reads the atlas header and lays out every sheet.
    pub fn build_atlas(&self) -> RenderResult<ImageAtlas> {
        let size = self.atlas_size()?;
        self.layout(size)
    }

    /// Lays out every sheet inside an atlas of `atlas_size`.
    ///
    /// Tiles go left to right from the sheet offset. A tile that would
    /// cross the right edge, or an empty name, moves the layout to the
    /// start of the next row. Layout of a sheet stops once the next row
    /// would cross the bottom edge. A sheet whose first tile does not fit
    /// is an error.
    pub fn layout(&self, atlas_size: Vec2) -> RenderResult<ImageAtlas> {
        let mut regions = BTreeMap::new();
        for sheet in &self.sheets {
            sheet.layout_into(atlas_size, &mut regions)?;
        }
        Ok(ImageAtlas {
            file: self.file.clone(),
            size: atlas_size,
            regions,
        })
    }
}

impl SheetConfig {
    fn layout_into(
        &self,
        atlas_size: Vec2,
        regions: &mut BTreeMap<String, Rect>,
    ) -> RenderResult<()> {
        let (w, h) = (self.width, self.height);
        let mut x = self.x_offset;
        let mut y = self.y_offset;
        if x + w > atlas_size.x || y + h > atlas_size.y {
            return Err(RenderError::SheetOutOfBounds {
                x_offset: self.x_offset,
                y_offset: self.y_offset,
                width: w,
                height: h,
                atlas_width: atlas_size.x,
                atlas_height: atlas_size.y,
            });
        }

        for name in &self.names {
            if !name.is_empty() {
                let top = atlas_size.y - y;
                regions.insert(name.clone(), Rect::new(x, top - h, x + w, top));
                x += w;
            }
            if name.is_empty() || x + w > atlas_size.x {
                x = 0.0;
                y += h;
            }
            if y + h > atlas_size.y {
                break;
            }
        }
        Ok(())
    }
}

/// Named regions of one atlas image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageAtlas {
    /// Path of the atlas image.
    pub file: PathBuf,
    /// Atlas dimensions in pixels.
    pub size: Vec2,
    regions: BTreeMap<String, Rect>,
}

impl ImageAtlas {
    /// Creates an atlas from precomputed regions.
    pub fn new(file: impl Into<PathBuf>, size: Vec2) -> Self {
        Self {
            file: file.into(),
            size,
            regions: BTreeMap::new(),
        }
    }

    /// Adds or replaces a named region.
    pub fn insert(&mut self, name: impl Into<String>, region: Rect) {
        self.regions.insert(name.into(), region);
    }

    /// Source rectangle of `name`, if known.
    pub fn region(&self, name: &str) -> Option<Rect> {
        self.regions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterates over regions in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rect)> {
        self.regions.iter().map(|(n, r)| (n.as_str(), *r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(x: f32, y: f32, names: &[&str]) -> SheetConfig {
        SheetConfig {
            x_offset: x,
            y_offset: y,
            width: 16.0,
            height: 16.0,
            names: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_json() {
        let config = ImageSheetConfig::from_json_str(
            r#"{"file":"atlas.png","sheets":[{"x_offset":0,"y_offset":32,"width":8,"height":4,"names":["a",""]}]}"#,
        )
        .unwrap();
        assert_eq!(config.file, PathBuf::from("atlas.png"));
        assert_eq!(config.sheets[0].y_offset, 32.0);
        assert_eq!(config.sheets[0].names, vec!["a".to_string(), String::new()]);
    }

    #[test]
    fn test_layout_wraps_rows() {
        let config = ImageSheetConfig {
            file: "atlas.png".into(),
            sheets: vec![sheet(0.0, 0.0, &["a", "b", "c", "d", "e"])],
        };
        let atlas = config.layout(vec2(64.0, 32.0)).unwrap();

        assert_eq!(atlas.region("a"), Some(Rect::new(0.0, 16.0, 16.0, 32.0)));
        assert_eq!(atlas.region("d"), Some(Rect::new(48.0, 16.0, 64.0, 32.0)));
        // Fifth tile wraps to the second row from the top.
        assert_eq!(atlas.region("e"), Some(Rect::new(0.0, 0.0, 16.0, 16.0)));
    }

    #[test]
    fn test_empty_name_breaks_row() {
        let config = ImageSheetConfig {
            file: "atlas.png".into(),
            sheets: vec![sheet(16.0, 0.0, &["a", "", "b"])],
        };
        let atlas = config.layout(vec2(64.0, 32.0)).unwrap();
        assert_eq!(atlas.region("a"), Some(Rect::new(16.0, 16.0, 32.0, 32.0)));
        assert_eq!(atlas.region("b"), Some(Rect::new(0.0, 0.0, 16.0, 16.0)));
        assert_eq!(atlas.len(), 2);
    }

    #[test]
    fn test_layout_stops_at_bottom() {
        let config = ImageSheetConfig {
            file: "atlas.png".into(),
            sheets: vec![sheet(0.0, 0.0, &["a", "b", "c", "d"])],
        };
        let atlas = config.layout(vec2(32.0, 16.0)).unwrap();
        assert!(atlas.region("a").is_some());
        assert!(atlas.region("b").is_some());
        assert!(atlas.region("c").is_none());
    }

    #[test]
    fn test_offset_out_of_bounds() {
        let config = ImageSheetConfig {
            file: "atlas.png".into(),
            sheets: vec![sheet(60.0, 0.0, &["a"])],
        };
        let err = config.layout(vec2(64.0, 32.0)).unwrap_err();
        assert!(matches!(err, RenderError::SheetOutOfBounds { x_offset, .. } if x_offset == 60.0));
    }
}
