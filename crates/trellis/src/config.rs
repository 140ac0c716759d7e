//! Configuration for the UI, its window and its surface.
//!
//! Every config type has sensible defaults and can be read from JSON or
//! TOML. Missing keys keep their defaults:
//!
//! ```
//! use trellis::config::UiConfig;
//!
//! let config: UiConfig = toml::from_str("click_distance = 4.0").unwrap();
//! assert_eq!(config.click_distance, 4.0);
//! assert_eq!(config.pixel_size, 1.0);
//! ```

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use trellis_core::{Rect, Vec2, vec2};
use trellis_render::Color;

use crate::error::{Error, Result};

/// Behaviour of input dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Largest distance in pixels between press and release that still
    /// counts as a click.
    pub click_distance: f32,
    /// Size of one logical pixel. Pointer positions are divided by it and
    /// floored.
    pub pixel_size: f32,
    /// How many ancestors `is_popup` inspects before giving up.
    pub popup_ancestor_limit: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            click_distance: 8.0,
            pixel_size: 1.0,
            popup_ancestor_limit: 100,
        }
    }
}

impl UiConfig {
    /// Converts a host pointer position to logical pixels.
    pub fn logical_pos(&self, pos: Vec2) -> Vec2 {
        if self.pixel_size <= 0.0 || self.pixel_size == 1.0 {
            return pos;
        }
        vec2(
            (pos.x / self.pixel_size).floor(),
            (pos.y / self.pixel_size).floor(),
        )
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        read_toml(path.as_ref())
    }
}

/// Window properties a host backend opens its window with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub geometry: Rect,
    pub icon_file: Option<String>,
    /// Target frames per second. Zero means unlimited.
    pub fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Trellis".to_string(),
            geometry: Rect::from_size(640.0, 480.0),
            icon_file: None,
            fps: 60,
        }
    }
}

impl WindowConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        read_toml(path.as_ref())
    }
}

/// Properties of the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub pixel_size: f32,
    /// Color the surface is cleared with before each frame.
    pub back_color: Option<Color>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            pixel_size: 1.0,
            back_color: None,
        }
    }
}

impl SurfaceConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        read_toml(path.as_ref())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| Error::json(path, e))
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    toml::from_str(&text).map_err(|e| Error::toml(path, e))
}
