//! Ready-made themes.

mod plain;
mod stone;

pub use plain::plain;
pub use stone::{STONE_FONT, STONE_IMAGES, stone, stone_theme};
