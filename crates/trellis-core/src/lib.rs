//! Core systems for Trellis.
//!
//! This crate holds the pieces every other Trellis crate builds on:
//!
//! - **Geometry**: [`Vec2`], [`Rect`] and [`Align`] in y-up surface space
//! - **Tree**: an arena of parent/child nodes with cycle-checked reparenting
//! - **Logging**: `tracing` targets and a tree dump helper
//!
//! # Example
//!
//! ```
//! use trellis_core::{Rect, Tree, vec2};
//!
//! let mut tree = Tree::new();
//! let window = tree.insert(Rect::new(0.0, 0.0, 640.0, 480.0));
//! let panel = tree.insert_child(window, Rect::from_size(100.0, 50.0)).unwrap();
//!
//! let offset = tree.get(window).unwrap().min;
//! let global = tree.get(panel).unwrap().moved(offset);
//! assert!(global.contains(vec2(50.0, 25.0)));
//! ```

pub mod error;
pub mod geometry;
pub mod logging;
pub mod tree;

pub use error::{TreeError, TreeResult};
pub use geometry::{Align, Rect, Vec2, vec2};
pub use logging::TreeDebug;
pub use tree::{NodeId, Tree};
