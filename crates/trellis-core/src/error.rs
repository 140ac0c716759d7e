//! Error types for Trellis core.

use std::fmt;

/// Errors raised by tree mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The node handle is stale or was never issued by this tree.
    InvalidNode,
    /// Attempted to place a node under itself or one of its descendants.
    CircularParentage,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNode => write!(f, "Invalid or closed node"),
            Self::CircularParentage => {
                write!(f, "Cannot place a node under itself or one of its descendants")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Result type for tree operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;
