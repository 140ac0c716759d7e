//! Logging and debugging facilities for Trellis.
//!
//! Trellis is instrumented with the `tracing` crate and never installs a
//! subscriber itself. Applications pick their own:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("trellis=debug,trellis_core::tree=trace")
//!         .init();
//!     // ...
//! }
//! ```
//!
//! [`TreeDebug`] renders a tree as indented text, which is handy inside
//! `debug!` events and test failure messages.

use std::fmt::Write as _;

use crate::tree::{NodeId, Tree};

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "trellis_core";
    /// Tree mutation target.
    pub const TREE: &str = "trellis_core::tree";
}

/// Indented text rendering of a [`Tree`].
pub struct TreeDebug<'a, T, F> {
    tree: &'a Tree<T>,
    label: F,
    indent: usize,
}

impl<'a, T, F> TreeDebug<'a, T, F>
where
    F: Fn(NodeId, &T) -> String,
{
    /// Creates a formatter that labels each node with `label`.
    pub fn new(tree: &'a Tree<T>, label: F) -> Self {
        Self {
            tree,
            label,
            indent: 2,
        }
    }

    /// Sets the number of spaces per nesting level.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Formats the subtree rooted at `root`, one node per line.
    pub fn format_tree(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, root, 0);
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let Some(value) = self.tree.get(id) else {
            return;
        };
        let _ = writeln!(
            out,
            "{:width$}{}",
            "",
            (self.label)(id, value),
            width = depth * self.indent
        );
        for &child in self.tree.children(id) {
            self.write_node(out, child, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tree() {
        let mut tree = Tree::new();
        let root = tree.insert("root");
        let a = tree.insert_child(root, "a").unwrap();
        tree.insert_child(a, "a1").unwrap();
        tree.insert_child(root, "b").unwrap();

        let text = TreeDebug::new(&tree, |_, v| v.to_string()).format_tree(root);
        assert_eq!(text, "root\n  a\n    a1\n  b\n");
    }

    #[test]
    fn test_format_stale_root() {
        let mut tree = Tree::new();
        let root = tree.insert(1);
        tree.close(root);
        let text = TreeDebug::new(&tree, |_, v| v.to_string()).format_tree(root);
        assert!(text.is_empty());
    }
}
