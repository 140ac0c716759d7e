//! Arena-backed parent/child tree.
//!
//! Nodes live in a [`SlotMap`] and refer to each other by [`NodeId`], so the
//! tree never holds a strong cyclic reference. Every node has at most one
//! parent, and the parent's child list contains the node exactly when the
//! node's parent link points back at it. All mutation goes through [`Tree`]
//! methods that keep both sides of the link in step.
//!
//! Child order matters: it is the paint order of the widget layer, so later
//! children sit on top of earlier ones.
//!
//! # Example
//!
//! ```
//! use trellis_core::tree::Tree;
//!
//! let mut tree = Tree::new();
//! let root = tree.insert("root");
//! let a = tree.insert_child(root, "a").unwrap();
//! let b = tree.insert_child(root, "b").unwrap();
//!
//! // Move `b` under `a`.
//! tree.foster(a, b).unwrap();
//! assert_eq!(tree.children(root), &[a]);
//! assert_eq!(tree.parent(b), Some(a));
//!
//! // Closing `a` takes its subtree with it.
//! tree.close(a);
//! assert!(!tree.contains(b));
//! ```

use slotmap::{SlotMap, new_key_type};

use crate::error::{TreeError, TreeResult};
use crate::logging::targets;

new_key_type! {
    /// Handle to a node in a [`Tree`].
    ///
    /// Handles are cheap to copy. Once a node is closed its handle is stale
    /// for good: lookups return `None` and mutations report
    /// [`TreeError::InvalidNode`].
    pub struct NodeId;
}

#[derive(Debug)]
struct Node<T> {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    value: T,
}

/// An ordered tree of `T` values stored in an arena.
#[derive(Debug)]
pub struct Tree<T> {
    nodes: SlotMap<NodeId, Node<T>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Inserts a detached node.
    pub fn insert(&mut self, value: T) -> NodeId {
        let id = self.nodes.insert(Node {
            parent: None,
            children: Vec::new(),
            value,
        });
        tracing::trace!(target: targets::TREE, ?id, "node inserted");
        id
    }

    /// Inserts a node as the last child of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, value: T) -> TreeResult<NodeId> {
        if !self.contains(parent) {
            return Err(TreeError::InvalidNode);
        }
        let id = self.insert(value);
        self.set_parent_link(id, parent);
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).map(|n| &n.value)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|n| &mut n.value)
    }

    /// Parent of `id`, or `None` for roots and stale handles.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children of `id` in paint order. Empty for stale handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Iterates over the nodes that have no parent.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Makes `child` the last child of `parent`.
    ///
    /// The child is detached from its previous parent first. Fostering a
    /// node under its current parent is a no-op and keeps its position.
    /// Fostering a node under itself or one of its own descendants is
    /// rejected with [`TreeError::CircularParentage`] and leaves the tree
    /// untouched.
    pub fn foster(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(TreeError::InvalidNode);
        }
        if self.parent(child) == Some(parent) {
            return Ok(());
        }
        if self.is_ancestor_of(child, parent) {
            return Err(TreeError::CircularParentage);
        }

        self.detach_link(child);
        self.set_parent_link(child, parent);
        tracing::trace!(target: targets::TREE, ?parent, ?child, "node fostered");
        Ok(())
    }

    /// Removes `id` from its parent, making it a root. The subtree stays
    /// alive.
    pub fn detach(&mut self, id: NodeId) -> TreeResult<()> {
        if !self.contains(id) {
            return Err(TreeError::InvalidNode);
        }
        self.detach_link(id);
        Ok(())
    }

    /// Closes `id` and its whole subtree.
    ///
    /// Children are closed before their parents, and each closed node is
    /// unlinked from its parent. The removed values are returned in closing
    /// order, so the last entry is `id` itself. Closing a stale handle does
    /// nothing and returns an empty list.
    pub fn close(&mut self, id: NodeId) -> Vec<(NodeId, T)> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut order = Vec::new();
        self.collect_postorder(id, &mut order);
        tracing::trace!(
            target: targets::TREE,
            ?id,
            descendant_count = order.len() - 1,
            "closing subtree"
        );

        self.detach_link(id);
        order
            .into_iter()
            .filter_map(|node_id| {
                self.nodes
                    .remove(node_id)
                    .map(|node| (node_id, node.value))
            })
            .collect()
    }

    /// Returns true if `ancestor` is `id` itself or lies on its parent chain.
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == ancestor {
                return true;
            }
            current = self.parent(current_id);
        }
        false
    }

    /// Parent chain of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = self.parent(id);
        while let Some(current_id) = current {
            result.push(current_id);
            current = self.parent(current_id);
        }
        result
    }

    /// Depth-first pre-order walk: node first, then each child subtree in
    /// order. Empty for stale handles.
    pub fn depth_first_preorder(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        if self.contains(id) {
            self.collect_preorder(id, &mut result);
        }
        result
    }

    /// Nesting depth of `id`; roots are at depth 0.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len()
    }

    fn collect_preorder(&self, id: NodeId, result: &mut Vec<NodeId>) {
        result.push(id);
        for &child in self.children(id) {
            self.collect_preorder(child, result);
        }
    }

    fn collect_postorder(&self, id: NodeId, result: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            self.collect_postorder(child, result);
        }
        result.push(id);
    }

    fn set_parent_link(&mut self, child: NodeId, parent: NodeId) {
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        self.add_child(parent, child);
    }

    fn detach_link(&mut self, id: NodeId) {
        let old_parent = self.nodes.get_mut(id).and_then(|n| n.parent.take());
        if let Some(parent) = old_parent {
            self.remove_child(parent, id);
        }
    }

    /// Appends `child` unless it is already listed.
    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(parent)
            && !node.children.contains(&child)
        {
            node.children.push(child);
        }
    }

    /// Removes `child` keeping the order of the remaining siblings.
    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|&c| c != child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Tree<&'static str>, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let root = tree.insert("root");
        let a = tree.insert_child(root, "a").unwrap();
        let b = tree.insert_child(root, "b").unwrap();
        let c = tree.insert_child(root, "c").unwrap();
        (tree, root, a, b, c)
    }

    fn assert_consistent<T>(tree: &Tree<T>) {
        for (id, node) in tree.nodes.iter() {
            if let Some(parent) = node.parent {
                let siblings = tree.children(parent);
                assert_eq!(siblings.iter().filter(|&&c| c == id).count(), 1);
            }
            for &child in &node.children {
                assert_eq!(tree.parent(child), Some(id));
            }
        }
    }

    #[test]
    fn test_insert_child_order() {
        let (tree, root, a, b, c) = setup();
        assert_eq!(tree.children(root), &[a, b, c]);
        assert_eq!(tree.get(b), Some(&"b"));
        assert_consistent(&tree);
    }

    #[test]
    fn test_remove_child_preserves_order() {
        let (mut tree, root, a, b, c) = setup();
        let d = tree.insert_child(root, "d").unwrap();
        tree.remove_child(root, b);
        assert_eq!(tree.children(root), &[a, c, d]);
    }

    #[test]
    fn test_add_child_rejects_duplicates() {
        let (mut tree, root, a, b, c) = setup();
        tree.add_child(root, a);
        assert_eq!(tree.children(root), &[a, b, c]);
    }

    #[test]
    fn test_foster_moves_between_parents() {
        let (mut tree, root, a, b, c) = setup();
        tree.foster(a, c).unwrap();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.children(a), &[c]);
        assert_eq!(tree.parent(c), Some(a));
        assert_consistent(&tree);
    }

    #[test]
    fn test_foster_same_parent_is_noop() {
        let (mut tree, root, a, b, c) = setup();
        tree.foster(root, a).unwrap();
        assert_eq!(tree.children(root), &[a, b, c]);
    }

    #[test]
    fn test_foster_rejects_cycles() {
        let (mut tree, root, a, _b, _c) = setup();
        let grandchild = tree.insert_child(a, "a1").unwrap();

        assert_eq!(tree.foster(a, a), Err(TreeError::CircularParentage));
        assert_eq!(tree.foster(grandchild, root), Err(TreeError::CircularParentage));
        assert_eq!(tree.foster(grandchild, a), Err(TreeError::CircularParentage));
        assert_eq!(tree.parent(a), Some(root));
        assert_consistent(&tree);
    }

    #[test]
    fn test_foster_stale_handle() {
        let (mut tree, root, a, _b, _c) = setup();
        tree.close(a);
        assert_eq!(tree.foster(root, a), Err(TreeError::InvalidNode));
        assert_eq!(tree.foster(a, root), Err(TreeError::InvalidNode));
    }

    #[test]
    fn test_close_removes_subtree() {
        let (mut tree, root, a, b, c) = setup();
        let a1 = tree.insert_child(a, "a1").unwrap();
        let a2 = tree.insert_child(a1, "a2").unwrap();

        let closed: Vec<_> = tree.close(a).into_iter().map(|(id, _)| id).collect();
        assert_eq!(closed, vec![a2, a1, a]);
        assert_eq!(tree.children(root), &[b, c]);
        assert!(!tree.contains(a1));
        assert!(!tree.depth_first_preorder(root).contains(&a2));
        assert_consistent(&tree);
    }

    #[test]
    fn test_close_stale_is_noop() {
        let (mut tree, _root, a, _b, _c) = setup();
        assert_eq!(tree.close(a).len(), 1);
        assert!(tree.close(a).is_empty());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_detach_keeps_subtree_alive() {
        let (mut tree, root, a, b, c) = setup();
        let a1 = tree.insert_child(a, "a1").unwrap();
        tree.detach(a).unwrap();
        assert_eq!(tree.children(root), &[b, c]);
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.children(a), &[a1]);
        assert_eq!(tree.roots().count(), 2);
    }

    #[test]
    fn test_traversal() {
        let (mut tree, root, a, b, c) = setup();
        let a1 = tree.insert_child(a, "a1").unwrap();
        assert_eq!(tree.depth_first_preorder(root), vec![root, a, a1, b, c]);
        assert_eq!(tree.ancestors(a1), vec![a, root]);
        assert_eq!(tree.depth(a1), 2);
        assert!(tree.is_ancestor_of(root, a1));
        assert!(!tree.is_ancestor_of(b, a1));
    }

    #[test]
    fn test_random_foster_sequence_stays_consistent() {
        let mut tree = Tree::new();
        let ids: Vec<_> = (0..8).map(|i| tree.insert(i)).collect();
        // Deterministic pseudo-random pairs.
        let mut seed = 7usize;
        for _ in 0..200 {
            seed = seed.wrapping_mul(31).wrapping_add(17) % 1009;
            let parent = ids[seed % ids.len()];
            let child = ids[(seed / 8) % ids.len()];
            let _ = tree.foster(parent, child);
            assert_consistent(&tree);
        }
    }
}
