//! Arena-backed parent/child hierarchy.
//!
//! [`Hierarchy`] stores node payloads in a [`SlotMap`] together with a
//! non-owning parent link and an ordered child list per node. Handles are
//! generational [`NodeId`]s: once a node is destroyed every outstanding
//! handle to it resolves to "missing" instead of aliasing a newer node.
//!
//! Child order is significant. Controls use it both as layout order and as
//! z-order (later children are painted on top and hit-tested first).
//!
//! # Example
//!
//! ```
//! use trellis_core::Hierarchy;
//!
//! let mut nodes = Hierarchy::new();
//! let root = nodes.insert("root");
//! let child = nodes.insert("child");
//! nodes.attach(root, child, None).unwrap();
//!
//! assert_eq!(nodes.parent(child), Some(root));
//! assert_eq!(nodes.children(root), &[child]);
//! ```

use slotmap::{new_key_type, SlotMap};

use crate::error::{Result, TrellisError};
use crate::logging::targets;

new_key_type! {
    /// A generational handle to a node in a [`Hierarchy`].
    ///
    /// `NodeId`s stay valid while the node is attached, detached or moved.
    /// They become invalid when the node is destroyed.
    pub struct NodeId;
}

impl NodeId {
    /// Convert the id to a raw u64 value, for logging and debugging output.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}

struct Entry<T> {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: T,
}

/// An arena of nodes with parent links and ordered children.
pub struct Hierarchy<T> {
    nodes: SlotMap<NodeId, Entry<T>>,
}

impl<T> Hierarchy<T> {
    /// Create an empty hierarchy.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Insert a detached node and return its handle.
    pub fn insert(&mut self, data: T) -> NodeId {
        let id = self.nodes.insert(Entry {
            parent: None,
            children: Vec::new(),
            data,
        });
        tracing::trace!(target: targets::HIERARCHY, id = id.as_raw(), "inserted node");
        id
    }

    /// Check whether a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the hierarchy holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node's payload.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).map(|e| &e.data)
    }

    /// Mutably borrow a node's payload.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|e| &mut e.data)
    }

    /// The node's parent, or `None` for roots and missing nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|e| e.parent)
    }

    /// The node's children in order. Missing nodes have no children.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    /// Position of the node within its parent's child list.
    pub fn sibling_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Attach `child` beneath `parent`.
    ///
    /// The child is first detached from any previous parent. With `index`
    /// of `None` (or past the end) it is appended; otherwise it is inserted
    /// at that position.
    pub fn attach(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(TrellisError::InvalidNode(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(TrellisError::InvalidNode(child));
        }
        if self.is_ancestor_of(child, parent) {
            return Err(TrellisError::CircularParentage { child, parent });
        }

        self.detach(child)?;

        if let Some(entry) = self.nodes.get_mut(child) {
            entry.parent = Some(parent);
        }
        if let Some(entry) = self.nodes.get_mut(parent) {
            let at = index.unwrap_or(entry.children.len()).min(entry.children.len());
            entry.children.insert(at, child);
        }

        debug_assert!(self.check_links(parent));
        tracing::trace!(
            target: targets::HIERARCHY,
            parent = parent.as_raw(),
            child = child.as_raw(),
            "attached node"
        );
        Ok(())
    }

    /// Detach a node from its parent, returning the former parent.
    ///
    /// The node and its subtree stay alive in the arena.
    pub fn detach(&mut self, id: NodeId) -> Result<Option<NodeId>> {
        let old_parent = self
            .nodes
            .get_mut(id)
            .ok_or(TrellisError::InvalidNode(id))?
            .parent
            .take();

        if let Some(parent_id) = old_parent
            && let Some(parent) = self.nodes.get_mut(parent_id)
        {
            parent.children.retain(|&c| c != id);
        }
        Ok(old_parent)
    }

    /// Detach every child of `id`, returning them in their former order.
    pub fn detach_children(&mut self, id: NodeId) -> Result<Vec<NodeId>> {
        let children = std::mem::take(
            &mut self
                .nodes
                .get_mut(id)
                .ok_or(TrellisError::InvalidNode(id))?
                .children,
        );
        for &child in &children {
            if let Some(entry) = self.nodes.get_mut(child) {
                entry.parent = None;
            }
        }
        Ok(children)
    }

    /// Remove a node and its entire subtree, returning the number removed.
    pub fn destroy(&mut self, id: NodeId) -> Result<usize> {
        let doomed = self.depth_first_postorder(id)?;
        self.detach(id)?;
        for &node in &doomed {
            self.nodes.remove(node);
        }
        tracing::trace!(
            target: targets::HIERARCHY,
            id = id.as_raw(),
            removed = doomed.len(),
            "destroyed subtree"
        );
        Ok(doomed.len())
    }

    /// Check if `ancestor` is `id` itself or one of its ancestors.
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

    /// All ancestors from the immediate parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = self.parent(id);
        while let Some(current_id) = current {
            result.push(current_id);
            current = self.parent(current_id);
        }
        result
    }

    /// The topmost ancestor of a node (the node itself if it is a root).
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().copied().unwrap_or(id)
    }

    /// Depth-first pre-order traversal: node first, then children in order.
    pub fn depth_first_preorder(&self, id: NodeId) -> Result<Vec<NodeId>> {
        if !self.contains(id) {
            return Err(TrellisError::InvalidNode(id));
        }
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        Ok(result)
    }

    /// Depth-first post-order traversal: children first, then the node.
    pub fn depth_first_postorder(&self, id: NodeId) -> Result<Vec<NodeId>> {
        if !self.contains(id) {
            return Err(TrellisError::InvalidNode(id));
        }
        let mut result = Vec::new();
        self.postorder_into(id, &mut result);
        Ok(result)
    }

    fn postorder_into(&self, id: NodeId, result: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            self.postorder_into(child, result);
        }
        result.push(id);
    }

    /// Every child of `id` names `id` as its parent, with no duplicates.
    fn check_links(&self, id: NodeId) -> bool {
        let children = self.children(id);
        children.iter().enumerate().all(|(i, &c)| {
            self.parent(c) == Some(id) && !children[..i].contains(&c)
        })
    }
}

impl<T> Default for Hierarchy<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_tree() -> (Hierarchy<&'static str>, NodeId, NodeId, NodeId, NodeId) {
        let mut nodes = Hierarchy::new();
        let root = nodes.insert("root");
        let a = nodes.insert("a");
        let b = nodes.insert("b");
        let a1 = nodes.insert("a1");
        nodes.attach(root, a, None).unwrap();
        nodes.attach(root, b, None).unwrap();
        nodes.attach(a, a1, None).unwrap();
        (nodes, root, a, b, a1)
    }

    #[test]
    fn test_attach_and_children_order() {
        let (mut nodes, root, a, b, _) = create_tree();
        assert_eq!(nodes.children(root), &[a, b]);

        let c = nodes.insert("c");
        nodes.attach(root, c, Some(0)).unwrap();
        assert_eq!(nodes.children(root), &[c, a, b]);
        assert_eq!(nodes.sibling_index(b), Some(2));
    }

    #[test]
    fn test_attach_index_past_end_appends() {
        let (mut nodes, root, a, b, _) = create_tree();
        let c = nodes.insert("c");
        nodes.attach(root, c, Some(99)).unwrap();
        assert_eq!(nodes.children(root), &[a, b, c]);
    }

    #[test]
    fn test_reparent_moves_child() {
        let (mut nodes, root, a, b, a1) = create_tree();
        nodes.attach(b, a1, None).unwrap();
        assert_eq!(nodes.parent(a1), Some(b));
        assert!(nodes.children(a).is_empty());
        assert_eq!(nodes.children(b), &[a1]);
        assert_eq!(nodes.root_of(a1), root);
    }

    #[test]
    fn test_circular_parentage_rejected() {
        let (mut nodes, root, a, _, a1) = create_tree();
        assert!(matches!(
            nodes.attach(a1, root, None),
            Err(TrellisError::CircularParentage { .. })
        ));
        assert!(matches!(
            nodes.attach(a, a, None),
            Err(TrellisError::CircularParentage { .. })
        ));
    }

    #[test]
    fn test_detach_keeps_node_alive() {
        let (mut nodes, root, a, _, a1) = create_tree();
        assert_eq!(nodes.detach(a).unwrap(), Some(root));
        assert!(nodes.contains(a));
        assert_eq!(nodes.parent(a), None);
        assert_eq!(nodes.children(a), &[a1]);
    }

    #[test]
    fn test_detach_children() {
        let (mut nodes, root, a, b, _) = create_tree();
        assert_eq!(nodes.detach_children(root).unwrap(), vec![a, b]);
        assert!(nodes.children(root).is_empty());
        assert_eq!(nodes.parent(b), None);
    }

    #[test]
    fn test_destroy_cascades_and_expires_handles() {
        let (mut nodes, root, a, b, a1) = create_tree();
        assert_eq!(nodes.destroy(a).unwrap(), 2);
        assert!(!nodes.contains(a));
        assert!(!nodes.contains(a1));
        assert_eq!(nodes.children(root), &[b]);

        // A new node must not alias the destroyed handle.
        let fresh = nodes.insert("fresh");
        assert_ne!(fresh, a);
        assert!(nodes.get(a).is_none());
        assert!(matches!(nodes.destroy(a), Err(TrellisError::InvalidNode(_))));
    }

    #[test]
    fn test_traversals() {
        let (nodes, root, a, b, a1) = create_tree();
        assert_eq!(nodes.depth_first_preorder(root).unwrap(), vec![root, a, a1, b]);
        assert_eq!(nodes.depth_first_postorder(root).unwrap(), vec![a1, a, b, root]);
        assert_eq!(nodes.ancestors(a1), vec![a, root]);
        assert!(nodes.is_ancestor_of(root, a1));
        assert!(!nodes.is_ancestor_of(b, a1));
    }
}
