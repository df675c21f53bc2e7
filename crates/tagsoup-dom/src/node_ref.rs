//! Borrowed handles and iterators over a [`DomTree`].

use std::collections::BTreeMap;
use std::fmt;
use std::ptr;
use std::slice;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::{AttributesMap, DomTree, Node, NodeId};

/// A read-only handle to one node of a [`DomTree`].
///
/// Handles are `Copy` and compare equal when they point at the same node of
/// the same tree.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// `id` must be in range for `tree`.
    pub(crate) const fn new(tree: &'a DomTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The index of this node in its tree.
    #[must_use]
    pub const fn id(self) -> NodeId {
        self.id
    }

    /// The underlying node record.
    #[must_use]
    pub fn node(self) -> &'a Node {
        &self.tree.nodes[self.id.0]
    }

    /// Tag name of this node.
    #[must_use]
    pub fn name(self) -> &'a str {
        &self.node().name
    }

    /// All attributes of this node.
    #[must_use]
    pub fn attributes(self) -> &'a AttributesMap {
        &self.node().attributes
    }

    /// Value of the named attribute, if present.
    #[must_use]
    pub fn attr(self, key: &str) -> Option<&'a str> {
        self.node().attr(key)
    }

    /// Text owned directly by this node.
    #[must_use]
    pub fn content(self) -> &'a str {
        &self.node().content
    }

    /// This node's content followed by the content of all descendants.
    #[must_use]
    pub fn get_all_content(self) -> String {
        self.tree.all_content(self.id)
    }

    /// The owning node, `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.node().parent.map(|id| Self::new(self.tree, id))
    }

    /// Direct children in document order.
    #[must_use]
    pub fn children(self) -> ChildIterator<'a> {
        ChildIterator {
            tree: self.tree,
            inner: self.node().children.iter(),
        }
    }

    /// The sibling immediately after this node.
    #[must_use]
    pub fn next_sibling(self) -> Option<Self> {
        self.node().next_sibling.map(|id| Self::new(self.tree, id))
    }

    /// The sibling immediately before this node.
    #[must_use]
    pub fn prev_sibling(self) -> Option<Self> {
        self.node().prev_sibling.map(|id| Self::new(self.tree, id))
    }

    /// Ancestors from parent up to the root.
    #[must_use]
    pub fn ancestors(self) -> AncestorIterator<'a> {
        self.tree.ancestors(self.id)
    }

    /// Every descendant in pre-order, excluding this node.
    #[must_use]
    pub fn descendants(self) -> DescendantIterator<'a> {
        self.tree.descendants(self.id)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id.0)
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// Nested view of the subtree: name, attributes sorted by key, own content,
/// then children.
impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let attributes: BTreeMap<&str, &str> = self
            .attributes()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let children: Vec<NodeRef<'_>> = self.children().collect();

        let mut state = serializer.serialize_struct("Node", 4)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("attributes", &attributes)?;
        state.serialize_field("content", self.content())?;
        state.serialize_field("children", &children)?;
        state.end()
    }
}

/// Iterator over the direct children of a node.
pub struct ChildIterator<'a> {
    tree: &'a DomTree,
    inner: slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for ChildIterator<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|&id| NodeRef::new(self.tree, id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for ChildIterator<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|&id| NodeRef::new(self.tree, id))
    }
}

impl ExactSizeIterator for ChildIterator<'_> {}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl<'a> AncestorIterator<'a> {
    pub(crate) const fn new(tree: &'a DomTree, start: Option<NodeId>) -> Self {
        Self {
            tree,
            current: start,
        }
    }
}

impl<'a> Iterator for AncestorIterator<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(NodeRef::new(self.tree, id))
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    // Next node on top.
    stack: Vec<NodeId>,
}

impl<'a> DescendantIterator<'a> {
    pub(crate) fn new(tree: &'a DomTree, root: NodeId) -> Self {
        let stack = tree.children(root).iter().rev().copied().collect();
        Self { tree, stack }
    }
}

impl<'a> Iterator for DescendantIterator<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(NodeRef::new(self.tree, id))
    }
}
