//! Node tree for the tagsoup parser.
//!
//! This crate provides an arena-based tree of parsed HTML elements.
//!
//! # Design
//!
//! Every [`Node`] lives in a single `Vec` owned by [`DomTree`] and all
//! relationships are [`NodeId`] indices. The owning direction is
//! `parent -> children`; `parent`, `next_sibling` and `prev_sibling` are
//! plain indices and never own anything, so the tree has no reference cycles
//! and is `Send + Sync` once built.
//!
//! Read access goes through [`NodeRef`], a copyable `(tree, id)` handle.

use std::collections::HashMap;

mod node_ref;

pub use node_ref::{AncestorIterator, ChildIterator, DescendantIterator, NodeRef};

/// Map of attribute names to values for an element.
///
/// Keys are unique; when a tag repeats an attribute the last occurrence wins.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root element is always the first node allocated.
    pub const ROOT: Self = Self(0);
}

/// One parsed element.
///
/// `content` holds the concatenation of every text run that appeared
/// directly inside this element, in source order. Text belonging to child
/// elements is stored on those children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Tag name exactly as written in the source.
    pub name: String,

    /// Parsed attributes. Boolean attributes carry the value `"true"`.
    pub attributes: AttributesMap,

    /// Text owned directly by this element.
    pub content: String,

    /// The element whose `children` contain this node, `None` for the root.
    pub parent: Option<NodeId>,

    /// Child elements in document order.
    pub children: Vec<NodeId>,

    /// The child immediately following this one in the parent's `children`.
    pub next_sibling: Option<NodeId>,

    /// The child immediately preceding this one in the parent's `children`.
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    /// Create an unattached node.
    #[must_use]
    pub fn new(name: String, attributes: AttributesMap) -> Self {
        Self {
            name,
            attributes,
            ..Self::default()
        }
    }

    /// Returns the value of the named attribute, if present.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Arena-based tree with O(1) node access and traversal.
///
/// A tree is filled by the builder and then only read. The first node
/// allocated ([`NodeId::ROOT`]) is the root element.
#[derive(Debug, Clone, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Handle to the root element, or `None` if nothing was allocated.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.node_ref(NodeId::ROOT)
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get a read handle for a node, or `None` if the ID is out of range.
    #[must_use]
    pub fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then(|| NodeRef::new(self, id))
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, name: String, attributes: AttributesMap) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name, attributes));
        id
    }

    /// Append a text run to a node's own content.
    pub fn append_content(&mut self, id: NodeId, text: &str) {
        if let Some(node) = self.get_mut(id) {
            node.content.push_str(text);
        }
    }

    /// Install `children` as the complete child list of `parent`.
    ///
    /// Sets each child's parent and rebuilds the sibling chain so that it
    /// mirrors the list exactly. Any previous child list is replaced.
    pub fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        for (i, &child) in children.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| children[p]);
            let next = children.get(i + 1).copied();
            if let Some(node) = self.get_mut(child) {
                node.parent = Some(parent);
                node.prev_sibling = prev;
                node.next_sibling = next;
            }
        }
        if let Some(node) = self.get_mut(parent) {
            node.children = children;
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator::new(self, self.parent(id))
    }

    /// Iterate over every descendant of a node in pre-order (document order).
    /// The node itself is not included.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator::new(self, id)
    }

    /// The node's own content followed by the content of every descendant,
    /// in document order.
    #[must_use]
    pub fn all_content(&self, id: NodeId) -> String {
        let mut text = self.get(id).map(|n| n.content.clone()).unwrap_or_default();
        for descendant in self.descendants(id) {
            text.push_str(descendant.content());
        }
        text
    }
}
