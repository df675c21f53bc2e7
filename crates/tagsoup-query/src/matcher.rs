//! Tree search.

use log::trace;
use tagsoup_dom::NodeRef;

use crate::compiler::{CONTENT_SELECTOR, Condition, Query};
use crate::error::QueryError;

impl Condition {
    /// Does the predicate hold for `node`?
    ///
    /// `@content` looks at the node's own text only. A missing attribute
    /// fails every operator, `!=` and `!*=` included.
    #[must_use]
    pub fn matches(&self, node: NodeRef<'_>) -> bool {
        if self.name() == CONTENT_SELECTOR {
            return self.test(node.content());
        }
        node.attr(self.name()).is_some_and(|value| self.test(value))
    }
}

impl Query {
    /// Does this qualifier alone match `node`? The `next` chain is not
    /// consulted.
    #[must_use]
    pub fn matches(&self, node: NodeRef<'_>) -> bool {
        if self.query_list().is_empty() {
            return self.name() == node.name();
        }
        if !self.name().is_empty() && self.name() != node.name() {
            return false;
        }
        self.query_list()
            .iter()
            .any(|group| group.iter().all(|condition| condition.matches(node)))
    }

    /// Every descendant of `root` selected by this query, in document order.
    ///
    /// The first qualifier may match at any depth. Each following qualifier
    /// only looks at the direct children of a node the previous one
    /// matched. Nodes selected by the last qualifier are searched further,
    /// so nested matches are found too.
    #[must_use]
    pub fn find_all<'a>(&self, root: NodeRef<'a>) -> Vec<NodeRef<'a>> {
        let mut found = Vec::new();
        // (qualifier to apply, candidate, whether its parent matched the
        // previous qualifier). Children go on in reverse so they pop in
        // document order.
        let mut pending: Vec<(&Self, NodeRef<'a>, bool)> =
            root.children().rev().map(|child| (self, child, false)).collect();

        while let Some((query, node, parent_matched)) = pending.pop() {
            let (query, parent_matched) = if query.matches(node) {
                match query.next() {
                    Some(next) => (next, true),
                    None => {
                        found.push(node);
                        (query, false)
                    }
                }
            } else if parent_matched {
                continue;
            } else {
                (query, false)
            };
            pending.extend(node.children().rev().map(|child| (query, child, parent_matched)));
        }

        trace!("{self} matched {} nodes", found.len());
        found
    }
}

/// Compile `selector` and run it against the descendants of `root`.
///
/// # Errors
///
/// Returns a [`QueryError`] if the selector does not compile.
pub fn find_all<'a>(root: NodeRef<'a>, selector: &str) -> Result<Vec<NodeRef<'a>>, QueryError> {
    let query = Query::compile(selector)?;
    Ok(query.find_all(root))
}

/// Method-call form of [`find_all`] for node handles.
pub trait FindAll<'a> {
    /// Compile `selector` and run it against this node's descendants.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] if the selector does not compile.
    fn find_all(self, selector: &str) -> Result<Vec<NodeRef<'a>>, QueryError>;
}

impl<'a> FindAll<'a> for NodeRef<'a> {
    fn find_all(self, selector: &str) -> Result<Vec<NodeRef<'a>>, QueryError> {
        find_all(self, selector)
    }
}
