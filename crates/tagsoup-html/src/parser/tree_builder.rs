use log::trace;
use tagsoup_dom::{DomTree, NodeId};

use crate::element::{Element, attributes_to_map};
use crate::error::ParseError;

/// Builds a [`DomTree`] from a balanced element sequence.
///
/// Any end tag closes the node being built, whatever its name, so the input
/// must come out of the [`TagCorrector`](crate::TagCorrector) first.
/// Comments are skipped. The root is the first start tag; anything after it
/// closes is ignored.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: DomTree,
}

impl TreeBuilder {
    /// Create a builder with an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: DomTree::new(),
        }
    }

    /// Consume `elements` and return the finished tree.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::EmptyDocument`] if `elements` contains no start
    /// tag.
    pub fn build<I>(mut self, elements: I) -> Result<DomTree, ParseError>
    where
        I: IntoIterator<Item = Element>,
    {
        let mut elements = elements.into_iter();
        let (name, attributes) = elements
            .by_ref()
            .find_map(|element| match element {
                Element::Start { name, attributes } => Some((name, attributes)),
                _ => None,
            })
            .ok_or(ParseError::EmptyDocument)?;

        let root = self.alloc(&name, &attributes);
        debug_assert_eq!(root, NodeId::ROOT);
        trace!("open {} ({root:?})", String::from_utf8_lossy(&name));

        // Open elements, innermost last, with the children collected so far.
        let mut open: Vec<(NodeId, Vec<NodeId>)> = vec![(root, Vec::new())];
        for element in elements {
            let Some((current, children)) = open.last_mut() else {
                break;
            };
            match element {
                Element::Content(text) => {
                    self.tree.append_content(*current, &String::from_utf8_lossy(&text));
                }
                Element::Void { name, attributes } => {
                    let id = self.alloc(&name, &attributes);
                    children.push(id);
                }
                Element::Start { name, attributes } => {
                    let id = self.alloc(&name, &attributes);
                    trace!("open {} ({id:?})", String::from_utf8_lossy(&name));
                    open.push((id, Vec::new()));
                }
                Element::End { .. } => self.close(&mut open),
                Element::Comment(_) => {}
            }
        }
        while !open.is_empty() {
            self.close(&mut open);
        }
        Ok(self.tree)
    }

    /// Finish the innermost open element and attach it to its parent.
    fn close(&mut self, open: &mut Vec<(NodeId, Vec<NodeId>)>) {
        let Some((id, children)) = open.pop() else {
            return;
        };
        trace!("close {id:?} with {} children", children.len());
        self.tree.set_children(id, children);
        if let Some((_, siblings)) = open.last_mut() {
            siblings.push(id);
        }
    }

    fn alloc(&mut self, name: &[u8], attributes: &[Vec<u8>]) -> NodeId {
        self.tree.alloc(
            String::from_utf8_lossy(name).into_owned(),
            attributes_to_map(attributes),
        )
    }
}
