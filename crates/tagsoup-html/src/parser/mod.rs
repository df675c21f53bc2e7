//! Parser driver: runs the stages in order and builds the tree.

mod tree_builder;

use std::io::Read;

use log::debug;
use tagsoup_dom::DomTree;

use crate::corrector::{Repair, TagCorrector};
use crate::element::{Element, classify};
use crate::error::ParseError;
use crate::tokenizer::Tokenizer;

pub use tree_builder::TreeBuilder;

/// Runs tokenizer, classifier, corrector and tree builder over one input.
#[derive(Debug, Clone)]
pub struct HtmlParser {
    tokenizer: Tokenizer,
}

impl HtmlParser {
    /// Create a parser over `input`.
    #[must_use]
    pub fn new(input: &[u8]) -> Self {
        Self {
            tokenizer: Tokenizer::new(input),
        }
    }

    /// Create a parser that reads all of `reader` up front.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Tokenize`] if reading fails.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ParseError> {
        Ok(Self {
            tokenizer: Tokenizer::from_reader(reader)?,
        })
    }

    /// Parse and return the tree.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::EmptyDocument`] if the input has no start tag.
    pub fn run(self) -> Result<DomTree, ParseError> {
        self.run_with_repairs().map(|(tree, _)| tree)
    }

    /// Parse and return the tree along with every repair the corrector
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::EmptyDocument`] if the input has no start tag.
    pub fn run_with_repairs(self) -> Result<(DomTree, Vec<Repair>), ParseError> {
        let elements: Vec<Element> = self.tokenizer.map(classify).collect();
        let element_count = elements.len();
        let (corrected, repairs) = TagCorrector::new(elements).run_with_repairs();
        let tree = TreeBuilder::new().build(corrected)?;
        debug!(
            "parsed {element_count} elements into {} nodes ({} repairs)",
            tree.len(),
            repairs.len()
        );
        Ok((tree, repairs))
    }
}

/// Parse an HTML document.
///
/// # Errors
///
/// Returns [`ParseError::EmptyDocument`] if the input has no start tag.
pub fn parse(html: &[u8]) -> Result<DomTree, ParseError> {
    HtmlParser::new(html).run()
}

/// Parse an HTML document, also returning the repairs that were applied.
///
/// # Errors
///
/// Returns [`ParseError::EmptyDocument`] if the input has no start tag.
pub fn parse_with_repairs(html: &[u8]) -> Result<(DomTree, Vec<Repair>), ParseError> {
    HtmlParser::new(html).run_with_repairs()
}

/// Read an HTML document from `reader` and parse it.
///
/// # Errors
///
/// Returns [`ParseError::Tokenize`] if reading fails and
/// [`ParseError::EmptyDocument`] if the input has no start tag.
pub fn parse_reader<R: Read>(reader: R) -> Result<DomTree, ParseError> {
    HtmlParser::from_reader(reader)?.run()
}
