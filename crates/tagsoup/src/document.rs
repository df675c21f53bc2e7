use std::io::Read;

use tagsoup_dom::{DomTree, NodeRef};
use tagsoup_html::{HtmlParser, ParseError, Repair};
use tagsoup_query::{Query, QueryError};

/// A parsed document: the node tree plus the repairs made to get it.
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    repairs: Vec<Repair>,
}

impl Document {
    /// Parse an HTML document.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::EmptyDocument`] if the input has no start tag.
    pub fn parse(html: &[u8]) -> Result<Self, ParseError> {
        Self::from_parser(HtmlParser::new(html))
    }

    /// Read an HTML document from `reader` and parse it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Tokenize`] if reading fails and
    /// [`ParseError::EmptyDocument`] if the input has no start tag.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ParseError> {
        Self::from_parser(HtmlParser::from_reader(reader)?)
    }

    fn from_parser(parser: HtmlParser) -> Result<Self, ParseError> {
        let (tree, repairs) = parser.run_with_repairs()?;
        Ok(Self { tree, repairs })
    }

    /// The root element: the first start tag in the source. Always `Some`
    /// for a parsed document.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.tree.root()
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Repairs the corrector applied, in input order. Empty for well-formed
    /// markup.
    #[must_use]
    pub fn repairs(&self) -> &[Repair] {
        &self.repairs
    }

    /// Run `selector` against the descendants of the root.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] if the selector does not compile.
    pub fn find_all(&self, selector: &str) -> Result<Vec<NodeRef<'_>>, QueryError> {
        let query = Query::compile(selector)?;
        Ok(self.select(&query))
    }

    /// Run a compiled query against the descendants of the root.
    #[must_use]
    pub fn select(&self, query: &Query) -> Vec<NodeRef<'_>> {
        self.root().map(|root| query.find_all(root)).unwrap_or_default()
    }

    /// Serialize the tree back to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.root().map(tagsoup_html::to_html).unwrap_or_default()
    }

    /// Render the tree as JSON: nested objects with `name`, `attributes`,
    /// `content` and `children`. An empty tree renders as `null`.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error if rendering fails.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.root())
    }

    /// Consume the document, returning its tree.
    #[must_use]
    pub fn into_tree(self) -> DomTree {
        self.tree
    }
}
