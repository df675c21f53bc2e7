//! Parse real-world HTML and pick nodes out of it.
//!
//! ```
//! let doc = tagsoup::parse(br#"
//!     <table id="proxylisttable">
//!       <tbody>
//!         <tr><td>1.1.1.1</td><td>80</td></tr>
//!         <tr><td>2.2.2.2</td><td>8080</td></tr>
//! "#).unwrap();
//!
//! let rows = doc.find_all(r#"table[id="proxylisttable"].tbody.tr"#).unwrap();
//! assert_eq!(rows.len(), 2);
//! let cells: Vec<&str> = rows[1].children().map(|td| td.content()).collect();
//! assert_eq!(cells, ["2.2.2.2", "8080"]);
//! assert_eq!(doc.repairs().len(), 2); // </tbody> and </table> were missing
//! ```
//!
//! Parsing never rejects malformed markup. Unclosed, misnested and stray
//! tags are repaired and the repairs are kept on the [`Document`].
//!
//! # Features
//!
//! - `json` (default): [`Document::to_json`].

mod document;

pub use document::Document;

pub use tagsoup_dom as dom;
pub use tagsoup_html as html;
pub use tagsoup_query as query;

pub use tagsoup_dom::{DomTree, Node, NodeId, NodeRef};
pub use tagsoup_html::{ParseError, Repair, RepairKind};
pub use tagsoup_query::{FindAll, Query, QueryError, find_all};

/// Parse an HTML document.
///
/// # Errors
///
/// Returns [`ParseError::EmptyDocument`] if the input has no start tag.
pub fn parse(html: &[u8]) -> Result<Document, ParseError> {
    Document::parse(html)
}
