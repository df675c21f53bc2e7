//! Forgiving HTML parser.
//!
//! Parses real-world markup that does not validate against any grammar:
//! unclosed tags, misnested tags, stray closers. The pipeline is
//!
//! 1. [`Tokenizer`]: bytes to raw tag and text tokens.
//! 2. [`classify`]: raw token to typed [`Element`].
//! 3. [`TagCorrector`]: rebalances the whole element sequence so every start
//!    tag has a matching end tag.
//! 4. [`TreeBuilder`]: balanced sequence to a [`DomTree`](tagsoup_dom::DomTree).
//!
//! [`parse`] runs all of it.
//!
//! ```
//! let tree = tagsoup_html::parse(b"<div><p>a</p><span>b</div>").unwrap();
//! let root = tree.root().unwrap();
//! let names: Vec<&str> = root.children().map(|c| c.name()).collect();
//! assert_eq!(names, ["p", "span"]);
//! ```
//!
//! # Not Implemented
//!
//! - HTML5 tree construction (implied `html`/`body`/`tbody` elements)
//! - Raw-text handling for `script` and `style`
//! - Character reference decoding
//! - DOCTYPE and namespaces

/// Tag-balance correction.
pub mod corrector;
/// Element classification and attribute parsing.
pub mod element;
mod error;
/// Parser driver and tree construction.
pub mod parser;
/// HTML output and debug printing.
pub mod serializer;
/// Byte-level tokenizer.
pub mod tokenizer;

pub use corrector::{Repair, RepairKind, TagCorrector, correct};
pub use element::{Element, classify};
pub use error::ParseError;
pub use parser::{HtmlParser, TreeBuilder, parse, parse_reader, parse_with_repairs};
pub use serializer::{print_tree, to_html};
pub use tokenizer::{RawToken, Tokenizer};
