//! Selector language for tagsoup trees.
//!
//! A selector is a `.`-separated chain of qualifiers. Each qualifier names
//! a tag and optionally filters on attributes or text:
//!
//! | selector                                     | selects                                              |
//! |----------------------------------------------|------------------------------------------------------|
//! | `div`                                        | every `div`                                          |
//! | `div[align="center"]`                        | `div`s whose `align` is `center`                     |
//! | `font[@content*="Make Model"]`               | `font`s whose own text contains `Make Model`         |
//! | `span[class="inline-hed" & @content*="code"]`| both conditions hold                                 |
//! | `div[id="app" \| class*="bb"]`               | either condition holds                               |
//! | `table[id="list"].tbody.tr`                  | `tr` children of `tbody` children of that table      |
//! | `a[href%="^https://"]`                       | `href` matches the regex                             |
//!
//! ```
//! use tagsoup_query::FindAll;
//!
//! let tree = tagsoup_html::parse(br#"<ul><li class="a">1</li><li>2</li></ul>"#).unwrap();
//! let items = tree.root().unwrap().find_all(r#"li[class="a"]"#).unwrap();
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0].content(), "1");
//! ```

/// Selector compilation.
pub mod compiler;
mod error;
/// Tree search.
pub mod matcher;

pub use compiler::{CONTENT_SELECTOR, Condition, Operator, Query};
pub use error::QueryError;
pub use matcher::{FindAll, find_all};
