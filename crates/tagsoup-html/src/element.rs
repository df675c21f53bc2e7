//! Element classification.
//!
//! Turns each [`RawToken`] into a typed [`Element`]. Attribute lists are
//! split into raw `key=value` byte strings here; the key/value split itself
//! happens when the tree builder creates a node ([`attributes_to_map`]).

use core::fmt;
use std::mem;

use tagsoup_dom::AttributesMap;

use crate::tokenizer::RawToken;
use crate::tokenizer::helpers::{split_first, trim_set};

/// A classified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// A run of text.
    Content(Vec<u8>),

    /// `<!...>`: the bytes between the delimiters, trimmed of `<`, `>`, `!`
    /// and spaces.
    Comment(Vec<u8>),

    /// A tag from the void set, e.g. `<br>` or `<img src="a.png" />`.
    Void {
        /// Tag name.
        name: Vec<u8>,
        /// Raw attribute strings in source order.
        attributes: Vec<Vec<u8>>,
    },

    /// An opening tag.
    Start {
        /// Tag name.
        name: Vec<u8>,
        /// Raw attribute strings in source order.
        attributes: Vec<Vec<u8>>,
    },

    /// A closing tag.
    End {
        /// Tag name.
        name: Vec<u8>,
    },
}

impl Element {
    /// Create an end tag for `name`.
    #[must_use]
    pub fn end(name: impl Into<Vec<u8>>) -> Self {
        Self::End { name: name.into() }
    }

    /// Create a start tag for `name` with no attributes.
    #[must_use]
    pub fn start(name: impl Into<Vec<u8>>) -> Self {
        Self::Start {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Tag name, or `None` for content and comments.
    #[must_use]
    pub fn name(&self) -> Option<&[u8]> {
        match self {
            Self::Void { name, .. } | Self::Start { name, .. } | Self::End { name } => {
                Some(name.as_slice())
            }
            Self::Content(_) | Self::Comment(_) => None,
        }
    }

    /// Raw attribute strings; empty for anything but void and start tags.
    #[must_use]
    pub fn attributes(&self) -> &[Vec<u8>] {
        match self {
            Self::Void { attributes, .. } | Self::Start { attributes, .. } => attributes.as_slice(),
            Self::Content(_) | Self::Comment(_) | Self::End { .. } => &[],
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content(text) => f.write_str(&String::from_utf8_lossy(text)),
            Self::Comment(text) => write!(f, "<!--{}-->", String::from_utf8_lossy(text)),
            Self::Void { name, .. } => write!(f, "<{} />", String::from_utf8_lossy(name)),
            Self::Start { name, .. } => write!(f, "<{}>", String::from_utf8_lossy(name)),
            Self::End { name } => write!(f, "</{}>", String::from_utf8_lossy(name)),
        }
    }
}

/// Tags that never have content or a closing tag.
///
/// Matching is case-sensitive; `META` is listed because it is common in the
/// wild.
#[must_use]
pub fn is_void_name(name: &[u8]) -> bool {
    matches!(
        name,
        b"area"
            | b"base"
            | b"basefont"
            | b"bgsound"
            | b"br"
            | b"col"
            | b"command"
            | b"embed"
            | b"frame"
            | b"hr"
            | b"image"
            | b"img"
            | b"input"
            | b"isindex"
            | b"keygen"
            | b"link"
            | b"menuitem"
            | b"meta"
            | b"nextid"
            | b"param"
            | b"source"
            | b"track"
            | b"wbr"
            | b"META"
    )
}

/// Classify one raw token.
///
/// Order matters: a token is a comment if its second byte is `!`, otherwise
/// void if its name is in the void set (so `</br>` is void too), otherwise an
/// end tag if its second byte is `/`, otherwise a start tag. A start tag's
/// self-closing slash is dropped. Non-tag tokens and tags without a name
/// become [`Element::Content`].
#[must_use]
pub fn classify(token: RawToken) -> Element {
    if !token.is_tag() {
        return Element::Content(token.into_bytes());
    }
    let bytes = token.as_bytes();

    if bytes.get(1) == Some(&b'!') {
        return Element::Comment(trim_set(bytes, b"<>! ").to_vec());
    }

    let classified = if is_void_tag(bytes) {
        let (name, rest) = split_first(trim_set(bytes, b"<>/ "), b' ');
        Element::Void {
            name: name.to_vec(),
            attributes: rest.map(parse_attribute_list).unwrap_or_default(),
        }
    } else if bytes.get(1) == Some(&b'/') {
        let (name, _) = split_first(trim_set(bytes, b"<>/ "), b' ');
        Element::end(name)
    } else {
        // `<span/>` opens a span; the corrector supplies its end tag.
        let (name, rest) = split_first(trim_set(bytes, b"<>"), b' ');
        let mut attributes = rest.map(parse_attribute_list).unwrap_or_default();
        attributes.retain(|raw| raw.as_slice() != b"/");
        Element::Start {
            name: name.strip_suffix(b"/").unwrap_or(name).to_vec(),
            attributes,
        }
    };

    match classified.name() {
        Some(name) if !name.is_empty() => classified,
        _ => Element::Content(token.into_bytes()),
    }
}

fn is_void_tag(bytes: &[u8]) -> bool {
    let (name, _) = split_first(trim_set(bytes, b"<>/ "), b' ');
    is_void_name(name)
}

/// Split the attribute part of a tag into raw attribute strings.
///
/// Spaces separate attributes unless they are inside double quotes. The
/// quotes stay in the output; [`split_attribute`] strips them.
#[must_use]
pub fn parse_attribute_list(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut attributes = Vec::new();
    let mut current = Vec::with_capacity(64);
    let mut in_quote = false;

    for &byte in trim_set(bytes, b" ") {
        match byte {
            b'"' => {
                in_quote = !in_quote;
                current.push(byte);
            }
            b' ' if !in_quote => {
                if !current.is_empty() {
                    attributes.push(mem::take(&mut current));
                }
            }
            _ => current.push(byte),
        }
    }
    if !current.is_empty() {
        attributes.push(current);
    }
    attributes
}

/// Split a raw attribute into key and value at the first `=`.
///
/// An attribute without `=` is boolean and gets the value `"true"`.
/// Surrounding double quotes are stripped from the value.
#[must_use]
pub fn split_attribute(raw: &[u8]) -> (String, String) {
    let (key, value) = split_first(raw, b'=');
    let key = String::from_utf8_lossy(key).into_owned();
    let value = value.map_or_else(
        || "true".to_string(),
        |v| String::from_utf8_lossy(trim_set(v, b"\"")).into_owned(),
    );
    (key, value)
}

/// Build a node's attribute map. Later duplicates overwrite earlier ones.
#[must_use]
pub fn attributes_to_map(attributes: &[Vec<u8>]) -> AttributesMap {
    attributes.iter().map(|raw| split_attribute(raw)).collect()
}
