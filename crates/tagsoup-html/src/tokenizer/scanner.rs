use std::io::{self, Read};
use std::iter::FusedIterator;
use std::mem;
use std::sync::LazyLock;

use regex::bytes::Regex;

use super::helpers::trim_set;
use super::token::RawToken;

/// One run of a single whitespace kind.
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\r+|\n+| +|\t+)").expect("WHITESPACE_RUN: hardcoded regex is valid")
});

/// Collapse every run of CR, LF, space and tab into a single space.
///
/// The first pass turns each single-kind run into one space, which can leave
/// adjacent spaces behind (`"\r\n"` becomes two spaces); the second pass
/// collapses those.
#[must_use]
pub fn normalize_whitespace(input: &[u8]) -> Vec<u8> {
    let once = WHITESPACE_RUN.replace_all(input, &b" "[..]);
    WHITESPACE_RUN.replace_all(&once, &b" "[..]).into_owned()
}

/// Splits HTML bytes into raw tag and text tokens.
///
/// The tokenizer is an [`Iterator`] over [`RawToken`]s. It is lazy and
/// single-pass: once exhausted it keeps returning `None`.
///
/// - `<` flushes the pending text run (trimmed of spaces and tabs, dropped if
///   empty) and starts a tag.
/// - `>` closes and emits the tag accumulated so far, delimiters included.
/// - Any other byte extends the tag or the text run, whichever is active.
///
/// Text still pending at end of input is not emitted, and neither is an
/// unterminated tag.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    input: Vec<u8>,
    pos: usize,
    in_tag: bool,
    tag: Vec<u8>,
    text: Vec<u8>,
}

impl Tokenizer {
    /// Create a tokenizer over a whitespace-normalized copy of `input`.
    #[must_use]
    pub fn new(input: &[u8]) -> Self {
        Self {
            input: normalize_whitespace(input),
            pos: 0,
            in_tag: false,
            tag: Vec::with_capacity(512),
            text: Vec::new(),
        }
    }

    /// Read `reader` to the end and tokenize the result.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if reading fails.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut input = Vec::new();
        let _ = reader.read_to_end(&mut input)?;
        Ok(Self::new(&input))
    }

    /// Drain the tokenizer into a vector.
    #[must_use]
    pub fn into_tokens(self) -> Vec<RawToken> {
        self.collect()
    }
}

impl Iterator for Tokenizer {
    type Item = RawToken;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&byte) = self.input.get(self.pos) {
            self.pos += 1;
            match byte {
                b'<' => {
                    let text = mem::take(&mut self.text);
                    self.in_tag = true;
                    self.tag.push(byte);
                    let trimmed = trim_set(&text, b" \t");
                    if !trimmed.is_empty() {
                        return Some(RawToken::new(trimmed.to_vec()));
                    }
                }
                b'>' => {
                    self.in_tag = false;
                    self.tag.push(byte);
                    return Some(RawToken::new(mem::take(&mut self.tag)));
                }
                _ if self.in_tag => self.tag.push(byte),
                _ => self.text.push(byte),
            }
        }
        None
    }
}

impl FusedIterator for Tokenizer {}
