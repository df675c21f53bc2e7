//! Byte-level tokenizer.
//!
//! Splits a (whitespace-normalized) byte buffer into tag tokens (`<...>`) and
//! trimmed text runs. The tokenizer knows nothing about tag names or
//! attributes; that is the classifier's job.

/// Byte-slice helpers shared by the tokenizer and the classifier.
pub mod helpers;
/// The scanning state machine.
pub mod scanner;
/// Raw token type produced by the scanner.
pub mod token;

pub use scanner::{Tokenizer, normalize_whitespace};
pub use token::RawToken;
