use std::io;

use thiserror::Error;

/// Errors that abort a parse.
///
/// Malformed markup is never an error; the corrector repairs it. A parse
/// only fails when there is nothing to build a tree from.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Reading the input failed.
    #[error("failed to read HTML input: {0}")]
    Tokenize(#[from] io::Error),

    /// The input contains no start tag, so there is no root element.
    #[error("document contains no elements")]
    EmptyDocument,
}
