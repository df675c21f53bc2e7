use thiserror::Error;

/// Errors produced while compiling a selector.
///
/// Matching itself never fails; a selector that matches nothing yields an
/// empty result.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The selector is empty after trimming spaces and tabs.
    #[error("empty selector")]
    EmptySelector,

    /// A `.`-separated qualifier is empty.
    #[error("selector contains an empty qualifier")]
    NoValidQualifier,

    /// A predicate names something other than an attribute (ASCII word
    /// characters) or `@content`.
    #[error("invalid attribute name {0:?}")]
    InvalidAttributeName(String),

    /// A predicate operator is not one of `=`, `!=`, `*=`, `!*=`, `%=`.
    #[error("invalid operator {0:?}")]
    InvalidOperator(String),

    /// A character appeared after a predicate's closing quote.
    #[error("unexpected character {0:?} after predicate value")]
    InvalidCharacter(char),

    /// A `%=` value is not a valid regular expression.
    #[error("invalid regex pattern: {0}")]
    InvalidRegexPattern(#[from] regex::Error),
}
