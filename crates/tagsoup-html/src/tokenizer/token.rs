use core::fmt;

/// A raw token: either a complete tag (`<` ... `>`) or a run of text.
///
/// Tokens are owned copies; a text run may not be contiguous in the input
/// because a stray `>` inside text is emitted as its own token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken(Vec<u8>);

impl RawToken {
    /// Wrap raw bytes.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The token's bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the token, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// True if the token starts with `<` and ends with `>`.
    #[must_use]
    pub fn is_tag(&self) -> bool {
        self.0.len() >= 2 && self.0.first() == Some(&b'<') && self.0.last() == Some(&b'>')
    }
}

impl fmt::Display for RawToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}
