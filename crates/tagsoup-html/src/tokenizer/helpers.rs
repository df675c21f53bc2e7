//! Helper functions over raw byte slices.

/// Strip every leading and trailing byte contained in `set`.
#[must_use]
pub fn trim_set<'a>(bytes: &'a [u8], set: &[u8]) -> &'a [u8] {
    let start = bytes
        .iter()
        .position(|b| !set.contains(b))
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !set.contains(b))
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Split at the first occurrence of `separator`.
///
/// Returns the part before the separator and, if the separator was found,
/// everything after it.
#[must_use]
pub fn split_first(bytes: &[u8], separator: u8) -> (&[u8], Option<&[u8]>) {
    match bytes.iter().position(|&b| b == separator) {
        Some(i) => (&bytes[..i], Some(&bytes[i + 1..])),
        None => (bytes, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_set_strips_both_ends() {
        assert_eq!(trim_set(b"</br />", b"<>/ "), b"br");
        assert_eq!(trim_set(b"  a b  ", b" "), b"a b");
    }

    #[test]
    fn trim_set_of_only_stripped_bytes_is_empty() {
        assert_eq!(trim_set(b"<<>>", b"<>"), b"");
        assert_eq!(trim_set(b"", b"<>"), b"");
    }

    #[test]
    fn split_first_keeps_later_separators() {
        assert_eq!(
            split_first(b"href=a=b", b'='),
            (&b"href"[..], Some(&b"a=b"[..]))
        );
        assert_eq!(split_first(b"checked", b'='), (&b"checked"[..], None));
    }
}
