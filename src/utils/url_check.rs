//! Checks applied to submitted URLs beyond `Url::parse`.

/// Returns `true` if `url` contains a control character.
///
/// `Url::parse` silently drops tabs, newlines and other C0 controls, so a
/// string it accepts may still be unusable as a `Location` header. Stored
/// URLs are kept byte-for-byte, which makes this check necessary on input.
pub fn has_control_chars(url: &str) -> bool {
    url.chars().any(char::is_control)
}
