/// Boundary normalization for user-supplied words.
///
/// Trims surrounding whitespace and rejects words that are empty afterwards.
/// Case is preserved. The CLI and the HTTP API both apply this before calling
/// into a [`Dictionary`](crate::Dictionary); the dictionary itself stores
/// whatever it is given.
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim();
    if word.is_empty() {
        None
    } else {
        Some(word.to_owned())
    }
}
