//! Text slicing helpers. All lengths are in characters, never bytes.

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// At most `max` characters of `text`, cut back to the last whole word when possible.
pub fn truncate_at_word_boundary(text: &str, max: usize) -> &str {
    let cut = truncate_chars(text, max);
    if cut.len() == text.len() || text[cut.len()..].starts_with(char::is_whitespace) {
        return cut.trim_end();
    }
    match cut.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => cut[..idx].trim_end(),
        _ => cut,
    }
}

/// Split `text` into chunks of at most `words` whitespace-separated words.
pub fn chunk_words(text: &str, words: usize) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    tokens
        .chunks(words.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}
