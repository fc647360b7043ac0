//! Splitting long text into Discord-sized messages.
//!
//! Discord caps a single message at 2000 characters. Relayed text is cut
//! at exactly that boundary, while finished stories are cut one character
//! earlier. Both behaviours are kept as-is.

/// Single-message ceiling of the Discord API.
pub const MESSAGE_LIMIT: usize = 2000;

/// Segment length used when posting an assembled story.
pub const STORY_SEGMENT: usize = MESSAGE_LIMIT - 1;

/// Cuts `text` into consecutive pieces of at most `limit` characters.
/// Counts characters, not bytes, so multi-byte text is never split
/// inside a code point.
pub fn split_chars(text: &str, limit: usize) -> Vec<String> {
    assert!(limit > 0, "chunk limit must be positive");

    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut parts = vec![];
    let mut current = String::new();
    let mut len = 0;
    for c in text.chars() {
        if len == limit {
            parts.push(std::mem::take(&mut current));
            len = 0;
        }
        current.push(c);
        len += 1;
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Splits relayed text (e.g. an AI reply) on 2000-character boundaries.
pub fn split_message(text: &str) -> Vec<String> {
    split_chars(text, MESSAGE_LIMIT)
}

/// Splits an assembled story on 1999-character boundaries.
pub fn split_story(text: &str) -> Vec<String> {
    split_chars(text, STORY_SEGMENT)
}
