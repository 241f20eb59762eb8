//! Search text normalization.
//!
//! User-typed topics arrive from a form field or a path segment. Both are
//! normalized the same way before they reach the controller, so that
//! `"  new   york "` and `"new york"` are the same search.

use unicode_normalization::UnicodeNormalization;

/// Normalize a user-entered search topic.
///
/// 1. Unicode NFC composition, so precomposed and decomposed accents compare equal
/// 2. Collapse runs of whitespace to a single space
/// 3. Trim
///
/// Case is preserved because the topic is echoed back in the gallery title.
pub fn normalize_topic(s: &str) -> String {
    s.nfc()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Percent-encode a topic for use as a single path segment.
///
/// Spaces become `%20` rather than `+`, which would be taken literally in a path.
pub fn encode_path_segment(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
