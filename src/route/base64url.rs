//! Unpadded base64url over UTF-8 text.
//!
//! Route segments carry arbitrary text (URLs, JSON bodies) that may contain
//! non-ASCII characters. Text is converted to its UTF-8 bytes before encoding
//! and the decoded bytes must form valid UTF-8 again.

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};

/// Encodes `text` as base64url (`-`/`_` alphabet) without `=` padding.
pub fn encode(text: &str) -> String {
    URL_SAFE_NO_PAD.encode(text.as_bytes())
}

/// Decodes a base64url segment back into text.
///
/// Accepts unpadded or padded input (including a percent-encoded `%3D`
/// padding left behind by a router) and the standard alphabet's `+`.
///
/// # Returns
///
/// `None` if the segment has an impossible length, contains characters
/// outside the alphabet, or does not decode to valid UTF-8.
pub fn decode(segment: &str) -> Option<String> {
    let mut trimmed = segment;
    loop {
        let next = trimmed.trim_end_matches('=');
        let next = next.strip_suffix("%3D").or_else(|| next.strip_suffix("%3d")).unwrap_or(next);
        if next.len() == trimmed.len() {
            break;
        }
        trimmed = next;
    }

    // A single leftover character cannot carry a full byte.
    if trimmed.len() % 4 == 1 {
        return None;
    }

    let mut normalized: String = trimmed
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }

    let bytes = STANDARD.decode(normalized).ok()?;
    String::from_utf8(bytes).ok()
}

/// Like [`decode`], but degrades to an empty string and logs the failure.
pub fn decode_or_empty(segment: &str) -> String {
    decode(segment).unwrap_or_else(|| {
        log::warn!("Discarding undecodable route segment '{}'", segment);
        String::new()
    })
}
