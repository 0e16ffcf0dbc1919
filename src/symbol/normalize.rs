//! Key normalization for index construction and queries.
//!
//! Documentation generators escape punctuation inside search keys as `_XX`
//! (two hex digits), so `image_add` is stored as `image_5fadd`. Raw fragment
//! keys are decoded once, at load time, by [`normalize_raw_key`]. Lookup
//! text is only case-folded by [`fold_key`], so a stored key such as
//! `convert_interpolant_to_2d` is never decoded a second time.

/// Decode `_XX` escapes in a raw fragment key and case-fold the result.
///
/// Only escapes that decode to printable ASCII punctuation or a space are
/// expanded; any other `_XX` sequence is kept literally.
pub fn normalize_raw_key(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'_' && i + 2 < bytes.len() {
            if let Some(decoded) = decode_escape(bytes[i + 1], bytes[i + 2]) {
                out.push(decoded);
                i += 3;
                continue;
            }
        }

        // Multi-byte characters are copied whole.
        let ch = raw[i..].chars().next().unwrap_or('\u{fffd}');
        out.extend(ch.to_lowercase());
        i += ch.len_utf8();
    }

    out
}

/// Case-fold lookup text. Idempotent, and a no-op on stored keys.
pub fn fold_key(text: &str) -> String {
    text.to_lowercase()
}

fn decode_escape(hi: u8, lo: u8) -> Option<char> {
    let value = (hex_value(hi)? << 4) | hex_value(lo)?;
    let ch = char::from(value);
    (ch.is_ascii_punctuation() || ch == ' ').then_some(ch)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
