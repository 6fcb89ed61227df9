//! Byte-input decoding.
//!
//! Fetch collaborators sometimes hand over raw bytes instead of text. The
//! declared charset is sniffed from the document head and the bytes are
//! decoded with `encoding_rs`; anything undeclared or unknown is UTF-8.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Bytes of the document head inspected for a charset declaration.
const SNIFF_WINDOW: usize = 1024;

/// `<meta charset=...>` and `<meta http-equiv=... content="...; charset=...">`.
#[allow(clippy::expect_used)]
static DECLARED_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?([A-Za-z0-9_\-:.]+)"#)
        .expect("DECLARED_CHARSET regex")
});

/// Charset label declared in the document head, if any.
#[must_use]
pub fn declared_charset(bytes: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(SNIFF_WINDOW)]);

    DECLARED_CHARSET
        .captures(&head)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
}

/// Encoding to decode `bytes` with.
#[must_use]
pub fn sniff_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    declared_charset(bytes)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode raw markup bytes to a string, replacing invalid sequences.
///
/// # Example
///
/// ```rust
/// use rs_adaptive_extract::encoding::decode_markup;
///
/// let markup = decode_markup(b"<html><body><p>caf\xe9</p></body></html>");
/// assert!(markup.contains("caf"));
/// ```
#[must_use]
pub fn decode_markup(bytes: &[u8]) -> String {
    let encoding = sniff_encoding(bytes);
    let (decoded, used, had_errors) = encoding.decode(bytes);

    if had_errors {
        tracing::debug!(encoding = used.name(), "markup contained undecodable bytes");
    }

    match decoded {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => text,
    }
}
