//! Lenient byte-to-text decoding with statistical encoding detection

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, REPLACEMENT, UTF_8};

/// Decode raw bytes of unknown provenance into a string.
///
/// Never fails: undecodable sequences become U+FFFD, and UTF-8 is used when
/// detection yields nothing usable.
pub fn decode_text(raw: &[u8]) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let encoding = detect_encoding(raw);
    // `decode` sniffs a BOM first, which overrides the guess
    let (text, used, had_errors) = encoding.decode(raw);
    if had_errors {
        tracing::debug!(
            "Lossy decode of {} bytes as {} (replacement characters inserted)",
            raw.len(),
            used.name()
        );
    }
    text.into_owned()
}

/// Most probable encoding of `raw`, falling back to UTF-8
pub fn detect_encoding(raw: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(raw, true);
    let guess = detector.guess(None, true);
    if guess == REPLACEMENT {
        UTF_8
    } else {
        guess
    }
}
