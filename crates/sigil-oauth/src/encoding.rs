//! RFC 3986 percent-encoding.
//!
//! Everything outside the unreserved set `A-Z a-z 0-9 - . _ ~` is escaped
//! as `%XX` with uppercase hex digits. `~` is never escaped.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// OAuth unreserved characters: A-Z a-z 0-9 - . _ ~
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string per RFC 3986.
pub fn encode(input: &str) -> String {
    utf8_percent_encode(input, UNRESERVED).to_string()
}

/// Decode a percent-encoded string.
///
/// `+` is left as is. Invalid UTF-8 sequences are replaced with U+FFFD.
pub fn decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}

/// Re-encode a value that may already carry mixed encoding.
///
/// The value is form-decoded first (so `+` becomes a space), then encoded
/// per RFC 3986.
pub fn transcode(input: &str) -> String {
    encode(&decode(&input.replace('+', " ")))
}

/// [`encode`] for optional values; `None` passes through.
pub fn encode_opt(input: Option<&str>) -> Option<String> {
    input.map(encode)
}

/// [`decode`] for optional values; `None` passes through.
pub fn decode_opt(input: Option<&str>) -> Option<String> {
    input.map(decode)
}
