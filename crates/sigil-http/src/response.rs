//! Response framing: status line, headers, body.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::ParseError;
use crate::headers::Headers;

/// Blank line separating the header block from the body.
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Status code of the interim "Continue" response.
const CONTINUE: u16 = 100;

/// Regex to match an HTTP status line and capture its code.
static STATUS_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^HTTP/[0-9]\.[0-9] +([0-9]{3})").unwrap());

/// Structured HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawHttpResponse {
    /// Three-digit status code; `None` only for an empty input.
    pub status_code: Option<u16>,
    /// Headers with lower-cased names.
    pub headers: Headers,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl RawHttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status_code.is_some_and(|code| (200..300).contains(&code))
    }

    /// Body as UTF-8, replacing invalid sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Parse a complete raw response.
///
/// An empty input yields an empty response. When the first status line is
/// `100 Continue`, the remaining bytes are split once more to reach the
/// final response; chained interim responses are not unwrapped further.
///
/// # Errors
///
/// Returns [`ParseError::MissingStatusLine`] if the final header block does
/// not start with a status line.
pub fn parse(raw: &[u8]) -> Result<RawHttpResponse, ParseError> {
    if raw.is_empty() {
        return Ok(RawHttpResponse::default());
    }

    let (mut head, mut body) = split_head(raw);
    let mut lines = header_lines(head);

    if status_code(lines.first().map_or("", String::as_str)) == Some(CONTINUE) {
        debug!("Skipping 100 Continue interim response");
        (head, body) = split_head(body);
        lines = header_lines(head);
    }

    let mut lines = lines.into_iter();
    let status_line = lines.next().unwrap_or_default();
    let code =
        status_code(&status_line).ok_or(ParseError::MissingStatusLine { line: status_line })?;

    let mut headers = Headers::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(": ") {
            headers.insert(name, value);
        }
    }

    debug!(status = code, headers = headers.len(), body_len = body.len(), "Parsed response");

    Ok(RawHttpResponse {
        status_code: Some(code),
        headers,
        body: body.to_vec(),
    })
}

/// Split on the first blank line. Without one, everything is header block.
fn split_head(raw: &[u8]) -> (&[u8], &[u8]) {
    raw.windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR)
        .map_or((raw, &[][..]), |pos| {
            (&raw[..pos], &raw[pos + HEADER_TERMINATOR.len()..])
        })
}

/// Header block as CRLF-separated lines.
fn header_lines(head: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(head)
        .split("\r\n")
        .map(str::to_owned)
        .collect()
}

/// Status code of a status line, if it is one.
fn status_code(line: &str) -> Option<u16> {
    STATUS_LINE_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|code| code.as_str().parse().ok())
}
