//! Raw HTTP response parsing.
//!
//! Turns the bytes a transport received (status line, headers, blank line,
//! body) into a [`RawHttpResponse`]. A single leading `100 Continue`
//! interim response is skipped.
//!
//! ```ignore
//! let response = sigil_http::parse(b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhello")?;
//! assert_eq!(response.status_code, Some(200));
//! assert_eq!(response.headers.get("Content-Type"), Some("text/plain"));
//! ```

mod error;
mod headers;
mod response;

pub use error::ParseError;
pub use headers::Headers;
pub use response::{RawHttpResponse, parse};
