//! Error types for response parsing.

/// Error raised when a raw response cannot be structured.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The first header line is not an HTTP status line.
    #[error("malformed response: no status line in {line:?}")]
    MissingStatusLine {
        /// The line found where the status line was expected.
        line: String,
    },
}
