//! Error types for rs-adaptive-extract.
//!
//! Only the up-front input checks can fail. Everything after a document has
//! been built degrades toward the generic fallback instead of erroring.

/// Error type for pipeline entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The address is not an absolute `http://` or `https://` URL.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The markup was empty or whitespace-only.
    #[error("Markup is empty")]
    EmptyMarkup,

    /// The markup did not produce a usable element tree.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// The page sits behind a login or authentication wall.
    #[error("Page requires authentication ({0})")]
    AuthenticationRequired(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
