//! Upstream error taxonomy.

use thiserror::Error;

/// Errors from the Planning Center upstream layer.
#[derive(Debug, Error)]
pub enum PcoError {
    /// The upstream answered with a non-2xx status. Rendered to clients as a
    /// single gateway failure regardless of the specific upstream code; the
    /// status and raw body are logged where the response is read.
    #[error("Planning Center request failed with status {status}")]
    UpstreamStatus { status: u16 },

    /// Transport-level failure (connect, body read, JSON decode). Propagates
    /// unchanged to the generic error handler.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A built upstream URL was not parseable.
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Client construction failure.
    #[error("invalid Planning Center client configuration: {0}")]
    Configuration(String),
}

/// Result type alias for upstream operations.
pub type PcoResult<T> = Result<T, PcoError>;
