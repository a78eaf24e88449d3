//! Error types for the typed fetch client.
//!
//! # Design
//! Every failure a `fetch` can produce maps to one variant. `is_retryable`
//! splits them into transient failures (transport, status, decode), which the
//! retry loop absorbs until the attempt budget runs out, and configuration
//! mistakes (bad URL or base URL, bad header, unserializable body, zero attempts), which
//! fail on the first try because repeating them cannot change the outcome.

/// Errors returned by `FetchClient` and the endpoint/environment helpers.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The endpoint path could not be resolved against the base URL.
    #[error("invalid URL: cannot resolve {path:?} against {base:?}: {source}")]
    InvalidUrl {
        base: String,
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// An environment's base URL is not an absolute URL.
    #[error("invalid base URL {base:?}: {source}")]
    InvalidBaseUrl {
        base: String,
        #[source]
        source: url::ParseError,
    },

    /// A header name or value is not valid HTTP.
    #[error("invalid header {name:?}")]
    InvalidHeader { name: String },

    /// The underlying HTTP stack failed (DNS, connect, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body does not match the expected shape.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A retry policy was built with a zero attempt budget.
    #[error("attempts must be at least 1, got {0}")]
    InvalidAttempts(u32),
}

impl FetchError {
    /// Wrap any transport-layer error.
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        FetchError::Transport(err.into())
    }

    /// Whether another attempt could succeed where this one failed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FetchError::Transport(_) | FetchError::Status { .. } | FetchError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::transport(err)
    }
}

/// Convenience `Result` alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FetchError>;
