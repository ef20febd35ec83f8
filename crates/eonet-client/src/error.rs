//! Error types for eonet-client.

use thiserror::Error;

/// The one error a caller of [`crate::EonetClient`] ever sees.
#[derive(Debug, Error)]
pub enum EonetError {
    /// Upstream rejected the request with a non-retryable status.
    #[error("EONET request failed ({status}) at {url}")]
    Status { url: String, status: u16 },

    /// Every attempt failed retryably.
    #[error("EONET request failed after {attempts} attempts at {url}: {source}")]
    Exhausted {
        url: String,
        attempts: u32,
        source: AttemptFailure,
    },

    /// Upstream answered successfully but the body is not a JSON object.
    #[error("EONET returned an unreadable body at {url}: {reason}")]
    InvalidBody { url: String, reason: String },

    /// The HTTP client could not be built.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl EonetError {
    /// Upstream URL the failed request targeted, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            EonetError::Status { url, .. }
            | EonetError::Exhausted { url, .. }
            | EonetError::InvalidBody { url, .. } => Some(url),
            EonetError::Config(_) => None,
        }
    }
}

/// Why a single retryable attempt failed.
#[derive(Debug, Error)]
pub enum AttemptFailure {
    /// Upstream answered 429 or 5xx.
    #[error("upstream responded with status {0}")]
    Status(u16),

    /// The attempt exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    /// Any other transport-level failure while sending or reading.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

impl From<reqwest::Error> for AttemptFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AttemptFailure::Timeout(err)
        } else if err.is_connect() {
            AttemptFailure::Connect(err)
        } else {
            AttemptFailure::Transport(err)
        }
    }
}
