//! Error types for normalization.

use thiserror::Error;

/// Errors that can occur while normalizing a payload.
///
/// Malformed fields inside a payload are never errors; only a top-level
/// value that is not a JSON object violates the input contract.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The payload root was not a JSON object.
    #[error("expected a JSON object at the payload root, got {0}")]
    NotAnObject(&'static str),
}
