//! Decode failure taxonomy.

use thiserror::Error;

/// Reasons an inbound event cannot become a generic request.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),

    #[error("missing required header {0:?}")]
    MissingHeader(&'static str),

    #[error("invalid header {name:?}")]
    InvalidHeader { name: String },

    #[error("cannot reconstruct request URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("body is not valid base64: {0}")]
    InvalidBody(#[from] base64::DecodeError),
}

impl DecodeError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::InvalidMethod(_) => "invalid_method",
            DecodeError::MissingHeader(_) => "missing_header",
            DecodeError::InvalidHeader { .. } => "invalid_header",
            DecodeError::InvalidUrl { .. } => "invalid_url",
            DecodeError::InvalidBody(_) => "invalid_body",
        }
    }
}
