//! Image source error types.

use thiserror::Error;

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source not configured: {0}")]
    NotConfigured(String),

    #[error("{provider} returned {status}: {body}")]
    HttpStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl SourceError {
    pub fn not_configured(msg: impl Into<String>) -> Self {
        Self::NotConfigured(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn http_status(provider: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            provider,
            status,
            body: body.into(),
        }
    }

    /// Check if error is transient (a later call might succeed).
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::Timeout(_) | SourceError::Network(_) => true,
            SourceError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::NotConfigured(_) => "not_configured",
            SourceError::HttpStatus { .. } => "http_status",
            SourceError::InvalidResponse(_) => "invalid_response",
            SourceError::Timeout(_) => "timeout",
            SourceError::Network(_) => "network",
        }
    }
}
