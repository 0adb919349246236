//! Visual pipeline error types.

use thiserror::Error;

use reel_models::RequestError;

pub type VisualsResult<T> = Result<T, VisualsError>;

#[derive(Debug, Error)]
pub enum VisualsError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Source error: {0}")]
    Source(#[from] reel_sources::SourceError),
}

impl VisualsError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Whether the caller sent something the pipeline cannot work with.
    pub fn is_client_error(&self) -> bool {
        matches!(self, VisualsError::InvalidRequest(_))
    }
}
