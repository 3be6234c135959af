//! Content generation error types.

use thiserror::Error;

pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Generative API returned {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("No content in generative API response")]
    EmptyResponse,

    #[error("All generative models failed")]
    AllModelsFailed,

    #[error("Failed to parse generated content: {0}")]
    InvalidContent(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContentError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn invalid_content(msg: impl Into<String>) -> Self {
        Self::InvalidContent(msg.into())
    }

    /// Transient failures worth retrying (rate limits, server errors,
    /// network problems). Bad requests and bad credentials are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ContentError::ApiStatus { status, .. } => {
                *status == 429 || (500..=599).contains(status)
            }
            ContentError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(ContentError::ApiStatus {
            status: 429,
            body: String::new()
        }
        .is_retryable());
        assert!(ContentError::ApiStatus {
            status: 503,
            body: String::new()
        }
        .is_retryable());
        assert!(!ContentError::ApiStatus {
            status: 400,
            body: String::new()
        }
        .is_retryable());
        assert!(!ContentError::config_error("missing key").is_retryable());
    }
}
