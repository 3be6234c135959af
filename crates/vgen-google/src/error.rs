//! Google API error types.

use thiserror::Error;

/// Result type for Google API operations.
pub type GoogleResult<T> = Result<T, GoogleError>;

/// Errors that can occur against Google REST APIs.
#[derive(Debug, Error)]
pub enum GoogleError {
    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Server error {0}: {1}")]
    ServerError(u16, String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GoogleError {
    pub fn auth_error(msg: impl Into<String>) -> Self {
        Self::AuthError(msg.into())
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Map an HTTP status to the error variant.
    pub fn from_http_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::AuthError(message),
            403 => Self::PermissionDenied(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimited,
            500..=599 => Self::ServerError(status, message),
            _ => Self::RequestFailed(message),
        }
    }

    /// Check if error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GoogleError::Network(_) | GoogleError::RateLimited | GoogleError::ServerError(_, _)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status_classification() {
        assert!(matches!(
            GoogleError::from_http_status(401, "x"),
            GoogleError::AuthError(_)
        ));
        assert!(matches!(
            GoogleError::from_http_status(403, "x"),
            GoogleError::PermissionDenied(_)
        ));
        assert!(matches!(
            GoogleError::from_http_status(404, "x"),
            GoogleError::NotFound(_)
        ));
        assert!(matches!(
            GoogleError::from_http_status(429, "x"),
            GoogleError::RateLimited
        ));
        assert!(matches!(
            GoogleError::from_http_status(503, "x"),
            GoogleError::ServerError(503, _)
        ));
        assert!(matches!(
            GoogleError::from_http_status(400, "x"),
            GoogleError::RequestFailed(_)
        ));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(GoogleError::RateLimited.is_retryable());
        assert!(GoogleError::ServerError(500, "x".into()).is_retryable());
        assert!(!GoogleError::from_http_status(400, "x").is_retryable());
        assert!(!GoogleError::auth_error("x").is_retryable());
    }
}
