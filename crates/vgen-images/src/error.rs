//! Image acquisition error types.

use thiserror::Error;

pub type ImageResult<T> = Result<T, ImageError>;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image API returned {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("No results for query: {0}")]
    NoResults(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ImageError {
    /// Transient failures worth retrying on the next provider.
    pub fn is_retryable(&self) -> bool {
        match self {
            ImageError::ApiStatus { status, .. } => *status == 429 || (500..=599).contains(status),
            ImageError::Http(e) => e.is_timeout() || e.is_connect(),
            ImageError::NoResults(_) => false,
        }
    }
}
