//! Pipeline error types.

use std::path::PathBuf;
use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Missing artifact {0} - run the earlier stages first")]
    MissingArtifact(PathBuf),

    #[error("Stage {stage} failed: {message}")]
    StageFailed { stage: String, message: String },

    #[error("Content error: {0}")]
    Content(#[from] vgen_content::ContentError),

    #[error("Media error: {0}")]
    Media(#[from] vgen_media::MediaError),

    #[error("Image error: {0}")]
    Image(#[from] vgen_images::ImageError),

    #[error("Google API error: {0}")]
    Google(#[from] vgen_google::GoogleError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn stage_failed(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StageFailed {
            stage: stage.into(),
            message: message.into(),
        }
    }
}
