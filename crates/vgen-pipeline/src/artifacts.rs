//! Project artifact I/O.
//!
//! All stage hand-off goes through JSON/text files in the project
//! directory; re-running a stage overwrites its outputs.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

use crate::error::{PipelineError, PipelineResult};

/// Read a JSON artifact, reporting a missing file as `MissingArtifact`.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> PipelineResult<T> {
    if !path.exists() {
        return Err(PipelineError::MissingArtifact(path.to_path_buf()));
    }
    let bytes = fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Write a JSON artifact (pretty-printed), creating parent directories.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> PipelineResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_vec_pretty(value)?;
    fs::write(path, json).await?;
    Ok(())
}

/// Write a text artifact, creating parent directories.
pub async fn write_text(path: &Path, text: &str) -> PipelineResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, text).await?;
    Ok(())
}
