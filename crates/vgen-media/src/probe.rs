//! FFprobe media information.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Media file information from the container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Duration in seconds
    pub duration: f64,
    /// File size in bytes
    pub size: u64,
    /// Bitrate in bits/second
    pub bitrate: u64,
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    size: Option<String>,
    bit_rate: Option<String>,
}

/// Probe a media file (audio or video) for container information.
pub async fn probe_media(path: impl AsRef<Path>) -> MediaResult<MediaInfo> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args(["-v", "quiet", "-print_format", "json", "-show_format"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::FfprobeFailed {
            message: format!("FFprobe failed for {}", path.display()),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        });
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;

    let duration = probe
        .format
        .duration
        .as_ref()
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    let size = probe
        .format
        .size
        .as_ref()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    let bitrate = probe
        .format
        .bit_rate
        .as_ref()
        .and_then(|b| b.parse::<u64>().ok())
        .unwrap_or(0);

    Ok(MediaInfo {
        duration,
        size,
        bitrate,
    })
}

/// Probe just the duration of a media file, in seconds.
pub async fn probe_duration(path: impl AsRef<Path>) -> MediaResult<f64> {
    Ok(probe_media(path).await?.duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_missing_file() {
        let result = probe_media("/nonexistent/file.mp3").await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }

    #[test]
    fn test_ffprobe_output_parsing() {
        let json = r#"{"format": {"duration": "12.480000", "size": "199000", "bit_rate": "128000"}}"#;
        let parsed: FfprobeOutput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.format.duration.as_deref(), Some("12.480000"));
        assert_eq!(parsed.format.size.as_deref(), Some("199000"));
    }

    #[test]
    fn test_ffprobe_output_missing_fields() {
        let parsed: FfprobeOutput = serde_json::from_str(r#"{"format": {}}"#).unwrap();
        assert!(parsed.format.duration.is_none());
        assert!(parsed.format.bit_rate.is_none());
    }
}
