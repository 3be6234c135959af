//! Pipeline configuration.

use std::path::PathBuf;

use vgen_models::VoiceConfig;

/// Pipeline configuration, environment-driven with defaults.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Base directory for project output directories
    pub output_base_dir: PathBuf,
    /// Parent Drive folder for project uploads
    pub drive_folder_id: Option<String>,
    /// FFmpeg encode timeout in seconds
    pub ffmpeg_timeout_secs: u64,
    /// Concurrent per-segment API calls (narration, images)
    pub max_segment_parallel: usize,
    /// Narration voice
    pub voice: VoiceConfig,
    /// Placeholder/stock image dimensions
    pub image_width: u32,
    pub image_height: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_base_dir: PathBuf::from("output"),
            drive_folder_id: None,
            ffmpeg_timeout_secs: 600,
            max_segment_parallel: 2,
            voice: VoiceConfig::default(),
            image_width: 1280,
            image_height: 720,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            output_base_dir: std::env::var("VGEN_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_base_dir),
            drive_folder_id: std::env::var("DRIVE_FOLDER_ID").ok().filter(|v| !v.is_empty()),
            ffmpeg_timeout_secs: std::env::var("VGEN_FFMPEG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.ffmpeg_timeout_secs),
            max_segment_parallel: std::env::var("VGEN_MAX_SEGMENT_PARALLEL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_segment_parallel)
                .max(1),
            voice: defaults.voice,
            image_width: defaults.image_width,
            image_height: defaults.image_height,
        }
    }
}
