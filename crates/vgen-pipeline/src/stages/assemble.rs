//! Video assembly stage.

use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

use vgen_media::{assemble_slideshow, merge_narration, probe_duration, SlideshowConfig};
use vgen_models::{NarrationMetadata, Project, Segment};

use crate::artifacts::read_json;
use crate::error::{PipelineError, PipelineResult};

/// Merge the narration clips and render the final slideshow video.
pub async fn run(project: &Project, ffmpeg_timeout_secs: u64) -> PipelineResult<PathBuf> {
    let segments: Vec<Segment> = read_json(&project.segments_file()).await?;
    let narration: NarrationMetadata = read_json(&project.narration_metadata_file()).await?;

    let durations: HashMap<&str, f64> = narration
        .clips
        .iter()
        .map(|clip| (clip.id.as_str(), clip.duration_secs))
        .collect();

    let mut entries: Vec<(PathBuf, f64)> = Vec::new();
    let mut clips: Vec<PathBuf> = Vec::new();

    for segment in &segments {
        let (Some(audio), Some(image)) = (&segment.audio_file, &segment.image_file) else {
            warn!("Segment {} missing audio or image, skipping", segment.id);
            continue;
        };

        let duration = match durations.get(segment.id.as_str()) {
            Some(&secs) => secs,
            None => probe_duration(audio).await?,
        };

        entries.push((PathBuf::from(image), duration));
        clips.push(PathBuf::from(audio));
    }

    if entries.is_empty() {
        return Err(PipelineError::stage_failed(
            "assemble",
            "no segments with both audio and image",
        ));
    }

    info!("Assembling video from {} segments", entries.len());

    let merged = project.merged_narration();
    merge_narration(&clips, &merged, ffmpeg_timeout_secs).await?;

    let config = SlideshowConfig {
        timeout_secs: ffmpeg_timeout_secs,
        ..SlideshowConfig::default()
    };
    let output = project.final_video();
    assemble_slideshow(&entries, &merged, &output, &config).await?;

    info!("Final video written to {}", output.display());
    Ok(output)
}
