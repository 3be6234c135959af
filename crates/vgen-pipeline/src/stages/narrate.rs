//! Narration stage.

use futures::stream::{self, StreamExt, TryStreamExt};
use tokio::fs;
use tracing::info;

use vgen_google::TtsClient;
use vgen_media::probe_duration;
use vgen_models::{NarrationClip, NarrationMetadata, Project, Segment, VoiceConfig};

use crate::artifacts::{read_json, write_json};
use crate::error::{PipelineError, PipelineResult};

/// Synthesize one narration clip per segment and write
/// `narration_metadata.json`, updating `segments.json` with audio paths.
pub async fn run(
    tts: &TtsClient,
    project: &Project,
    voice: &VoiceConfig,
    max_parallel: usize,
) -> PipelineResult<NarrationMetadata> {
    let mut segments: Vec<Segment> = read_json(&project.segments_file()).await?;
    if segments.is_empty() {
        return Err(PipelineError::stage_failed("narrate", "no segments to narrate"));
    }

    fs::create_dir_all(project.audio_dir()).await?;
    info!("Synthesizing narration for {} segments", segments.len());

    let clips: Vec<NarrationClip> = stream::iter(segments.iter().enumerate().map(
        |(index, segment)| {
            let audio_path = project.segment_audio(index);
            async move {
                let bytes = tts.synthesize(&segment.text, voice).await?;
                fs::write(&audio_path, &bytes).await?;
                let duration_secs = probe_duration(&audio_path).await?;

                Ok::<_, PipelineError>(NarrationClip {
                    id: segment.id.clone(),
                    audio_file: audio_path.display().to_string(),
                    duration_secs,
                    characters: segment.text.chars().count(),
                })
            }
        },
    ))
    .buffered(max_parallel.max(1))
    .try_collect()
    .await?;

    for (index, segment) in segments.iter_mut().enumerate() {
        segment.audio_file = Some(clips[index].audio_file.clone());
    }
    write_json(&project.segments_file(), &segments).await?;

    let metadata = NarrationMetadata::new(voice.clone(), clips);
    write_json(&project.narration_metadata_file(), &metadata).await?;

    info!(
        "Narration complete: {} clips, {:.1}s total",
        metadata.clips.len(),
        metadata.total_duration_secs
    );
    Ok(metadata)
}
