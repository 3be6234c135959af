//! Narration merging and slideshow assembly.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Encoding configuration for the final video.
#[derive(Debug, Clone)]
pub struct SlideshowConfig {
    /// Output frame rate
    pub fps: u32,
    /// Video codec
    pub video_codec: String,
    /// Audio codec
    pub audio_codec: String,
    /// Pixel format (yuv420p for player compatibility)
    pub pixel_format: String,
    /// Encode timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            fps: 24,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            pixel_format: "yuv420p".to_string(),
            timeout_secs: 600,
        }
    }
}

/// Merge narration clips into a single audio track.
///
/// Uses the FFmpeg concat audio filter so clips with differing encoder
/// parameters still join cleanly, re-encoding to MP3 at 192k.
pub async fn merge_narration(
    clips: &[PathBuf],
    output: impl AsRef<Path>,
    timeout_secs: u64,
) -> MediaResult<()> {
    let output = output.as_ref();

    if clips.is_empty() {
        return Err(MediaError::no_input("no narration clips to merge"));
    }
    for clip in clips {
        if !clip.exists() {
            return Err(MediaError::FileNotFound(clip.clone()));
        }
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut filter = String::new();
    for i in 0..clips.len() {
        filter.push_str(&format!("[{}:a]", i));
    }
    filter.push_str(&format!("concat=n={}:v=0:a=1[outa]", clips.len()));

    let mut cmd = FfmpegCommand::new(output);
    for clip in clips {
        cmd = cmd.input(clip);
    }
    let cmd = cmd
        .filter_complex(filter)
        .map("[outa]")
        .audio_codec("libmp3lame")
        .audio_bitrate("192k");

    FfmpegRunner::new().with_timeout(timeout_secs).run(&cmd).await?;

    info!("Merged {} narration clips into {}", clips.len(), output.display());
    Ok(())
}

/// Render a concat-demuxer list for images with per-image durations.
///
/// The final entry is repeated without a duration: the demuxer ignores the
/// last `duration` directive otherwise.
pub fn render_concat_list(entries: &[(PathBuf, f64)]) -> String {
    let mut out = String::new();
    for (path, duration) in entries {
        out.push_str(&format!("file '{}'\n", escape_concat_path(path)));
        out.push_str(&format!("duration {:.3}\n", duration));
    }
    if let Some((last, _)) = entries.last() {
        out.push_str(&format!("file '{}'\n", escape_concat_path(last)));
    }
    out
}

/// Escape a path for a single-quoted concat list entry.
fn escape_concat_path(path: &Path) -> String {
    path.to_string_lossy().replace('\'', "'\\''")
}

/// Assemble the final video: one image per segment, shown for that
/// segment's narration duration, over the merged narration track.
pub async fn assemble_slideshow(
    images: &[(PathBuf, f64)],
    audio: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &SlideshowConfig,
) -> MediaResult<()> {
    let audio = audio.as_ref();
    let output = output.as_ref();

    if images.is_empty() {
        return Err(MediaError::no_input("no images to assemble"));
    }
    for (image, _) in images {
        if !image.exists() {
            return Err(MediaError::FileNotFound(image.clone()));
        }
    }
    if !audio.exists() {
        return Err(MediaError::FileNotFound(audio.to_path_buf()));
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).await?;
    }

    let list_file = output.with_extension("images.txt");
    fs::write(&list_file, render_concat_list(images)).await?;

    let cmd = FfmpegCommand::new(output)
        .input_with_args(["-f", "concat", "-safe", "0"], &list_file)
        .input(audio)
        .video_codec(&config.video_codec)
        .audio_codec(&config.audio_codec)
        .pixel_format(&config.pixel_format)
        .output_args(["-r".to_string(), config.fps.to_string()])
        .shortest();

    let result = FfmpegRunner::new()
        .with_timeout(config.timeout_secs)
        .run(&cmd)
        .await;

    let _ = fs::remove_file(&list_file).await;
    result?;

    info!(
        "Assembled {} images into {}",
        images.len(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_concat_list() {
        let entries = vec![
            (PathBuf::from("/tmp/a.jpg"), 5.0),
            (PathBuf::from("/tmp/b.jpg"), 7.25),
        ];
        let list = render_concat_list(&entries);
        let lines: Vec<&str> = list.lines().collect();
        assert_eq!(
            lines,
            vec![
                "file '/tmp/a.jpg'",
                "duration 5.000",
                "file '/tmp/b.jpg'",
                "duration 7.250",
                "file '/tmp/b.jpg'",
            ]
        );
    }

    #[test]
    fn test_render_concat_list_escapes_quotes() {
        let entries = vec![(PathBuf::from("/tmp/it's.jpg"), 1.0)];
        let list = render_concat_list(&entries);
        assert!(list.contains("file '/tmp/it'\\''s.jpg'"));
    }

    #[test]
    fn test_render_concat_list_empty() {
        assert_eq!(render_concat_list(&[]), "");
    }

    #[tokio::test]
    async fn test_merge_narration_requires_clips() {
        let result = merge_narration(&[], "/tmp/out.mp3", 10).await;
        assert!(matches!(result, Err(MediaError::NoInput(_))));
    }

    #[tokio::test]
    async fn test_assemble_requires_existing_images() {
        let images = vec![(PathBuf::from("/nonexistent/a.jpg"), 5.0)];
        let result =
            assemble_slideshow(&images, "/tmp/a.mp3", "/tmp/out.mp4", &SlideshowConfig::default())
                .await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }
}
