//! Image processing stage.

use tokio::fs;
use tracing::{info, warn};

use vgen_images::{enhance_prompt, ImageFetcher};
use vgen_media::render_placeholder;
use vgen_models::{Project, Segment};

use crate::artifacts::{read_json, write_json, write_text};
use crate::error::{PipelineError, PipelineResult};

/// Fetch (or render) one image per segment, updating `segments.json` with
/// image paths. Returns how many images came from a stock provider.
pub async fn run(
    fetcher: &ImageFetcher,
    project: &Project,
    width: u32,
    height: u32,
) -> PipelineResult<usize> {
    let mut segments: Vec<Segment> = read_json(&project.segments_file()).await?;
    if segments.is_empty() {
        return Err(PipelineError::stage_failed("images", "no segments to illustrate"));
    }

    fs::create_dir_all(project.images_dir()).await?;
    info!("Processing images for {} segments", segments.len());

    let mut fetched = 0;
    for (index, segment) in segments.iter_mut().enumerate() {
        let prompt = enhance_prompt(&segment.effective_image_prompt());
        let image_path = project.segment_image(index);

        match fetcher.fetch(&prompt).await {
            Some(bytes) => {
                fs::write(&image_path, bytes).await?;
                fetched += 1;
            }
            None => {
                warn!("No stock image for segment {}, rendering placeholder", index);
                let bytes = render_placeholder(width, height)?;
                fs::write(&image_path, bytes).await?;
                // Keep the prompt next to the placeholder for later manual
                // replacement
                let prompt_path = project.images_dir().join(format!("prompt_{:02}.txt", index));
                write_text(&prompt_path, &prompt).await?;
            }
        }

        segment.image_file = Some(image_path.display().to_string());
    }

    write_json(&project.segments_file(), &segments).await?;

    info!(
        "Image processing complete: {}/{} from stock providers",
        fetched,
        segments.len()
    );
    Ok(fetched)
}
