//! Content discovery stage.

use tokio::fs;
use tracing::info;

use vgen_content::{discover, fetch_trends, GeminiClient};
use vgen_models::{ContentIdeas, Project};

use crate::artifacts::write_json;
use crate::error::PipelineResult;

/// Fetch trends and analyze them into content ideas.
///
/// Infallible by design: every source has a fallback, so discovery always
/// yields a topic.
pub async fn run(gemini: Option<&GeminiClient>, youtube_api_key: Option<String>) -> ContentIdeas {
    info!("Discovering trending content");

    let trends = fetch_trends(youtube_api_key).await;
    let ideas = discover(gemini, trends).await;

    info!(
        "Discovery complete, selected topic: {}",
        ideas.selected_topic.title
    );
    ideas
}

/// Write `content_ideas.json` into the project directory.
pub async fn write_artifact(project: &Project, ideas: &ContentIdeas) -> PipelineResult<()> {
    fs::create_dir_all(project.root()).await?;
    write_json(&project.content_ideas_file(), ideas).await
}
