//! Script generation stage.

use tracing::info;

use vgen_content::ScriptGenerator;
use vgen_models::{ContentIdeas, Project, ScriptKind, Segment, TopicIdea, VideoScript};

use crate::artifacts::{read_json, write_json, write_text};
use crate::error::{PipelineError, PipelineResult};

/// Generate the script for the project's topic and write `script.json`,
/// `script.txt`, `teleprompter.txt`, and `segments.json`.
pub async fn run(
    generator: &ScriptGenerator,
    project: &Project,
    kind: ScriptKind,
    topic_override: Option<TopicIdea>,
) -> PipelineResult<(VideoScript, Vec<Segment>)> {
    let topic = match topic_override {
        Some(topic) => topic,
        None => {
            let ideas: ContentIdeas = read_json(&project.content_ideas_file()).await?;
            ideas.selected_topic
        }
    };

    info!("Generating script for: {}", topic.title);
    let (script, segments) = generator.generate(&topic, kind, None).await?;

    if segments.is_empty() {
        return Err(PipelineError::stage_failed(
            "script",
            "generated script produced no segments",
        ));
    }

    write_json(&project.script_json(), &script).await?;
    write_text(&project.script_txt(), &script.to_script_text()).await?;
    write_text(&project.teleprompter_txt(), &script.to_teleprompter_text()).await?;
    write_json(&project.segments_file(), &segments).await?;

    info!(
        "Script '{}' written with {} segments",
        script.title,
        segments.len()
    );
    Ok((script, segments))
}
