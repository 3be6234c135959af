//! Stage hand-off through the project directory.
//!
//! Exercises the file-based contract between stages without external
//! services: Gemini is mocked, image providers are absent (placeholder
//! path), and ffmpeg-dependent stages are covered by their input checks.

use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vgen_content::{GeminiClient, ScriptGenerator};
use vgen_images::ImageFetcher;
use vgen_models::{Project, ScriptKind, Segment, TopicIdea};
use vgen_pipeline::stages;

const RAW_SCRIPT: &str = "TÍTULO: O Segredo da Serra\n\
    [00:00] Olá, pessoal! Este é o começo. (Imagem: serra ao amanhecer)\n\
    [00:30] O mistério continua aqui.\n\
    (Imagem: trilha na mata fechada)\n\
    [01:00] Até a próxima!";

async fn mock_gemini(server: &MockServer, text: &str) {
    let body = serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": text}]}}]
    });
    Mock::given(method("POST"))
        .and(path_regex(r":generateContent$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn script_stage_writes_all_artifacts() {
    let server = MockServer::start().await;
    mock_gemini(&server, RAW_SCRIPT).await;

    let dir = tempfile::tempdir().unwrap();
    let project = Project::at(dir.path());
    let generator = ScriptGenerator::new(GeminiClient::new("key").with_base_url(server.uri()));

    let (script, segments) = stages::script::run(
        &generator,
        &project,
        ScriptKind::Mystery,
        Some(TopicIdea::from_title("Serra do Roncador")),
    )
    .await
    .unwrap();

    assert_eq!(script.title, "O Segredo da Serra");
    assert_eq!(segments.len(), 3);

    for artifact in [
        project.script_json(),
        project.script_txt(),
        project.teleprompter_txt(),
        project.segments_file(),
    ] {
        assert!(artifact.exists(), "missing {}", artifact.display());
    }

    let stored: Vec<Segment> =
        serde_json::from_slice(&std::fs::read(project.segments_file()).unwrap()).unwrap();
    assert_eq!(stored[0].image_prompt, "serra ao amanhecer");
    assert_eq!(stored[1].image_prompt, "trilha na mata fechada");
    assert!(stored[0].audio_file.is_none());
}

#[tokio::test]
async fn images_stage_renders_placeholders_without_providers() {
    let server = MockServer::start().await;
    mock_gemini(&server, RAW_SCRIPT).await;

    let dir = tempfile::tempdir().unwrap();
    let project = Project::at(dir.path());
    let generator = ScriptGenerator::new(GeminiClient::new("key").with_base_url(server.uri()));
    stages::script::run(
        &generator,
        &project,
        ScriptKind::Mystery,
        Some(TopicIdea::from_title("Serra")),
    )
    .await
    .unwrap();

    let fetcher = ImageFetcher::new(None, None);
    let fetched = stages::images::run(&fetcher, &project, 320, 180).await.unwrap();
    assert_eq!(fetched, 0);

    let stored: Vec<Segment> =
        serde_json::from_slice(&std::fs::read(project.segments_file()).unwrap()).unwrap();
    for (index, segment) in stored.iter().enumerate() {
        let image = segment.image_file.as_ref().expect("image recorded");
        assert!(std::path::Path::new(image).exists());
        // Placeholder prompts are kept as sidecar files
        assert!(project
            .images_dir()
            .join(format!("prompt_{:02}.txt", index))
            .exists());
    }
}

#[tokio::test]
async fn images_stage_requires_segments_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let project = Project::at(dir.path());
    let fetcher = ImageFetcher::new(None, None);

    let err = stages::images::run(&fetcher, &project, 320, 180)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("segments.json"));
}

#[tokio::test]
async fn assemble_stage_requires_narration_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let project = Project::at(dir.path());
    std::fs::write(project.segments_file(), "[]").unwrap();

    let err = stages::assemble::run(&project, 10).await.unwrap_err();
    assert!(err.to_string().contains("narration_metadata.json"));
}
