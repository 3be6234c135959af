//! Sequential pipeline orchestrator.
//!
//! Runs the six stages in order over one project directory. A stage failure
//! aborts the remaining stages and leaves prior artifacts on disk; the
//! tracking sheet records the failure. Tracking updates are best-effort and
//! never abort a run.

use std::time::Instant;

use tokio::fs;
use tracing::{error, info, warn};

use vgen_content::{GeminiClient, ScriptGenerator};
use vgen_google::{DriveClient, SheetsTracker, TtsClient};
use vgen_images::ImageFetcher;
use vgen_models::{PipelineStage, Project, ScriptKind, TopicIdea, TrackingRow};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::stages;

/// The pipeline orchestrator.
pub struct Pipeline {
    config: PipelineConfig,
    gemini: Option<GeminiClient>,
    tracker: Option<SheetsTracker>,
}

impl Pipeline {
    /// Build a pipeline from the environment. Missing optional services
    /// (Gemini, tracking sheet) degrade gracefully.
    pub fn from_env(config: PipelineConfig) -> Self {
        let gemini = match GeminiClient::from_env() {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Gemini unavailable: {}", e);
                None
            }
        };

        let tracker = match SheetsTracker::from_env() {
            Ok(tracker) => tracker,
            Err(e) => {
                warn!("Tracking sheet unavailable: {}", e);
                None
            }
        };

        Self {
            config,
            gemini,
            tracker,
        }
    }

    /// Run the full pipeline once.
    pub async fn run_once(
        &self,
        topic_override: Option<String>,
        kind: ScriptKind,
    ) -> PipelineResult<()> {
        info!("Starting pipeline run");

        // Stage 1: discover (or take the provided topic)
        let start = Instant::now();
        let (project, topic) = match topic_override {
            Some(title) => {
                info!("Topic provided, skipping trend analysis: {}", title);
                let topic = TopicIdea::from_title(title);
                let project = Project::for_topic(&self.config.output_base_dir, &topic.title);
                fs::create_dir_all(project.root()).await?;
                (project, topic)
            }
            None => {
                let ideas = stages::discover::run(
                    self.gemini.as_ref(),
                    std::env::var("YOUTUBE_API_KEY").ok(),
                )
                .await;
                let topic = ideas.selected_topic.clone();
                let project = Project::for_topic(&self.config.output_base_dir, &topic.title);
                stages::discover::write_artifact(&project, &ideas).await?;
                (project, topic)
            }
        };

        let mut row = TrackingRow::new(&topic.title);
        self.complete_stage(&mut row, PipelineStage::Discover, start).await;

        // Stage 2: script
        let start = Instant::now();
        let generator = ScriptGenerator::new(self.require_gemini()?);
        if let Err(e) =
            stages::script::run(&generator, &project, kind, Some(topic.clone())).await
        {
            self.fail_stage(&mut row, PipelineStage::Script, &e).await;
            return Err(e);
        }
        self.complete_stage(&mut row, PipelineStage::Script, start).await;

        // Stage 3: narration
        let start = Instant::now();
        let narrate_result = async {
            let tts = TtsClient::from_env()?;
            stages::narrate::run(
                &tts,
                &project,
                &self.config.voice,
                self.config.max_segment_parallel,
            )
            .await
        }
        .await;
        if let Err(e) = narrate_result {
            self.fail_stage(&mut row, PipelineStage::Narrate, &e).await;
            return Err(e);
        }
        self.complete_stage(&mut row, PipelineStage::Narrate, start).await;

        // Stage 4: images
        let start = Instant::now();
        let fetcher = ImageFetcher::from_env();
        if let Err(e) = stages::images::run(
            &fetcher,
            &project,
            self.config.image_width,
            self.config.image_height,
        )
        .await
        {
            self.fail_stage(&mut row, PipelineStage::Images, &e).await;
            return Err(e);
        }
        self.complete_stage(&mut row, PipelineStage::Images, start).await;

        // Stage 5: assembly
        let start = Instant::now();
        if let Err(e) = stages::assemble::run(&project, self.config.ffmpeg_timeout_secs).await {
            self.fail_stage(&mut row, PipelineStage::Assemble, &e).await;
            return Err(e);
        }
        self.complete_stage(&mut row, PipelineStage::Assemble, start).await;

        // Stage 6: upload
        let start = Instant::now();
        let upload_result = async {
            let drive = DriveClient::from_env()?;
            stages::upload::run(
                &drive,
                project.root(),
                &project.name(),
                self.config.drive_folder_id.as_deref(),
            )
            .await
        }
        .await;
        match upload_result {
            Ok(manifest) => {
                row.drive_url = Some(manifest.folder_url.clone());
                self.complete_stage(&mut row, PipelineStage::Upload, start).await;
            }
            Err(e) => {
                self.fail_stage(&mut row, PipelineStage::Upload, &e).await;
                return Err(e);
            }
        }

        info!("Pipeline run complete: {}", project.root().display());
        Ok(())
    }

    fn require_gemini(&self) -> PipelineResult<GeminiClient> {
        self.gemini
            .clone()
            .ok_or_else(|| PipelineError::config_error("GEMINI_API_KEY not set"))
    }

    /// Record a completed stage in the tracking row.
    async fn complete_stage(&self, row: &mut TrackingRow, stage: PipelineStage, start: Instant) {
        row.status = stage.completed_status().to_string();
        row.step = stage.as_str().to_string();
        row.duration_secs = Some(start.elapsed().as_secs_f64());
        row.errors = None;
        if let Some(tracker) = &self.tracker {
            tracker.update_best_effort(row).await;
        }
        info!("Stage {}/6 complete: {}", stage.number(), stage);
    }

    /// Record a failed stage in the tracking row.
    async fn fail_stage(&self, row: &mut TrackingRow, stage: PipelineStage, error: &PipelineError) {
        row.status = format!("Failed: {}", stage);
        row.step = stage.as_str().to_string();
        row.errors = Some(error.to_string());
        if let Some(tracker) = &self.tracker {
            tracker.update_best_effort(row).await;
        }
        error!("Stage {}/6 failed ({}): {}", stage.number(), stage, error);
    }
}
