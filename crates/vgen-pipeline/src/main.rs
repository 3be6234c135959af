//! `vgen` binary: the content pipeline CLI.

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vgen_content::{GeminiClient, ScriptGenerator};
use vgen_google::{
    service_account_from_env, DriveClient, SheetsTracker, TokenCache, TtsClient, SHEETS_SCOPE,
};
use vgen_images::ImageFetcher;
use vgen_models::{Project, ScriptKind, TopicIdea};
use vgen_pipeline::cli::{Cli, Command, SheetCommand};
use vgen_pipeline::{check, schedule, stages, Pipeline, PipelineConfig, PipelineResult};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let cli = Cli::parse();
    if let Err(e) = dispatch(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> PipelineResult<()> {
    match cli.command {
        Command::Run(args) => {
            let mut config = PipelineConfig::from_env();
            if let Some(dir) = args.output_dir {
                config.output_base_dir = dir;
            }
            let kind = ScriptKind::parse_or_default(&args.kind);
            let pipeline = Pipeline::from_env(config);

            if args.schedule {
                info!("Schedule mode: running daily at {:02}:00", schedule::RUN_HOUR);
                schedule::run_daily(|| {
                    let topic = args.topic.clone();
                    let pipeline = &pipeline;
                    async move {
                        if let Err(e) = pipeline.run_once(topic, kind).await {
                            error!("Scheduled run failed: {}", e);
                        }
                    }
                })
                .await;
                Ok(())
            } else {
                pipeline.run_once(args.topic, kind).await
            }
        }

        Command::Discover(args) => {
            let gemini = GeminiClient::from_env().ok();
            let ideas =
                stages::discover::run(gemini.as_ref(), std::env::var("YOUTUBE_API_KEY").ok())
                    .await;
            let project = Project::at(args.output_dir);
            stages::discover::write_artifact(&project, &ideas).await?;
            println!("Selected topic: {}", ideas.selected_topic.title);
            Ok(())
        }

        Command::Script(args) => {
            let generator = ScriptGenerator::new(GeminiClient::from_env()?);
            let project = Project::at(args.output_dir);
            let kind = ScriptKind::parse_or_default(&args.kind);
            let topic = args.topic.map(TopicIdea::from_title);
            let (script, segments) = stages::script::run(&generator, &project, kind, topic).await?;
            println!("Script '{}' with {} segments", script.title, segments.len());
            Ok(())
        }

        Command::Narrate(args) => {
            let config = PipelineConfig::from_env();
            let tts = TtsClient::from_env()?;
            let project = Project::at(args.output_dir);
            let metadata =
                stages::narrate::run(&tts, &project, &config.voice, config.max_segment_parallel)
                    .await?;
            println!(
                "Narration: {} clips, {:.1}s total",
                metadata.clips.len(),
                metadata.total_duration_secs
            );
            Ok(())
        }

        Command::Images(args) => {
            let config = PipelineConfig::from_env();
            let fetcher = ImageFetcher::from_env();
            let project = Project::at(args.output_dir);
            let fetched = stages::images::run(
                &fetcher,
                &project,
                config.image_width,
                config.image_height,
            )
            .await?;
            println!("Images processed ({} from stock providers)", fetched);
            Ok(())
        }

        Command::Assemble(args) => {
            let config = PipelineConfig::from_env();
            let project = Project::at(args.output_dir);
            let output = stages::assemble::run(&project, config.ffmpeg_timeout_secs).await?;
            println!("Video assembled: {}", output.display());
            Ok(())
        }

        Command::Upload(args) => {
            let config = PipelineConfig::from_env();
            let drive = DriveClient::from_env()?;
            let manifest = stages::upload::run(
                &drive,
                &args.input_dir,
                &args.project_name,
                config.drive_folder_id.as_deref(),
            )
            .await?;
            println!("Uploaded {} files", manifest.files.len());
            println!("Folder: {}", manifest.folder_url);
            Ok(())
        }

        Command::Sheet(args) => match args.command {
            SheetCommand::Create { title } => {
                let auth = service_account_from_env()?;
                let tokens = Arc::new(TokenCache::new(auth, &[SHEETS_SCOPE]));
                let id = SheetsTracker::create_tracking_sheet(tokens, None, &title).await?;
                println!("Created tracking spreadsheet: {}", id);
                println!("Add SHEETS_TRACKING_ID={} to your .env", id);
                Ok(())
            }
        },

        Command::Check => {
            let items = check::run_checks();
            print!("{}", check::report(&items));
            if !check::all_required_ok(&items) {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
