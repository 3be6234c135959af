//! Command-line interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Automated video content pipeline.
#[derive(Debug, Parser)]
#[command(name = "vgen", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline: discover, script, narrate, images, assemble,
    /// upload
    Run(RunArgs),

    /// Discover trending topics and select one
    Discover(ProjectArgs),

    /// Generate the script and segments for a project
    Script(ScriptArgs),

    /// Synthesize narration for every segment
    Narrate(ProjectArgs),

    /// Fetch or render one image per segment
    Images(ProjectArgs),

    /// Assemble the final video from images and narration
    Assemble(ProjectArgs),

    /// Upload a project directory to Google Drive
    Upload(UploadArgs),

    /// Tracking sheet management
    Sheet(SheetArgs),

    /// Check tools and credentials
    Check,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Base directory for project output (overrides VGEN_OUTPUT_DIR)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Topic to use, skipping the discovery stage
    #[arg(long)]
    pub topic: Option<String>,

    /// Script kind: mystery, educational, entertainment
    #[arg(long, default_value = "mystery")]
    pub kind: String,

    /// Run daily at 03:00 instead of once now
    #[arg(long)]
    pub schedule: bool,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Project directory
    #[arg(long)]
    pub output_dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct ScriptArgs {
    /// Project directory
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Topic to use instead of the discovery artifact
    #[arg(long)]
    pub topic: Option<String>,

    /// Script kind: mystery, educational, entertainment
    #[arg(long, default_value = "mystery")]
    pub kind: String,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Directory to upload
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Drive folder name for the project
    #[arg(long)]
    pub project_name: String,
}

#[derive(Debug, Args)]
pub struct SheetArgs {
    #[command(subcommand)]
    pub command: SheetCommand,
}

#[derive(Debug, Subcommand)]
pub enum SheetCommand {
    /// Create a new tracking spreadsheet
    Create {
        /// Spreadsheet title
        #[arg(long, default_value = "Video Pipeline Tracking")]
        title: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["vgen", "run", "--topic", "Lost City", "--schedule"])
            .unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.topic.as_deref(), Some("Lost City"));
                assert!(args.schedule);
                assert_eq!(args.kind, "mystery");
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_upload() {
        let cli = Cli::try_parse_from([
            "vgen",
            "upload",
            "--input-dir",
            "/tmp/project",
            "--project-name",
            "My Project",
        ])
        .unwrap();
        match cli.command {
            Command::Upload(args) => {
                assert_eq!(args.input_dir, PathBuf::from("/tmp/project"));
                assert_eq!(args.project_name, "My Project");
            }
            _ => panic!("expected upload"),
        }
    }

    #[test]
    fn test_stage_commands_require_output_dir() {
        assert!(Cli::try_parse_from(["vgen", "narrate"]).is_err());
        assert!(Cli::try_parse_from(["vgen", "narrate", "--output-dir", "/tmp/p"]).is_ok());
    }
}
