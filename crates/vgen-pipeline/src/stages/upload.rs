//! Drive upload stage.

use std::path::Path;
use tracing::info;

use vgen_google::DriveClient;
use vgen_models::{Project, UploadManifest};

use crate::artifacts::{write_json, write_text};
use crate::error::PipelineResult;

/// Upload the project directory to Drive and record `drive_url.txt` and
/// `upload_info.json`.
pub async fn run(
    drive: &DriveClient,
    directory: &Path,
    project_name: &str,
    parent_folder: Option<&str>,
) -> PipelineResult<UploadManifest> {
    info!("Uploading '{}' to Google Drive", project_name);

    let manifest = drive
        .upload_directory(directory, project_name, parent_folder)
        .await?;

    let project = Project::at(directory);
    write_text(&project.drive_url_file(), &manifest.folder_url).await?;
    write_json(&project.upload_info_file(), &manifest).await?;

    info!(
        "Upload complete: {} files, folder {}",
        manifest.files.len(),
        manifest.folder_url
    );
    Ok(manifest)
}
