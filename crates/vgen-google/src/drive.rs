//! Google Drive v3 client.
//!
//! Uploads a project directory into a Drive folder tree: one folder per
//! project, category subfolders (Scripts/Audio/Images/Videos/Data), files
//! routed by extension. Uploads use the resumable protocol: an initiation
//! request carrying the metadata, then a PUT with the bytes.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tokio::fs;
use tracing::{debug, info};

use vgen_models::{SubfolderManifest, UploadManifest, UploadedFile};

use crate::auth::{service_account_from_env, TokenCache, DRIVE_SCOPE};
use crate::error::{GoogleError, GoogleResult};
use crate::mime::{category_for, mime_type_for, FOLDER_CATEGORIES};
use crate::retry::{with_retry, RetryConfig};

const DRIVE_API_BASE: &str = "https://www.googleapis.com";
const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// Subset of the Drive file resource we care about.
#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "webViewLink", default)]
    web_view_link: Option<String>,
    #[serde(default)]
    size: Option<String>,
}

/// Google Drive client.
pub struct DriveClient {
    http: Client,
    tokens: Arc<TokenCache>,
    retry: RetryConfig,
    base_url: String,
}

impl DriveClient {
    /// Create a client over an authenticated token cache.
    pub fn new(tokens: Arc<TokenCache>) -> GoogleResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("vgen-google/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            tokens,
            retry: RetryConfig::from_env(),
            base_url: DRIVE_API_BASE.to_string(),
        })
    }

    /// Create from `GOOGLE_APPLICATION_CREDENTIALS`.
    pub fn from_env() -> GoogleResult<Self> {
        let auth = service_account_from_env()?;
        Self::new(Arc::new(TokenCache::new(auth, &[DRIVE_SCOPE])))
    }

    /// Override the API base URL (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create a folder, returning `(id, webViewLink)`.
    pub async fn create_folder(
        &self,
        name: &str,
        parent: Option<&str>,
    ) -> GoogleResult<(String, String)> {
        let url = format!(
            "{}/drive/v3/files?fields=id,name,webViewLink",
            self.base_url
        );

        let mut metadata = json!({
            "name": name,
            "mimeType": FOLDER_MIME,
        });
        if let Some(parent) = parent {
            metadata["parents"] = json!([parent]);
        }

        let folder: DriveFile = with_retry(&self.retry, "drive_create_folder", || async {
            let response = self.post_json(&url, &metadata).await?;
            Ok(response.json::<DriveFile>().await?)
        })
        .await?;

        info!("Created Drive folder '{}' ({})", name, folder.id);
        Ok((folder.id, folder.web_view_link.unwrap_or_default()))
    }

    /// Upload one file into `folder_id`.
    pub async fn upload_file(
        &self,
        path: &Path,
        folder_id: Option<&str>,
        description: &str,
    ) -> GoogleResult<UploadedFile> {
        if !path.exists() {
            return Err(GoogleError::NotFound(path.display().to_string()));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| GoogleError::request_failed("path has no file name"))?;
        let mime_type = mime_type_for(path);

        let mut metadata = json!({
            "name": file_name,
            "description": description,
        });
        if let Some(folder_id) = folder_id {
            metadata["parents"] = json!([folder_id]);
        }

        let bytes = fs::read(path).await?;
        debug!("Uploading {} ({} bytes)", path.display(), bytes.len());

        let uploaded: DriveFile = with_retry(&self.retry, "drive_upload_file", || {
            let metadata = metadata.clone();
            let bytes = bytes.clone();
            async move {
                let session_url = self.start_resumable_upload(&metadata, mime_type).await?;
                self.put_upload_bytes(&session_url, mime_type, bytes).await
            }
        })
        .await?;

        info!("Uploaded {}", file_name);
        Ok(UploadedFile {
            id: uploaded.id,
            name: if uploaded.name.is_empty() {
                file_name
            } else {
                uploaded.name
            },
            url: uploaded.web_view_link.unwrap_or_default(),
            size: uploaded.size.and_then(|s| s.parse().ok()),
            local_path: path.display().to_string(),
        })
    }

    /// Upload a whole project directory, returning the manifest.
    pub async fn upload_directory(
        &self,
        directory: &Path,
        project_name: &str,
        parent: Option<&str>,
    ) -> GoogleResult<UploadManifest> {
        if !directory.is_dir() {
            return Err(GoogleError::NotFound(directory.display().to_string()));
        }

        let (folder_id, folder_url) = self.create_folder(project_name, parent).await?;
        let mut manifest = UploadManifest::new(project_name, folder_id.clone(), folder_url);

        for category in FOLDER_CATEGORIES {
            let (sub_id, sub_url) = self
                .create_folder(&capitalize(category), Some(&folder_id))
                .await?;
            manifest.subfolders.insert(
                category.to_string(),
                SubfolderManifest {
                    id: sub_id,
                    url: sub_url,
                    files: Vec::new(),
                },
            );
        }

        let description = format!("File from project {}", project_name);
        for path in collect_files(directory).await? {
            let category = category_for(&path);
            let target = manifest.subfolders[category].id.clone();
            let uploaded = self.upload_file(&path, Some(&target), &description).await?;
            manifest.record(category, uploaded);
        }

        info!(
            "Uploaded project '{}': {} files",
            project_name,
            manifest.files.len()
        );
        Ok(manifest)
    }

    /// POST JSON with bearer auth, invalidating the token once on 401.
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> GoogleResult<reqwest::Response> {
        let mut token = self.tokens.get_token().await?;
        let mut response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .json(body)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.tokens.invalidate().await;
            token = self.tokens.get_token().await?;
            response = self
                .http
                .post(url)
                .bearer_auth(&token)
                .json(body)
                .send()
                .await?;
        }

        check_status(response).await
    }

    /// Start a resumable upload session, returning the session URL.
    async fn start_resumable_upload(
        &self,
        metadata: &serde_json::Value,
        mime_type: &str,
    ) -> GoogleResult<String> {
        let url = format!(
            "{}/upload/drive/v3/files?uploadType=resumable&fields=id,name,webViewLink,size",
            self.base_url
        );

        let token = self.tokens.get_token().await?;
        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .header("X-Upload-Content-Type", mime_type)
            .json(metadata)
            .send()
            .await?;
        let response = check_status(response).await?;

        response
            .headers()
            .get("Location")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                GoogleError::invalid_response("resumable upload returned no session URL")
            })
    }

    /// Send the file bytes to the session URL.
    async fn put_upload_bytes(
        &self,
        session_url: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> GoogleResult<DriveFile> {
        let token = self.tokens.get_token().await?;
        let response = self
            .http
            .put(session_url)
            .bearer_auth(&token)
            .header("Content-Type", mime_type)
            .body(bytes)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Map error statuses to `GoogleError`, passing successes through.
async fn check_status(response: reqwest::Response) -> GoogleResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GoogleError::from_http_status(status.as_u16(), body))
}

/// Recursively collect files under `root`, sorted for deterministic upload
/// order.
async fn collect_files(root: &Path) -> GoogleResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut dirs = vec![root.to_path_buf()];

    while let Some(dir) = dirs.pop() {
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                dirs.push(entry.path());
            } else if file_type.is_file() {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    Ok(files)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
