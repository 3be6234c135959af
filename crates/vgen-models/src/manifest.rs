//! Upload manifest, written once after the Drive upload completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Drive file id
    pub id: String,
    /// File name
    pub name: String,
    /// Shareable webViewLink
    pub url: String,
    /// Size in bytes, when Drive reported it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Local path the file was uploaded from
    pub local_path: String,
}

/// A created subfolder and the files routed into it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubfolderManifest {
    /// Drive folder id
    pub id: String,
    /// Shareable folder URL
    pub url: String,
    /// Files uploaded into this subfolder
    #[serde(default)]
    pub files: Vec<UploadedFile>,
}

/// Record of a completed project upload, written to `upload_info.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadManifest {
    /// Project name (Drive folder name)
    pub project_name: String,
    /// Drive id of the project folder
    pub folder_id: String,
    /// Shareable URL of the project folder (also written to `drive_url.txt`)
    pub folder_url: String,
    /// Subfolders keyed by category name
    pub subfolders: BTreeMap<String, SubfolderManifest>,
    /// Every uploaded file, across all subfolders
    pub files: Vec<UploadedFile>,
    /// Upload completion timestamp
    pub uploaded_at: DateTime<Utc>,
}

impl UploadManifest {
    pub fn new(
        project_name: impl Into<String>,
        folder_id: impl Into<String>,
        folder_url: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            folder_id: folder_id.into(),
            folder_url: folder_url.into(),
            subfolders: BTreeMap::new(),
            files: Vec::new(),
            uploaded_at: Utc::now(),
        }
    }

    /// Record a file uploaded into `category`.
    pub fn record(&mut self, category: &str, file: UploadedFile) {
        if let Some(sub) = self.subfolders.get_mut(category) {
            sub.files.push(file.clone());
        }
        self.files.push(file);
    }
}
