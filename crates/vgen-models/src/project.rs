//! Project directory layout.
//!
//! A project is a directory named `{date}_{topic}` holding every artifact of
//! one pipeline run. This type computes paths; stages do the I/O.

use chrono::Local;
use std::path::{Path, PathBuf};

/// A pipeline run's output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Project for today's run of `topic`, under `base_dir`.
    pub fn for_topic(base_dir: impl AsRef<Path>, topic: &str) -> Self {
        let date = Local::now().format("%Y-%m-%d");
        let dir_name = format!("{}_{}", date, topic.replace(' ', "_"));
        Self {
            root: base_dir.as_ref().join(dir_name),
        }
    }

    /// Project rooted at an existing directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory name, used as the Drive folder / project name.
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn content_ideas_file(&self) -> PathBuf {
        self.root.join("content_ideas.json")
    }

    pub fn script_json(&self) -> PathBuf {
        self.root.join("script.json")
    }

    pub fn script_txt(&self) -> PathBuf {
        self.root.join("script.txt")
    }

    pub fn teleprompter_txt(&self) -> PathBuf {
        self.root.join("teleprompter.txt")
    }

    pub fn segments_file(&self) -> PathBuf {
        self.root.join("segments.json")
    }

    pub fn narration_metadata_file(&self) -> PathBuf {
        self.root.join("narration_metadata.json")
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.root.join("assets").join("audio")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join("assets").join("images")
    }

    pub fn final_dir(&self) -> PathBuf {
        self.root.join("final")
    }

    pub fn final_video(&self) -> PathBuf {
        self.final_dir().join("video_final.mp4")
    }

    pub fn merged_narration(&self) -> PathBuf {
        self.audio_dir().join("narration_full.mp3")
    }

    pub fn drive_url_file(&self) -> PathBuf {
        self.root.join("drive_url.txt")
    }

    pub fn upload_info_file(&self) -> PathBuf {
        self.root.join("upload_info.json")
    }

    /// Audio clip path for segment at `index`.
    pub fn segment_audio(&self, index: usize) -> PathBuf {
        self.audio_dir().join(format!("segment_{:02}.mp3", index))
    }

    /// Image path for segment at `index`.
    pub fn segment_image(&self, index: usize) -> PathBuf {
        self.images_dir().join(format!("segment_{:02}.jpg", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_topic_replaces_spaces() {
        let project = Project::for_topic("/tmp/output", "The Lost City");
        let name = project.name();
        assert!(name.ends_with("_The_Lost_City"));
        // YYYY-MM-DD prefix
        assert_eq!(name.as_bytes()[4], b'-');
    }

    #[test]
    fn test_artifact_paths() {
        let project = Project::at("/tmp/output/2026-08-07_Topic");
        assert_eq!(project.name(), "2026-08-07_Topic");
        assert!(project.segments_file().ends_with("segments.json"));
        assert!(project
            .segment_audio(3)
            .ends_with("assets/audio/segment_03.mp3"));
        assert!(project
            .segment_image(0)
            .ends_with("assets/images/segment_00.jpg"));
        assert!(project.final_video().ends_with("final/video_final.mp4"));
    }
}
