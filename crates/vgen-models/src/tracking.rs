//! Pipeline stages and tracking sheet rows.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Discover,
    Script,
    Narrate,
    Images,
    Assemble,
    Upload,
}

impl PipelineStage {
    /// All stages in execution order.
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::Discover,
        PipelineStage::Script,
        PipelineStage::Narrate,
        PipelineStage::Images,
        PipelineStage::Assemble,
        PipelineStage::Upload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Discover => "discover",
            PipelineStage::Script => "script",
            PipelineStage::Narrate => "narrate",
            PipelineStage::Images => "images",
            PipelineStage::Assemble => "assemble",
            PipelineStage::Upload => "upload",
        }
    }

    /// Status label written to the tracking sheet when the stage completes.
    pub fn completed_status(&self) -> &'static str {
        match self {
            PipelineStage::Discover => "Content discovered",
            PipelineStage::Script => "Script generated",
            PipelineStage::Narrate => "Narration generated",
            PipelineStage::Images => "Images processed",
            PipelineStage::Assemble => "Video assembled",
            PipelineStage::Upload => "Upload complete",
        }
    }

    /// 1-based position in the pipeline.
    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0) + 1
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Header row of the tracking sheet.
pub const TRACKING_HEADER: [&str; 8] = [
    "Date",
    "Topic",
    "Status",
    "Step",
    "Duration (s)",
    "Drive URL",
    "Errors",
    "Timestamp",
];

/// One row of the tracking sheet, keyed by `(date, topic)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRow {
    /// Run date (YYYY-MM-DD)
    pub date: String,
    /// Topic title
    pub topic: String,
    /// Status label
    pub status: String,
    /// Current/last stage name
    pub step: String,
    /// Stage duration in seconds
    pub duration_secs: Option<f64>,
    /// Drive folder URL once uploaded
    pub drive_url: Option<String>,
    /// Error message when a stage failed
    pub errors: Option<String>,
}

impl TrackingRow {
    /// Start a row for today's run of `topic`.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            date: Local::now().format("%Y-%m-%d").to_string(),
            topic: topic.into(),
            status: "Pending".to_string(),
            step: String::new(),
            duration_secs: None,
            drive_url: None,
            errors: None,
        }
    }

    /// Render the row as sheet cell values, in header order. The timestamp
    /// column is stamped at render time.
    pub fn to_values(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.topic.clone(),
            self.status.clone(),
            self.step.clone(),
            self.duration_secs
                .map(|d| format!("{:.1}", d))
                .unwrap_or_default(),
            self.drive_url.clone().unwrap_or_default(),
            self.errors.clone().unwrap_or_default(),
            Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        assert_eq!(PipelineStage::ALL[0], PipelineStage::Discover);
        assert_eq!(PipelineStage::ALL[5], PipelineStage::Upload);
        assert_eq!(PipelineStage::Narrate.number(), 3);
    }

    #[test]
    fn test_completed_status() {
        assert_eq!(PipelineStage::Upload.completed_status(), "Upload complete");
    }

    #[test]
    fn test_row_values_shape() {
        let mut row = TrackingRow::new("The Lost City");
        row.status = "Script generated".into();
        row.step = PipelineStage::Script.as_str().into();
        row.duration_secs = Some(12.34);

        let values = row.to_values();
        assert_eq!(values.len(), TRACKING_HEADER.len());
        assert_eq!(values[1], "The Lost City");
        assert_eq!(values[2], "Script generated");
        assert_eq!(values[4], "12.3");
        assert_eq!(values[5], "");
    }
}
