//! Segments: the unit of work passed between pipeline stages.

use serde::{Deserialize, Serialize};

/// One timestamped chunk of the script, progressively enriched by the
/// narration and image stages. Array order in `segments.json` is
/// presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Stable identifier ("segment_00", "segment_01", ...)
    pub id: String,

    /// Start timestamp (MM:SS)
    pub timestamp: String,

    /// Start time in seconds
    pub time_seconds: u32,

    /// Narration text (image parenthetical stripped)
    pub text: String,

    /// Prompt for the segment's image; empty when the script gave none
    #[serde(default)]
    pub image_prompt: String,

    /// Path to the segment's image, set by the image stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_file: Option<String>,

    /// Path to the segment's narration clip, set by the narration stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
}

impl Segment {
    /// Build the id for segment at `index`.
    pub fn id_for(index: usize) -> String {
        format!("segment_{:02}", index)
    }

    /// The image prompt to use: the script's own, or one derived from the
    /// segment text when the script gave none.
    pub fn effective_image_prompt(&self) -> String {
        let prompt = self.image_prompt.trim();
        if !prompt.is_empty() {
            return prompt.to_string();
        }
        let text: String = self.text.chars().take(50).collect();
        format!("Visual for: {}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_for() {
        assert_eq!(Segment::id_for(0), "segment_00");
        assert_eq!(Segment::id_for(12), "segment_12");
    }

    #[test]
    fn test_effective_image_prompt() {
        let mut segment = Segment {
            id: "segment_00".into(),
            timestamp: "00:00".into(),
            time_seconds: 0,
            text: "A long-lost expedition into the Amazon".into(),
            image_prompt: "rainforest at dawn".into(),
            image_file: None,
            audio_file: None,
        };
        assert_eq!(segment.effective_image_prompt(), "rainforest at dawn");

        segment.image_prompt.clear();
        assert_eq!(
            segment.effective_image_prompt(),
            "Visual for: A long-lost expedition into the Amazon"
        );
    }

    #[test]
    fn test_optional_fields_omitted() {
        let segment = Segment {
            id: "segment_00".into(),
            timestamp: "00:00".into(),
            time_seconds: 0,
            text: "text".into(),
            image_prompt: String::new(),
            image_file: None,
            audio_file: None,
        };
        let json = serde_json::to_string(&segment).unwrap();
        assert!(!json.contains("image_file"));
        assert!(!json.contains("audio_file"));
    }
}
