//! Generated video scripts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of script to generate, selecting the prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKind {
    #[default]
    Mystery,
    Educational,
    Entertainment,
}

impl ScriptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptKind::Mystery => "mystery",
            ScriptKind::Educational => "educational",
            ScriptKind::Entertainment => "entertainment",
        }
    }

    /// Parse a kind name, falling back to `Mystery` for unknown values
    /// (matches the original generator's default).
    pub fn parse_or_default(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "educational" => ScriptKind::Educational,
            "entertainment" => ScriptKind::Entertainment,
            _ => ScriptKind::Mystery,
        }
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One timestamped section of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSection {
    /// Start timestamp (MM:SS)
    pub timestamp: String,

    /// Section heading
    pub title: String,

    /// Narration text
    pub content: String,

    /// Section length in seconds (until the next section starts)
    pub duration_secs: u32,

    /// Keywords extracted from the section text
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Visual cues mentioned in the section
    #[serde(default)]
    pub visual_cues: Vec<String>,
}

/// A complete generated script, written to `script.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoScript {
    /// Video title
    pub title: String,

    /// Video description (with chapter markers and hashtags)
    pub description: String,

    /// Total duration in seconds (sum of section durations)
    pub total_duration_secs: u32,

    /// Intended audience
    pub target_audience: String,

    /// Tags for the video
    pub tags: Vec<String>,

    /// Description of the thumbnail to produce
    pub thumbnail_description: String,

    /// Ordered sections
    pub sections: Vec<ScriptSection>,

    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
}

impl VideoScript {
    /// Total duration formatted as M:SS for display.
    pub fn duration_display(&self) -> String {
        format!(
            "{}:{:02}",
            self.total_duration_secs / 60,
            self.total_duration_secs % 60
        )
    }

    /// Render the human-readable `script.txt` form.
    pub fn to_script_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("TITLE: {}\n", self.title));
        out.push_str(&format!("DURATION: {}\n", self.duration_display()));
        out.push_str(&format!("AUDIENCE: {}\n\n", self.target_audience));
        out.push_str(&"=".repeat(50));
        out.push_str("\nSCRIPT\n");
        out.push_str(&"=".repeat(50));
        out.push_str("\n\n");

        for section in &self.sections {
            out.push_str(&format!("[{}] {}\n", section.timestamp, section.title));
            out.push_str(&format!("Duration: {}s\n", section.duration_secs));
            out.push_str(&"-".repeat(30));
            out.push('\n');
            out.push_str(&section.content);
            out.push_str("\n\n");

            if !section.visual_cues.is_empty() {
                out.push_str(&format!("Visual cues: {}\n", section.visual_cues.join(", ")));
            }
            out.push('\n');
            out.push_str(&"=".repeat(50));
            out.push_str("\n\n");
        }

        out.push_str("VIDEO DESCRIPTION:\n");
        out.push_str(&self.description);
        out.push_str(&format!("\n\nTAGS: {}", self.tags.join(", ")));
        out.push_str(&format!("\n\nTHUMBNAIL: {}\n", self.thumbnail_description));
        out
    }

    /// Render the teleprompter form: timestamps and narration text only.
    pub fn to_teleprompter_text(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(&format!("[{}]\n{}\n\n", section.timestamp, section.content));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_script() -> VideoScript {
        VideoScript {
            title: "The Lost City".into(),
            description: "Explore with us".into(),
            total_duration_secs: 150,
            target_audience: "General".into(),
            tags: vec!["mystery".into(), "history".into()],
            thumbnail_description: "Dramatic jungle ruins".into(),
            sections: vec![
                ScriptSection {
                    timestamp: "00:00".into(),
                    title: "Hook".into(),
                    content: "What if a whole city vanished?".into(),
                    duration_secs: 90,
                    keywords: vec![],
                    visual_cues: vec!["jungle at dusk".into()],
                },
                ScriptSection {
                    timestamp: "01:30".into(),
                    title: "Conclusion".into(),
                    content: "Thanks for watching.".into(),
                    duration_secs: 60,
                    keywords: vec![],
                    visual_cues: vec![],
                },
            ],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_script_kind_parse() {
        assert_eq!(ScriptKind::parse_or_default("educational"), ScriptKind::Educational);
        assert_eq!(ScriptKind::parse_or_default("ENTERTAINMENT"), ScriptKind::Entertainment);
        assert_eq!(ScriptKind::parse_or_default("unknown"), ScriptKind::Mystery);
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(sample_script().duration_display(), "2:30");
    }

    #[test]
    fn test_script_text_contains_sections() {
        let text = sample_script().to_script_text();
        assert!(text.contains("TITLE: The Lost City"));
        assert!(text.contains("[00:00] Hook"));
        assert!(text.contains("Visual cues: jungle at dusk"));
        assert!(text.contains("TAGS: mystery, history"));
    }

    #[test]
    fn test_teleprompter_text() {
        let text = sample_script().to_teleprompter_text();
        assert!(text.starts_with("[00:00]\nWhat if a whole city vanished?"));
        assert!(!text.contains("TITLE"));
    }
}
