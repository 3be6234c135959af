//! Discovered content ideas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate video topic produced by trend analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicIdea {
    /// Attention-grabbing title
    pub title: String,

    /// Two or three sentence description
    #[serde(default)]
    pub description: String,

    /// Related keywords
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Estimated audience interest (1-10)
    #[serde(default = "default_interest")]
    pub interest_level: u8,
}

fn default_interest() -> u8 {
    5
}

impl TopicIdea {
    /// Create an idea with just a title.
    pub fn from_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            keywords: Vec::new(),
            interest_level: default_interest(),
        }
    }
}

/// Result of the content discovery stage, written to `content_ideas.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentIdeas {
    /// Raw trend titles the analysis was based on
    pub discovered_trends: Vec<String>,

    /// Candidate topics, as returned by the analysis
    pub topics: Vec<TopicIdea>,

    /// The topic chosen for this run (highest interest level)
    pub selected_topic: TopicIdea,

    /// How the ideas were produced ("gemini" or "fallback")
    pub method: String,

    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
}

impl ContentIdeas {
    /// Build the discovery artifact, selecting the highest-interest topic.
    ///
    /// Returns `None` when `topics` is empty.
    pub fn select(
        discovered_trends: Vec<String>,
        topics: Vec<TopicIdea>,
        method: impl Into<String>,
    ) -> Option<Self> {
        let selected_topic = topics.iter().max_by_key(|t| t.interest_level)?.clone();
        Some(Self {
            discovered_trends,
            topics,
            selected_topic,
            method: method.into(),
            generated_at: Utc::now(),
        })
    }
}
