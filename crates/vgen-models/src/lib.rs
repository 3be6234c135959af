//! Shared data models for the vgen pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Discovered content ideas and selected topics
//! - Generated scripts and their timestamped sections
//! - Segments (the unit passed between narration, image, and assembly stages)
//! - Narration metadata and upload manifests
//! - Pipeline stages and tracking rows

pub mod ideas;
pub mod manifest;
pub mod narration;
pub mod project;
pub mod script;
pub mod segment;
pub mod timestamp;
pub mod tracking;

// Re-export common types
pub use ideas::{ContentIdeas, TopicIdea};
pub use manifest::{SubfolderManifest, UploadManifest, UploadedFile};
pub use narration::{NarrationClip, NarrationMetadata, VoiceConfig};
pub use project::Project;
pub use script::{ScriptKind, ScriptSection, VideoScript};
pub use segment::Segment;
pub use timestamp::{format_timestamp, parse_timestamp, TimestampError};
pub use tracking::{PipelineStage, TrackingRow, TRACKING_HEADER};
