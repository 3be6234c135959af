//! Narration metadata, written alongside the synthesized audio clips.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text-to-speech voice configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// BCP-47 language code
    pub language_code: String,
    /// Voice name
    pub name: String,
    /// SSML gender ("FEMALE", "MALE", "NEUTRAL")
    pub ssml_gender: String,
    /// Speaking rate multiplier
    pub speaking_rate: f64,
    /// Pitch adjustment in semitones
    pub pitch: f64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language_code: "pt-BR".to_string(),
            name: "pt-BR-Neural2-A".to_string(),
            ssml_gender: "FEMALE".to_string(),
            speaking_rate: 1.0,
            pitch: 0.0,
        }
    }
}

/// One synthesized narration clip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrationClip {
    /// Segment id this clip narrates
    pub id: String,
    /// Path to the MP3 file
    pub audio_file: String,
    /// Clip duration in seconds (probed after synthesis)
    pub duration_secs: f64,
    /// Number of characters synthesized
    pub characters: usize,
}

/// Narration stage output, written to `narration_metadata.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrationMetadata {
    /// Voice used for all clips
    pub voice: VoiceConfig,
    /// One entry per segment, in segment order
    pub clips: Vec<NarrationClip>,
    /// Sum of clip durations in seconds
    pub total_duration_secs: f64,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
}

impl NarrationMetadata {
    /// Build metadata from clips, computing the total duration.
    pub fn new(voice: VoiceConfig, clips: Vec<NarrationClip>) -> Self {
        let total_duration_secs = clips.iter().map(|c| c.duration_secs).sum();
        Self {
            voice,
            clips,
            total_duration_secs,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_duration() {
        let meta = NarrationMetadata::new(
            VoiceConfig::default(),
            vec![
                NarrationClip {
                    id: "segment_00".into(),
                    audio_file: "a.mp3".into(),
                    duration_secs: 12.5,
                    characters: 100,
                },
                NarrationClip {
                    id: "segment_01".into(),
                    audio_file: "b.mp3".into(),
                    duration_secs: 7.5,
                    characters: 60,
                },
            ],
        );
        assert!((meta.total_duration_secs - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_voice() {
        let voice = VoiceConfig::default();
        assert_eq!(voice.language_code, "pt-BR");
        assert_eq!(voice.name, "pt-BR-Neural2-A");
    }
}
