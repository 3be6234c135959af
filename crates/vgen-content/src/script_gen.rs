//! Script generation.
//!
//! Prompts Gemini for a timestamped script and turns the raw text into the
//! structured `VideoScript` plus the segment list the downstream stages
//! consume.

use chrono::Utc;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::info;

use vgen_models::{ScriptKind, ScriptSection, Segment, TopicIdea, VideoScript};

use crate::error::{ContentError, ContentResult};
use crate::gemini::GeminiClient;
use crate::parse::{parse_sections, parse_segments};

/// Words too common to be useful as tags (Portuguese output).
const STOP_WORDS: [&str; 24] = [
    "que", "uma", "para", "com", "por", "sobre", "quando", "onde", "como", "seu", "sua", "seus",
    "suas", "este", "esta", "estes", "estas", "muito", "mais", "mas", "porque", "então", "também",
    "ainda",
];

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-záâãêéíóôõúç]{4,}").expect("valid word regex"))
}

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?im)^t[íi]tulo:\s*(.+)$").expect("valid title regex"))
}

/// Script generator over a Gemini client.
pub struct ScriptGenerator {
    gemini: GeminiClient,
}

impl ScriptGenerator {
    pub fn new(gemini: GeminiClient) -> Self {
        Self { gemini }
    }

    /// Generate a script for the topic, returning both the structured
    /// script and its segments.
    pub async fn generate(
        &self,
        topic: &TopicIdea,
        kind: ScriptKind,
        custom_requirements: Option<&str>,
    ) -> ContentResult<(VideoScript, Vec<Segment>)> {
        info!("Generating {} script for: {}", kind, topic.title);

        let prompt = build_prompt(topic, kind, custom_requirements);
        let raw = self.gemini.generate(&prompt).await?;

        let script = parse_script(&raw, &topic.title)?;
        let segments = parse_segments(&raw);

        info!(
            "Script '{}' generated with {} sections",
            script.title,
            script.sections.len()
        );
        Ok((script, segments))
    }
}

/// Build the generation prompt for a topic.
fn build_prompt(topic: &TopicIdea, kind: ScriptKind, custom_requirements: Option<&str>) -> String {
    let structure = match kind {
        ScriptKind::Mystery => {
            "1. [00:00] Opening hook (30s) - spark immediate curiosity\n\
             2. [00:30] Introduction (30s) - present the channel and the topic\n\
             3. [01:00] Development (4-6 minutes) - explore the mystery in detail\n\
             4. [07:00] Climax (1 minute) - the reveal or main theory\n\
             5. [08:00] Conclusion (1 minute) - call to action and sign-off\n\
             Tone: mysterious and intriguing, but accessible."
        }
        ScriptKind::Educational => {
            "1. [00:00] Engaging introduction (45s)\n\
             2. [00:45] The problem or question (1 minute)\n\
             3. [01:45] Detailed explanation (5-6 minutes)\n\
             4. [07:45] Practical examples (1 minute)\n\
             5. [08:45] Summary and next steps (30s)\n\
             Tone: educational but relaxed, with everyday analogies."
        }
        ScriptKind::Entertainment => {
            "1. [00:00] Energetic opening (20s)\n\
             2. [00:20] Topic presentation (40s)\n\
             3. [01:00] Main content (6-7 minutes)\n\
             4. [08:00] Special moment or surprise (1 minute)\n\
             5. [09:00] Goodbye and call to action (30s)\n\
             Tone: relaxed and fun, with constant audience engagement."
        }
    };

    let mut prompt = format!(
        r#"Write a YouTube video script in Brazilian Portuguese about: "{title}"

Description: {description}

REQUIRED STRUCTURE:
{structure}

FORMAT RULES:
- Start every section with a [MM:SS] timestamp.
- Add an image instruction in parentheses where a visual should appear,
  in the form (Imagem: description of the image).
- First line: "TÍTULO: <video title>".
- Natural spoken Brazilian Portuguese throughout.

Example line:
[00:00] Olá, pessoal! Hoje vamos explorar os mistérios do folclore brasileiro. (Imagem: floresta amazônica ao anoitecer)
"#,
        title = topic.title,
        description = topic.description,
        structure = structure,
    );

    if let Some(extra) = custom_requirements {
        prompt.push_str(&format!("\nADDITIONAL REQUIREMENTS:\n{}\n", extra));
    }

    prompt
}

/// Turn raw generated text into a structured script.
fn parse_script(raw: &str, topic_title: &str) -> ContentResult<VideoScript> {
    let mut sections = parse_sections(raw);
    if sections.is_empty() {
        return Err(ContentError::invalid_content(
            "generated script has no timestamped sections",
        ));
    }

    for section in &mut sections {
        section.keywords = section_keywords(&section.content);
    }

    let title = extract_title(raw, topic_title);
    let tags = extract_tags(raw);
    let description = build_description(&sections, topic_title);
    let thumbnail_description = build_thumbnail_description(&title, &sections);
    let total_duration_secs = sections.iter().map(|s| s.duration_secs).sum();

    Ok(VideoScript {
        title,
        description,
        total_duration_secs,
        target_audience: "Jovens e adultos interessados em mistérios e conhecimento".to_string(),
        tags,
        thumbnail_description,
        sections,
        generated_at: Utc::now(),
    })
}

/// Extract the video title: an explicit `TÍTULO:` line, the first line
/// before any timestamp, or a generated fallback.
fn extract_title(raw: &str, topic_title: &str) -> String {
    if let Some(m) = title_re().captures(raw) {
        let title = m[1].trim().to_string();
        if title.len() > 10 {
            return title;
        }
    }

    if let Some(first_line) = raw.trim().lines().next() {
        let first_line = first_line.trim();
        if first_line.len() > 10 && !first_line.starts_with('[') {
            return first_line.to_string();
        }
    }

    format!(
        "O Mistério de {}: Uma História Que Vai Te Surpreender",
        topic_title
    )
}

/// The five most salient words of a section, in order of first occurrence.
fn section_keywords(content: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for m in word_re().find_iter(&content.to_lowercase()) {
        let word = m.as_str().to_string();
        if STOP_WORDS.contains(&word.as_str()) || seen.contains(&word) {
            continue;
        }
        seen.push(word);
        if seen.len() == 5 {
            break;
        }
    }
    seen
}

/// The ten most frequent non-stopword words in the whole script.
fn extract_tags(raw: &str) -> Vec<String> {
    let lower = raw.to_lowercase();
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for m in word_re().find_iter(&lower) {
        let word = m.as_str();
        if !STOP_WORDS.contains(&word) {
            *freq.entry(word).or_insert(0) += 1;
        }
    }

    let mut sorted: Vec<(&str, usize)> = freq.into_iter().collect();
    // Stable tag order for equal frequencies
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted.into_iter().take(10).map(|(w, _)| w.to_string()).collect()
}

/// Video description: chapter list plus channel boilerplate.
fn build_description(sections: &[ScriptSection], topic_title: &str) -> String {
    let mut out = format!("Explore conosco {} neste vídeo fascinante!\n\n", topic_title);
    out.push_str("NESTE VÍDEO:\n");
    for section in sections.iter().take(4) {
        out.push_str(&format!("- {} - {}\n", section.timestamp, section.title));
    }
    out.push_str("\n#mistério #brasil #curiosidades");
    out
}

/// Thumbnail brief from the title and the first section's visual cues.
fn build_thumbnail_description(title: &str, sections: &[ScriptSection]) -> String {
    let mut out = format!("Thumbnail impactante mostrando: {}. ", title);
    if let Some(first) = sections.first() {
        if !first.visual_cues.is_empty() {
            out.push_str(&format!("Elementos visuais: {}. ", first.visual_cues.join(", ")));
        }
    }
    out.push_str("Texto grande e legível.");
    out
}
