//! Script text parsing.
//!
//! Generated scripts mark narration chunks with `[MM:SS]` timestamps and
//! optionally carry an image instruction in a `(Imagem: ...)` parenthetical.
//! A timestamped line opens a chunk; following lines accumulate into it
//! until the next timestamp. A line consisting of an image parenthetical
//! contributes its prompt and no text; the last parenthetical in a chunk
//! wins.

use regex::Regex;
use std::sync::OnceLock;

use vgen_models::{ScriptSection, Segment};

fn timestamp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[(\d+):(\d+)\]").expect("valid timestamp regex"))
}

fn image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\(Imagem:?\s*(.*?)\)").expect("valid image regex"))
}

/// One timestamped block of the raw script.
#[derive(Debug, Clone)]
struct Block {
    timestamp: String,
    time_seconds: u32,
    /// Text on the timestamp line (image parenthetical stripped)
    heading: String,
    /// Accumulated body text lines (image-only lines excluded)
    body: Vec<String>,
    /// Image prompts found in the block, in order
    prompts: Vec<String>,
}

/// Split raw script text into timestamped blocks. Lines before the first
/// timestamp are ignored.
fn split_blocks(script: &str) -> Vec<Block> {
    let ts_re = timestamp_re();
    let img_re = image_re();

    let mut blocks: Vec<Block> = Vec::new();

    for line in script.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(m) = ts_re.captures(line) {
            let full = m.get(0).expect("match");
            let minutes: u32 = m[1].parse().unwrap_or(0);
            let seconds: u32 = m[2].parse().unwrap_or(0);

            let raw_heading = line[full.end()..].trim();
            let mut prompts = Vec::new();
            let heading = match img_re.captures(raw_heading) {
                Some(img) => {
                    prompts.push(img[1].trim().to_string());
                    let start = img.get(0).expect("match").start();
                    raw_heading[..start].trim().to_string()
                }
                None => raw_heading.to_string(),
            };

            blocks.push(Block {
                timestamp: format!("{:02}:{:02}", minutes, seconds),
                time_seconds: minutes * 60 + seconds,
                heading,
                body: Vec::new(),
                prompts,
            });
        } else if let Some(block) = blocks.last_mut() {
            if let Some(img) = img_re.captures(line) {
                // Image-instruction line: keep the prompt, drop the text
                block.prompts.push(img[1].trim().to_string());
            } else {
                block.body.push(line.to_string());
            }
        }
    }

    blocks
}

/// Parse a raw script into segments (narration stage input).
pub fn parse_segments(script: &str) -> Vec<Segment> {
    split_blocks(script)
        .into_iter()
        .enumerate()
        .map(|(i, block)| {
            let mut text = block.heading;
            for line in &block.body {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(line);
            }

            Segment {
                id: Segment::id_for(i),
                timestamp: block.timestamp,
                time_seconds: block.time_seconds,
                text,
                image_prompt: block.prompts.last().cloned().unwrap_or_default(),
                image_file: None,
                audio_file: None,
            }
        })
        .collect()
}

/// Default section length when the script gives no following timestamp.
const DEFAULT_SECTION_SECS: u32 = 60;

/// Parse a raw script into sections (script.json view): the timestamp line
/// is the section heading and the body is its content. Durations derive
/// from the gap to the next section.
pub fn parse_sections(script: &str) -> Vec<ScriptSection> {
    let blocks = split_blocks(script);
    let starts: Vec<u32> = blocks.iter().map(|b| b.time_seconds).collect();

    blocks
        .into_iter()
        .enumerate()
        .map(|(i, block)| {
            let duration_secs = match starts.get(i + 1) {
                Some(&next) if next > block.time_seconds => next - block.time_seconds,
                _ => DEFAULT_SECTION_SECS,
            };

            ScriptSection {
                timestamp: block.timestamp,
                title: block.heading,
                content: block.body.join("\n"),
                duration_secs,
                keywords: Vec::new(),
                visual_cues: block.prompts,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[00:00] Olá, pessoal! Hoje vamos explorar mistérios. (Imagem: floresta amazônica ao anoitecer)
Continuamos com mais detalhes do caso.

[00:30] Primeiro Mistério
Hoje vamos explorar o mistério da cidade perdida de Z.
(Imagem: ruínas antigas na selva)

[03:00] Conclusão
Obrigado por assistir nosso vídeo!
"#;

    #[test]
    fn test_parse_segments_basic() {
        let segments = parse_segments(SAMPLE);
        assert_eq!(segments.len(), 3);

        assert_eq!(segments[0].id, "segment_00");
        assert_eq!(segments[0].timestamp, "00:00");
        assert_eq!(segments[0].time_seconds, 0);
        assert_eq!(
            segments[0].text,
            "Olá, pessoal! Hoje vamos explorar mistérios. Continuamos com mais detalhes do caso."
        );
        assert_eq!(segments[0].image_prompt, "floresta amazônica ao anoitecer");

        assert_eq!(segments[1].timestamp, "00:30");
        assert_eq!(segments[1].time_seconds, 30);
        assert_eq!(segments[1].image_prompt, "ruínas antigas na selva");
        // The image-instruction line contributes no narration text
        assert_eq!(
            segments[1].text,
            "Primeiro Mistério Hoje vamos explorar o mistério da cidade perdida de Z."
        );

        assert_eq!(segments[2].time_seconds, 180);
        assert_eq!(segments[2].image_prompt, "");
    }

    #[test]
    fn test_parse_segments_ignores_preamble() {
        let segments = parse_segments("Intro text without timestamp\n[01:00] Real start");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].time_seconds, 60);
        assert_eq!(segments[0].text, "Real start");
    }

    #[test]
    fn test_parse_segments_last_prompt_wins() {
        let script = "[00:00] Texto (Imagem: primeira)\n(Imagem: segunda)";
        let segments = parse_segments(script);
        assert_eq!(segments[0].image_prompt, "segunda");
        assert_eq!(segments[0].text, "Texto");
    }

    #[test]
    fn test_parse_segments_case_insensitive_prompt() {
        let segments = parse_segments("[00:00] Cena (imagem floresta escura)");
        assert_eq!(segments[0].image_prompt, "floresta escura");
    }

    #[test]
    fn test_parse_segments_empty_script() {
        assert!(parse_segments("").is_empty());
        assert!(parse_segments("no timestamps here").is_empty());
    }

    #[test]
    fn test_parse_sections_titles_and_durations() {
        let sections = parse_sections(SAMPLE);
        assert_eq!(sections.len(), 3);

        assert_eq!(sections[1].title, "Primeiro Mistério");
        assert_eq!(sections[1].timestamp, "00:30");
        assert_eq!(
            sections[1].content,
            "Hoje vamos explorar o mistério da cidade perdida de Z."
        );
        assert_eq!(sections[1].visual_cues, vec!["ruínas antigas na selva"]);

        // 00:00 -> 00:30 -> 03:00, last defaults to 60
        assert_eq!(sections[0].duration_secs, 30);
        assert_eq!(sections[1].duration_secs, 150);
        assert_eq!(sections[2].duration_secs, 60);
    }

    #[test]
    fn test_parse_sections_out_of_order_timestamps() {
        let sections = parse_sections("[02:00] A\ntext\n[01:00] B\ntext");
        assert_eq!(sections[0].duration_secs, 60);
    }
}
