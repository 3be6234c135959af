//! Trend analysis into candidate video topics.

use serde::Deserialize;
use tracing::{info, warn};

use vgen_models::{ContentIdeas, TopicIdea};

use crate::error::{ContentError, ContentResult};
use crate::gemini::GeminiClient;

#[derive(Debug, Deserialize)]
struct TopicsResponse {
    topics: Vec<TopicIdea>,
}

fn analysis_prompt(trends: &[String]) -> String {
    format!(
        r#"Analyze these currently trending titles: {trends}

Based on them, suggest 3 specific topics for videos about Brazilian mysteries that:
1. Appeal to a Brazilian audience
2. Have viral potential
3. Fit a mysteries channel

Write titles and descriptions in Brazilian Portuguese.

Return ONLY a single JSON object with this schema:
{{
  "topics": [
    {{
      "title": "Attention-grabbing title",
      "description": "Two or three sentences",
      "keywords": ["keyword"],
      "interest_level": 8
    }}
  ]
}}

interest_level is an integer from 1 to 10."#,
        trends = trends.join(", ")
    )
}

/// Analyze trends with Gemini, producing the discovery artifact.
pub async fn analyze_trends(
    gemini: &GeminiClient,
    trends: Vec<String>,
) -> ContentResult<ContentIdeas> {
    let prompt = analysis_prompt(&trends);
    let response: TopicsResponse = gemini.generate_json(&prompt).await?;

    if response.topics.is_empty() {
        return Err(ContentError::invalid_content("analysis returned no topics"));
    }

    info!("Trend analysis produced {} topics", response.topics.len());
    ContentIdeas::select(trends, response.topics, "gemini")
        .ok_or_else(|| ContentError::invalid_content("analysis returned no topics"))
}

/// Built-in ideas used when the generative API is unavailable.
pub fn fallback_ideas(trends: Vec<String>) -> ContentIdeas {
    let topics = vec![
        TopicIdea {
            title: "O Mistério da Cidade Perdida de Z".into(),
            description: "A busca épica do explorador Percy Fawcett pela cidade perdida na \
                          Amazônia que custou sua vida e a de sua expedição."
                .into(),
            keywords: vec![
                "amazonia".into(),
                "cidade perdida".into(),
                "exploração".into(),
            ],
            interest_level: 9,
        },
        TopicIdea {
            title: "O Caso do Bebê Diabo de São Paulo".into(),
            description: "Em 1976, um caso chocou São Paulo: uma criança nasceu com \
                          características estranhas e desapareceu misteriosamente."
                .into(),
            keywords: vec!["são paulo".into(), "paranormal".into(), "mistério urbano".into()],
            interest_level: 8,
        },
        TopicIdea {
            title: "A Maldição do Ouro de Minas Gerais".into(),
            description: "Famílias inteiras desapareceram após encontrar ouro em cavernas. \
                          Coincidência ou maldição ancestral?"
                .into(),
            keywords: vec!["minas gerais".into(), "ouro".into(), "maldição".into()],
            interest_level: 7,
        },
    ];

    ContentIdeas::select(trends, topics, "fallback").expect("fallback topics are non-empty")
}

/// Full discovery: analyze trends with Gemini when available, otherwise use
/// the fallback catalog.
pub async fn discover(gemini: Option<&GeminiClient>, trends: Vec<String>) -> ContentIdeas {
    match gemini {
        Some(client) => match analyze_trends(client, trends.clone()).await {
            Ok(ideas) => ideas,
            Err(e) => {
                warn!("Trend analysis failed, using fallback ideas: {}", e);
                fallback_ideas(trends)
            }
        },
        None => fallback_ideas(trends),
    }
}
