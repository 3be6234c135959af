//! Gemini REST client.
//!
//! Thin wrapper over the `generateContent` endpoint with a model fallback
//! list: the first model that answers wins. JSON responses are requested via
//! `responseMimeType` and stripped of markdown code fences before decoding.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ContentError, ContentResult};

/// Default API endpoint.
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Models to try, in order.
const GEMINI_MODELS: [&str; 3] = [
    "gemini-2.5-flash",
    "gemini-2.5-flash-lite",
    "gemini-2.5-pro",
];

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    client: Client,
    base_url: String,
}

/// Gemini API request.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

impl GeminiClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Create a client from `GEMINI_API_KEY`.
    pub fn from_env() -> ContentResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ContentError::config_error("GEMINI_API_KEY not set"))?;
        Ok(Self::new(api_key))
    }

    /// Override the API base URL (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Generate free-form text for a prompt, trying each model in order.
    pub async fn generate(&self, prompt: &str) -> ContentResult<String> {
        self.generate_with_mime(prompt, None).await
    }

    /// Generate a JSON document for a prompt and decode it into `T`.
    pub async fn generate_json<T: DeserializeOwned>(&self, prompt: &str) -> ContentResult<T> {
        let text = self
            .generate_with_mime(prompt, Some("application/json"))
            .await?;
        let text = strip_code_fences(&text);
        serde_json::from_str(text)
            .map_err(|e| ContentError::invalid_content(format!("bad JSON from model: {}", e)))
    }

    async fn generate_with_mime(
        &self,
        prompt: &str,
        response_mime_type: Option<&str>,
    ) -> ContentResult<String> {
        let mut last_error = None;

        for model in GEMINI_MODELS {
            match self.call_model(model, prompt, response_mime_type).await {
                Ok(text) => {
                    info!("Generated content with {}", model);
                    return Ok(text);
                }
                Err(e) => {
                    warn!("Model {} failed: {}", model, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ContentError::AllModelsFailed))
    }

    async fn call_model(
        &self,
        model: &str,
        prompt: &str,
        response_mime_type: Option<&str>,
    ) -> ContentResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: response_mime_type.map(|mime| GenerationConfig {
                response_mime_type: mime.to_string(),
            }),
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::ApiStatus { status, body });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ContentError::EmptyResponse)
    }
}

/// Strip a surrounding markdown code fence from model output.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}
