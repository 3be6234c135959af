//! Google Cloud Text-to-Speech client.

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use vgen_models::VoiceConfig;

use crate::auth::{service_account_from_env, TokenCache, TTS_SCOPE};
use crate::error::{GoogleError, GoogleResult};
use crate::retry::{with_retry, RetryConfig};

const TTS_API_BASE: &str = "https://texttospeech.googleapis.com";

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct VoiceSelection<'a> {
    #[serde(rename = "languageCode")]
    language_code: &'a str,
    name: &'a str,
    #[serde(rename = "ssmlGender")]
    ssml_gender: &'a str,
}

#[derive(Debug, Serialize)]
struct AudioConfig {
    #[serde(rename = "audioEncoding")]
    audio_encoding: &'static str,
    #[serde(rename = "speakingRate")]
    speaking_rate: f64,
    pitch: f64,
}

#[derive(Debug, Deserialize)]
struct SynthesizeResponse {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

/// Text-to-Speech client.
pub struct TtsClient {
    http: Client,
    tokens: Arc<TokenCache>,
    retry: RetryConfig,
    base_url: String,
}

impl TtsClient {
    /// Create a client over an authenticated token cache.
    pub fn new(tokens: Arc<TokenCache>) -> GoogleResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("vgen-google/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            tokens,
            retry: RetryConfig::from_env(),
            base_url: TTS_API_BASE.to_string(),
        })
    }

    /// Create from `GOOGLE_APPLICATION_CREDENTIALS`.
    pub fn from_env() -> GoogleResult<Self> {
        let auth = service_account_from_env()?;
        Self::new(Arc::new(TokenCache::new(auth, &[TTS_SCOPE])))
    }

    /// Override the API base URL (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Synthesize `text` with the given voice, returning MP3 bytes.
    pub async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> GoogleResult<Vec<u8>> {
        let url = format!("{}/v1/text:synthesize", self.base_url);
        let request = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: &voice.language_code,
                name: &voice.name,
                ssml_gender: &voice.ssml_gender,
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
                speaking_rate: voice.speaking_rate,
                pitch: voice.pitch,
            },
        };

        let response: SynthesizeResponse =
            with_retry(&self.retry, "tts_synthesize", || async {
                let mut token = self.tokens.get_token().await?;
                let mut response = self
                    .http
                    .post(&url)
                    .bearer_auth(&token)
                    .json(&request)
                    .send()
                    .await?;

                if response.status() == StatusCode::UNAUTHORIZED {
                    self.tokens.invalidate().await;
                    token = self.tokens.get_token().await?;
                    response = self
                        .http
                        .post(&url)
                        .bearer_auth(&token)
                        .json(&request)
                        .send()
                        .await?;
                }

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(GoogleError::from_http_status(status.as_u16(), body));
                }

                Ok(response.json().await?)
            })
            .await?;

        let bytes = BASE64
            .decode(response.audio_content.as_bytes())
            .map_err(|e| GoogleError::invalid_response(format!("bad audioContent: {}", e)))?;

        debug!("Synthesized {} chars into {} bytes", text.len(), bytes.len());
        Ok(bytes)
    }
}
