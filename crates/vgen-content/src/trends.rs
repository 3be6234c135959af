//! Trending topic fetch.
//!
//! Pulls the most popular videos from the YouTube Data API as trend signal.
//! Without an API key (or on any failure) a fallback catalog keeps the
//! pipeline running.

use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{ContentError, ContentResult};

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com";

/// Fallback topic catalog used when no trend source is available.
pub const FALLBACK_TOPICS: [&str; 8] = [
    "Mistérios não resolvidos do Brasil",
    "Lendas urbanas brasileiras",
    "Casos criminais famosos",
    "Fenômenos paranormais",
    "História oculta do Brasil",
    "Teorias conspiratórias",
    "Lugares assombrados",
    "Desaparecimentos misteriosos",
];

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
}

/// YouTube trends client.
pub struct TrendsClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl TrendsClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: YOUTUBE_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch up to five trending video titles (region BR, news category).
    pub async fn fetch(&self) -> ContentResult<Vec<String>> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                warn!("YOUTUBE_API_KEY not set, using fallback topics");
                return Ok(fallback_trends());
            }
        };

        let url = format!("{}/youtube/v3/videos", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("chart", "mostPopular"),
                ("regionCode", "BR"),
                ("videoCategoryId", "25"),
                ("maxResults", "10"),
                ("key", api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ContentError::ApiStatus {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let data: VideoListResponse = response.json().await?;
        let trends: Vec<String> = data
            .items
            .into_iter()
            .map(|item| item.snippet.title)
            .take(5)
            .collect();

        info!("Fetched {} trending titles", trends.len());
        Ok(trends)
    }
}

/// The first few fallback topics, used in place of live trends.
fn fallback_trends() -> Vec<String> {
    FALLBACK_TOPICS.iter().take(3).map(|s| s.to_string()).collect()
}

/// Fetch trends, falling back to the catalog on any API failure.
pub async fn fetch_trends(api_key: Option<String>) -> Vec<String> {
    let client = TrendsClient::new(api_key);
    match client.fetch().await {
        Ok(trends) if !trends.is_empty() => trends,
        Ok(_) => fallback_trends(),
        Err(e) => {
            warn!("Trend fetch failed, using fallback topics: {}", e);
            fallback_trends()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_parses_titles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/videos"))
            .and(query_param("chart", "mostPopular"))
            .and(query_param("regionCode", "BR"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {"snippet": {"title": "Tendência 1"}},
                    {"snippet": {"title": "Tendência 2"}}
                ]
            })))
            .mount(&server)
            .await;

        let client = TrendsClient::new(Some("key".into())).with_base_url(server.uri());
        let trends = client.fetch().await.unwrap();
        assert_eq!(trends, vec!["Tendência 1", "Tendência 2"]);
    }

    #[tokio::test]
    async fn test_fetch_without_key_uses_fallback() {
        let client = TrendsClient::new(None);
        let trends = client.fetch().await.unwrap();
        assert_eq!(trends.len(), 3);
        assert_eq!(trends[0], FALLBACK_TOPICS[0]);
    }

    #[tokio::test]
    async fn test_fetch_maps_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/videos"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = TrendsClient::new(Some("key".into())).with_base_url(server.uri());
        let err = client.fetch().await.unwrap_err();
        assert!(matches!(err, ContentError::ApiStatus { status: 403, .. }));
    }
}
