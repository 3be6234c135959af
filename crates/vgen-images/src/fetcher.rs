//! Provider-chain image fetch.

use tracing::warn;

use crate::pexels::PexelsClient;
use crate::unsplash::UnsplashClient;

/// Enhance a segment prompt for image search.
pub fn enhance_prompt(prompt: &str) -> String {
    format!("High quality, cinematic, 4K: {}", prompt)
}

/// Fetches one image per query, trying configured providers in order.
pub struct ImageFetcher {
    unsplash: Option<UnsplashClient>,
    pexels: Option<PexelsClient>,
}

impl ImageFetcher {
    pub fn new(unsplash: Option<UnsplashClient>, pexels: Option<PexelsClient>) -> Self {
        Self { unsplash, pexels }
    }

    /// Build from `UNSPLASH_API_KEY` / `PEXELS_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            unsplash: std::env::var("UNSPLASH_API_KEY").ok().map(UnsplashClient::new),
            pexels: std::env::var("PEXELS_API_KEY").ok().map(PexelsClient::new),
        }
    }

    /// Whether any provider is configured.
    pub fn has_provider(&self) -> bool {
        self.unsplash.is_some() || self.pexels.is_some()
    }

    /// Fetch an image for the query. Returns `None` when every configured
    /// provider fails or none is configured; the caller renders a
    /// placeholder in that case.
    pub async fn fetch(&self, query: &str) -> Option<Vec<u8>> {
        if let Some(unsplash) = &self.unsplash {
            match unsplash.fetch(query).await {
                Ok(bytes) => return Some(bytes),
                Err(e) => warn!("Unsplash failed for '{}': {}", query, e),
            }
        }

        if let Some(pexels) = &self.pexels {
            match pexels.fetch(query).await {
                Ok(bytes) => return Some(bytes),
                Err(e) => warn!("Pexels failed for '{}': {}", query, e),
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_enhance_prompt() {
        assert_eq!(
            enhance_prompt("ruínas antigas"),
            "High quality, cinematic, 4K: ruínas antigas"
        );
    }

    #[tokio::test]
    async fn test_fetch_without_providers() {
        let fetcher = ImageFetcher::new(None, None);
        assert!(!fetcher.has_provider());
        assert!(fetcher.fetch("anything").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_falls_back_to_pexels() {
        let server = MockServer::start().await;
        let image_url = format!("{}/photo.jpg", server.uri());

        // Unsplash errors out
        Mock::given(method("GET"))
            .and(path("/search/photos"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        // Pexels answers
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "photos": [{"src": {"large": image_url}}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/photo.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".to_vec()))
            .mount(&server)
            .await;

        let fetcher = ImageFetcher::new(
            Some(UnsplashClient::new("u").with_base_url(server.uri())),
            Some(PexelsClient::new("p").with_base_url(server.uri())),
        );
        assert_eq!(fetcher.fetch("query").await.unwrap(), b"img");
    }
}
