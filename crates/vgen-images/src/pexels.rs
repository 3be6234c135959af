//! Pexels search client.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ImageError, ImageResult};
use crate::unsplash::download;

const PEXELS_API_BASE: &str = "https://api.pexels.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    src: PhotoSrc,
}

#[derive(Debug, Deserialize)]
struct PhotoSrc {
    large: String,
}

/// Pexels photo search client.
pub struct PexelsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PexelsClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: PEXELS_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Search for one landscape photo and download it.
    pub async fn fetch(&self, query: &str) -> ImageResult<Vec<u8>> {
        let url = format!("{}/v1/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query),
                ("per_page", "1"),
                ("orientation", "landscape"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ImageError::ApiStatus {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let data: SearchResponse = response.json().await.map_err(ImageError::Http)?;
        let photo = data
            .photos
            .first()
            .ok_or_else(|| ImageError::NoResults(query.to_string()))?;

        debug!("Downloading Pexels photo for '{}'", query);
        download(&self.client, &photo.src.large).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_downloads_first_photo() {
        let server = MockServer::start().await;
        let image_url = format!("{}/photo.jpg", server.uri());

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(header("Authorization", "pexels-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "photos": [{"src": {"large": image_url}}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/photo.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"pexels-bytes".to_vec()))
            .mount(&server)
            .await;

        let client = PexelsClient::new("pexels-key").with_base_url(server.uri());
        let bytes = client.fetch("old ruins").await.unwrap();
        assert_eq!(bytes, b"pexels-bytes");
    }
}
