//! Unsplash search client.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ImageError, ImageResult};

const UNSPLASH_API_BASE: &str = "https://api.unsplash.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

/// Unsplash photo search client.
pub struct UnsplashClient {
    client: Client,
    access_key: String,
    base_url: String,
}

impl UnsplashClient {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            access_key: access_key.into(),
            base_url: UNSPLASH_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Search for one landscape photo and download it.
    pub async fn fetch(&self, query: &str) -> ImageResult<Vec<u8>> {
        let url = format!("{}/search/photos", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Client-ID {}", self.access_key))
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
            .results
            .first()
            .ok_or_else(|| ImageError::NoResults(query.to_string()))?;

        debug!("Downloading Unsplash photo for '{}'", query);
        download(&self.client, &photo.urls.regular).await
    }
}

/// Download an image URL to bytes.
pub(crate) async fn download(client: &Client, url: &str) -> ImageResult<Vec<u8>> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ImageError::ApiStatus {
            status: response.status().as_u16(),
            body: String::new(),
        });
    }
    Ok(response.bytes().await?.to_vec())
}
