//! Service account authentication and token caching.
//!
//! Provides a thread-safe, async-aware token cache with:
//! - Refresh margin to avoid token expiry during requests
//! - Single-flight pattern to prevent thundering herd on refresh
//! - Graceful fallback to the existing valid token on refresh failure

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{GoogleError, GoogleResult};

/// Refresh margin: refresh the token 60 seconds before expiry.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Conservative token TTL when expiry is unknown (50 minutes).
const TOKEN_DEFAULT_TTL: Duration = Duration::from_secs(50 * 60);

/// OAuth scope for Drive uploads (per-file access).
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

/// OAuth scope for the tracking spreadsheet.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// OAuth scope for Cloud Text-to-Speech.
pub const TTS_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Load the service account named by `GOOGLE_APPLICATION_CREDENTIALS`.
pub fn service_account_from_env() -> GoogleResult<Arc<dyn TokenProvider>> {
    let service_account = CustomServiceAccount::from_env().map_err(|e| {
        GoogleError::auth_error(format!("Failed to load service account: {}", e))
    })?;

    match service_account {
        Some(sa) => Ok(Arc::new(sa)),
        None => Err(GoogleError::auth_error(
            "GOOGLE_APPLICATION_CREDENTIALS not set. \
             Set it to the path of your service account JSON file.",
        )),
    }
}

/// Cached token with expiration tracking.
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    /// Check if token is still valid with refresh margin.
    fn is_valid(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_MARGIN < self.expires_at
    }

    /// Check if token is technically still usable (even if refresh is needed).
    fn is_usable(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

enum TokenSource {
    Provider(Arc<dyn TokenProvider>),
    /// Fixed token, for tests and local experiments.
    Fixed(String),
}

/// Thread-safe token cache with single-flight refresh, scoped to one API.
pub struct TokenCache {
    source: TokenSource,
    scopes: &'static [&'static str],
    cache: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    /// Create a new token cache over a provider for the given scopes.
    pub fn new(auth: Arc<dyn TokenProvider>, scopes: &'static [&'static str]) -> Self {
        Self {
            source: TokenSource::Provider(auth),
            scopes,
            cache: RwLock::new(None),
        }
    }

    /// Cache that always yields a fixed token (tests).
    pub fn fixed(token: impl Into<String>) -> Self {
        Self {
            source: TokenSource::Fixed(token.into()),
            scopes: &[],
            cache: RwLock::new(None),
        }
    }

    /// Invalidate the cached token.
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        *cache = None;
    }

    /// Get a valid access token, refreshing if necessary.
    pub async fn get_token(&self) -> GoogleResult<String> {
        if let TokenSource::Fixed(token) = &self.source {
            return Ok(token.clone());
        }

        // Fast path: check read lock first
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        // Slow path: acquire write lock and refresh
        let mut cache = self.cache.write().await;

        // Double-check: another task may have refreshed while we waited
        if let Some(cached) = cache.as_ref() {
            if cached.is_valid() {
                return Ok(cached.access_token.clone());
            }
        }

        self.refresh_token(&mut cache).await
    }

    /// Refresh the token, updating the cache.
    async fn refresh_token(&self, cache: &mut Option<CachedToken>) -> GoogleResult<String> {
        let auth = match &self.source {
            TokenSource::Provider(auth) => auth,
            TokenSource::Fixed(token) => return Ok(token.clone()),
        };

        match auth.token(self.scopes).await {
            Ok(token) => {
                let access_token = token.as_str().to_string();

                // Prefer the real expiry from gcp_auth, fall back to a
                // conservative default.
                let expires_at = {
                    let now = Utc::now();
                    let exp = token.expires_at();

                    if exp > now {
                        match (exp - now).to_std() {
                            Ok(ttl) => Instant::now() + ttl,
                            Err(_) => Instant::now() + TOKEN_DEFAULT_TTL,
                        }
                    } else {
                        // Already-expired tokens get a near-immediate expiry
                        // so the next request forces a refresh.
                        Instant::now()
                    }
                };

                *cache = Some(CachedToken {
                    access_token: access_token.clone(),
                    expires_at,
                });

                debug!("Refreshed Google auth token for {:?}", self.scopes);
                Ok(access_token)
            }
            Err(e) => {
                // On refresh failure, check if the existing token is usable
                if let Some(cached) = cache.as_ref() {
                    if cached.is_usable() {
                        warn!("Token refresh failed, using existing token: {}", e);
                        return Ok(cached.access_token.clone());
                    }
                }

                Err(GoogleError::auth_error(format!(
                    "Failed to obtain auth token: {}",
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_margin() {
        assert_eq!(TOKEN_REFRESH_MARGIN, Duration::from_secs(60));
        assert_eq!(TOKEN_DEFAULT_TTL, Duration::from_secs(50 * 60));
    }

    #[test]
    fn test_scopes() {
        assert!(DRIVE_SCOPE.contains("drive.file"));
        assert!(SHEETS_SCOPE.contains("spreadsheets"));
    }

    #[tokio::test]
    async fn test_fixed_token() {
        let cache = TokenCache::fixed("test-token");
        assert_eq!(cache.get_token().await.unwrap(), "test-token");
        cache.invalidate().await;
        assert_eq!(cache.get_token().await.unwrap(), "test-token");
    }
}
