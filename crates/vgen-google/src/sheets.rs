//! Google Sheets v4 tracking client.
//!
//! The tracking sheet is a crude status store for pipeline runs: one row per
//! `(date, topic)`, updated after every stage. Rows are found by scanning
//! columns A:B and appended at the first free row when no match exists.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use vgen_models::{TrackingRow, TRACKING_HEADER};

use crate::auth::{service_account_from_env, TokenCache, SHEETS_SCOPE};
use crate::error::{GoogleError, GoogleResult};
use crate::retry::{with_retry, RetryConfig};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Sheet tab holding the pipeline rows.
const SHEET_NAME: &str = "Pipeline";

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct CreatedSpreadsheet {
    #[serde(rename = "spreadsheetId")]
    spreadsheet_id: String,
}

/// Tracking sheet client.
pub struct SheetsTracker {
    http: Client,
    tokens: Arc<TokenCache>,
    retry: RetryConfig,
    base_url: String,
    spreadsheet_id: String,
}

impl SheetsTracker {
    /// Create a tracker for an existing spreadsheet.
    pub fn new(tokens: Arc<TokenCache>, spreadsheet_id: impl Into<String>) -> GoogleResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("vgen-google/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            tokens,
            retry: RetryConfig::from_env(),
            base_url: SHEETS_API_BASE.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
        })
    }

    /// Create from `SHEETS_TRACKING_ID` and `GOOGLE_APPLICATION_CREDENTIALS`.
    /// Returns `None` when no tracking sheet is configured.
    pub fn from_env() -> GoogleResult<Option<Self>> {
        let spreadsheet_id = match std::env::var("SHEETS_TRACKING_ID") {
            Ok(id) if !id.is_empty() => id,
            _ => return Ok(None),
        };
        let auth = service_account_from_env()?;
        let tokens = Arc::new(TokenCache::new(auth, &[SHEETS_SCOPE]));
        Ok(Some(Self::new(tokens, spreadsheet_id)?))
    }

    /// Override the API base URL (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Spreadsheet this tracker writes to.
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Write a tracking row, updating the existing `(date, topic)` row or
    /// appending a new one.
    pub async fn update(&self, row: &TrackingRow) -> GoogleResult<()> {
        let rows = self.read_key_columns().await?;
        let row_index = find_row_index(&rows, &row.date, &row.topic);

        let range = format!("{}!A{}:H{}", SHEET_NAME, row_index, row_index);
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}?valueInputOption=RAW",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(&range)
        );
        let body = json!({ "values": [row.to_values()] });

        with_retry(&self.retry, "sheets_update", || async {
            self.send_json(reqwest::Method::PUT, &url, &body).await?;
            Ok(())
        })
        .await?;

        info!(
            "Tracking updated for '{}': {} ({})",
            row.topic, row.status, row.step
        );
        Ok(())
    }

    /// Best-effort update: log and continue on failure. A tracking problem
    /// must never abort the pipeline.
    pub async fn update_best_effort(&self, row: &TrackingRow) {
        if let Err(e) = self.update(row).await {
            warn!("Tracking sheet update failed: {}", e);
        }
    }

    /// Provision a fresh tracking spreadsheet with a formatted header row.
    /// Returns the new spreadsheet id.
    pub async fn create_tracking_sheet(
        tokens: Arc<TokenCache>,
        base_url: Option<&str>,
        title: &str,
    ) -> GoogleResult<String> {
        let tracker = Self::new(tokens, String::new())?;
        let tracker = match base_url {
            Some(url) => tracker.with_base_url(url),
            None => tracker,
        };

        let url = format!("{}/v4/spreadsheets", tracker.base_url);
        let body = json!({
            "properties": { "title": title },
            "sheets": [{
                "properties": {
                    "title": SHEET_NAME,
                    "gridProperties": { "rowCount": 1000, "columnCount": 10 }
                }
            }]
        });

        let response = tracker
            .send_json(reqwest::Method::POST, &url, &body)
            .await?;
        let created: CreatedSpreadsheet = response.json().await?;
        let spreadsheet_id = created.spreadsheet_id;

        // Header row
        let range = format!("{}!A1:H1", SHEET_NAME);
        let header_url = format!(
            "{}/v4/spreadsheets/{}/values/{}?valueInputOption=RAW",
            tracker.base_url,
            spreadsheet_id,
            urlencoding::encode(&range)
        );
        let header_body = json!({ "values": [TRACKING_HEADER] });
        tracker
            .send_json(reqwest::Method::PUT, &header_url, &header_body)
            .await?;

        // Bold, gray header formatting
        let format_url = format!(
            "{}/v4/spreadsheets/{}:batchUpdate",
            tracker.base_url, spreadsheet_id
        );
        let format_body = json!({
            "requests": [{
                "repeatCell": {
                    "range": { "sheetId": 0, "startRowIndex": 0, "endRowIndex": 1 },
                    "cell": {
                        "userEnteredFormat": {
                            "backgroundColor": { "red": 0.8, "green": 0.8, "blue": 0.8 },
                            "textFormat": { "bold": true }
                        }
                    },
                    "fields": "userEnteredFormat(backgroundColor,textFormat)"
                }
            }]
        });
        tracker
            .send_json(reqwest::Method::POST, &format_url, &format_body)
            .await?;

        info!("Created tracking spreadsheet {}", spreadsheet_id);
        Ok(spreadsheet_id)
    }

    /// Read columns A:B (date, topic) for row lookup.
    async fn read_key_columns(&self) -> GoogleResult<Vec<Vec<String>>> {
        let range = format!("{}!A:B", SHEET_NAME);
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(&range)
        );

        let data: ValueRange = with_retry(&self.retry, "sheets_read", || async {
            let response = self.send_json(reqwest::Method::GET, &url, &json!(null)).await?;
            Ok(response.json::<ValueRange>().await?)
        })
        .await?;

        Ok(data.values)
    }

    /// Send a request with bearer auth, invalidating the token once on 401.
    async fn send_json(
        &self,
        http_method: reqwest::Method,
        url: &str,
        body: &serde_json::Value,
    ) -> GoogleResult<reqwest::Response> {
        let build = |token: &str| {
            let mut request = self.http.request(http_method.clone(), url).bearer_auth(token);
            if http_method != reqwest::Method::GET {
                request = request.json(body);
            }
            request
        };

        let mut token = self.tokens.get_token().await?;
        let mut response = build(&token).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.tokens.invalidate().await;
            token = self.tokens.get_token().await?;
            response = build(&token).send().await?;
        }

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(GoogleError::from_http_status(status.as_u16(), body))
        }
    }
}

/// 1-indexed row for `(date, topic)`: the matching row, or the first row
/// after the existing data.
fn find_row_index(rows: &[Vec<String>], date: &str, topic: &str) -> usize {
    for (i, row) in rows.iter().enumerate() {
        if row.len() >= 2 && row[0] == date && row[1] == topic {
            return i + 1;
        }
    }
    rows.len() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rows(data: &[(&str, &str)]) -> Vec<Vec<String>> {
        data.iter()
            .map(|(a, b)| vec![a.to_string(), b.to_string()])
            .collect()
    }

    #[test]
    fn test_find_row_index_match() {
        let rows = rows(&[
            ("Date", "Topic"),
            ("2026-08-06", "Old Topic"),
            ("2026-08-07", "Current Topic"),
        ]);
        assert_eq!(find_row_index(&rows, "2026-08-07", "Current Topic"), 3);
    }

    #[test]
    fn test_find_row_index_appends() {
        let rows = rows(&[("Date", "Topic"), ("2026-08-06", "Old Topic")]);
        assert_eq!(find_row_index(&rows, "2026-08-07", "New Topic"), 3);
        assert_eq!(find_row_index(&[], "2026-08-07", "Any"), 1);
    }

    #[tokio::test]
    async fn test_update_writes_row() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/spreadsheets/sheet-1/values/Pipeline%21A%3AB"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "values": [["Date", "Topic"]]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/v4/spreadsheets/sheet-1/values/Pipeline%21A2%3AH2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let tracker = SheetsTracker::new(Arc::new(TokenCache::fixed("t")), "sheet-1")
            .unwrap()
            .with_base_url(server.uri());

        let mut row = TrackingRow::new("My Topic");
        row.status = "Script generated".into();
        tracker.update(&row).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_best_effort_swallows_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let tracker = SheetsTracker::new(Arc::new(TokenCache::fixed("t")), "sheet-1")
            .unwrap()
            .with_base_url(server.uri());

        // Must not panic or propagate
        tracker.update_best_effort(&TrackingRow::new("Topic")).await;
    }

    #[tokio::test]
    async fn test_create_tracking_sheet() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets"))
            .and(body_partial_json(serde_json::json!({
                "properties": { "title": "Pipeline Tracking" },
                "sheets": [{
                    "properties": {
                        "title": "Pipeline",
                        "gridProperties": { "rowCount": 1000, "columnCount": 10 }
                    }
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "spreadsheetId": "new-sheet"
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/v4/spreadsheets/new-sheet/values/Pipeline%21A1%3AH1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets/new-sheet:batchUpdate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let id = SheetsTracker::create_tracking_sheet(
            Arc::new(TokenCache::fixed("t")),
            Some(&server.uri()),
            "Pipeline Tracking",
        )
        .await
        .unwrap();
        assert_eq!(id, "new-sheet");
    }
}
