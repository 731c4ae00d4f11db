//! Google Sheets API client for reading and appending rows
//!
//! The first row of every range is treated as the header row.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use shared::SheetRow;

use crate::config::SheetsConfig;
use crate::error::{AppError, AppResult};

/// Row-level access to the shared workbook
pub trait SheetGateway: Send + Sync {
    /// Read all data rows of a range, keyed by header
    fn read_rows(&self, range: &str) -> impl Future<Output = AppResult<Vec<SheetRow>>> + Send;

    /// Append rows of cell values after the last row of a range
    fn append_rows(
        &self,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> impl Future<Output = AppResult<()>> + Send;
}

/// Sheets REST API client
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    api_key: String,
    access_token: Option<String>,
    max_retries: u32,
    retry_backoff: Duration,
}

/// Values API response for a range read
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Values API request body for an append
#[derive(Debug, Serialize)]
struct AppendBody {
    values: Vec<Vec<String>>,
}

impl SheetsClient {
    /// Create a new client from configuration
    pub fn new(config: &SheetsConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            api_key: config.api_key.clone(),
            access_token: config.access_token.clone(),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    /// URL of `spreadsheets/{id}/values/{range}` with the range escaped
    fn values_url(&self, range: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Configuration(format!("Invalid Sheets base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Configuration("Sheets base URL cannot be a base".to_string()))?
            .extend(["spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request.query(&[("key", self.api_key.as_str())]),
        }
    }

    /// Send a request, retrying transport failures, 429 and 5xx responses
    async fn send_with_retry<F>(&self, build: F) -> AppResult<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let result = self.authorize(build()).send().await;
            let retryable = match &result {
                Ok(response) => is_retryable(response.status()),
                Err(e) => e.is_timeout() || e.is_connect(),
            };

            if !retryable || attempt >= self.max_retries {
                let response = result
                    .map_err(|e| AppError::SheetsApi(format!("Request failed: {}", e)))?;
                return check_status(response).await;
            }

            attempt += 1;
            tracing::warn!(attempt, max_retries = self.max_retries, "Retrying Sheets API request");
            tokio::time::sleep(self.retry_backoff * attempt).await;
        }
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

async fn check_status(response: Response) -> AppResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(AppError::SheetsApi(format!("API returned {}: {}", status, body)))
}

/// Render a cell as the string the front-ends would see
fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Split raw values into header-keyed rows, skipping blank rows
pub fn rows_from_values(values: Vec<Vec<String>>) -> Vec<SheetRow> {
    let mut iter = values.into_iter();
    let Some(headers) = iter.next() else {
        return Vec::new();
    };

    iter.filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|row| SheetRow::from_values(&headers, &row))
        .collect()
}

impl SheetGateway for SheetsClient {
    async fn read_rows(&self, range: &str) -> AppResult<Vec<SheetRow>> {
        let url = self.values_url(range)?;
        tracing::debug!(range, "Reading sheet range");

        let response = self.send_with_retry(|| self.client.get(url.clone())).await?;
        let data: ValueRange = response
            .json()
            .await
            .map_err(|e| AppError::SheetsApi(format!("Failed to parse response: {}", e)))?;

        let values = data
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect();
        Ok(rows_from_values(values))
    }

    async fn append_rows(&self, range: &str, rows: Vec<Vec<String>>) -> AppResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let url = self.values_url(&format!("{}:append", range))?;
        let body = AppendBody { values: rows };
        tracing::debug!(range, rows = body.values.len(), "Appending sheet rows");

        self.send_with_retry(|| {
            self.client
                .post(url.clone())
                .query(&[
                    ("valueInputOption", "USER_ENTERED"),
                    ("insertDataOption", "INSERT_ROWS"),
                ])
                .json(&body)
        })
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SheetsConfig {
        SheetsConfig {
            base_url: "https://sheets.googleapis.com/v4/".to_string(),
            spreadsheet_id: "sheet123".to_string(),
            api_key: "key".to_string(),
            access_token: None,
            timeout_secs: 5,
            max_retries: 1,
            retry_backoff_ms: 10,
        }
    }

    #[test]
    fn test_values_url_escapes_range() {
        let client = SheetsClient::new(&test_config()).unwrap();
        let url = client.values_url("Packing Transfers!A:Z").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet123/values/Packing%20Transfers!A:Z"
        );
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_retryable(StatusCode::NOT_FOUND));
        assert!(!is_retryable(StatusCode::OK));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(serde_json::json!("abc")), "abc");
        assert_eq!(cell_to_string(serde_json::json!(12.5)), "12.5");
        assert_eq!(cell_to_string(serde_json::Value::Null), "");
    }

    #[test]
    fn test_rows_from_values_skips_blank_rows() {
        let values = vec![
            vec!["SKU".to_string(), "Current Stock".to_string()],
            vec!["SUN-25G".to_string(), "40".to_string()],
            vec!["".to_string(), " ".to_string()],
            vec!["SUN-50G".to_string()],
        ];
        let rows = rows_from_values(values);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("SKU"), "SUN-50G");
        assert_eq!(rows[1].get("Current Stock"), "");
    }

    #[test]
    fn test_rows_from_empty_values() {
        assert!(rows_from_values(Vec::new()).is_empty());
    }
}
