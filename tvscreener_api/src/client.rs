//! HTTP client for the TradingView scanner API.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::{
    fields::CatalogId,
    query::ScreenerQuery,
    types::{Payload, ScanResponse, ScreenerResult},
    user_agent::get_user_agent,
    Error,
};

const DEFAULT_BASE_URL: &str = "https://scanner.tradingview.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const SITE: &str = "https://www.tradingview.com";

/// HTTP client for the scanner API.
///
/// Sends one POST per scan with browser-like headers. Each request builds a
/// fresh `reqwest::Client` with the configured timeout; there are no retries.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL for the API. Defaults to `https://scanner.tradingview.com`.
    base_api_url: String,
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production scanner.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn scan_url(&self, catalog: CatalogId) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/{}/scan",
            self.base_api_url,
            catalog.scan_path()
        ))
    }

    /// Sends a raw scan payload to the catalog's endpoint.
    pub async fn post_scan(
        &self,
        catalog: CatalogId,
        payload: &Payload,
    ) -> Result<ScanResponse, Error> {
        let pretty = serde_json::to_string_pretty(payload).unwrap_or_default();
        let fail = |status: Option<u16>, message: String, url: &str| Error::Request {
            status,
            message,
            url: url.to_string(),
            payload: pretty.clone(),
        };

        let url = self.scan_url(catalog).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            fail(None, e.to_string(), &self.base_api_url)
        })?;
        tracing::debug!("POST {} payload: {}", url, pretty);

        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                fail(None, e.to_string(), url.as_str())
            })?;
        let resp = client
            .post(url.clone())
            .header("content-type", "application/json")
            .header("origin", SITE)
            .header("referer", format!("{}/", SITE))
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Scan request to {} failed: {}", url, e);
                fail(e.status().map(|s| s.as_u16()), e.to_string(), url.as_str())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            fail(Some(status.as_u16()), e.to_string(), url.as_str())
        })?;

        if status.is_client_error() || status.is_server_error() {
            let message = error_message(status, &body);
            tracing::error!(
                "Scan request failed with status {}: {}",
                status,
                truncate_body(&body)
            );
            return Err(fail(Some(status.as_u16()), message, url.as_str()));
        }

        serde_json::from_str::<ScanResponse>(&body).map_err(|e| {
            tracing::error!(
                "Failed to parse scan response: {} | body: {}",
                e,
                truncate_body(&body)
            );
            Error::MalformedResponse {
                url: url.to_string(),
                source: e,
            }
        })
    }

    /// Runs a query and reshapes the positional rows into named columns.
    pub async fn scan(&self, query: &ScreenerQuery) -> Result<ScreenerResult, Error> {
        let payload = query.payload();
        let response = self.post_scan(query.catalog(), &payload).await?;
        tracing::debug!(
            "Scan returned {} of {} rows",
            response.data.len(),
            response.total_count
        );
        Ok(ScreenerResult::from_scan(response, &payload.columns))
    }
}

/// The body's `message` or `error` field, else the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["message", "error"]
            .iter()
            .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
    });
    from_body.unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
