//! Client configuration from the environment.

use std::time::Duration;

use tvscreener_api::Client;

pub const BASE_URL_VAR: &str = "TVSCREENER_BASE_URL";
pub const TIMEOUT_VAR: &str = "TVSCREENER_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "https://scanner.tradingview.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Reads `TVSCREENER_BASE_URL` and `TVSCREENER_TIMEOUT_SECS`.
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = lookup(TIMEOUT_VAR)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn build_client(&self) -> Client {
        tracing::debug!(
            "Scanner client at {} (timeout {:?})",
            self.base_url,
            self.timeout
        );
        Client::with_base_url(&self.base_url).with_timeout(self.timeout)
    }
}
