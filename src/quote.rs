//! Random quote fetcher.
//!
//! One GET to the configured endpoint, which answers with a JSON object carrying the
//! quote in a string field (`message` by default). No retry, no cache. Every failure is
//! classified into a [`QuoteError`] with a one-line, user-facing message.

use log::{debug, warn};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

use crate::config::QuoteConfig;
use crate::logutil::escape_input;

#[derive(Debug, Error)]
pub enum QuoteError {
    /// Connection, DNS, TLS or timeout failure.
    #[error("could not reach the quote API: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status from the quote API: {0}")]
    Status(u16),

    /// The body is not valid JSON.
    #[error("response received but the JSON is invalid: {0}")]
    Malformed(String),

    /// The expected field is absent, empty, or not a string.
    #[error("unexpected response from the quote API: {0}")]
    MissingField(String),
}

/// Pull the quote out of a JSON body.
pub fn extract_quote(body: &str, field: &str) -> Result<String, QuoteError> {
    let data: Value =
        serde_json::from_str(body).map_err(|e| QuoteError::Malformed(e.to_string()))?;
    match data.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::String(_)) => Err(QuoteError::MissingField(format!(
            "field '{}' is empty",
            field
        ))),
        Some(other) => Err(QuoteError::MissingField(format!(
            "field '{}' is not a string: {}",
            field,
            escape_input(&other.to_string())
        ))),
        None => Err(QuoteError::MissingField(format!(
            "no '{}' field in {}",
            field,
            escape_input(&data.to_string())
        ))),
    }
}

/// Render a fetched quote for the console.
pub fn format_quote(quote: &str) -> String {
    format!("Random quote:\n\n\"{}\"", quote)
}

pub struct QuoteClient {
    config: QuoteConfig,
    client: reqwest::Client,
}

impl QuoteClient {
    pub fn new(config: QuoteConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Use a caller-built HTTP client (proxy or TLS settings).
    pub fn with_client(config: QuoteConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Check if the client is enabled and has an endpoint
    pub fn is_configured(&self) -> bool {
        self.config.enabled && !self.config.url.trim().is_empty()
    }

    /// Fetch one quote.
    pub async fn fetch(&self) -> Result<String, QuoteError> {
        debug!("Fetching quote from: {}", self.config.url);

        let request = self
            .client
            .get(&self.config.url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, self.config.user_agent.as_str());
        let timeout_duration = Duration::from_secs(self.config.timeout_seconds as u64);

        let response = timeout(timeout_duration, request.send())
            .await
            .map_err(|_| {
                QuoteError::Transport(format!(
                    "request timed out after {}s",
                    self.config.timeout_seconds
                ))
            })?
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Quote API returned status: {}", status);
            return Err(QuoteError::Status(status.as_u16()));
        }

        let body = timeout(timeout_duration, response.text())
            .await
            .map_err(|_| QuoteError::Transport("timed out reading the response".to_string()))?
            .map_err(|e| QuoteError::Transport(e.to_string()))?;
        debug!("Quote payload: {}", escape_input(&body));

        extract_quote(&body, &self.config.field)
    }
}
