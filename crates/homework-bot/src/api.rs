//! Review service client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{BotError, BotResult};
use homework_config::Settings;

/// Per-request timeout for the review service.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of homework status responses.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch statuses changed since `from_date` (unix seconds).
    ///
    /// Returns the decoded body unvalidated; shape checks happen in
    /// [`crate::status::validate_response`].
    async fn fetch(&self, from_date: i64) -> BotResult<Value>;
}

/// HTTP client for the homework status endpoint.
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    /// Create a client for the configured endpoint and token.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self::with_endpoint(&settings.endpoint, &settings.practicum_token)
    }

    /// Create a client for an explicit endpoint.
    ///
    /// The endpoint is checked on every fetch, so a bad value surfaces as a
    /// per-cycle [`BotError::Endpoint`] rather than a startup failure.
    #[must_use]
    pub fn with_endpoint(endpoint: &str, token: &str) -> Self {
        Self {
            client: client_or_default(Client::builder().timeout(REQUEST_TIMEOUT).build()),
            endpoint: endpoint.trim().to_string(),
            token: token.to_string(),
        }
    }

    fn endpoint_url(&self) -> BotResult<Url> {
        if self.endpoint.is_empty() {
            return Err(BotError::Endpoint("no endpoint configured".to_string()));
        }
        let url = Url::parse(&self.endpoint)
            .map_err(|e| BotError::Endpoint(format!("'{}': {e}", self.endpoint)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BotError::Endpoint(format!(
                "'{}': unsupported scheme '{}'",
                self.endpoint,
                url.scheme()
            )));
        }
        Ok(url)
    }
}

/// Fall back to a default client, without the request timeout, when the
/// builder fails.
fn client_or_default(built: reqwest::Result<Client>) -> Client {
    built.unwrap_or_else(|e| {
        warn!(error = %e, "cannot build HTTP client with a request timeout, using defaults");
        Client::new()
    })
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> BotResult<Value> {
        let url = self.endpoint_url()?;
        debug!(%url, from_date, "requesting homework statuses");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BotError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| BotError::Decode(e.to_string()))
    }
}
