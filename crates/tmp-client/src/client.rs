//! Account service HTTP client.

use crate::error::LookupError;
use crate::provider::AccountLookup;
use crate::types::*;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

const DEFAULT_INITIAL_BACKOFF_MS: u64 = 100;
const DEFAULT_MAX_BACKOFF_MS: u64 = 5000;

/// Networked account data source.
///
/// The optional API key is stored using `SecretString` so it never shows
/// up in logs or debug output.
#[derive(Clone)]
pub struct AccountServiceClient {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    max_retries: u32,
}

impl AccountServiceClient {
    /// Create a new account service client.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, LookupError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.map(SecretString::new),
            max_retries,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Health check - returns true if the service answers.
    pub async fn health_check(&self) -> bool {
        self.authorize(self.client.get(format!("{}/health", self.base_url)))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Single lookup attempt, no retries.
    #[instrument(skip(self))]
    pub async fn fetch(&self, username: &str) -> Result<LookupOutcome, LookupError> {
        let response = self
            .authorize(
                self.client
                    .get(format!("{}/users/{}", self.base_url, encode(username))),
            )
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => {
                debug!("Account service has no user {}", username);
                Ok(LookupOutcome::not_found())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Rate limit exceeded");
                Err(LookupError::RateLimit)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("Authentication failed");
                Err(LookupError::Unauthorized)
            }
            s if s.is_success() => {
                let body = response.text().await?;
                debug!(
                    "Response body: {}",
                    body.chars().take(200).collect::<String>()
                );
                let record: AccountRecord = serde_json::from_str(&body)?;
                Ok(LookupOutcome::Found(record))
            }
            _ => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".into());
                Err(LookupError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(
                "Authorization",
                format!("Bearer {}", key.expose_secret()),
            ),
            None => request,
        }
    }
}

#[async_trait]
impl AccountLookup for AccountServiceClient {
    fn name(&self) -> &str {
        "http"
    }

    /// Lookup with exponential backoff on transient failures.
    async fn lookup(&self, username: &str) -> Result<LookupOutcome, LookupError> {
        let mut backoff_ms = DEFAULT_INITIAL_BACKOFF_MS;
        let mut attempt = 0;

        loop {
            match self.fetch(username).await {
                Ok(outcome) => return Ok(outcome),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!("Lookup failed (attempt {}): {}", attempt, e);
                    debug!("Retry attempt {} after {}ms backoff", attempt, backoff_ms);
                    sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms = (backoff_ms * 2).min(DEFAULT_MAX_BACKOFF_MS);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
