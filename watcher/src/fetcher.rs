//! Status endpoint client.
//!
//! Performs the single outbound GET of each poll cycle: the cursor travels as
//! the `from_date` query parameter and the API token as an `OAuth`
//! authorization header. Failures are classified into the three retryable
//! kinds the loop escalates on: transport, bad status, decode.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// HTTP request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Longest response-body prefix kept for diagnostics.
const BODY_SNIPPET_LEN: usize = 256;

/// Errors that can occur while fetching the status payload.
///
/// All variants are non-fatal: they terminate the current cycle but not the
/// watch loop.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection-level failure (unreachable host, timeout).
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Endpoint answered with something other than 200 OK.
    #[error("unexpected response status {status}: {body}")]
    BadStatus {
        /// HTTP status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// Response body is not valid JSON.
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// HTTP client for the review status endpoint.
pub struct StatusFetcher {
    client: Client,
    endpoint: String,
    api_token: String,
}

impl StatusFetcher {
    /// Creates a fetcher for the given endpoint and credential.
    #[must_use]
    pub fn new(endpoint: String, api_token: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            endpoint,
            api_token,
        }
    }

    /// Fetches the raw status payload for records updated at or after
    /// `cursor` (unix seconds).
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] classifying the failure; the caller decides
    /// whether and how to escalate it.
    pub async fn fetch(&self, cursor: i64) -> Result<Value, FetchError> {
        debug!(endpoint = %self.endpoint, from_date = cursor, "Requesting status update");

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.api_token))
            .query(&[("from_date", cursor)])
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = snippet(&response.text().await.unwrap_or_default());
            warn!(
                status = status.as_u16(),
                body = %body,
                "Status endpoint returned an error"
            );
            return Err(FetchError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(FetchError::Decode)
    }
}

/// Truncates a response body for log and error messages.
fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}
