//! Telegram notification channel.
//!
//! Sends text messages to a single fixed chat through the Telegram Bot API.
//! A failed send is reported to the caller as a [`SendError`] and must never
//! crash the watch loop: tracker state is only updated after a confirmed
//! success, so the same text stays novel and is retried next cycle.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

/// HTTP request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Longest response-body prefix kept for diagnostics.
const BODY_SNIPPET_LEN: usize = 256;

/// Errors that can occur while delivering a notification.
#[derive(Error, Debug)]
pub enum SendError {
    /// Transport-level failure reaching the Telegram API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Telegram API rejected the request.
    #[error("telegram error {status}: {body}")]
    BadStatus {
        /// HTTP status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },
}

/// Sends text messages to a single fixed chat.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Creates a notifier for the given bot and destination chat.
    #[must_use]
    pub fn new(api_base: String, bot_token: String, chat_id: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            api_base,
            bot_token,
            chat_id,
        }
    }

    /// Delivers `text` to the configured chat.
    ///
    /// # Errors
    ///
    /// Returns a [`SendError`] on transport failure or a non-success response
    /// from the Telegram API.
    pub async fn send(&self, text: &str) -> Result<(), SendError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);

        debug!(chat_id = %self.chat_id, "Sending notification");

        let response = self
            .client
            .post(&url)
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(BODY_SNIPPET_LEN)
                .collect();
            warn!(
                status = status.as_u16(),
                body = %body,
                "Telegram rejected the message"
            );
            return Err(SendError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        info!(chat_id = %self.chat_id, "Notification delivered");
        Ok(())
    }
}
