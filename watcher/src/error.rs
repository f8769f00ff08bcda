//! Error types for the watcher.
//!
//! Per-module failures collapse into [`CycleError`], the single operational
//! taxonomy the loop switches on at the escalation boundary. Every variant is
//! retryable by construction: it ends the current cycle, is forwarded to the
//! notification channel with duplicate suppression, and the cadence timer
//! brings the next attempt.

use thiserror::Error;

use crate::fetcher::FetchError;
use crate::notifier::SendError;
use crate::validator::ValidationError;
use crate::verdict::UnknownStatus;

/// Operational failures of a single poll cycle.
#[derive(Error, Debug)]
pub enum CycleError {
    /// Network-level failure reaching the status endpoint.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Status endpoint answered with a non-success code.
    #[error("unexpected response status {status}: {body}")]
    BadStatus {
        /// HTTP status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// Status endpoint body was not valid JSON.
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// Payload shape violated the response contract.
    #[error("invalid response: {0}")]
    Validation(#[from] ValidationError),

    /// Status code outside the known vocabulary.
    #[error("{0}")]
    UnknownVerdict(#[from] UnknownStatus),

    /// Notification channel failure.
    #[error("notification failed: {0}")]
    Send(#[from] SendError),
}

impl From<FetchError> for CycleError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Transport(e) => CycleError::Transport(e),
            FetchError::BadStatus { status, body } => CycleError::BadStatus { status, body },
            FetchError::Decode(e) => CycleError::Decode(e),
        }
    }
}
