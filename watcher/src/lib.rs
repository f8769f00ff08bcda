//! ReviewRadar Watcher - submission review status notifier.
//!
//! This crate polls the review status endpoint for a single tracked
//! submission and notifies a Telegram chat when the review verdict changes.
//!
//! # Overview
//!
//! Once per poll interval the watcher fetches the status payload with a
//! rolling time cursor, validates its shape, renders the most recent record
//! into a human-readable verdict, and delivers it if it differs from the last
//! message actually sent. Operational failures never stop the loop: they are
//! classified, forwarded to the same chat as failure notices (consecutive
//! duplicates suppressed), and retried on the next tick.
//!
//! # Modules
//!
//! - [`types`]: Submission records and rendered verdicts
//! - [`config`]: Configuration from environment variables
//! - [`error`]: The operational error taxonomy
//! - [`fetcher`]: HTTP client for the status endpoint
//! - [`validator`]: Structural validation of the fetched payload
//! - [`verdict`]: Status vocabulary and message rendering
//! - [`tracker`]: Duplicate suppression state
//! - [`notifier`]: Telegram delivery channel
//! - [`watch`]: The per-cycle state machine and cadence

pub mod config;
pub mod error;
pub mod fetcher;
pub mod notifier;
pub mod tracker;
pub mod types;
pub mod validator;
pub mod verdict;
pub mod watch;

pub use config::{Config, ConfigError};
pub use error::CycleError;
pub use fetcher::{FetchError, StatusFetcher};
pub use notifier::{SendError, TelegramNotifier};
pub use tracker::{ChangeTracker, Novelty, NoveltyPolicy};
pub use types::{SubmissionRecord, Verdict};
pub use validator::{validate, ValidatedResponse, ValidationError};
pub use verdict::{translate, UnknownStatus};
pub use watch::{CycleOutcome, Watcher};
