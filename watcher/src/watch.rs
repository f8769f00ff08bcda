//! The poll–validate–diff–notify control loop.
//!
//! One cycle runs to completion before the next begins: fetch with the
//! current cursor, validate the payload shape, translate the most recent
//! record, decide novelty, notify. The cadence timer is owned here and fires
//! regardless of how the previous cycle ended, so every operational failure
//! is retried automatically.
//!
//! Operational errors are forwarded to the same notification channel as
//! ordinary status updates; consecutive duplicates are suppressed through an
//! independent gate so a persistent failure does not flood the chat every
//! cycle.

use std::time::Duration;

use tokio::signal;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::CycleError;
use crate::fetcher::StatusFetcher;
use crate::notifier::TelegramNotifier;
use crate::tracker::{ChangeTracker, Novelty};
use crate::validator;
use crate::verdict;

/// Result of one completed poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A novel verdict was delivered; carries the sent text.
    Notified(String),

    /// The verdict matched the last delivered one.
    Unchanged,

    /// The endpoint reported nothing for the current cursor.
    NoRecords,
}

/// Single-target watcher: owns the rolling cursor, the duplicate-suppression
/// state, and the poll cadence.
///
/// The cursor and both suppression gates are process-memory only; a restart
/// forgets them and may re-send the current status once.
pub struct Watcher {
    fetcher: StatusFetcher,
    notifier: TelegramNotifier,
    verdicts: ChangeTracker,
    errors: Novelty,
    cursor: i64,
    poll_interval: Duration,
}

impl Watcher {
    /// Creates a watcher polling from `start_cursor` (unix seconds).
    #[must_use]
    pub fn new(config: &Config, start_cursor: i64) -> Self {
        Self {
            fetcher: StatusFetcher::new(config.endpoint.clone(), config.api_token.clone()),
            notifier: TelegramNotifier::new(
                config.telegram_api.clone(),
                config.bot_token.clone(),
                config.chat_id.clone(),
            ),
            verdicts: ChangeTracker::new(config.novelty),
            errors: Novelty::new(),
            cursor: start_cursor,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
        }
    }

    /// Runs one fetch → validate → translate → decide → notify pass.
    ///
    /// The cursor advances on every successful fetch that carries an `asof`
    /// value, whether or not a notification goes out. Only the most recent
    /// record is examined.
    ///
    /// # Errors
    ///
    /// Returns the classified [`CycleError`]; the caller escalates it.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, CycleError> {
        let payload = self.fetcher.fetch(self.cursor).await?;
        let validated = validator::validate(&payload)?;

        if let Some(asof) = validated.asof {
            self.cursor = asof;
        }

        let Some(record) = validated.records.first() else {
            info!(cursor = self.cursor, "Nothing new this cycle");
            return Ok(CycleOutcome::NoRecords);
        };

        if validated.records.len() > 1 {
            debug!(
                ignored = validated.records.len() - 1,
                "Examining only the most recent record"
            );
        }

        let verdict = verdict::translate(record)?;

        if !self.verdicts.should_notify(&verdict) {
            debug!(name = %verdict.name, "Verdict unchanged since last notification");
            return Ok(CycleOutcome::Unchanged);
        }

        self.notifier.send(&verdict.message).await?;
        self.verdicts.record(&verdict);

        info!(name = %verdict.name, status = %verdict.status, "Status change delivered");
        Ok(CycleOutcome::Notified(verdict.message))
    }

    /// Runs one cycle and escalates any operational error.
    ///
    /// Never fails: every error is classified, logged, and forwarded to the
    /// notification channel with duplicate suppression. Returns `None` when
    /// the cycle ended in an error.
    pub async fn run_once(&mut self) -> Option<CycleOutcome> {
        match self.run_cycle().await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!(error = %e, "Cycle failed");
                self.escalate(&e).await;
                None
            }
        }
    }

    /// Forwards an operational error to the notification channel, suppressing
    /// consecutive duplicates.
    ///
    /// The failure notice is recorded only after it was actually delivered; a
    /// failed escalation is logged and retried next cycle.
    async fn escalate(&mut self, error: &CycleError) {
        let notice = format!("Произошла ошибка: {error}.");

        if !self.errors.is_new(&notice) {
            debug!("Identical failure already escalated, suppressing");
            return;
        }

        match self.notifier.send(&notice).await {
            Ok(()) => self.errors.record(&notice),
            Err(e) => warn!(error = %e, "Failed to escalate, will retry next cycle"),
        }
    }

    /// Runs the watch loop until a shutdown signal arrives.
    ///
    /// The first cycle starts immediately; subsequent cycles follow the
    /// configured interval. Missed ticks are delayed, never bunched.
    pub async fn run(mut self) {
        info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            cursor = self.cursor,
            "Watcher running. Press Ctrl+C to stop."
        );

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = wait_for_shutdown() => {
                    info!("Shutdown signal received");
                    break;
                }

                _ = ticker.tick() => {
                    self.run_once().await;
                }
            }
        }

        info!("Watcher stopped");
    }
}

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
