//! Duplicate suppression for outgoing notifications.
//!
//! The watcher's only in-process memory is the content of the last message
//! actually delivered. [`Novelty`] is the content-equality gate over that
//! memory; [`ChangeTracker`] decides which part of a verdict feeds the gate.
//!
//! State is recorded only after a confirmed successful send, never
//! speculatively. A send failure therefore leaves the candidate "novel" and
//! it is retried on the next cycle.

use crate::types::Verdict;

/// Content-equality gate over the last recorded text.
#[derive(Debug, Default)]
pub struct Novelty {
    last: Option<String>,
}

impl Novelty {
    /// Creates an empty gate with no recorded text.
    #[must_use]
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns true when `text` differs from the last recorded text,
    /// including the very first call when nothing has been recorded yet.
    #[must_use]
    pub fn is_new(&self, text: &str) -> bool {
        self.last.as_deref() != Some(text)
    }

    /// Records `text` as the last delivered content.
    ///
    /// Call only after the corresponding send has succeeded.
    pub fn record(&mut self, text: &str) {
        self.last = Some(text.to_string());
    }
}

/// Which part of a verdict identifies it for duplicate suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoveltyPolicy {
    /// Compare the rendered message text.
    #[default]
    Text,

    /// Compare the raw status code.
    Status,
}

/// Remembers the last notified verdict and decides whether a candidate is
/// worth another message.
#[derive(Debug)]
pub struct ChangeTracker {
    policy: NoveltyPolicy,
    gate: Novelty,
}

impl ChangeTracker {
    /// Creates a tracker with the given suppression policy and no history.
    #[must_use]
    pub fn new(policy: NoveltyPolicy) -> Self {
        Self {
            policy,
            gate: Novelty::new(),
        }
    }

    /// Returns true when the candidate verdict differs from the last
    /// notified one under the configured policy.
    #[must_use]
    pub fn should_notify(&self, verdict: &Verdict) -> bool {
        self.gate.is_new(self.fingerprint(verdict))
    }

    /// Records the verdict as notified.
    ///
    /// Call only after the corresponding send has succeeded.
    pub fn record(&mut self, verdict: &Verdict) {
        let fingerprint = self.fingerprint(verdict);
        self.gate.record(fingerprint);
    }

    fn fingerprint<'a>(&self, verdict: &'a Verdict) -> &'a str {
        match self.policy {
            NoveltyPolicy::Text => &verdict.message,
            NoveltyPolicy::Status => &verdict.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(name: &str, status: &str, message: &str) -> Verdict {
        Verdict {
            name: name.to_string(),
            status: status.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn novelty_first_call_is_new() {
        let gate = Novelty::new();
        assert!(gate.is_new("anything"));
    }

    #[test]
    fn novelty_recorded_text_is_not_new() {
        let mut gate = Novelty::new();
        gate.record("sent once");

        assert!(!gate.is_new("sent once"));
        assert!(gate.is_new("something else"));
    }

    #[test]
    fn novelty_latest_record_wins() {
        let mut gate = Novelty::new();
        gate.record("first");
        gate.record("second");

        assert!(gate.is_new("first"));
        assert!(!gate.is_new("second"));
    }

    #[test]
    fn tracker_first_verdict_is_novel() {
        let tracker = ChangeTracker::new(NoveltyPolicy::Text);
        assert!(tracker.should_notify(&verdict("A1", "approved", "done")));
    }

    #[test]
    fn tracker_suppresses_identical_message() {
        let mut tracker = ChangeTracker::new(NoveltyPolicy::Text);
        let v = verdict("A1", "approved", "done");

        tracker.record(&v);
        assert!(!tracker.should_notify(&v));
    }

    #[test]
    fn text_policy_treats_same_message_from_different_records_as_duplicate() {
        let mut tracker = ChangeTracker::new(NoveltyPolicy::Text);

        tracker.record(&verdict("A1", "approved", "same text"));
        assert!(!tracker.should_notify(&verdict("A2", "approved", "same text")));
    }

    #[test]
    fn status_policy_ignores_message_changes() {
        let mut tracker = ChangeTracker::new(NoveltyPolicy::Status);

        tracker.record(&verdict("A1", "reviewing", "old text"));
        assert!(!tracker.should_notify(&verdict("A1", "reviewing", "new text")));
        assert!(tracker.should_notify(&verdict("A1", "approved", "new text")));
    }

    #[test]
    fn unrecorded_candidate_stays_novel() {
        let tracker = ChangeTracker::new(NoveltyPolicy::Text);
        let v = verdict("A1", "approved", "done");

        // No record() call: a failed send must leave the candidate novel.
        assert!(tracker.should_notify(&v));
        assert!(tracker.should_notify(&v));
    }
}
