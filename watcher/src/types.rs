//! Domain types for the review status watcher.
//!
//! This module defines the shapes shared between the fetch, translation, and
//! notification stages. Records mirror the wire format the status endpoint
//! returns; verdicts are their human-readable renderings.

use serde::{Deserialize, Serialize};

/// One tracked submission as reported by the status endpoint.
///
/// Produced fresh each cycle and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Human-readable submission name.
    pub name: String,

    /// Raw review status code, one of a small fixed vocabulary.
    pub status: String,
}

/// Human-readable rendering of a submission's review status.
///
/// A verdict exists only for status codes in the known vocabulary; see
/// [`translate`](crate::verdict::translate) for the construction rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Name of the submission the verdict is about.
    pub name: String,

    /// Raw status code the message was rendered from.
    pub status: String,

    /// Rendered notification text.
    pub message: String,
}
