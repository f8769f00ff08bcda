//! Review status vocabulary and message rendering.
//!
//! The vocabulary is closed: a record whose status code falls outside it
//! cannot be rendered and the cycle reports the unrecognized code instead of
//! guessing. The remote service occasionally grows new categories, so that
//! failure is retryable rather than fatal.

use thiserror::Error;

use crate::types::{SubmissionRecord, Verdict};

/// Known review status codes and their rendered verdicts.
const VERDICTS: [(&str, &str); 3] = [
    ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
    ("reviewing", "Работа взята на проверку ревьюером."),
    ("rejected", "Работа проверена: у ревьюера есть замечания."),
];

/// The status code is outside the known vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown review status: {status}")]
pub struct UnknownStatus {
    /// The unrecognized status code.
    pub status: String,
}

/// Renders a record's status into a human-readable verdict.
///
/// Deterministic and side-effect free.
///
/// # Errors
///
/// Returns [`UnknownStatus`] carrying the unrecognized code.
pub fn translate(record: &SubmissionRecord) -> Result<Verdict, UnknownStatus> {
    let verdict = VERDICTS
        .iter()
        .find(|(code, _)| *code == record.status)
        .map(|(_, text)| *text)
        .ok_or_else(|| UnknownStatus {
            status: record.status.clone(),
        })?;

    Ok(Verdict {
        name: record.name.clone(),
        status: record.status.clone(),
        message: format!(
            "Изменился статус проверки работы \"{}\". {}",
            record.name, verdict
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, status: &str) -> SubmissionRecord {
        SubmissionRecord {
            name: name.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn renders_approved_with_exact_template() {
        let verdict = translate(&record("A1", "approved")).unwrap();

        assert_eq!(verdict.name, "A1");
        assert_eq!(verdict.status, "approved");
        assert_eq!(
            verdict.message,
            "Изменился статус проверки работы \"A1\". \
             Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn renders_every_known_status() {
        for (code, text) in VERDICTS {
            let verdict = translate(&record("hw", code)).unwrap();
            assert!(verdict.message.ends_with(text));
        }
    }

    #[test]
    fn rejects_unknown_status() {
        let err = translate(&record("A1", "archived")).unwrap_err();

        assert_eq!(err.status, "archived");
        assert_eq!(err.to_string(), "unknown review status: archived");
    }

    #[test]
    fn rejects_known_status_with_wrong_case() {
        // The vocabulary is exact: "Approved" is not "approved".
        assert!(translate(&record("A1", "Approved")).is_err());
    }
}
