//! Structural validation of the status payload.
//!
//! The fetcher only guarantees syntactically valid JSON; this module checks
//! that the payload actually has the shape the rest of the cycle relies on.
//! Type mismatches are reported failures naming the offending field, never
//! silently coerced.
//!
//! The `records` list is the one hard requirement: its presence takes
//! priority over the optional `asof` cursor, an empty list is valid and
//! means "nothing to report this cycle", and a missing or non-integer `asof`
//! simply carries the previous cursor forward.

use serde_json::Value;
use thiserror::Error;

use crate::types::SubmissionRecord;

/// Errors that can occur while validating the payload shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Payload is not a JSON object.
    #[error("payload is not a JSON object")]
    NotAnObject,

    /// Payload has no `records` field.
    #[error("payload has no \"records\" field")]
    MissingRecords,

    /// The `records` field is not a list.
    #[error("\"records\" is not a list")]
    RecordsNotList,

    /// A list element is missing a field or holds the wrong type.
    #[error("record {index} is missing a valid \"{field}\" field")]
    BadRecord {
        /// Position of the offending element in the list.
        index: usize,
        /// Name of the missing or malformed field.
        field: &'static str,
    },
}

/// Validated payload: the records list plus the optional server cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedResponse {
    /// Submission records, most recent first.
    pub records: Vec<SubmissionRecord>,

    /// Server-side "as of" moment; `None` carries the previous cursor
    /// forward unchanged.
    pub asof: Option<i64>,
}

/// Checks the payload shape and extracts the submission records.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the first violated part of the
/// contract.
pub fn validate(payload: &Value) -> Result<ValidatedResponse, ValidationError> {
    let object = payload.as_object().ok_or(ValidationError::NotAnObject)?;

    let records = object
        .get("records")
        .ok_or(ValidationError::MissingRecords)?
        .as_array()
        .ok_or(ValidationError::RecordsNotList)?;

    let records = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let name = field_str(record, "name").ok_or(ValidationError::BadRecord {
                index,
                field: "name",
            })?;
            let status = field_str(record, "status").ok_or(ValidationError::BadRecord {
                index,
                field: "status",
            })?;

            Ok(SubmissionRecord {
                name: name.to_string(),
                status: status.to_string(),
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    let asof = object.get("asof").and_then(Value::as_i64);

    Ok(ValidatedResponse { records, asof })
}

/// Extracts a non-null string field from a record element.
fn field_str<'a>(record: &'a Value, field: &str) -> Option<&'a str> {
    record.get(field).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_payload() {
        let payload = json!({
            "records": [{"name": "A1", "status": "approved"}],
            "asof": 1000
        });

        let validated = validate(&payload).unwrap();
        assert_eq!(validated.records.len(), 1);
        assert_eq!(validated.records[0].name, "A1");
        assert_eq!(validated.records[0].status, "approved");
        assert_eq!(validated.asof, Some(1000));
    }

    #[test]
    fn empty_records_list_is_valid() {
        let payload = json!({"records": [], "asof": 5});

        let validated = validate(&payload).unwrap();
        assert!(validated.records.is_empty());
        assert_eq!(validated.asof, Some(5));
    }

    #[test]
    fn missing_asof_is_tolerated() {
        let payload = json!({"records": []});

        let validated = validate(&payload).unwrap();
        assert_eq!(validated.asof, None);
    }

    #[test]
    fn non_integer_asof_carries_cursor_forward() {
        let payload = json!({"records": [], "asof": "soon"});

        let validated = validate(&payload).unwrap();
        assert_eq!(validated.asof, None);
    }

    #[test]
    fn rejects_non_object_payload() {
        let payload = json!([1, 2, 3]);
        assert_eq!(validate(&payload), Err(ValidationError::NotAnObject));
    }

    #[test]
    fn missing_records_is_a_hard_failure_even_with_asof() {
        // Presence of the records list takes priority over the cursor field.
        let payload = json!({"asof": 1000});
        assert_eq!(validate(&payload), Err(ValidationError::MissingRecords));
    }

    #[test]
    fn rejects_records_that_are_not_a_list() {
        let payload = json!({"records": {"name": "A1"}});
        assert_eq!(validate(&payload), Err(ValidationError::RecordsNotList));
    }

    #[test]
    fn rejects_record_without_name() {
        let payload = json!({"records": [{"status": "approved"}]});
        assert_eq!(
            validate(&payload),
            Err(ValidationError::BadRecord {
                index: 0,
                field: "name"
            })
        );
    }

    #[test]
    fn rejects_record_with_null_status() {
        let payload = json!({
            "records": [
                {"name": "A1", "status": "approved"},
                {"name": "A2", "status": null}
            ]
        });
        assert_eq!(
            validate(&payload),
            Err(ValidationError::BadRecord {
                index: 1,
                field: "status"
            })
        );
    }

    #[test]
    fn rejects_record_with_numeric_name() {
        // No coercion: a number is not a valid name even if printable.
        let payload = json!({"records": [{"name": 7, "status": "approved"}]});
        assert_eq!(
            validate(&payload),
            Err(ValidationError::BadRecord {
                index: 0,
                field: "name"
            })
        );
    }
}
