//! Error types for the store boundary.
//!
//! The resolution engine itself is total over well-formed inputs and
//! signals "no answer" through optional returns. Errors exist only at the
//! record-store boundary, where optimistic concurrency can fail.

use crate::{ChangeToken, RecordId};
use thiserror::Error;

/// All possible errors from the store boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("change token mismatch for record '{record_id}': expected {expected}, found {found}")]
    TokenMismatch {
        record_id: RecordId,
        expected: ChangeToken,
        found: ChangeToken,
    },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::RecordNotFound("note-1".into());
        assert_eq!(err.to_string(), "record not found: note-1");

        let err = Error::TokenMismatch {
            record_id: "note-1".into(),
            expected: "tok-1".into(),
            found: "tok-2".into(),
        };
        assert_eq!(
            err.to_string(),
            "change token mismatch for record 'note-1': expected tok-1, found tok-2"
        );
    }
}
