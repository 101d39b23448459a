//! Terminal failures of the two request paths.
//!
//! Each variant maps to exactly one external error code; nothing here is
//! retried.

use thiserror::Error;

use crate::access::gate::AccessError;
use crate::response::codes::{ErrorCode, ErrorSubcode};
use crate::storage::store::StoreError;
use crate::submission::key::{KeyError, SubmissionKey};
use crate::validation::decoder::DecodeError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("duplicate submission: {0}")]
    Duplicate(SubmissionKey),

    #[error("failed to store test log: {0}")]
    Store(#[source] StoreError),
}

impl IngestError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            IngestError::Access(_) => ErrorCode::Auth,
            IngestError::Key(_) | IngestError::Decode(_) => ErrorCode::InvalidReport,
            IngestError::Duplicate(_) => ErrorCode::DuplicateSubmission,
            IngestError::Store(_) => ErrorCode::Store,
        }
    }

    pub fn error_subcode(&self) -> Option<ErrorSubcode> {
        match self {
            IngestError::Key(_) => Some(ErrorSubcode::InvalidKey),
            IngestError::Decode(DecodeError::Empty) => Some(ErrorSubcode::EmptyReport),
            IngestError::Decode(DecodeError::Malformed(_)) => Some(ErrorSubcode::MalformedReport),
            IngestError::Access(_) | IngestError::Duplicate(_) | IngestError::Store(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("failed to fetch test logs: {0}")]
    Store(#[source] StoreError),
}

impl ListError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ListError::Access(_) => ErrorCode::Auth,
            ListError::Store(_) => ErrorCode::Fetch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::principal::PermissionClass;

    #[test]
    fn test_ingest_error_codes() {
        let denied = IngestError::from(AccessError::Forbidden {
            permission: PermissionClass::Standard,
            operation: "ingest",
        });
        assert_eq!(denied.error_code(), ErrorCode::Auth);
        assert_eq!(denied.error_subcode(), None);

        let empty = IngestError::from(DecodeError::Empty);
        assert_eq!(empty.error_code(), ErrorCode::InvalidReport);
        assert_eq!(empty.error_subcode(), Some(ErrorSubcode::EmptyReport));

        let bad_key = IngestError::from(KeyError::InvalidPath("empty path".to_string()));
        assert_eq!(bad_key.error_code(), ErrorCode::InvalidReport);
        assert_eq!(bad_key.error_subcode(), Some(ErrorSubcode::InvalidKey));

        let dup = IngestError::Duplicate(SubmissionKey::new(1, "a.xml"));
        assert_eq!(dup.error_code(), ErrorCode::DuplicateSubmission);
        assert_eq!(dup.to_string(), "duplicate submission: 1_a.xml");

        let store = IngestError::Store(StoreError::Unavailable("db down".to_string()));
        assert_eq!(store.error_code(), ErrorCode::Store);
        assert!(store.to_string().contains("db down"));
    }

    #[test]
    fn test_list_error_codes() {
        let store = ListError::Store(StoreError::Backend("timeout".to_string()));
        assert_eq!(store.error_code(), ErrorCode::Fetch);
    }
}
