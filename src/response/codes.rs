//! Machine-readable error codes.
//!
//! Sync clients branch on these strings (e.g. `duplicate-submission` is
//! success-equivalent for retries), so they must never change.

use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Auth,
    InvalidReport,
    DuplicateSubmission,
    Fetch,
    Store,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Auth => "error-auth",
            ErrorCode::InvalidReport => "invalid-report",
            ErrorCode::DuplicateSubmission => "duplicate-submission",
            ErrorCode::Fetch => "error-fetch",
            ErrorCode::Store => "error-store",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSubcode {
    InvalidKey,
    EmptyReport,
    MalformedReport,
}

impl ErrorSubcode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorSubcode::InvalidKey => "invalid-key",
            ErrorSubcode::EmptyReport => "empty-report",
            ErrorSubcode::MalformedReport => "malformed-report",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ErrorSubcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for ErrorSubcode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
