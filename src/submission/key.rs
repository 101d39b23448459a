//! Submission key resolution.
//!
//! Paths take the form `[<unix-timestamp>_]<filename>`. Without a timestamp
//! prefix the receipt time is used.

use std::fmt;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::structured::LogContext;

lazy_static! {
    /// Leading ASCII unix timestamp followed by `_` and the filename.
    static ref TIMESTAMP_PREFIX: Regex = Regex::new(r"^([0-9]+)_(.*)$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid submission path: {0}")]
    InvalidPath(String),
}

/// Unique identity of one stored report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionKey {
    /// Unix seconds.
    pub timestamp: i64,
    pub filename: String,
}

impl SubmissionKey {
    pub fn new(timestamp: i64, filename: &str) -> Self {
        Self {
            timestamp,
            filename: filename.to_string(),
        }
    }
}

impl fmt::Display for SubmissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.timestamp, self.filename)
    }
}

/// Resolve the submission key from the request path.
///
/// # Errors
/// `KeyError::InvalidPath` for empty paths, empty filenames, path separators,
/// a bare `.` or `..` filename, control characters, or timestamps outside the
/// date range.
pub fn resolve_key(
    path: &str,
    received_at: DateTime<Utc>,
    ctx: &LogContext,
) -> Result<SubmissionKey, KeyError> {
    if path.is_empty() {
        return Err(KeyError::InvalidPath("empty path".to_string()));
    }

    let key = match TIMESTAMP_PREFIX.captures(path) {
        Some(caps) => {
            let digits = &caps[1];
            let timestamp = parse_timestamp(digits)?;
            SubmissionKey::new(timestamp, &caps[2])
        }
        None => {
            log::debug!("{} KEY_NO_TIMESTAMP path={}", ctx, path);
            SubmissionKey::new(received_at.timestamp(), path)
        }
    };

    check_filename(&key.filename)?;

    log::debug!(
        "{} KEY_RESOLVED timestamp={} filename={}",
        ctx,
        key.timestamp,
        key.filename
    );
    Ok(key)
}

fn parse_timestamp(digits: &str) -> Result<i64, KeyError> {
    let timestamp: i64 = digits
        .parse()
        .map_err(|_| KeyError::InvalidPath(format!("timestamp out of range: {}", digits)))?;

    if DateTime::<Utc>::from_timestamp(timestamp, 0).is_none() {
        return Err(KeyError::InvalidPath(format!(
            "timestamp out of range: {}",
            digits
        )));
    }
    Ok(timestamp)
}

fn check_filename(filename: &str) -> Result<(), KeyError> {
    if filename.is_empty() {
        return Err(KeyError::InvalidPath("empty filename".to_string()));
    }
    if filename.contains('/') || filename.contains('\\') {
        return Err(KeyError::InvalidPath(format!(
            "path separator in filename: {}",
            filename
        )));
    }
    if filename == "." || filename == ".." {
        return Err(KeyError::InvalidPath(format!(
            "directory reference as filename: {}",
            filename
        )));
    }
    if filename.chars().any(char::is_control) {
        return Err(KeyError::InvalidPath(
            "control character in filename".to_string(),
        ));
    }
    Ok(())
}
