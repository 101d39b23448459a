//! The store contract the core relies on.
//!
//! Concrete persistence belongs to an external collaborator; the core only
//! needs idempotent writes and a scoped, ordered read.

use thiserror::Error;

use crate::access::principal::Principal;
use crate::storage::models::TestLogEntry;

/// Result of a write that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The entry was new and is now stored.
    Stored,
    /// An entry with the same submission key already exists; nothing changed.
    Conflict,
}

/// Backend failure. Surfaced to the caller as-is, never retried by the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Persistence for test log entries.
///
/// Implementations must resolve concurrent `put` calls for the same key to a
/// single `Stored` (first writer wins) with every other caller observing
/// `Conflict`, and must never hold a partially written entry.
pub trait TestLogStore: Send + Sync {
    /// Store `entry` unless its submission key already exists.
    fn put(&self, entry: TestLogEntry) -> Result<PutOutcome, StoreError>;

    /// Entries whose model is in the principal's authorized set, most
    /// recently received first.
    fn list_for(&self, principal: &Principal) -> Result<Vec<TestLogEntry>, StoreError>;
}
