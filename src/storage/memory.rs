//! In-process store.
//!
//! Reference implementation of [`TestLogStore`], used by tests and by hosts
//! that keep the audit log in memory.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::access::principal::Principal;
use crate::storage::models::TestLogEntry;
use crate::storage::store::{PutOutcome, StoreError, TestLogStore};
use crate::submission::key::SubmissionKey;

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<SubmissionKey, (u64, TestLogEntry)>,
    next_seq: u64,
}

/// Thread-safe in-memory store. Cloning shares the underlying entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    pub fn get(&self, key: &SubmissionKey) -> Option<TestLogEntry> {
        self.inner.read().entries.get(key).map(|(_, e)| e.clone())
    }
}

impl TestLogStore for MemoryStore {
    fn put(&self, entry: TestLogEntry) -> Result<PutOutcome, StoreError> {
        // Check and insert under one write lock: first writer wins.
        let mut inner = self.inner.write();
        if inner.entries.contains_key(&entry.key) {
            log::debug!("STORE_CONFLICT key={}", entry.key);
            return Ok(PutOutcome::Conflict);
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        log::debug!("STORE_INSERT key={} seq={}", entry.key, seq);
        inner.entries.insert(entry.key.clone(), (seq, entry));
        Ok(PutOutcome::Stored)
    }

    fn list_for(&self, principal: &Principal) -> Result<Vec<TestLogEntry>, StoreError> {
        let mut visible: Vec<(u64, TestLogEntry)> = {
            let inner = self.inner.read();
            inner
                .entries
                .values()
                .filter(|(_, e)| principal.can_view_model(&e.model))
                .cloned()
                .collect()
        };

        visible.sort_by(|(seq_a, a), (seq_b, b)| {
            b.received_at
                .cmp(&a.received_at)
                .then_with(|| seq_b.cmp(seq_a))
        });

        Ok(visible.into_iter().map(|(_, e)| e).collect())
    }
}
