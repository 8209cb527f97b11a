//! Record store boundary: fetch and compare-and-swap save.
//!
//! The engine consumes the store as an interface only; persistence and
//! transport belong to the integrating system. [`MemoryStore`] is the
//! in-memory reference implementation used by tests and demos.

use crate::{error::Result, ChangeToken, Error, Record, RecordId, Timestamp};
use std::collections::HashMap;

/// Expected token for inserting a record the store has never seen.
pub const NEW_RECORD_TOKEN: &str = "";

/// Store contract with optimistic-concurrency semantics.
///
/// `save` is a compare-and-swap: the write succeeds only while the stored
/// change token still equals `expected_token`. On [`Error::TokenMismatch`]
/// another writer raced in; the caller re-fetches, re-detects and
/// re-resolves. Engine outputs are idempotent over the same two snapshots,
/// so that retry is always safe. Bounding the retry loop is the caller's
/// responsibility.
pub trait RecordStore {
    /// Fetch a snapshot of a record by id.
    fn fetch(&self, id: &str) -> Option<Record>;

    /// Write a record if the stored token still matches `expected_token`.
    ///
    /// On success the store assigns a fresh change token, stamps
    /// `modified_at = now`, and returns the new token. Inserting a record
    /// the store has never seen uses [`NEW_RECORD_TOKEN`].
    fn save(&mut self, record: Record, expected_token: &str, now: Timestamp)
        -> Result<ChangeToken>;
}

/// HashMap-backed store for tests and integration hosts.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    node_id: String,
    next_token: u64,
    records: HashMap<RecordId, Record>,
}

impl MemoryStore {
    /// Create an empty store. Tokens are namespaced by `node_id` so two
    /// stores never mint colliding tokens.
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            next_token: 0,
            records: HashMap::new(),
        }
    }

    fn mint_token(&mut self) -> ChangeToken {
        self.next_token += 1;
        format!("{}#{}", self.node_id, self.next_token)
    }

    /// Number of records held, tombstoned ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn fetch(&self, id: &str) -> Option<Record> {
        self.records.get(id).cloned()
    }

    fn save(
        &mut self,
        mut record: Record,
        expected_token: &str,
        now: Timestamp,
    ) -> Result<ChangeToken> {
        match self.records.get(&record.id) {
            Some(current) => {
                if current.change_token != expected_token {
                    return Err(Error::TokenMismatch {
                        record_id: record.id.clone(),
                        expected: expected_token.to_string(),
                        found: current.change_token.clone(),
                    });
                }
            }
            None => {
                if expected_token != NEW_RECORD_TOKEN {
                    return Err(Error::RecordNotFound(record.id.clone()));
                }
            }
        }

        let token = self.mint_token();
        record.change_token = token.clone();
        record.modified_at = now;
        self.records.insert(record.id.clone(), record);
        Ok(token)
    }
}
