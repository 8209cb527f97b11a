//! Conflict detection and classification.
//!
//! A conflict exists only when both sides of a record changed independently
//! since the last successful reconciliation. One-sided changes are not
//! conflicts; the caller propagates the newer side with a straight replace.

use crate::{Record, RecordId, Timestamp, EARLIEST_TIMESTAMP};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a single conflict occurrence (not the record).
pub type ConflictId = Uuid;

/// Classification of a detected conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictType {
    /// The two sides believe the record was created independently
    /// (e.g., id collision or re-creation after deletion)
    Created,
    /// Both sides edited an existing, consistently-created record
    Modified,
    /// At least one side carries a deletion tombstone
    Deleted,
}

/// A detected conflict between two snapshots of the same logical record.
///
/// Immutable after construction. Equality is by [`SyncConflict::id`] only:
/// two detections over the same snapshots are distinct occurrences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConflict {
    /// Freshly generated per detection
    pub id: ConflictId,
    /// The record in contention
    pub record_id: RecordId,
    /// Local snapshot (owned copy; never mutated)
    pub local_record: Record,
    /// Remote snapshot (owned copy; never mutated)
    pub remote_record: Record,
    /// Classification at detection time
    pub conflict_type: ConflictType,
    /// When the conflict was detected; diagnostics only
    pub detected_at: Timestamp,
}

impl PartialEq for SyncConflict {
    /// Identity equality, not structural.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SyncConflict {}

/// Decide whether two snapshots of the same logical record conflict.
///
/// Returns `None` when the change tokens are equal (the store considers the
/// records identical) or when only one side changed since `last_sync`. A
/// missing `last_sync` defaults to [`EARLIEST_TIMESTAMP`], so any recorded
/// modification counts as a change.
///
/// `now` stamps `detected_at`; the engine owns no clock, so the caller
/// supplies the detection time.
pub fn detect_conflict(
    local: &Record,
    remote: &Record,
    last_sync: Option<Timestamp>,
    now: Timestamp,
) -> Option<SyncConflict> {
    if local.change_token == remote.change_token {
        return None;
    }

    let last_sync = last_sync.unwrap_or(EARLIEST_TIMESTAMP);
    if local.modified_at <= last_sync || remote.modified_at <= last_sync {
        // One-sided change: the newer side is a straight replace,
        // which is the caller's job, not a conflict.
        return None;
    }

    Some(SyncConflict {
        id: Uuid::new_v4(),
        record_id: remote.id.clone(),
        conflict_type: classify(local, remote),
        local_record: local.clone(),
        remote_record: remote.clone(),
        detected_at: now,
    })
}

/// Label a conflict as Created, Modified or Deleted.
///
/// A tombstone on either side wins classification regardless of what else
/// differs. Divergent creation timestamps signal independent creation.
pub fn classify(local: &Record, remote: &Record) -> ConflictType {
    if local.is_deleted() || remote.is_deleted() {
        return ConflictType::Deleted;
    }
    if local.created_at != remote.created_at {
        return ConflictType::Created;
    }
    ConflictType::Modified
}
