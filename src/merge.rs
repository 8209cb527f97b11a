//! Field-level merge for the merge strategy.
//!
//! The merged record is seeded from the remote snapshot, which pins the
//! system fields (id, change token, creation timestamp) to the remote copy.
//! Only field content is reconciled: fields present on one side are taken
//! verbatim, fields present on both go to the side with the strictly later
//! modification timestamp, and ties follow the [`TieBreak`] policy.

use crate::{Record, SyncConflict, Timestamp};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Which snapshot supplies a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Local,
    Remote,
}

/// Policy for breaking exact modification-timestamp ties.
///
/// The tie-break is a named, auditable policy rather than an accident of
/// which side seeds the merge. [`TieBreak::RemoteWins`] is the default and
/// is what `UseNewest` resolution uses as well, so the two stay consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TieBreak {
    /// On an exact timestamp tie, the remote value is kept (default)
    #[default]
    RemoteWins,
    /// On an exact timestamp tie, the local value is kept
    LocalWins,
}

impl TieBreak {
    /// Pick the winning side by modification timestamp, applying this
    /// policy on an exact tie.
    pub fn pick(self, local_modified: Timestamp, remote_modified: Timestamp) -> Side {
        match local_modified.cmp(&remote_modified) {
            Ordering::Greater => Side::Local,
            Ordering::Less => Side::Remote,
            Ordering::Equal => match self {
                TieBreak::RemoteWins => Side::Remote,
                TieBreak::LocalWins => Side::Local,
            },
        }
    }
}

/// Merge a conflict field by field under the default tie-break policy.
///
/// Always returns a record; merge never abstains.
pub fn merge_fields(conflict: &SyncConflict) -> Record {
    merge_fields_with(conflict, TieBreak::default())
}

/// Merge a conflict field by field under an explicit tie-break policy.
pub fn merge_fields_with(conflict: &SyncConflict, tie_break: TieBreak) -> Record {
    let local = &conflict.local_record;
    let remote = &conflict.remote_record;

    // System fields come from the remote copy via the seed clone.
    let mut merged = remote.clone();
    let winner = tie_break.pick(local.modified_at, remote.modified_at);

    // BTreeSet for a deterministic walk over the union of field names.
    let names: BTreeSet<&String> = local.fields.keys().chain(remote.fields.keys()).collect();
    for name in names {
        match (local.fields.get(name), remote.fields.get(name)) {
            // Present only locally: nothing to reconcile, take it
            (Some(value), None) => {
                merged.fields.insert(name.clone(), value.clone());
            }
            // Present only remotely (or neither): seed already holds it
            (None, _) => {}
            // Present on both: the later writer supplies the value
            (Some(local_value), Some(_)) => {
                if winner == Side::Local {
                    merged.fields.insert(name.clone(), local_value.clone());
                }
            }
        }
    }

    merged
}
