//! Field-by-field conflict analysis for manual review.
//!
//! The analyzer produces the diff a resolution UI would show next to a
//! manual-strategy conflict. It has no effect on resolution logic.

use crate::{FieldName, FieldValue, SyncConflict};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// The two sides of a divergent field. `None` means the field is absent
/// on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDiff {
    pub local: Option<FieldValue>,
    pub remote: Option<FieldValue>,
}

/// Compute the set of fields whose values differ between the two snapshots.
///
/// Comparison uses [`FieldValue::content_eq`], so binary and opaque values
/// present on both sides always show up as divergent even when the payloads
/// are byte-identical; review UIs should present those as "cannot compare"
/// rather than as a definite edit. Fields that compare equal are omitted.
pub fn analyze_conflict(conflict: &SyncConflict) -> HashMap<FieldName, FieldDiff> {
    let local = &conflict.local_record.fields;
    let remote = &conflict.remote_record.fields;

    let names: BTreeSet<&FieldName> = local.keys().chain(remote.keys()).collect();
    let mut diffs = HashMap::new();

    for name in names {
        let local_value = local.get(name);
        let remote_value = remote.get(name);
        let equal = match (local_value, remote_value) {
            (Some(a), Some(b)) => a.content_eq(b),
            // Union of keys, so at least one side is always present
            _ => false,
        };
        if !equal {
            diffs.insert(
                name.clone(),
                FieldDiff {
                    local: local_value.cloned(),
                    remote: remote_value.cloned(),
                },
            );
        }
    }

    diffs
}
