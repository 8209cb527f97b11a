//! Strategy-based conflict resolution.
//!
//! Resolution is a pure computation over a detected conflict: it never
//! mutates its inputs, performs no I/O, and is safe to re-run against the
//! same two snapshots after a failed compare-and-swap write.

use crate::{merge_fields, Record, Side, SyncConflict, TieBreak};
use serde::{Deserialize, Serialize};

/// Named policy for producing a single record from a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionStrategy {
    /// Keep the local snapshot unchanged
    UseLocal,
    /// Keep the remote snapshot unchanged
    UseRemote,
    /// Keep the side with the later modification timestamp;
    /// remote wins an exact tie, matching the merge tie-break
    UseNewest,
    /// Field-level merge; always succeeds
    Merge,
    /// Defer to a human: resolution abstains, the engine does no guessing
    Manual,
}

/// Apply a resolution strategy to a conflict.
///
/// Returns `None` only for [`ResolutionStrategy::Manual`], meaning a human
/// decision is required. Every other strategy is total.
pub fn resolve(conflict: &SyncConflict, strategy: ResolutionStrategy) -> Option<Record> {
    match strategy {
        ResolutionStrategy::UseLocal => Some(conflict.local_record.clone()),
        ResolutionStrategy::UseRemote => Some(conflict.remote_record.clone()),
        ResolutionStrategy::UseNewest => {
            let side = TieBreak::default().pick(
                conflict.local_record.modified_at,
                conflict.remote_record.modified_at,
            );
            Some(match side {
                Side::Local => conflict.local_record.clone(),
                Side::Remote => conflict.remote_record.clone(),
            })
        }
        ResolutionStrategy::Merge => Some(merge_fields(conflict)),
        ResolutionStrategy::Manual => None,
    }
}

/// Resolve many independent conflicts under one strategy.
///
/// Abstentions (the manual strategy) are dropped from the output; callers
/// that need to surface unresolved conflicts must track their ids
/// separately. Conflicts are assumed to reference disjoint record ids, so
/// no ordering between them is implied.
pub fn resolve_all(conflicts: &[SyncConflict], strategy: ResolutionStrategy) -> Vec<Record> {
    conflicts
        .iter()
        .filter_map(|conflict| resolve(conflict, strategy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{detect_conflict, FieldValue, Record};

    fn snapshot(id: &str, token: &str, modified: u64, age: i64) -> Record {
        Record::new(id, token, 100, modified).with_field("age", FieldValue::Int(age))
    }

    fn conflict(local_modified: u64, remote_modified: u64) -> SyncConflict {
        let local = snapshot("note-1", "tok-local", local_modified, 30);
        let remote = snapshot("note-1", "tok-remote", remote_modified, 31);
        detect_conflict(&local, &remote, Some(0), 9999).unwrap()
    }

    #[test]
    fn use_local_returns_local_unchanged() {
        let c = conflict(800, 900);
        assert_eq!(resolve(&c, ResolutionStrategy::UseLocal).unwrap(), c.local_record);
    }

    #[test]
    fn use_remote_returns_remote_unchanged() {
        let c = conflict(800, 900);
        assert_eq!(
            resolve(&c, ResolutionStrategy::UseRemote).unwrap(),
            c.remote_record
        );
    }

    #[test]
    fn use_newest_picks_later_side() {
        let c = conflict(900, 800);
        assert_eq!(resolve(&c, ResolutionStrategy::UseNewest).unwrap(), c.local_record);

        let c = conflict(800, 900);
        assert_eq!(
            resolve(&c, ResolutionStrategy::UseNewest).unwrap(),
            c.remote_record
        );
    }

    #[test]
    fn use_newest_tie_goes_to_remote() {
        let c = conflict(800, 800);
        assert_eq!(
            resolve(&c, ResolutionStrategy::UseNewest).unwrap(),
            c.remote_record
        );
    }

    #[test]
    fn merge_always_succeeds() {
        let c = conflict(800, 900);
        let merged = resolve(&c, ResolutionStrategy::Merge).unwrap();
        // Remote is newer, so the contested field holds the remote value
        assert_eq!(merged.field("age"), Some(&FieldValue::Int(31)));
    }

    #[test]
    fn manual_abstains() {
        let c = conflict(800, 900);
        assert!(resolve(&c, ResolutionStrategy::Manual).is_none());
    }

    #[test]
    fn resolve_all_drops_abstentions() {
        let conflicts = vec![conflict(800, 900), conflict(700, 600), conflict(500, 500)];

        assert!(resolve_all(&conflicts, ResolutionStrategy::Manual).is_empty());
        assert_eq!(
            resolve_all(&conflicts, ResolutionStrategy::UseLocal).len(),
            conflicts.len()
        );
    }

    #[test]
    fn resolve_all_on_empty_input() {
        assert!(resolve_all(&[], ResolutionStrategy::Merge).is_empty());
    }

    #[test]
    fn strategy_serialization() {
        let json = serde_json::to_string(&ResolutionStrategy::UseNewest).unwrap();
        assert_eq!(json, "\"useNewest\"");
        let parsed: ResolutionStrategy = serde_json::from_str("\"merge\"").unwrap();
        assert_eq!(parsed, ResolutionStrategy::Merge);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_conflict() -> impl Strategy<Value = SyncConflict> {
            (1u64..10_000, 1u64..10_000, any::<i64>(), any::<i64>()).prop_map(
                |(local_modified, remote_modified, local_age, remote_age)| {
                    let local = snapshot("note-1", "tok-local", local_modified, local_age);
                    let remote = snapshot("note-1", "tok-remote", remote_modified, remote_age);
                    detect_conflict(&local, &remote, Some(0), 20_000).unwrap()
                },
            )
        }

        proptest! {
            #[test]
            fn prop_identity_laws(c in arb_conflict()) {
                prop_assert_eq!(
                    resolve(&c, ResolutionStrategy::UseLocal).unwrap(),
                    c.local_record.clone()
                );
                prop_assert_eq!(
                    resolve(&c, ResolutionStrategy::UseRemote).unwrap(),
                    c.remote_record.clone()
                );
                prop_assert!(resolve(&c, ResolutionStrategy::Manual).is_none());
            }

            #[test]
            fn prop_use_newest_never_picks_the_strictly_older_side(c in arb_conflict()) {
                let resolved = resolve(&c, ResolutionStrategy::UseNewest).unwrap();
                prop_assert!(
                    resolved.modified_at
                        >= c.local_record.modified_at.min(c.remote_record.modified_at)
                );
                prop_assert!(
                    resolved == c.local_record || resolved == c.remote_record
                );
            }

            #[test]
            fn prop_resolution_is_deterministic(c in arb_conflict()) {
                for strategy in [
                    ResolutionStrategy::UseLocal,
                    ResolutionStrategy::UseRemote,
                    ResolutionStrategy::UseNewest,
                    ResolutionStrategy::Merge,
                    ResolutionStrategy::Manual,
                ] {
                    prop_assert_eq!(resolve(&c, strategy), resolve(&c, strategy));
                }
            }

            #[test]
            fn prop_merge_is_total(c in arb_conflict()) {
                prop_assert!(resolve(&c, ResolutionStrategy::Merge).is_some());
            }
        }
    }
}
