//! # Converge Engine
//!
//! A conflict detection and resolution engine for records synchronized
//! across multiple independent writers.
//!
//! When devices edit the same record while disconnected, their copies
//! diverge. This crate is the reconciliation core that runs when they
//! reconnect: given the local and remote snapshots of one logical record
//! plus the last-known-sync timestamp, it decides whether a genuine
//! conflict exists, classifies it, and produces a resolved record under a
//! chosen strategy.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine has no knowledge of files, network, or clocks;
//!   detection time is caller-supplied
//! - **Deterministic**: the same two snapshots always resolve the same way
//! - **Snapshot-safe**: inputs are never mutated; every resolution returns
//!   a fresh record, so re-running after a failed compare-and-swap write is
//!   always safe
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`Record`] is a versioned bag of named fields with a stable id, an
//! opaque change token owned by the store, and creation/modification
//! timestamps attached by the store at write time. Deletion is a boolean
//! tombstone field, so it propagates through the same merge machinery as
//! any other edit.
//!
//! ### Detection and classification
//!
//! [`detect_conflict`] reports a conflict only when *both* sides changed
//! since the last successful sync; a one-sided change is a straight replace
//! and stays the caller's job. Detected conflicts are classified by
//! [`classify`] as [`ConflictType::Created`], [`ConflictType::Modified`]
//! or [`ConflictType::Deleted`].
//!
//! ### Resolution
//!
//! [`resolve`] applies a [`ResolutionStrategy`]: keep local, keep remote,
//! keep the newest side, merge field by field, or abstain for a human.
//! Timestamp ties are broken by the named [`TieBreak`] policy (remote wins
//! by default, consistently for `UseNewest` and `Merge`).
//!
//! ### The store boundary
//!
//! The [`RecordStore`] trait models the external store with optimistic
//! concurrency: a compare-and-swap `save` keyed on the change token.
//! [`MemoryStore`] is the in-memory reference implementation.
//!
//! ## Quick Start
//!
//! ```rust
//! use converge_engine::{detect_conflict, resolve, FieldValue, Record, ResolutionStrategy};
//!
//! let local = Record::new("note-1", "tok-a", 100, 200)
//!     .with_field("title", FieldValue::Text("Groceries".into()));
//! let remote = Record::new("note-1", "tok-b", 100, 150)
//!     .with_field("title", FieldValue::Text("Groceries!".into()));
//!
//! // Both sides changed since the sync point at t=120
//! let conflict = detect_conflict(&local, &remote, Some(120), 300)
//!     .expect("both sides changed");
//!
//! let resolved = resolve(&conflict, ResolutionStrategy::UseNewest)
//!     .expect("useNewest never abstains");
//! assert_eq!(
//!     resolved.field("title"),
//!     Some(&FieldValue::Text("Groceries".into()))
//! );
//! ```

pub mod analyze;
pub mod conflict;
pub mod error;
pub mod merge;
pub mod record;
pub mod resolve;
pub mod store;

// Re-export main types at crate root
pub use analyze::{analyze_conflict, FieldDiff};
pub use conflict::{classify, detect_conflict, ConflictId, ConflictType, SyncConflict};
pub use error::{Error, Result};
pub use merge::{merge_fields, merge_fields_with, Side, TieBreak};
pub use record::{FieldValue, Record, TOMBSTONE_FIELD};
pub use resolve::{resolve, resolve_all, ResolutionStrategy};
pub use store::{MemoryStore, RecordStore, NEW_RECORD_TOKEN};

/// Type aliases for clarity
pub type RecordId = String;
pub type FieldName = String;
pub type ChangeToken = String;
pub type Timestamp = u64;

/// Sentinel substituted for a missing last-sync timestamp: the earliest
/// representable instant, so every recorded modification counts as a change.
pub const EARLIEST_TIMESTAMP: Timestamp = 0;
