//! Record types - the unit of synchronization.

use crate::{ChangeToken, FieldName, RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field name carrying the deletion tombstone.
///
/// Deletion is represented as an ordinary boolean field rather than a
/// distinct type tag, so tombstones propagate through the same field-merge
/// machinery as every other edit.
pub const TOMBSTONE_FIELD: &str = "isDeleted";

/// A single field value.
///
/// A closed sum over the supported value kinds. Values that do not fit a
/// known kind travel as [`FieldValue::Opaque`] JSON; they are carried and
/// merged like any other value but never compare equal under
/// [`FieldValue::content_eq`], not even to themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Real(f64),
    Bool(bool),
    Timestamp(Timestamp),
    Bytes(Vec<u8>),
    /// Arbitrary JSON for payloads outside the known kinds
    Opaque(serde_json::Value),
}

impl FieldValue {
    /// Kind name for diagnostics and caller-side warnings.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Int(_) => "int",
            FieldValue::Real(_) => "real",
            FieldValue::Bool(_) => "bool",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Bytes(_) => "bytes",
            FieldValue::Opaque(_) => "opaque",
        }
    }

    /// Whether this kind participates in content comparison.
    ///
    /// Callers can use this to surface a warning when a record carries
    /// values the engine will always report as divergent.
    pub fn is_comparable(&self) -> bool {
        !matches!(self, FieldValue::Bytes(_) | FieldValue::Opaque(_))
    }

    /// Kind-aware content equality.
    ///
    /// Text, integer, real, boolean and timestamp values compare by value.
    /// Binary and opaque values always compare unequal, even when both
    /// sides hold the same payload; callers that need byte-level equality
    /// for those kinds must compare out of band and should surface them
    /// as warnings rather than treat the report as an error.
    pub fn content_eq(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Real(a), FieldValue::Real(b)) => a == b,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a == b,
            _ => false,
        }
    }
}

/// A versioned, named bag of fields synchronized across writers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Stable identifier, unique within the store, never changes
    pub id: RecordId,
    /// Opaque token that changes on every stored write; equality-only,
    /// never interpreted
    pub change_token: ChangeToken,
    /// Set once at first write, never mutated afterwards
    pub created_at: Timestamp,
    /// Set on every write; monotonic per writer, not globally ordered
    pub modified_at: Timestamp,
    /// Field content by name; an absent key means an absent field
    pub fields: HashMap<FieldName, FieldValue>,
}

impl Record {
    /// Create a record with no fields.
    pub fn new(
        id: impl Into<RecordId>,
        change_token: impl Into<ChangeToken>,
        created_at: Timestamp,
        modified_at: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            change_token: change_token.into(),
            created_at,
            modified_at,
            fields: HashMap::new(),
        }
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, name: impl Into<FieldName>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Set or replace a field value.
    pub fn set_field(&mut self, name: impl Into<FieldName>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Get a field value by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Check whether this record carries a deletion tombstone.
    pub fn is_deleted(&self) -> bool {
        matches!(self.fields.get(TOMBSTONE_FIELD), Some(FieldValue::Bool(true)))
    }

    /// Mark this record deleted (tombstone) at the given time.
    pub fn mark_deleted(&mut self, at: Timestamp) {
        self.fields
            .insert(TOMBSTONE_FIELD.to_string(), FieldValue::Bool(true));
        self.modified_at = at;
    }
}
