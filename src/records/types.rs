//! Core data types and error definitions for the record store.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Caller-supplied fields of a record, kept in the order they were first provided.
pub type RecordFields = Map<String, Value>;

/// Name of the reserved identifier field.
pub const ID_FIELD: &str = "id";

/// Integer identifier assigned by the store.
pub type RecordId = u64;

/// Errors emitted by record lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// No record matches the requested identifier.
    #[error("Record not found: {0}")]
    NotFound(String),
}

/// A single student record: a store-assigned `id` plus arbitrary caller fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    fields: RecordFields,
}

impl Record {
    /// Build a record from caller fields, discarding any `id` the caller supplied.
    pub fn new(id: RecordId, mut fields: RecordFields) -> Self {
        fields.shift_remove(ID_FIELD);
        Self { id, fields }
    }

    /// Identifier assigned at creation.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Look up a single caller field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Merge `patch` over the existing fields. Existing keys keep their position; new keys are
    /// appended. The `id` is never touched.
    pub fn merge(&mut self, patch: RecordFields) {
        for (key, value) in patch {
            if key == ID_FIELD {
                continue;
            }
            self.fields.insert(key, value);
        }
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(ID_FIELD, &self.id)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parse a textual identifier the way a path parameter is compared against stored ids.
///
/// Accepts surrounding whitespace, leading zeros, and integral decimals such as `"3.0"`.
/// Returns `None` for anything that cannot denote a non-negative integer id.
pub fn parse_record_id(raw: &str) -> Option<RecordId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(id) = trimmed.parse::<RecordId>() {
        return Some(id);
    }
    // Only plain decimal notation; rejects "inf", "NaN" and exponent forms.
    if !trimmed.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let number = trimmed.parse::<f64>().ok()?;
    if number.fract() != 0.0 || number < 0.0 || number >= RecordId::MAX as f64 {
        return None;
    }
    Some(number as RecordId)
}
