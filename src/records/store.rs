//! In-memory ordered record storage.

use super::types::{Record, RecordFields, RecordId};

/// Ordered sequence of records plus the identifier counter.
///
/// Insertion order is list order. Identifiers start at 1 and are never reused, including
/// after deletion. The store is not synchronized; [`super::RecordService`] serializes access.
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<Record>,
    next_id: RecordId,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Create an empty store whose first assigned id is 1.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// All records in creation order.
    pub fn list(&self) -> &[Record] {
        &self.records
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a new record built from `fields` and return it.
    pub fn create(&mut self, fields: RecordFields) -> Record {
        let record = Record::new(self.next_id, fields);
        self.next_id += 1;
        self.records.push(record.clone());
        record
    }

    /// Find the record with the given id.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Merge `patch` into the record with the given id in place, returning the result.
    pub fn update(&mut self, id: RecordId, patch: RecordFields) -> Option<Record> {
        let record = self.records.iter_mut().find(|record| record.id() == id)?;
        record.merge(patch);
        Some(record.clone())
    }

    /// Remove every record with the given id. Returns how many were removed.
    pub fn delete(&mut self, id: RecordId) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        before - self.records.len()
    }
}
