//! Record service serializing access to the in-memory store.

use crate::{
    metrics::{MetricsSnapshot, StoreMetrics},
    records::{
        store::RecordStore,
        types::{Record, RecordError, RecordFields, parse_record_id},
    },
};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Owns the record store and the mutation counters.
///
/// A single mutex guards every operation, so creates, updates, and deletes never interleave
/// and ids are never assigned twice. Construct the service once near process start and share
/// it through an `Arc`.
#[derive(Default)]
pub struct RecordService {
    store: Mutex<RecordStore>,
    metrics: StoreMetrics,
}

/// Abstraction over record operations used by the HTTP surface.
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// Return every record in creation order.
    async fn list(&self) -> Vec<Record>;

    /// Store a new record built from `fields`, assigning the next id.
    async fn create(&self, fields: RecordFields) -> Record;

    /// Fetch the record whose id loosely equals `id`.
    async fn get(&self, id: &str) -> Result<Record, RecordError>;

    /// Merge `fields` into the record whose id loosely equals `id`.
    async fn update(&self, id: &str, fields: RecordFields) -> Result<Record, RecordError>;

    /// Remove any record whose id loosely equals `id`. Missing ids are not an error.
    async fn delete(&self, id: &str);

    /// Retrieve the current metrics snapshot for diagnostics.
    async fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl RecordService {
    /// Build a service over an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordApi for RecordService {
    async fn list(&self) -> Vec<Record> {
        let store = self.store.lock().await;
        tracing::debug!(count = store.len(), "Listing records");
        store.list().to_vec()
    }

    async fn create(&self, fields: RecordFields) -> Record {
        let mut store = self.store.lock().await;
        let record = store.create(fields);
        self.metrics.record_created();
        tracing::info!(id = record.id(), "Created record");
        record
    }

    async fn get(&self, id: &str) -> Result<Record, RecordError> {
        let store = self.store.lock().await;
        parse_record_id(id)
            .and_then(|parsed| store.get(parsed).cloned())
            .ok_or_else(|| RecordError::NotFound(id.to_string()))
    }

    async fn update(&self, id: &str, fields: RecordFields) -> Result<Record, RecordError> {
        let mut store = self.store.lock().await;
        let Some(parsed) = parse_record_id(id) else {
            tracing::debug!(id, "Update target is not a valid id");
            return Err(RecordError::NotFound(id.to_string()));
        };
        let record = store
            .update(parsed, fields)
            .ok_or_else(|| RecordError::NotFound(id.to_string()))?;
        self.metrics.record_updated();
        tracing::info!(id = record.id(), "Updated record");
        Ok(record)
    }

    async fn delete(&self, id: &str) {
        let mut store = self.store.lock().await;
        let removed = parse_record_id(id).map_or(0, |parsed| store.delete(parsed));
        self.metrics.record_deleted(removed as u64);
        tracing::info!(id, removed, "Deleted record");
    }

    async fn metrics_snapshot(&self) -> MetricsSnapshot {
        let store = self.store.lock().await;
        self.metrics.snapshot(store.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn fields(value: Value) -> RecordFields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn lookups_accept_textual_ids() {
        let service = RecordService::new();
        service.create(fields(json!({"name": "Alice"}))).await;

        let found = service.get("1").await.expect("record 1");
        assert_eq!(found.get("name"), Some(&json!("Alice")));
        assert_eq!(service.get(" 01 ").await.expect("loose id").id(), 1);
    }

    #[tokio::test]
    async fn missing_and_invalid_ids_are_not_found() {
        let service = RecordService::new();
        service.create(fields(json!({"name": "Alice"}))).await;

        assert_eq!(
            service.get("2").await,
            Err(RecordError::NotFound("2".into()))
        );
        assert_eq!(
            service.get("alice").await,
            Err(RecordError::NotFound("alice".into()))
        );
        assert_eq!(
            service.update("x", fields(json!({"name": "B"}))).await,
            Err(RecordError::NotFound("x".into()))
        );
    }

    #[tokio::test]
    async fn delete_is_silent_and_counts_removals() {
        let service = RecordService::new();
        service.create(fields(json!({"name": "Alice"}))).await;
        service.create(fields(json!({"name": "Bob"}))).await;

        service.delete("2").await;
        service.delete("2").await;
        service.delete("not-an-id").await;

        assert_eq!(service.list().await.len(), 1);
        assert!(service.get("2").await.is_err());

        let snapshot = service.metrics_snapshot().await;
        assert_eq!(snapshot.records_created, 2);
        assert_eq!(snapshot.records_deleted, 1);
        assert_eq!(snapshot.records_live, 1);
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let service = Arc::new(RecordService::new());
        let mut handles = Vec::new();
        for n in 0..32 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service.create(fields(json!({ "n": n }))).await.id()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.expect("task"));
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<u64>>());

        let listed: Vec<u64> = service.list().await.iter().map(Record::id).collect();
        assert_eq!(listed, (1..=32).collect::<Vec<u64>>());
    }
}
