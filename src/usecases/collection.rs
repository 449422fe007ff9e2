//! Collection Service - Store Operations and Persistence Policy
//!
//! Owns one collection end to end:
//! - Mutex-guarded in-memory `RecordStore`; the lock is held across the
//!   snapshot write, so each read-modify-write-persist cycle is atomic
//!   per collection even on the multi-threaded runtime
//! - Snapshot persistence after every mutation, best-effort: a failed
//!   write is logged and counted, the mutation still reports success
//! - Operation metrics per collection
//!
//! The two collections get independent service instances; nothing is
//! shared between them except the metrics registry.

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::adapters::metrics::ApiMetrics;
use crate::domain::record::{CollectionKind, Record, RecordId};
use crate::domain::store::RecordStore;
use crate::ports::snapshot::SnapshotStore;

/// One collection's operations: list, add, update, delete, import.
pub struct CollectionService {
  /// Which collection this service manages.
  kind: CollectionKind,
  /// In-memory sequence. The lock is held across the snapshot write so
  /// mutations on one collection fully serialize (see module docs).
  store: Mutex<RecordStore>,
  /// Durable snapshot backend.
  snapshots: Arc<dyn SnapshotStore>,
  /// Shared metrics registry.
  metrics: Arc<ApiMetrics>,
}

impl CollectionService {
  /// Build the service by loading the persisted snapshot.
  ///
  /// Never fails: a missing snapshot starts the collection empty, and an
  /// unreadable or unparseable one is logged and also starts it empty.
  /// The process must come up even with a damaged data file.
  pub async fn load(
    kind: CollectionKind,
    snapshots: Arc<dyn SnapshotStore>,
    metrics: Arc<ApiMetrics>,
  ) -> Self {
    let records = match snapshots.load().await {
      Ok(Some(records)) => {
        info!(collection = %kind, count = records.len(), "Loaded records from snapshot");
        records
      }
      Ok(None) => {
        info!(collection = %kind, "No snapshot file, starting empty");
        Vec::new()
      }
      Err(e) => {
        warn!(collection = %kind, error = %e, "Failed to load snapshot, starting empty");
        Vec::new()
      }
    };

    metrics
      .records
      .with_label_values(&[kind.key()])
      .set(records.len() as i64);

    Self {
      kind,
      store: Mutex::new(RecordStore::from_records(records)),
      snapshots,
      metrics,
    }
  }

  /// The collection identity (import body key, error names).
  pub fn kind(&self) -> CollectionKind {
    self.kind
  }

  /// Full current sequence, in order.
  pub async fn list(&self) -> Vec<Record> {
    self.count_op("list");
    self.store.lock().await.records().to_vec()
  }

  /// Append a record built from `fields` plus a fresh id, then persist.
  #[instrument(skip(self, fields), fields(collection = %self.kind))]
  pub async fn add(&self, fields: Map<String, Value>) -> Record {
    self.count_op("add");
    let mut store = self.store.lock().await;
    let record = store.add(fields);
    self.persist(&store).await;
    record
  }

  /// Replace every field of the record with `id`, then persist.
  ///
  /// Returns `None` without touching disk when no record matches.
  #[instrument(skip(self, fields), fields(collection = %self.kind))]
  pub async fn update(&self, id: RecordId, fields: Map<String, Value>) -> Option<Record> {
    self.count_op("update");
    let mut store = self.store.lock().await;
    let updated = store.update(id, fields)?;
    self.persist(&store).await;
    Some(updated)
  }

  /// Remove the record with `id`, then persist.
  ///
  /// Returns `false` without touching disk when no record matches.
  #[instrument(skip(self), fields(collection = %self.kind))]
  pub async fn delete(&self, id: RecordId) -> bool {
    self.count_op("delete");
    let mut store = self.store.lock().await;
    if !store.remove(id) {
      return false;
    }
    self.persist(&store).await;
    true
  }

  /// Replace the whole collection with `items` in order, then persist.
  ///
  /// Returns the new record count.
  #[instrument(skip(self, items), fields(collection = %self.kind))]
  pub async fn import(&self, items: Vec<Map<String, Value>>) -> usize {
    self.count_op("import");
    let mut store = self.store.lock().await;
    let count = store.replace_all(items);
    self.persist(&store).await;
    info!(collection = %self.kind, count, "Imported records, collection replaced");
    count
  }

  /// Write the full snapshot, best-effort.
  ///
  /// A failed write leaves memory and disk diverged until the next
  /// successful write or restart; the caller still reports success.
  /// That divergence is visible in logs and the persist-failure counter.
  async fn persist(&self, store: &RecordStore) {
    self
      .metrics
      .records
      .with_label_values(&[self.kind.key()])
      .set(store.len() as i64);

    if let Err(e) = self.snapshots.save(store.records()).await {
      self
        .metrics
        .persist_failures
        .with_label_values(&[self.kind.key()])
        .inc();
      tracing::error!(collection = %self.kind, error = %e, "Failed to persist snapshot");
    }
  }

  fn count_op(&self, op: &str) {
    self
      .metrics
      .operations
      .with_label_values(&[self.kind.key(), op])
      .inc();
  }
}
