//! Snapshot Port - Collection Persistence Interface
//!
//! Defines the trait between a collection's in-memory sequence and its
//! durable backing file. No database dependency - a snapshot is the full
//! sequence, written whole and read whole.
//!
//! The persistence policy lives in the caller: load failures fall back to
//! an empty collection and save failures are logged and swallowed, so this
//! trait simply reports what happened.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::record::Record;

/// Durable store for one collection's full snapshot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync + 'static {
  /// Load the persisted sequence.
  ///
  /// `Ok(None)` means no snapshot exists yet (first startup); `Err` means
  /// the snapshot exists but could not be read or parsed.
  async fn load(&self) -> Result<Option<Vec<Record>>>;

  /// Replace the persisted snapshot with `records`, in order.
  async fn save(&self, records: &[Record]) -> Result<()>;
}
