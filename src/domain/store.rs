//! In-memory record store and id allocation.
//!
//! `RecordStore` is the pure core of the service: an ordered sequence of
//! records with add/update/remove/replace operations. It does no I/O and
//! knows nothing about files or HTTP; persistence is layered on top by
//! `CollectionService`.
//!
//! Ids come from a monotonic allocator seeded from wall-clock milliseconds.
//! Stamping raw timestamps would hand the same id to two entries of a bulk
//! import landing in one millisecond tick; the allocator keeps the familiar
//! epoch-ms magnitude while guaranteeing uniqueness.

use chrono::Utc;
use serde_json::{Map, Value};

use super::record::{Record, RecordId};

/// Monotonic id source for one collection.
///
/// Starts at the current epoch millisecond and only ever counts up. After
/// loading a snapshot the allocator is advanced past every loaded id, so a
/// restart can never re-issue an id that is already on disk.
#[derive(Debug)]
pub struct IdAllocator {
    next: RecordId,
}

impl IdAllocator {
    /// Allocator seeded from the current wall clock.
    pub fn seeded_now() -> Self {
        Self {
            next: Utc::now().timestamp_millis(),
        }
    }

    /// Advance the allocator so it will never issue `id` again.
    pub fn reserve_past(&mut self, id: RecordId) {
        if id >= self.next {
            self.next = id + 1;
        }
    }

    /// Hand out the next id.
    pub fn allocate(&mut self) -> RecordId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Ordered in-memory sequence of records for one collection.
pub struct RecordStore {
    /// Records in insertion order (import order after a bulk import).
    records: Vec<Record>,
    /// Id source, advanced past every id this store has ever seen.
    ids: IdAllocator,
}

impl RecordStore {
    /// Empty store with a freshly seeded allocator.
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// Store pre-populated from a loaded snapshot.
    ///
    /// Order is preserved as loaded. The allocator is advanced past the
    /// highest loaded id so future allocations stay unique.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut ids = IdAllocator::seeded_now();
        for record in &records {
            ids.reserve_past(record.id);
        }
        Self { records, ids }
    }

    /// The full current sequence, in order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a new record built from `fields` plus a fresh id.
    pub fn add(&mut self, fields: Map<String, Value>) -> Record {
        let record = Record::new(self.ids.allocate(), fields);
        self.records.push(record.clone());
        record
    }

    /// Replace every field of the record with `id` by `fields`.
    ///
    /// Full replacement, not a merge: fields omitted from `fields` are
    /// dropped. Returns `None` (sequence untouched) when no record matches.
    pub fn update(&mut self, id: RecordId, fields: Map<String, Value>) -> Option<Record> {
        let slot = self.records.iter_mut().find(|r| r.id == id)?;
        *slot = Record::new(id, fields);
        Some(slot.clone())
    }

    /// Remove the record with `id`. Returns `false` when no record matches.
    pub fn remove(&mut self, id: RecordId) -> bool {
        match self.records.iter().position(|r| r.id == id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    /// Discard the whole sequence and rebuild it from `items`, in order.
    ///
    /// Every entry gets a fresh id; consecutive allocation keeps the ids of
    /// one import batch distinct by construction. Returns the new count.
    pub fn replace_all(&mut self, items: Vec<Map<String, Value>>) -> usize {
        self.records.clear();
        for fields in items {
            let record = Record::new(self.ids.allocate(), fields);
            self.records.push(record);
        }
        self.records.len()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
