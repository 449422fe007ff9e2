//! Core record domain types.
//!
//! Defines the open-schema `Record` entity and the `CollectionKind`
//! identity shared by every layer. Records carry whatever fields the
//! caller supplies plus one system-assigned integer `id`; the system
//! imposes no schema beyond that.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Integer record identifier, unique within its collection.
///
/// Assigned once at creation time and immutable afterwards. Values are
/// seeded from epoch milliseconds so they keep the timestamp-like
/// magnitude existing clients expect.
pub type RecordId = i64;

/// The two collections this service manages.
///
/// Each has its own backing file and an independent id space; an id is
/// only ever compared within its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Lenders,
    Quotes,
}

impl CollectionKind {
    /// Plural key: route segment and import body key (`lenders`, `quotes`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Lenders => "lenders",
            Self::Quotes => "quotes",
        }
    }

    /// Singular display name used in not-found errors (`Lender`, `Quote`).
    pub fn singular(self) -> &'static str {
        match self {
            Self::Lenders => "Lender",
            Self::Quotes => "Quote",
        }
    }

    /// Name of the backing snapshot file (`lenders.json`, `quotes.json`).
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Lenders => "lenders.json",
            Self::Quotes => "quotes.json",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One entity (lender or quote): an open field map plus the assigned id.
///
/// Serializes flat, as `{"id": 1712345678901, "name": "Acme", ...}`: the
/// wire and disk formats are plain JSON objects, exactly what callers send
/// minus any `id` they tried to supply themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// System-assigned identifier. Immutable after creation.
    pub id: RecordId,
    /// Caller-defined fields. Must never contain an `id` key; the
    /// constructor strips one if present.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Build a record from caller-supplied fields and an assigned id.
    ///
    /// Any `id` key in the supplied fields is discarded: the system-assigned
    /// value always wins, on create and on update alike.
    pub fn new(id: RecordId, mut fields: Map<String, Value>) -> Self {
        fields.remove("id");
        Self { id, fields }
    }
}
