//! Persistence Adapters - JSON File Storage
//!
//! Implements the SnapshotStore port with one pretty-printed JSON array
//! file per collection. No database dependency; the files stay
//! hand-editable.

pub mod json_file;

pub use json_file::JsonFileStore;
