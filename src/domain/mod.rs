//! Domain layer - Core record model and in-memory store.
//!
//! Pure logic only: records, collection identities, id allocation, and the
//! ordered in-memory sequence. No file or framework imports here
//! (hexagonal architecture inner ring); everything is testable in isolation.

pub mod record;
pub mod store;

// Re-export core types for convenience
pub use record::{CollectionKind, Record, RecordId};
pub use store::{IdAllocator, RecordStore};
