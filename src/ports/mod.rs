//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the domain/usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `SnapshotStore`: full-snapshot persistence of one collection

pub mod snapshot;

pub use snapshot::SnapshotStore;
