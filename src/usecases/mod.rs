//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces. One service per
//! collection: each `CollectionService` owns its store, its snapshot
//! backend, and the persistence policy around every mutation.

pub mod collection;

pub use collection::CollectionService;
