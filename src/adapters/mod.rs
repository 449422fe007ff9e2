//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Concrete infrastructure around the domain: the inbound HTTP surface
//! and the implementations of the outbound port traits in
//! `crate::ports`. Each sub-module groups adapters by concern.
//!
//! Adapter categories:
//! - `http`: axum REST API, router assembly, error responses
//! - `metrics`: Prometheus metrics registry and rendering
//! - `persistence`: JSON snapshot files on disk

pub mod http;
pub mod metrics;
pub mod persistence;
