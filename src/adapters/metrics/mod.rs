//! Metrics Adapters - Service Observability
//!
//! Prometheus registry for the API, exposed as text on `GET /metrics`.
//! The persist-failure counter is the observability channel for swallowed
//! snapshot write errors: the HTTP contract never surfaces them, this
//! counter does.

pub mod registry;

pub use registry::ApiMetrics;
