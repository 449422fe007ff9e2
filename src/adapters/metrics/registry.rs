//! Prometheus Metrics Registry - API Observability
//!
//! Registers and exposes Prometheus metrics for the collection services.
//! Covers operation counts, record counts, and persistence failures.

use prometheus::{Encoder, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};

/// Centralized Prometheus metrics for the API.
///
/// All metrics follow the naming convention `loanboard_*` and carry a
/// `collection` label so lenders and quotes can be filtered apart.
pub struct ApiMetrics {
    /// Prometheus registry.
    registry: Registry,
    /// Store operations counter, labelled by collection and operation.
    pub operations: IntCounterVec,
    /// Snapshot write failures, labelled by collection.
    pub persist_failures: IntCounterVec,
    /// Current record count per collection.
    pub records: IntGaugeVec,
}

impl ApiMetrics {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let operations = IntCounterVec::new(
            Opts::new(
                "loanboard_operations_total",
                "Total store operations served",
            ),
            &["collection", "op"],
        )?;

        let persist_failures = IntCounterVec::new(
            Opts::new(
                "loanboard_persist_failures_total",
                "Snapshot writes that failed and were swallowed",
            ),
            &["collection"],
        )?;

        let records = IntGaugeVec::new(
            Opts::new("loanboard_records", "Current record count"),
            &["collection"],
        )?;

        registry.register(Box::new(operations.clone()))?;
        registry.register(Box::new(persist_failures.clone()))?;
        registry.register(Box::new(records.clone()))?;

        Ok(Self {
            registry,
            operations,
            persist_failures,
            records,
        })
    }

    /// Render the registry in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap_or_default()
    }
}
