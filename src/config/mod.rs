//! Configuration Module - TOML-based Server Configuration
//!
//! Loads and validates configuration from `config.toml`. Every section
//! and every field has a default, so a missing or partial file still
//! yields a runnable server. A `PORT` environment variable overrides
//! the configured port, matching how the service has always been
//! deployed.

pub mod loader;

use serde::Deserialize;

/// Top-level server configuration.
///
/// Loaded from `config.toml` at startup and validated before the
/// listener binds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// HTTP listener and static assets.
  #[serde(default)]
  pub server: ServerConfig,
  /// Snapshot storage location.
  #[serde(default)]
  pub storage: StorageConfig,
  /// Logging output.
  #[serde(default)]
  pub log: LogConfig,
  /// Metrics exposition.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Listen port. Overridden by the `PORT` environment variable.
  #[serde(default = "default_port")]
  pub port: u16,
  /// Listen address.
  #[serde(default = "default_bind_address")]
  pub bind_address: String,
  /// Directory of static frontend assets served as the fallback route.
  #[serde(default = "default_public_dir")]
  pub public_dir: String,
}

/// Snapshot storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
  /// Directory holding `lenders.json` and `quotes.json`.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub level: String,
  /// Emit JSON log lines instead of human-readable ones.
  #[serde(default)]
  pub json: bool,
}

/// Metrics configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Serve the Prometheus `/metrics` endpoint.
  #[serde(default = "default_true")]
  pub enabled: bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      port: default_port(),
      bind_address: default_bind_address(),
      public_dir: default_public_dir(),
    }
  }
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self {
      data_dir: default_data_dir(),
    }
  }
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
      json: false,
    }
  }
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      enabled: default_true(),
    }
  }
}

// Default value functions for serde

fn default_port() -> u16 {
  3000
}

fn default_bind_address() -> String {
  "0.0.0.0".to_string()
}

fn default_public_dir() -> String {
  "public".to_string()
}

fn default_data_dir() -> String {
  ".".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_true() -> bool {
  true
}
