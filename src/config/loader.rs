//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, applying the `PORT` environment
//! override, validating all parameters, and providing clear error
//! messages for misconfiguration. A missing file is not an error:
//! the server runs fine on defaults alone.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - The file exists but can't be read
/// - TOML parsing fails
/// - `PORT` is set but not a valid port number
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let mut config = if path.exists() {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content).with_context(|| "Failed to parse config.toml")?
  } else {
    info!(path = %path.display(), "No config file, using defaults");
    AppConfig::default()
  };

  apply_port_override(&mut config, std::env::var("PORT").ok().as_deref())?;
  validate_config(&config)?;

  info!(
    port = config.server.port,
    data_dir = %config.storage.data_dir,
    public_dir = %config.server.public_dir,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Apply the `PORT` environment override, when present.
///
/// Split from `load_config` so tests can exercise it without touching
/// the process environment.
fn apply_port_override(config: &mut AppConfig, port: Option<&str>) -> Result<()> {
  if let Some(raw) = port {
    config.server.port = raw
      .parse()
      .with_context(|| format!("PORT must be a port number, got {raw:?}"))?;
  }
  Ok(())
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  // Server validation
  anyhow::ensure!(config.server.port > 0, "server.port must not be 0");
  anyhow::ensure!(
    !config.server.bind_address.is_empty(),
    "server.bind_address must not be empty"
  );
  anyhow::ensure!(
    !config.server.public_dir.is_empty(),
    "server.public_dir must not be empty"
  );

  // Storage validation
  anyhow::ensure!(
    !config.storage.data_dir.is_empty(),
    "storage.data_dir must not be empty"
  );

  // Log validation
  anyhow::ensure!(
    matches!(
      config.log.level.as_str(),
      "trace" | "debug" | "info" | "warn" | "error"
    ),
    "log.level must be one of trace/debug/info/warn/error, got {:?}",
    config.log.level
  );

  Ok(())
}
