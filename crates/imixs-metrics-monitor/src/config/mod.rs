//! Monitor config loader (strict parsing + env overrides).

pub mod schema;

use std::fs;
use std::path::Path;

use imixs_metrics_core::error::{MetricsError, Result};

pub use schema::{MetricsSection, MonitorConfig, ServerSection};

pub const ENV_ENABLED: &str = "METRICS_ENABLED";
pub const ENV_ANONYMISED: &str = "METRICS_ANONYMISED";
pub const ENV_API_KEY: &str = "METRICS_API_KEY";
pub const ENV_LISTEN: &str = "METRICS_LISTEN";

pub fn load_from_file(path: &str) -> Result<MonitorConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricsError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<MonitorConfig> {
    let cfg: MonitorConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the file when present, otherwise start from defaults; then apply
/// process environment overrides.
pub fn load(path: &str) -> Result<MonitorConfig> {
    let mut cfg = if Path::new(path).exists() {
        load_from_file(path)?
    } else {
        tracing::warn!(%path, "config file not found, using defaults");
        MonitorConfig::default()
    };
    apply_overrides(&mut cfg, |k| std::env::var(k).ok())?;
    Ok(cfg)
}

/// Apply `METRICS_*` overrides read through `lookup`, then re-validate.
pub fn apply_overrides<F>(cfg: &mut MonitorConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup(ENV_ENABLED) {
        cfg.metrics.enabled = parse_bool(ENV_ENABLED, &v)?;
    }
    if let Some(v) = lookup(ENV_ANONYMISED) {
        cfg.metrics.anonymised = parse_bool(ENV_ANONYMISED, &v)?;
    }
    if let Some(v) = lookup(ENV_API_KEY) {
        cfg.metrics.api_key = v;
    }
    if let Some(v) = lookup(ENV_LISTEN) {
        cfg.server.listen = v;
    }
    cfg.validate()
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(MetricsError::BadRequest(format!("{key} must be true or false, got {raw}"))),
    }
}
