use std::path::Path;
use crate::errors::TriggerError;
use super::credentials::resolve_credential;
use super::types::*;
use super::security::validate_security_patterns;
use super::schema::CONFIG_SCHEMA;
use tracing::{debug, warn};

pub async fn parse_config(path: &Path) -> Result<TriggerConfig, TriggerError> {
    if !path.exists() {
        return Err(TriggerError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(TriggerError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<TriggerConfig, TriggerError> {
    // An empty file is a valid, all-defaults config
    if content.trim().is_empty() {
        return Ok(TriggerConfig::default());
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    validate_security_patterns(&yaml)?;
    validate_schema(&yaml)?;

    let config: TriggerConfig = serde_yaml::from_value(yaml)?;
    validate_values(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), TriggerError> {
    // Convert YAML value to JSON for schema validation
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| TriggerError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| TriggerError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; typed parsing below rejects what actually matters
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

fn validate_values(config: &TriggerConfig) -> Result<(), TriggerError> {
    if let Some(zap) = &config.zap {
        if let Some(host) = &zap.host {
            validate_host(host)?;
        }
        if zap.request_timeout_secs == Some(0) {
            return Err(TriggerError::Config("zap.request_timeout_secs must be at least 1".into()));
        }
    }

    if let Some(scan) = &config.scan {
        if scan.poll_interval_secs == Some(0) {
            return Err(TriggerError::Config("scan.poll_interval_secs must be at least 1".into()));
        }
        if scan.max_duration_secs == Some(0) {
            return Err(TriggerError::Config("scan.max_duration_secs must be at least 1".into()));
        }
    }

    Ok(())
}

fn validate_host(host: &str) -> Result<(), TriggerError> {
    if !(host.starts_with("http://") || host.starts_with("https://")) {
        return Err(TriggerError::Config(format!(
            "Scanner host must be an http:// or https:// URL, got '{}'", host
        )));
    }
    Ok(())
}

/// Merge CLI overrides, the config file, the environment and defaults, in
/// that order of precedence.
pub fn resolve_settings(file: Option<&TriggerConfig>, overrides: &Overrides) -> Result<Settings, TriggerError> {
    let defaults = Settings::default();
    let zap = file.and_then(|c| c.zap.clone()).unwrap_or_default();
    let scan = file.and_then(|c| c.scan.clone()).unwrap_or_default();
    let storage = file.and_then(|c| c.storage.clone()).unwrap_or_default();

    let host = overrides.host.clone()
        .or(zap.host)
        .unwrap_or(defaults.host);
    validate_host(&host)?;

    let api_key = overrides.api_key.clone()
        .or(zap.api_key)
        .map(|k| resolve_credential(&k))
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .unwrap_or_default();
    if api_key.is_empty() {
        warn!("No scanner API key configured; set {} or zap.api_key", API_KEY_ENV);
    }

    let poll_interval_secs = overrides.poll_interval_secs
        .or(scan.poll_interval_secs)
        .unwrap_or(defaults.poll_interval_secs);
    if poll_interval_secs == 0 {
        return Err(TriggerError::Config("Poll interval must be at least 1 second".into()));
    }

    let max_duration_secs = overrides.max_duration_secs.or(scan.max_duration_secs);
    if max_duration_secs == Some(0) {
        return Err(TriggerError::Config("Max duration must be at least 1 second".into()));
    }

    let settings = Settings {
        host: host.trim_end_matches('/').to_string(),
        api_key,
        context_id: overrides.context_id.or(zap.context_id).unwrap_or(defaults.context_id),
        request_timeout_secs: zap.request_timeout_secs.unwrap_or(defaults.request_timeout_secs),
        poll_interval_secs,
        max_duration_secs,
        max_retries: scan.max_retries.unwrap_or(defaults.max_retries),
        database: overrides.database.clone().or(storage.database).unwrap_or(defaults.database),
        reports_dir: overrides.reports_dir.clone().or(storage.reports_dir).unwrap_or(defaults.reports_dir),
    };

    debug!(
        host = %settings.host,
        context_id = settings.context_id,
        poll_interval_secs = settings.poll_interval_secs,
        database = %settings.database,
        "Resolved settings"
    );
    Ok(settings)
}
