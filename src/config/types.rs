use serde::{Deserialize, Serialize};

pub const DEFAULT_ZAP_HOST: &str = "http://localhost:8082";
pub const DEFAULT_CONTEXT_ID: u32 = 1;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_DATABASE: &str = "./db/scan_db.sqlite";
pub const DEFAULT_REPORTS_DIR: &str = "./reports";
pub const API_KEY_ENV: &str = "ZAP_API_KEY";

/// On-disk configuration file. Every section and key is optional.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TriggerConfig {
    pub zap: Option<ZapConfig>,
    pub scan: Option<ScanConfig>,
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ZapConfig {
    pub host: Option<String>,
    pub api_key: Option<String>,
    pub context_id: Option<u32>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ScanConfig {
    pub poll_interval_secs: Option<u64>,
    pub max_duration_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StorageConfig {
    pub database: Option<String>,
    pub reports_dir: Option<String>,
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub api_key: Option<String>,
    pub context_id: Option<u32>,
    pub poll_interval_secs: Option<u64>,
    pub max_duration_secs: Option<u64>,
    pub database: Option<String>,
    pub reports_dir: Option<String>,
}

/// Fully resolved settings used by the scan workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub api_key: String,
    pub context_id: u32,
    pub request_timeout_secs: u64,
    pub poll_interval_secs: u64,
    pub max_duration_secs: Option<u64>,
    pub max_retries: u32,
    pub database: String,
    pub reports_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_ZAP_HOST.to_string(),
            api_key: String::new(),
            context_id: DEFAULT_CONTEXT_ID,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            max_duration_secs: None,
            max_retries: DEFAULT_MAX_RETRIES,
            database: DEFAULT_DATABASE.to_string(),
            reports_dir: DEFAULT_REPORTS_DIR.to_string(),
        }
    }
}
