use std::path::PathBuf;
use std::time::Duration;
use crate::config::Settings;
use crate::errors::RetryConfig;
use crate::models::AlertSummary;
use crate::reporting::WrittenReport;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub context_id: u32,
    pub poll_interval: Duration,
    /// Abort the scan if it has not finished within this long.
    pub max_duration: Option<Duration>,
    pub reports_dir: PathBuf,
    pub retry: RetryConfig,
}

impl PipelineConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            context_id: settings.context_id,
            poll_interval: Duration::from_secs(settings.poll_interval_secs),
            max_duration: settings.max_duration_secs.map(Duration::from_secs),
            reports_dir: PathBuf::from(&settings.reports_dir),
            retry: RetryConfig {
                max_retries: settings.max_retries,
                ..RetryConfig::default()
            },
        }
    }
}

/// Result of a completed scan run.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub scan_id: i64,
    pub progress: u8,
    pub alerts: AlertSummary,
    pub report: WrittenReport,
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_config_from_settings() {
        let settings = Settings {
            context_id: 3,
            poll_interval_secs: 15,
            max_duration_secs: Some(600),
            max_retries: 5,
            reports_dir: "/tmp/r".into(),
            ..Settings::default()
        };
        let config = PipelineConfig::from_settings(&settings);
        assert_eq!(config.context_id, 3);
        assert_eq!(config.poll_interval, Duration::from_secs(15));
        assert_eq!(config.max_duration, Some(Duration::from_secs(600)));
        assert_eq!(config.retry.max_retries, 5);
        assert_eq!(config.reports_dir, PathBuf::from("/tmp/r"));
    }
}
