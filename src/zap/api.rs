use async_trait::async_trait;
use crate::errors::TriggerError;
use crate::models::AlertSummary;

/// Control surface of the scanner daemon used by the scan workflow.
#[async_trait]
pub trait ScannerApi: Send + Sync {
    /// Start an active scan over every URL in the given context.
    /// Returns the scanner-assigned scan id.
    async fn start_scan(&self, context_id: u32) -> Result<i64, TriggerError>;

    /// Completion percentage of a running scan, 0 to 100.
    async fn scan_progress(&self, scan_id: i64) -> Result<u8, TriggerError>;

    /// Alert counts per severity across the scanner's current session.
    async fn alerts_summary(&self) -> Result<AlertSummary, TriggerError>;

    /// Full HTML report of the scanner's current session.
    async fn html_report(&self) -> Result<String, TriggerError>;

    /// Ask the scanner to abort a running scan.
    async fn stop_scan(&self, scan_id: i64) -> Result<(), TriggerError>;

    /// Base URL, for logging
    fn host(&self) -> &str;
}
