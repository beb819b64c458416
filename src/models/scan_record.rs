use serde::{Deserialize, Serialize};
use super::alerts::AlertSummary;

/// One row of the local `scan` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Local row id.
    pub id: i64,
    /// Identifier assigned by the scanner when the scan was started.
    pub scan_id: i64,
    /// Local time the record was first written, `%Y-%m-%d %H:%M:%S`.
    pub created: String,
    /// Local time of the most recent write.
    pub updated: String,
    /// Completion percentage, 0 to 100.
    pub progress: u8,
    pub high_alerts: u32,
    pub medium_alerts: u32,
    pub low_alerts: u32,
    pub info_alerts: u32,
    /// Report file name, empty until the report has been written.
    pub report: String,
}

impl ScanRecord {
    pub fn alerts(&self) -> AlertSummary {
        AlertSummary {
            high: self.high_alerts,
            medium: self.medium_alerts,
            low: self.low_alerts,
            informational: self.info_alerts,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }
}
