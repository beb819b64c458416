use crate::models::AlertSummary;

/// Messages sent from the scan pipeline to the terminal for real-time display.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// The scanner accepted the scan request
    ScanStarted {
        scan_id: i64,
        context_id: u32,
    },
    /// A status poll returned
    Progress {
        scan_id: i64,
        progress: u8,
    },
    /// Scan finished; fetching summary and report
    Collecting {
        scan_id: i64,
    },
    /// The HTML report was written
    ReportWritten {
        file_name: String,
    },
    /// Workflow completed successfully
    Completed {
        scan_id: i64,
        alerts: AlertSummary,
        duration_ms: u64,
    },
    /// Workflow stopped with an error
    Failed {
        error: String,
    },
}
