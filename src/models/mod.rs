pub mod alerts;
pub mod scan_record;

pub use alerts::{AlertSummary, Severity};
pub use scan_record::ScanRecord;
