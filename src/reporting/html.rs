use std::path::{Path, PathBuf};
use chrono::{DateTime, Local, TimeZone};
use crate::errors::TriggerError;
use tracing::info;

/// A report that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    /// Bare file name, as persisted in the scan record.
    pub file_name: String,
    pub path: PathBuf,
}

pub fn report_file_name<Tz: TimeZone>(scan_id: i64, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("scan_report_{}_{}.html", scan_id, at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Write `html` into `reports_dir`, creating the directory if needed.
pub async fn write_report(reports_dir: &Path, scan_id: i64, html: &str) -> Result<WrittenReport, TriggerError> {
    tokio::fs::create_dir_all(reports_dir).await
        .map_err(|e| TriggerError::Report(format!("Cannot create {}: {}", reports_dir.display(), e)))?;

    let file_name = report_file_name(scan_id, &Local::now());
    let path = reports_dir.join(&file_name);
    tokio::fs::write(&path, html).await
        .map_err(|e| TriggerError::Report(format!("Cannot write {}: {}", path.display(), e)))?;

    info!(path = %path.display(), bytes = html.len(), "Wrote scan report");
    Ok(WrittenReport { file_name, path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_report_file_name_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(report_file_name(12, &at), "scan_report_12_2024-03-09_14-05-07.html");
    }

    #[tokio::test]
    async fn test_write_report_creates_directory() {
        let dir = TempDir::new().unwrap();
        let reports = dir.path().join("nested").join("reports");

        let written = write_report(&reports, 4, "<html>ok</html>").await.unwrap();
        assert!(written.file_name.starts_with("scan_report_4_"));
        assert!(written.file_name.ends_with(".html"));
        assert_eq!(written.path, reports.join(&written.file_name));
        assert_eq!(std::fs::read_to_string(&written.path).unwrap(), "<html>ok</html>");
    }
}
