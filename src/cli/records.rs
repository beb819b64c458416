use console::style;
use crate::cli::commands::{DeleteArgs, ListArgs, ShowArgs};
use crate::config::DEFAULT_DATABASE;
use crate::db::Database;
use crate::errors::TriggerError;
use crate::models::{ScanRecord, Severity};

fn open(db: Option<&str>) -> Result<Database, TriggerError> {
    Database::new(db.unwrap_or(DEFAULT_DATABASE))
}

pub fn handle_list(args: ListArgs) -> Result<(), TriggerError> {
    let db = open(args.db.as_deref())?;
    let records = db.list_scans(args.limit, args.offset)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No scans recorded.");
        return Ok(());
    }

    println!(
        "{:>8}  {:<19}  {:>5}  {:>4} {:>4} {:>4} {:>4}  {}",
        "SCAN", "UPDATED", "PROG", "HIGH", "MED", "LOW", "INFO", "REPORT"
    );
    for r in &records {
        println!("{}", format_row(r));
    }
    Ok(())
}

pub fn handle_show(args: ShowArgs) -> Result<(), TriggerError> {
    let db = open(args.db.as_deref())?;
    let record = db.get_scan(args.scan_id)?
        .ok_or_else(|| TriggerError::NotFound(format!("No record for scan {}", args.scan_id)))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("{}", style(format!("Scan {}", record.scan_id)).bold());
    println!("  Created:  {}", record.created);
    println!("  Updated:  {}", record.updated);
    println!("  Progress: {}%", record.progress);
    let alerts = record.alerts();
    for severity in Severity::ALL {
        println!("  {:<14}{}", format!("{}:", severity), alerts.get(severity));
    }
    if record.report.is_empty() {
        println!("  Report:   (not yet written)");
    } else {
        println!("  Report:   {}", record.report);
    }
    Ok(())
}

pub fn handle_delete(args: DeleteArgs) -> Result<(), TriggerError> {
    let db = open(args.db.as_deref())?;
    if !db.delete_scan(args.scan_id)? {
        return Err(TriggerError::NotFound(format!("No record for scan {}", args.scan_id)));
    }
    println!("Deleted scan {}", args.scan_id);
    Ok(())
}

fn format_row(r: &ScanRecord) -> String {
    format!(
        "{:>8}  {:<19}  {:>4}%  {:>4} {:>4} {:>4} {:>4}  {}",
        r.scan_id,
        r.updated,
        r.progress,
        r.high_alerts,
        r.medium_alerts,
        r.low_alerts,
        r.info_alerts,
        if r.report.is_empty() { "-" } else { r.report.as_str() },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_row_pending_report() {
        let record = ScanRecord {
            id: 1,
            scan_id: 12,
            created: "2024-01-01 10:00:00".into(),
            updated: "2024-01-01 10:05:00".into(),
            progress: 40,
            high_alerts: 0,
            medium_alerts: 0,
            low_alerts: 0,
            info_alerts: 0,
            report: String::new(),
        };
        let row = format_row(&record);
        assert!(row.contains("12"));
        assert!(row.contains("40%"));
        assert!(row.trim_end().ends_with('-'));
    }
}
