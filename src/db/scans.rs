use chrono::Local;
use crate::errors::TriggerError;
use crate::models::{AlertSummary, ScanRecord};
use super::schema::TIMESTAMP_FORMAT;
use super::Database;

const SELECT_COLUMNS: &str = "SELECT id, scan_id, created, updated, progress, high_alerts, medium_alerts, low_alerts, info_alerts, report FROM scan";

impl Database {
    /// Insert a record for `scan_id`, or update it in place if one exists.
    ///
    /// `created` is only set on insert; `updated` is refreshed on every call.
    pub fn upsert_scan(
        &self,
        scan_id: i64,
        progress: u8,
        alerts: &AlertSummary,
        report: &str,
    ) -> Result<(), TriggerError> {
        let conn = self.lock()?;
        let now = Local::now().format(TIMESTAMP_FORMAT).to_string();

        let exists = conn.query_row(
            "SELECT 1 FROM scan WHERE scan_id = ?1",
            rusqlite::params![scan_id],
            |_| Ok(()),
        );

        match exists {
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                conn.execute(
                    "INSERT INTO scan (scan_id, created, updated, progress, high_alerts, medium_alerts, low_alerts, info_alerts, report) VALUES (?1, ?2, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    rusqlite::params![
                        scan_id,
                        now,
                        progress,
                        alerts.high,
                        alerts.medium,
                        alerts.low,
                        alerts.informational,
                        report,
                    ],
                ).map_err(|e| TriggerError::Database(format!("Failed to insert scan: {}", e)))?;
            }
            Ok(()) => {
                conn.execute(
                    "UPDATE scan SET updated = ?2, progress = ?3, high_alerts = ?4, medium_alerts = ?5, low_alerts = ?6, info_alerts = ?7, report = ?8 WHERE scan_id = ?1",
                    rusqlite::params![
                        scan_id,
                        now,
                        progress,
                        alerts.high,
                        alerts.medium,
                        alerts.low,
                        alerts.informational,
                        report,
                    ],
                ).map_err(|e| TriggerError::Database(format!("Update failed: {}", e)))?;
            }
            Err(e) => return Err(TriggerError::Database(format!("Query error: {}", e))),
        }
        Ok(())
    }

    pub fn get_scan(&self, scan_id: i64) -> Result<Option<ScanRecord>, TriggerError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{} WHERE scan_id = ?1", SELECT_COLUMNS))
            .map_err(|e| TriggerError::Database(format!("Query failed: {}", e)))?;

        match stmt.query_row(rusqlite::params![scan_id], map_record) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(TriggerError::Database(format!("Query error: {}", e))),
        }
    }

    /// Most recently created records first.
    pub fn list_scans(&self, limit: usize, offset: usize) -> Result<Vec<ScanRecord>, TriggerError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id DESC LIMIT ?1 OFFSET ?2", SELECT_COLUMNS))
            .map_err(|e| TriggerError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![limit as i64, offset as i64], map_record)
            .map_err(|e| TriggerError::Database(format!("Query error: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| TriggerError::Database(format!("Row error: {}", e)))?);
        }
        Ok(records)
    }

    pub fn delete_scan(&self, scan_id: i64) -> Result<bool, TriggerError> {
        let conn = self.lock()?;
        let affected = conn.execute("DELETE FROM scan WHERE scan_id = ?1", rusqlite::params![scan_id])
            .map_err(|e| TriggerError::Database(format!("Delete failed: {}", e)))?;
        Ok(affected > 0)
    }
}

fn map_record(row: &rusqlite::Row) -> rusqlite::Result<ScanRecord> {
    Ok(ScanRecord {
        id: row.get(0)?,
        scan_id: row.get(1)?,
        created: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        updated: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        progress: row.get::<_, Option<u8>>(4)?.unwrap_or(0),
        high_alerts: row.get::<_, Option<u32>>(5)?.unwrap_or(0),
        medium_alerts: row.get::<_, Option<u32>>(6)?.unwrap_or(0),
        low_alerts: row.get::<_, Option<u32>>(7)?.unwrap_or(0),
        info_alerts: row.get::<_, Option<u32>>(8)?.unwrap_or(0),
        report: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
    })
}
