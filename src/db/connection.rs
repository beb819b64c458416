use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use crate::errors::TriggerError;
use tracing::debug;

pub struct Database {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path` and make sure the scan table exists.
    pub fn new(path: &str) -> Result<Self, TriggerError> {
        // Ensure parent directory exists
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| TriggerError::Database(format!("Failed to open database: {}", e)))?;

        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| TriggerError::Database(format!("Failed to set pragmas: {}", e)))?;

        debug!(path = %path, "Opened scan database");
        let db = Self { conn: Arc::new(Mutex::new(conn)) };
        db.initialize()?;
        Ok(db)
    }

    pub fn in_memory() -> Result<Self, TriggerError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| TriggerError::Database(format!("Failed to open in-memory db: {}", e)))?;
        let db = Self { conn: Arc::new(Mutex::new(conn)) };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> Result<(), TriggerError> {
        let conn = self.lock()?;
        conn.execute_batch(super::schema::CREATE_TABLES)
            .map_err(|e| TriggerError::Database(format!("Failed to create tables: {}", e)))?;
        Ok(())
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>, TriggerError> {
        self.conn.lock()
            .map_err(|_| TriggerError::Database("Connection mutex poisoned".into()))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self { conn: self.conn.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db").join("scan_db.sqlite");
        let _db = Database::new(path.to_str().unwrap()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan_db.sqlite");
        let path = path.to_str().unwrap();
        Database::new(path).unwrap();
        Database::new(path).unwrap();
    }
}
