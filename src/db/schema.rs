pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS scan (
    id INTEGER NOT NULL UNIQUE,
    scan_id INTEGER NOT NULL UNIQUE,
    created TEXT,
    updated TEXT,
    progress INTEGER,
    high_alerts INTEGER,
    medium_alerts INTEGER,
    low_alerts INTEGER,
    info_alerts INTEGER,
    report TEXT,
    PRIMARY KEY (id)
);
";

/// Timestamp layout of the `created` and `updated` columns.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
