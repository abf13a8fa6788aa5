//! Schema migrations for the readings database.

use rusqlite::Connection;
use tracing::debug;

use crate::error::{Error, Result};

/// Ordered migration batches; entry `i` brings the schema to version `i + 1`.
pub const MIGRATIONS: &[&str] = &[V1];

// language=sql
const V1: &str = r"
    CREATE TABLE readings (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        temperature REAL NOT NULL,
        timestamp   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        device_id   TEXT NOT NULL DEFAULT 'unknown',
        metadata    TEXT
    );

    CREATE INDEX idx_readings_timestamp ON readings (timestamp);

    PRAGMA user_version = 1;
";

/// Apply any migrations the database has not seen yet.
///
/// # Errors
///
/// Returns an error if the schema version cannot be read or a batch fails.
pub fn apply(conn: &Connection) -> Result<()> {
    let version: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(Error::from_sqlite)?;
    let version = usize::try_from(version).unwrap_or(0);

    for (i, batch) in MIGRATIONS.iter().enumerate().skip(version) {
        conn.execute_batch(batch).map_err(Error::from_sqlite)?;
        debug!(version = i + 1, "applied schema migration");
    }

    Ok(())
}
