//! SQLite-backed store for temperature readings.
//!
//! The [`ReadingStore`] is the single owner of the database connection:
//! - Inserting new readings with server-side defaults
//! - Paginated listing, newest first
//! - Per-device summaries and totals
//!
//! Timestamps are stored as RFC 3339 text in UTC with millisecond
//! precision, so lexicographic order on the column matches chronological
//! order and the schema default produces the same shape.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::Connection;
use tracing::{debug, info};

use therm_proto::{DEFAULT_DEVICE_ID, DeviceSummary, NewReading, Reading, ReadingId};

use crate::error::{Error, Result};
use crate::migrations;

/// Pagination and filtering options for [`ReadingStore::list`].
#[derive(Debug, Clone)]
pub struct ListParams {
    /// Maximum number of readings to return.
    pub limit: u64,

    /// Number of readings to skip, newest first.
    pub offset: u64,

    /// Restrict results to a single device.
    pub device_id: Option<String>,
}

impl ListParams {
    /// Create params for the first `limit` readings.
    #[must_use]
    pub const fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit,
            offset,
            device_id: None,
        }
    }

    /// Restrict the listing to one device.
    #[must_use]
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(100, 0)
    }
}

/// One page of readings plus the total count matching the filter.
#[derive(Debug, Clone)]
pub struct Page {
    /// Readings in newest-first order.
    pub readings: Vec<Reading>,

    /// Total matching rows, ignoring limit and offset.
    pub total: u64,
}

/// Raw column tuple as it comes out of SQLite.
type RawRow = (i64, f64, String, String, Option<String>);

/// SQLite-backed store for temperature readings.
#[derive(Debug)]
pub struct ReadingStore {
    conn: Mutex<Connection>,
}

impl ReadingStore {
    /// Open (or create) a readings database at `path` and apply migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the schema cannot
    /// be migrated.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(Error::from_sqlite)?;
        info!(path = %path.display(), "Opened readings database");
        Self::from_connection(conn)
    }

    /// Open a transient in-memory store, mainly for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be migrated.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Error::from_sqlite)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // journal_mode returns a row, which execute_batch reports as an
        // error even though the pragma has applied.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;");
        migrations::apply(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert a reading and return its assigned id.
    ///
    /// Omitted fields get their server-side defaults here rather than in
    /// SQL: the current UTC time and [`DEFAULT_DEVICE_ID`].
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be serialized or the
    /// insert fails.
    pub fn insert(&self, reading: &NewReading) -> Result<ReadingId> {
        let timestamp = format_timestamp(reading.timestamp.unwrap_or_else(Utc::now));
        let device_id = reading.device_id.as_deref().unwrap_or(DEFAULT_DEVICE_ID);
        let metadata = reading
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "INSERT INTO readings (temperature, timestamp, device_id, metadata) \
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(Error::from_sqlite)?;
        stmt.execute(rusqlite::params![
            reading.temperature,
            timestamp,
            device_id,
            metadata
        ])
        .map_err(Error::from_sqlite)?;
        let id = ReadingId::new(conn.last_insert_rowid());

        debug!(id = %id, device_id, temperature = reading.temperature, "Inserted reading");
        Ok(id)
    }

    /// List readings, newest first, with the total count for the filter.
    ///
    /// Rows with the same timestamp are ordered by descending id, so the
    /// ordering is total and pagination never skips or repeats rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row cannot be
    /// decoded.
    pub fn list(&self, params: &ListParams) -> Result<Page> {
        let limit = i64::try_from(params.limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(params.offset).unwrap_or(i64::MAX);

        let (raw, total) = {
            let conn = self.conn.lock();
            let raw: Vec<RawRow> = match params.device_id.as_deref() {
                Some(device_id) => {
                    let mut stmt = conn
                        .prepare_cached(
                            "SELECT id, temperature, timestamp, device_id, metadata \
                             FROM readings WHERE device_id = ?1 \
                             ORDER BY timestamp DESC, id DESC LIMIT ?2 OFFSET ?3",
                        )
                        .map_err(Error::from_sqlite)?;
                    let rows = stmt
                        .query_map(rusqlite::params![device_id, limit, offset], raw_row)
                        .map_err(Error::from_sqlite)?;
                    rows.collect::<rusqlite::Result<_>>()
                        .map_err(Error::from_sqlite)?
                }
                None => {
                    let mut stmt = conn
                        .prepare_cached(
                            "SELECT id, temperature, timestamp, device_id, metadata \
                             FROM readings \
                             ORDER BY timestamp DESC, id DESC LIMIT ?1 OFFSET ?2",
                        )
                        .map_err(Error::from_sqlite)?;
                    let rows = stmt
                        .query_map(rusqlite::params![limit, offset], raw_row)
                        .map_err(Error::from_sqlite)?;
                    rows.collect::<rusqlite::Result<_>>()
                        .map_err(Error::from_sqlite)?
                }
            };
            let total = match params.device_id.as_deref() {
                Some(device_id) => count_device(&conn, device_id)?,
                None => count(&conn)?,
            };
            (raw, total)
        };

        let readings = raw.into_iter().map(into_reading).collect::<Result<_>>()?;
        Ok(Page { readings, total })
    }

    /// Total number of stored readings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_all(&self) -> Result<u64> {
        let conn = self.conn.lock();
        count(&conn)
    }

    /// Summaries of every device that has reported, most recently seen
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored timestamp cannot
    /// be decoded.
    pub fn devices(&self) -> Result<Vec<DeviceSummary>> {
        let raw: Vec<(String, i64, String)> = {
            let conn = self.conn.lock();
            let mut stmt = conn
                .prepare_cached(
                    "SELECT device_id, COUNT(*), MAX(timestamp) \
                     FROM readings GROUP BY device_id \
                     ORDER BY MAX(timestamp) DESC",
                )
                .map_err(Error::from_sqlite)?;
            let rows = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
                .map_err(Error::from_sqlite)?;
            rows.collect::<rusqlite::Result<_>>()
                .map_err(Error::from_sqlite)?
        };

        raw.into_iter()
            .map(|(device_id, readings, last_seen)| {
                Ok(DeviceSummary {
                    device_id,
                    readings: u64::try_from(readings).unwrap_or_default(),
                    last_seen: parse_timestamp(&last_seen)?,
                })
            })
            .collect()
    }
}

fn count(conn: &Connection) -> Result<u64> {
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM readings", [], |row| row.get(0))
        .map_err(Error::from_sqlite)?;
    Ok(u64::try_from(n).unwrap_or_default())
}

fn count_device(conn: &Connection, device_id: &str) -> Result<u64> {
    let n: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM readings WHERE device_id = ?1",
            [device_id],
            |row| row.get(0),
        )
        .map_err(Error::from_sqlite)?;
    Ok(u64::try_from(n).unwrap_or_default())
}

fn raw_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn into_reading((id, temperature, timestamp, device_id, metadata): RawRow) -> Result<Reading> {
    let timestamp = parse_timestamp(&timestamp)?;
    let metadata = metadata.as_deref().map(serde_json::from_str).transpose()?;
    Ok(Reading {
        id: ReadingId::new(id),
        temperature,
        timestamp,
        device_id,
        metadata,
    })
}

/// Render a timestamp in the stored column format: UTC, millisecond
/// precision, `Z` suffix.
fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| Error::MalformedTimestamp {
            value: value.to_owned(),
        })
}
