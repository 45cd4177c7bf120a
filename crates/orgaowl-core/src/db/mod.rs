//! SQLite storage for task lists and tasks.
//!
//! [`Database`] wraps one rusqlite connection. Every write runs in its own
//! transaction; callers on an async runtime reach it through
//! [`crate::gateway::SqliteTaskRepository`], which moves the work onto the
//! blocking pool.

use std::{path::Path, time::Duration};

use jiff::Timestamp;
use rusqlite::{types::Type, Connection};
use uuid::Uuid;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod task_queries;
pub mod tasklist_queries;

/// How long a connection waits for another writer to release the file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Reads a hyphenated UUID stored as text.
fn uuid_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a Unix-millisecond timestamp.
fn timestamp_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Timestamp> {
    let millis: i64 = row.get(idx)?;
    Timestamp::from_millisecond(millis)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}
