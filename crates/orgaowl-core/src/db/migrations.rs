//! Database schema initialization and migrations.

use log::debug;
use rusqlite::params;

use crate::{
    error::{DatabaseResultExt, Result},
    models::DEFAULT_TASKLIST_ID,
};

/// Schema version written once the default list has been seeded.
const SCHEMA_VERSION: i64 = 1;

const SEED_DEFAULT_TASKLIST_SQL: &str =
    "INSERT OR IGNORE INTO tasklist (uuid, name, modified_at) VALUES (?1, ?2, ?3)";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Brings a store up to [`SCHEMA_VERSION`]. Version 0 is a freshly created
    /// file, which gets the default list. A user who later deletes that list
    /// does not get it back on the next open.
    fn apply_migrations(&self) -> Result<()> {
        let version: i64 = self
            .connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")?;

        if version < 1 {
            debug!("Seeding default task list {DEFAULT_TASKLIST_ID}");
            self.connection
                .execute(
                    SEED_DEFAULT_TASKLIST_SQL,
                    params![DEFAULT_TASKLIST_ID.to_string(), "Default", 0i64],
                )
                .db_context("Failed to seed default task list")?;
        }

        if version < SCHEMA_VERSION {
            self.connection
                .execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
                .db_context("Failed to write schema version")?;
        }

        Ok(())
    }
}
