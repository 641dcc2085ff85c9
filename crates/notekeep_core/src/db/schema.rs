//! Schema creation and the destructive version policy.
//!
//! # Responsibility
//! - Create the `notes` collection on a fresh store and stamp its version.
//! - Discard and recreate the collection on any version mismatch.
//!
//! # Invariants
//! - `PRAGMA user_version` equals [`SCHEMA_VERSION`] after `prepare_schema`
//!   returns `Ok`.
//! - A mismatched store is never migrated; it is dropped and rebuilt empty.
//!   Data loss on mismatch is policy, not an error.

use super::{DbResult, DbError};
use log::{info, warn};
use rusqlite::Connection;

/// Single schema version for the note store.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// How `prepare_schema` left the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaOutcome {
    /// Brand-new store: schema created for the first time.
    Fresh,
    /// Store already existed at the current version; untouched.
    Existing,
    /// Version mismatch: previous contents discarded, schema rebuilt.
    Recreated,
}

impl SchemaOutcome {
    /// A fresh store is the only one that receives seed records.
    pub fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }
}

/// Settles the schema on the provided connection.
///
/// Runs in one transaction so a half-created schema is never observable.
pub fn prepare_schema(conn: &mut Connection) -> DbResult<SchemaOutcome> {
    let version = current_user_version(conn)?;
    let tx = conn.transaction()?;

    let outcome = if version == SCHEMA_VERSION && table_exists(&tx, "notes")? {
        SchemaOutcome::Existing
    } else if version == 0 && !table_exists(&tx, "notes")? {
        tx.execute_batch(SCHEMA_SQL)?;
        info!("event=schema_create module=db status=ok version={SCHEMA_VERSION}");
        SchemaOutcome::Fresh
    } else {
        // Destructive recreation: no migration path exists in this core.
        warn!(
            "event=schema_reset module=db status=ok found_version={version} target_version={SCHEMA_VERSION}"
        );
        tx.execute_batch("DROP TABLE IF EXISTS notes;")?;
        tx.execute_batch(SCHEMA_SQL)?;
        SchemaOutcome::Recreated
    };

    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;
    Ok(outcome)
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool, DbError> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
