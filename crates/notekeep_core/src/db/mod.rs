//! SQLite storage bootstrap and schema policy entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the note store.
//! - Enforce the destructive schema-version policy before any data access.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write note data before the schema is settled.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{SchemaOutcome, SCHEMA_VERSION};

pub type DbResult<T> = Result<T, DbError>;

/// Storage-layer error shared by open, schema and DAO code paths.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The process-wide store is already bound to a different location.
    AlreadyOpen {
        active: PathBuf,
        requested: PathBuf,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::AlreadyOpen { active, requested } => write!(
                f,
                "note store already open at `{}`; refusing to switch to `{}`",
                active.display(),
                requested.display()
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::AlreadyOpen { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
