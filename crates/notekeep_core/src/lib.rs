//! Data-access and change-notification core for the NoteKeep app.
//!
//! Persistence, the background write pipeline and the observable snapshot
//! feed live here; presentation layers talk to [`NoteRepository`] only.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use db::{DbError, DbResult, SchemaOutcome, SCHEMA_VERSION};
pub use logging::{default_log_level, init_logging};
pub use model::note::{Note, NoteId};
pub use repo::note_dao::{NoteDao, SqliteNoteDao};
pub use service::note_repository::NoteRepository;
pub use store::{shared_store, NoteFeed, NoteSnapshot, NoteStore, NoteSubscription, StoreConfig};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
