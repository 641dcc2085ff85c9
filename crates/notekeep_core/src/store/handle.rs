//! Note store handle: connection ownership, seeding and the shared instance.
//!
//! # Responsibility
//! - Open-or-create the persistent store and keep exclusive ownership of it.
//! - Apply DAO mutations under the connection lock and publish the resulting
//!   snapshot to the feed.
//! - Seed a brand-new store with example notes, asynchronously, exactly once
//!   per fresh database file.
//!
//! # Invariants
//! - `shared_store` creates at most one store per process; later calls with a
//!   different data directory are rejected instead of silently rebinding.
//! - The feed publication for a mutation happens before the connection lock
//!   is released, so snapshot order matches write order.
//! - Seeding goes through the normal mutation path and is therefore visible
//!   to subscribers snapshot by snapshot.

use crate::db::{open_db, open_db_in_memory, DbError, DbResult};
use crate::model::note::{Note, NoteId};
use crate::repo::note_dao::{NoteDao, SqliteNoteDao};
use crate::store::feed::{NoteFeed, NoteSnapshot, NoteSubscription};
use log::{debug, error, info};
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

const STORE_FILE_NAME: &str = "notes.sqlite3";

const SEED_NOTES: &[(&str, &str, i64)] = &[
    ("Title 1", "Description 1", 1),
    ("Title 2", "Description 2", 2),
    ("Title 3", "Description 3", 3),
];

static SHARED_STORE: OnceCell<Arc<NoteStore>> = OnceCell::new();

/// Environment input for opening the process-wide store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory the store file lives in. Must already exist.
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Full path of the store file under `data_dir`.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

/// Returns the process-wide store, creating it on first access.
///
/// Safe to call concurrently before initialization completes: exactly one
/// underlying store is created and every caller gets the same instance. A
/// call with a different data directory after initialization fails with
/// [`DbError::AlreadyOpen`].
pub fn shared_store(config: &StoreConfig) -> DbResult<Arc<NoteStore>> {
    let requested = config.db_path();
    let store = SHARED_STORE.get_or_try_init(|| NoteStore::open(&requested))?;

    match store.path() {
        Some(active) if active == requested.as_path() => Ok(Arc::clone(store)),
        Some(active) => Err(DbError::AlreadyOpen {
            active: active.to_path_buf(),
            requested,
        }),
        // Unreachable through this accessor; kept total for safety.
        None => Ok(Arc::clone(store)),
    }
}

/// Exclusive owner of one persistent note collection.
#[derive(Debug)]
pub struct NoteStore {
    conn: Mutex<Connection>,
    feed: NoteFeed,
    path: Option<PathBuf>,
}

impl NoteStore {
    /// Opens (or creates) the store file at `path` and settles its schema.
    ///
    /// A brand-new store is seeded from a background thread; the seed inserts
    /// run through the normal mutation path and reach subscribers as regular
    /// snapshots. Open failure is fatal: there is no fallback here.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Arc<Self>> {
        let (conn, outcome) = open_db(path.as_ref())?;
        Self::build(conn, Some(path.as_ref().to_path_buf()), outcome.is_fresh())
    }

    /// Opens a private in-memory store. Always fresh, always seeded.
    pub fn open_in_memory() -> DbResult<Arc<Self>> {
        let (conn, outcome) = open_db_in_memory()?;
        Self::build(conn, None, outcome.is_fresh())
    }

    /// Like [`NoteStore::open_in_memory`] but without seed data, for callers
    /// that need a deterministically empty collection.
    pub fn open_in_memory_unseeded() -> DbResult<Arc<Self>> {
        let (conn, _) = open_db_in_memory()?;
        Self::build(conn, None, false)
    }

    fn build(conn: Connection, path: Option<PathBuf>, fresh: bool) -> DbResult<Arc<Self>> {
        let store = Arc::new(Self {
            conn: Mutex::new(conn),
            feed: NoteFeed::new(),
            path,
        });

        // Publish the opening state so subscribers attached before the first
        // mutation still receive the current collection.
        {
            let conn = store.lock_conn();
            let snapshot = SqliteNoteDao::new(&conn).list_all()?;
            store.feed.publish(snapshot);
        }
        info!("event=store_open module=store status=ok fresh={fresh}");

        if fresh {
            let seed_target = Arc::clone(&store);
            let spawned = thread::Builder::new()
                .name("notekeep-seed".to_string())
                .spawn(move || seed_target.insert_seed_notes());
            if let Err(err) = spawned {
                error!("event=store_seed module=store status=error error_code=spawn_failed error={err}");
            }
        }

        Ok(store)
    }

    /// Path of the backing file; `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Attaches a subscriber to this store's snapshot feed.
    pub fn subscribe(&self) -> NoteSubscription {
        self.feed.subscribe()
    }

    /// Reads the current collection directly, bypassing the feed.
    pub fn snapshot(&self) -> DbResult<NoteSnapshot> {
        let conn = self.lock_conn();
        SqliteNoteDao::new(&conn).list_all()
    }

    /// Persists a new note and broadcasts the updated collection.
    pub fn insert(&self, note: &Note) -> DbResult<NoteId> {
        self.mutate(|dao| dao.insert(note))
    }

    /// Replaces the record matching `note.id`; unknown ids are a no-op.
    pub fn update(&self, note: &Note) -> DbResult<()> {
        let changed = self.mutate(|dao| dao.update(note))?;
        if changed == 0 {
            debug!(
                "event=note_update module=store status=noop id={:?}",
                note.id
            );
        }
        Ok(())
    }

    /// Removes the record matching `note.id`; unknown ids are a no-op.
    pub fn delete(&self, note: &Note) -> DbResult<()> {
        let Some(id) = note.id else {
            debug!("event=note_delete module=store status=noop id=unassigned");
            return Ok(());
        };
        let changed = self.mutate(|dao| dao.delete(id))?;
        if changed == 0 {
            debug!("event=note_delete module=store status=noop id={id}");
        }
        Ok(())
    }

    /// Removes every note in the collection.
    pub fn delete_all(&self) -> DbResult<()> {
        let removed = self.mutate(|dao| dao.delete_all())?;
        info!("event=note_delete_all module=store status=ok removed={removed}");
        Ok(())
    }

    /// Runs one DAO mutation and publishes the resulting snapshot while the
    /// connection lock is still held, keeping feed order aligned with the
    /// engine's write serialization.
    fn mutate<T>(&self, op: impl FnOnce(&SqliteNoteDao<'_>) -> DbResult<T>) -> DbResult<T> {
        let conn = self.lock_conn();
        let dao = SqliteNoteDao::new(&conn);
        let result = op(&dao)?;
        let snapshot = dao.list_all()?;
        self.feed.publish(snapshot);
        Ok(result)
    }

    fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert_seed_notes(&self) {
        for (title, description, priority) in SEED_NOTES {
            if let Err(err) = self.insert(&Note::new(*title, *description, *priority)) {
                error!("event=store_seed module=store status=error title={title} error={err}");
                return;
            }
        }
        info!(
            "event=store_seed module=store status=ok count={}",
            SEED_NOTES.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteStore, StoreConfig, STORE_FILE_NAME};

    #[test]
    fn store_config_joins_the_store_file_name() {
        let config = StoreConfig::new("/tmp/notekeep");
        assert_eq!(
            config.db_path(),
            std::path::Path::new("/tmp/notekeep").join(STORE_FILE_NAME)
        );
    }

    #[test]
    fn unseeded_in_memory_store_starts_empty() {
        let store = NoteStore::open_in_memory_unseeded().expect("open");
        assert!(store.snapshot().expect("snapshot").is_empty());
        assert!(store.path().is_none());
    }
}
