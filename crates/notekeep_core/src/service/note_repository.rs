//! Note repository façade and its background write pipeline.
//!
//! # Responsibility
//! - Provide the four mutation operations and the read subscription to
//!   presentation collaborators.
//! - Dispatch every mutation to its own background unit of work so no write
//!   ever runs on the caller's thread.
//!
//! # Invariants
//! - Mutation calls return before the write executes; no result or error
//!   reaches the caller. Failed writes are logged and swallowed.
//! - Sibling writes from one caller are independently scheduled: submission
//!   order is not execution order. Callers needing ordered or confirmed
//!   writes must go through [`NoteStore`] directly.
//! - `all_notes` always attaches to the one feed backed by this store.

use crate::db::DbResult;
use crate::model::note::Note;
use crate::store::handle::{shared_store, NoteStore, StoreConfig};
use crate::store::feed::NoteSubscription;
use log::error;
use std::sync::Arc;
use std::thread;

/// The sole entry point external collaborators use.
///
/// Constructing one through [`NoteRepository::new`] triggers creation of the
/// process-wide store when it does not exist yet, which on a brand-new store
/// also kicks off asynchronous seed insertion.
pub struct NoteRepository {
    store: Arc<NoteStore>,
}

impl NoteRepository {
    /// Opens the repository over the process-wide shared store.
    ///
    /// # Errors
    /// Storage-open failure is fatal here; there is no recovery path beyond
    /// propagating to process startup.
    pub fn new(config: &StoreConfig) -> DbResult<Self> {
        Ok(Self {
            store: shared_store(config)?,
        })
    }

    /// Wires the repository to an explicitly-owned store.
    ///
    /// Used by tests and embedders that manage store lifetime themselves.
    pub fn with_store(store: Arc<NoteStore>) -> Self {
        Self { store }
    }

    /// Persists a new note. Fire-and-forget.
    pub fn insert(&self, note: Note) {
        self.spawn_write("insert", move |store| store.insert(&note).map(|_| ()));
    }

    /// Replaces the stored record matching `note.id`. Fire-and-forget; an
    /// unknown id is silently a no-op.
    pub fn update(&self, note: Note) {
        self.spawn_write("update", move |store| store.update(&note));
    }

    /// Removes the stored record matching `note.id`. Fire-and-forget.
    pub fn delete(&self, note: Note) {
        self.spawn_write("delete", move |store| store.delete(&note));
    }

    /// Removes every note in the collection. Fire-and-forget.
    pub fn delete_all(&self) {
        self.spawn_write("delete_all", |store| store.delete_all());
    }

    /// Attaches a subscriber to the full-collection snapshot stream.
    ///
    /// The subscriber immediately receives the current snapshot, then a fresh
    /// one after every mutation, with no further request needed.
    pub fn all_notes(&self) -> NoteSubscription {
        self.store.subscribe()
    }

    /// Submits one mutation as an independent background unit of work.
    ///
    /// Units are unordered relative to siblings; the store's connection lock
    /// is the only serialization point.
    fn spawn_write(
        &self,
        op: &'static str,
        write: impl FnOnce(&NoteStore) -> DbResult<()> + Send + 'static,
    ) {
        let store = Arc::clone(&self.store);
        let spawned = thread::Builder::new()
            .name(format!("notekeep-write-{op}"))
            .spawn(move || {
                if let Err(err) = write(&store) {
                    // Fire-and-forget contract: the caller never sees this.
                    error!("event=note_write module=service status=error op={op} error={err}");
                }
            });
        if let Err(err) = spawned {
            error!(
                "event=note_write module=service status=error op={op} error_code=spawn_failed error={err}"
            );
        }
    }
}
