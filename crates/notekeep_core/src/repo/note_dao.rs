//! Note DAO contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the five pass-through operations over the `notes` collection.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `insert` returns the engine-assigned id; ids are monotonic and never
//!   reused (AUTOINCREMENT contract).
//! - `update`/`delete` against an unknown id report zero changed rows instead
//!   of failing; tolerating that is the caller's concern.
//! - `list_all` returns the full collection in stable engine order.

use crate::db::DbResult;
use crate::model::note::{Note, NoteId};
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT id, title, description, priority FROM notes";

/// The data-access contract of the note store.
pub trait NoteDao {
    /// Persists a new record and returns its engine-assigned id.
    fn insert(&self, note: &Note) -> DbResult<NoteId>;
    /// Replaces title/description/priority of the record matching `note.id`.
    /// Returns the number of rows changed (0 when the id is unknown).
    fn update(&self, note: &Note) -> DbResult<usize>;
    /// Removes the record with the given id. Returns rows changed.
    fn delete(&self, id: NoteId) -> DbResult<usize>;
    /// Removes every record in the collection. Returns rows changed.
    fn delete_all(&self) -> DbResult<usize>;
    /// Returns a full snapshot of the collection, ordered by id.
    fn list_all(&self) -> DbResult<Vec<Note>>;
}

/// SQLite-backed DAO borrowing a bootstrapped connection.
pub struct SqliteNoteDao<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteDao<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteDao for SqliteNoteDao<'_> {
    fn insert(&self, note: &Note) -> DbResult<NoteId> {
        self.conn.execute(
            "INSERT INTO notes (title, description, priority) VALUES (?1, ?2, ?3);",
            params![note.title.as_str(), note.description.as_str(), note.priority],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, note: &Note) -> DbResult<usize> {
        let Some(id) = note.id else {
            // An unpersisted note cannot match any row; same no-op contract
            // as an unknown id.
            return Ok(0);
        };

        let changed = self.conn.execute(
            "UPDATE notes
             SET title = ?2, description = ?3, priority = ?4
             WHERE id = ?1;",
            params![id, note.title.as_str(), note.description.as_str(), note.priority],
        )?;
        Ok(changed)
    }

    fn delete(&self, id: NoteId) -> DbResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn delete_all(&self) -> DbResult<usize> {
        let changed = self.conn.execute("DELETE FROM notes;", [])?;
        Ok(changed)
    }

    fn list_all(&self) -> DbResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }
}

fn parse_note_row(row: &Row<'_>) -> DbResult<Note> {
    Ok(Note {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        description: row.get("description")?,
        priority: row.get("priority")?,
    })
}
