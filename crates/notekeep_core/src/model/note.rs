//! Note entity.
//!
//! # Responsibility
//! - Define the canonical note record stored and streamed by the core.
//!
//! # Invariants
//! - `id` is `None` until the engine persists the record for the first time.
//! - An assigned `id` is stable for the record's lifetime and never reused
//!   within the same store.
//! - `title`, `description` and `priority` arrive pre-validated from the
//!   presentation collaborator; the core does not enforce their contracts.

use serde::{Deserialize, Serialize};

/// Stable engine-assigned identifier for a persisted note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = i64;

/// The persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Engine-assigned primary key. `None` before first insert.
    pub id: Option<NoteId>,
    /// Display title. Non-empty by caller contract.
    pub title: String,
    /// Body text. Non-empty by caller contract.
    pub description: String,
    /// Caller-supplied priority, expected in `1..=10`.
    pub priority: i64,
}

impl Note {
    /// Creates a not-yet-persisted note. The engine assigns `id` on insert.
    pub fn new(title: impl Into<String>, description: impl Into<String>, priority: i64) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            priority,
        }
    }

    /// Rehydrates a note from persisted state with a known id.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: i64,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(title, description, priority)
        }
    }

    /// Returns whether this note has been persisted at least once.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
