//! Domain model for the note collection.
//!
//! # Responsibility
//! - Define the single persisted record type used across the core.
//!
//! # Invariants
//! - Every persisted note is identified by a stable engine-assigned `NoteId`.

pub mod note;
