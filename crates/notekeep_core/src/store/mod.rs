//! Storage handle lifecycle and change notification.
//!
//! # Responsibility
//! - Own the single mutable resource of the core: the SQLite connection.
//! - Fan out a fresh full snapshot to the feed after every mutation.
//! - Manage the process-wide shared store instance.
//!
//! # Invariants
//! - Exactly one underlying store exists per process when accessed through
//!   [`shared_store`], even under concurrent first access.
//! - Snapshots are published in the same order the engine serialized the
//!   corresponding writes.

pub mod feed;
pub mod handle;

pub use feed::{NoteFeed, NoteSnapshot, NoteSubscription};
pub use handle::{shared_store, NoteStore, StoreConfig};
