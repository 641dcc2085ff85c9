//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notekeep_core` wiring end to
//!   end: open, seed, stream.
//! - Keep output deterministic for quick local sanity checks.

use notekeep_core::{DbError, NoteRepository, NoteStore};
use std::time::Duration;

fn main() -> Result<(), DbError> {
    println!("notekeep_core version={}", notekeep_core::core_version());

    // In-memory store: always fresh, so the seed hook fires and the stream
    // shows the example notes without touching the filesystem.
    let store = NoteStore::open_in_memory()?;
    let repo = NoteRepository::with_store(store);
    let stream = repo.all_notes();

    let mut last_len = usize::MAX;
    while let Some(snapshot) = stream.recv_timeout(Duration::from_secs(2)) {
        if snapshot.len() == last_len {
            continue;
        }
        last_len = snapshot.len();
        println!("snapshot notes={}", snapshot.len());
        if snapshot.len() == 3 {
            for note in &snapshot {
                println!(
                    "  id={} title={} priority={}",
                    note.id.unwrap_or(-1),
                    note.title,
                    note.priority
                );
            }
            break;
        }
    }
    Ok(())
}
