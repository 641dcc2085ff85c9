use notekeep_core::{shared_store, DbError, Note, NoteRepository, NoteStore, StoreConfig};
use rusqlite::Connection;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const SETTLE_BUDGET: Duration = Duration::from_secs(5);

fn wait_for_count(store: &NoteStore, expected: usize) -> Vec<Note> {
    let deadline = Instant::now() + SETTLE_BUDGET;
    loop {
        let snapshot = store.snapshot().unwrap();
        if snapshot.len() == expected {
            return snapshot;
        }
        assert!(
            Instant::now() < deadline,
            "store did not settle at {expected} notes; last snapshot: {snapshot:?}"
        );
        thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn shared_store_is_a_process_singleton_and_rejects_rebinding() {
    let data_dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(data_dir.path());

    // Concurrent first access: every racer must end up with the same store.
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let config = config.clone();
            thread::spawn(move || shared_store(&config).unwrap())
        })
        .collect();
    let stores: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for store in &stores[1..] {
        assert!(Arc::ptr_eq(&stores[0], store));
    }

    // Repeated access keeps returning the same instance.
    let again = shared_store(&config).unwrap();
    assert!(Arc::ptr_eq(&stores[0], &again));

    // A different data directory is a conflict, not a silent rebind.
    let other_dir = tempfile::tempdir().unwrap();
    let err = shared_store(&StoreConfig::new(other_dir.path())).unwrap_err();
    assert!(matches!(err, DbError::AlreadyOpen { .. }));

    // The fresh shared store seeds itself in the background.
    let seeded = wait_for_count(&stores[0], 3);
    let titles: Vec<_> = seeded.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, ["Title 1", "Title 2", "Title 3"]);

    // The façade rides the same shared store and sees the same collection.
    let repo = NoteRepository::new(&config).unwrap();
    let stream = repo.all_notes();
    let snapshot = stream.recv_timeout(SETTLE_BUDGET).unwrap();
    assert_eq!(snapshot.len(), 3);
}

#[test]
fn fresh_store_seeds_exactly_three_example_notes() {
    let data_dir = tempfile::tempdir().unwrap();
    let path = data_dir.path().join("seeded.sqlite3");
    let store = NoteStore::open(&path).unwrap();

    let seeded = wait_for_count(&store, 3);
    for (note, (title, description, priority)) in seeded.iter().zip([
        ("Title 1", "Description 1", 1),
        ("Title 2", "Description 2", 2),
        ("Title 3", "Description 3", 3),
    ]) {
        assert!(note.id.is_some());
        assert_eq!(note.title, title);
        assert_eq!(note.description, description);
        assert_eq!(note.priority, priority);
    }

    // Settled means settled: no extra seed records trickle in afterwards.
    thread::sleep(Duration::from_millis(200));
    assert_eq!(store.snapshot().unwrap().len(), 3);
}

#[test]
fn reopening_an_existing_store_does_not_reseed() {
    let data_dir = tempfile::tempdir().unwrap();
    let path = data_dir.path().join("existing.sqlite3");

    {
        let store = NoteStore::open(&path).unwrap();
        wait_for_count(&store, 3);
    }

    let reopened = NoteStore::open(&path).unwrap();
    thread::sleep(Duration::from_millis(200));
    assert_eq!(reopened.snapshot().unwrap().len(), 3);
}

#[test]
fn version_mismatch_triggers_destructive_recreation_without_seeding() {
    let data_dir = tempfile::tempdir().unwrap();
    let path = data_dir.path().join("mismatched.sqlite3");

    {
        let store = NoteStore::open(&path).unwrap();
        wait_for_count(&store, 3);
    }

    // Simulate a store written by some other schema generation.
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    }

    let recreated = NoteStore::open(&path).unwrap();
    thread::sleep(Duration::from_millis(200));
    // Destructive policy: prior data is gone, and a recreated store is not a
    // fresh one, so the seed hook does not fire again.
    assert!(recreated.snapshot().unwrap().is_empty());
}
