//! Push-based full-snapshot note feed.
//!
//! # Responsibility
//! - Broadcast the current note collection to every live subscriber after
//!   each mutation.
//! - Hand late subscribers the latest snapshot immediately on attach.
//!
//! # Invariants
//! - All subscribers observe the identical snapshot sequence; publication is
//!   serialized under the feed lock.
//! - A subscriber that stops consuming (dropped receiver) is pruned and never
//!   affects the producer or its siblings.
//! - The feed never drops a snapshot for a live subscriber: channels are
//!   unbounded and delivery is per-subscriber.

use crate::model::note::Note;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// One full-collection snapshot as delivered to subscribers.
pub type NoteSnapshot = Vec<Note>;

/// Single broadcast feed owned by the storage handle.
#[derive(Debug, Default)]
pub struct NoteFeed {
    state: Mutex<FeedState>,
}

#[derive(Debug, Default)]
struct FeedState {
    latest: Option<NoteSnapshot>,
    senders: Vec<Sender<NoteSnapshot>>,
}

/// A live subscription to the note feed.
///
/// Dropping the subscription detaches it; the feed prunes the dead channel on
/// its next publication.
pub struct NoteSubscription {
    rx: Receiver<NoteSnapshot>,
}

impl NoteFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a new subscriber.
    ///
    /// The current snapshot, when one exists, is queued for the subscriber
    /// before this call returns, so an attach-then-recv never misses state.
    pub fn subscribe(&self) -> NoteSubscription {
        let (tx, rx) = mpsc::channel();
        let mut state = self.lock_state();
        if let Some(snapshot) = &state.latest {
            // A just-created channel cannot be disconnected yet.
            let _ = tx.send(snapshot.clone());
        }
        state.senders.push(tx);
        NoteSubscription { rx }
    }

    /// Records `snapshot` as the latest collection state and fans it out to
    /// every live subscriber, pruning dead ones.
    pub fn publish(&self, snapshot: NoteSnapshot) {
        let mut state = self.lock_state();
        state
            .senders
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
        state.latest = Some(snapshot);
    }

    /// Returns the latest published snapshot, if any.
    pub fn latest(&self) -> Option<NoteSnapshot> {
        self.lock_state().latest.clone()
    }

    /// Number of subscribers still believed live.
    ///
    /// Dead subscribers are only discovered during publication, so this can
    /// briefly over-count.
    pub fn subscriber_count(&self) -> usize {
        self.lock_state().senders.len()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NoteSubscription {
    /// Blocks until the next snapshot arrives.
    ///
    /// Returns `None` when the producing store has gone away.
    pub fn recv(&self) -> Option<NoteSnapshot> {
        self.rx.recv().ok()
    }

    /// Blocks up to `timeout` for the next snapshot.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<NoteSnapshot> {
        match self.rx.recv_timeout(timeout) {
            Ok(snapshot) => Some(snapshot),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Returns an already-queued snapshot without blocking.
    pub fn try_recv(&self) -> Option<NoteSnapshot> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::NoteFeed;
    use crate::model::note::Note;
    use std::time::Duration;

    const SHORT_WAIT: Duration = Duration::from_millis(200);

    #[test]
    fn late_subscriber_receives_latest_snapshot_on_attach() {
        let feed = NoteFeed::new();
        feed.publish(vec![Note::with_id(1, "a", "b", 1)]);

        let sub = feed.subscribe();
        let snapshot = sub.try_recv().expect("latest snapshot queued on attach");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, Some(1));
    }

    #[test]
    fn subscriber_before_first_publish_sees_nothing_queued() {
        let feed = NoteFeed::new();
        let sub = feed.subscribe();
        assert!(sub.try_recv().is_none());

        feed.publish(Vec::new());
        let snapshot = sub.recv_timeout(SHORT_WAIT).expect("published snapshot");
        assert!(snapshot.is_empty());
    }

    #[test]
    fn all_subscribers_observe_the_same_sequence() {
        let feed = NoteFeed::new();
        let first = feed.subscribe();
        let second = feed.subscribe();

        feed.publish(vec![Note::with_id(1, "a", "b", 1)]);
        feed.publish(vec![
            Note::with_id(1, "a", "b", 1),
            Note::with_id(2, "c", "d", 2),
        ]);

        for sub in [&first, &second] {
            let one = sub.recv_timeout(SHORT_WAIT).expect("first snapshot");
            let two = sub.recv_timeout(SHORT_WAIT).expect("second snapshot");
            assert_eq!(one.len(), 1);
            assert_eq!(two.len(), 2);
        }
    }

    #[test]
    fn dropped_subscriber_is_pruned_and_does_not_block_others() {
        let feed = NoteFeed::new();
        let keeper = feed.subscribe();
        let dropped = feed.subscribe();
        assert_eq!(feed.subscriber_count(), 2);

        drop(dropped);
        feed.publish(Vec::new());
        assert_eq!(feed.subscriber_count(), 1);
        assert!(keeper.recv_timeout(SHORT_WAIT).is_some());
    }
}
