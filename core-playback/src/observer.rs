//! Playback lifecycle and progress notifications.

use std::sync::Arc;

use parking_lot::Mutex;

/// Listener for playback lifecycle and progress events.
///
/// Callbacks are invoked synchronously from whichever thread triggered
/// the transition: the command-issuing thread for pause/resume/stop, the
/// worker thread for progress and for transitions it initiates (start,
/// auto-advance track changes). Implementations must not block; a slow
/// callback stalls the playback loop or the caller.
pub trait PlaybackObserver: Send + Sync {
    /// Playback started or resumed.
    ///
    /// Resume reuses this event; a fresh start is distinguished by the
    /// accompanying [`on_track_changed`](Self::on_track_changed).
    fn on_playback_started(&self);

    /// Playback paused.
    fn on_playback_paused(&self);

    /// Playback stopped, whether by command, open failure, or queue
    /// exhaustion.
    fn on_playback_stopped(&self);

    /// A different (or restarted) track became current.
    fn on_track_changed(&self, uri: &str);

    /// Periodic position update, in seconds.
    fn on_playback_progress(&self, position: f64, duration: f64);
}

/// Set of registered observers.
///
/// Guarded by its own lock, independent of the queue lock, so
/// notification never contends with queue mutation. Dispatch snapshots
/// the set and invokes callbacks outside the lock; observers may
/// add/remove from within a callback.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    observers: Mutex<Vec<Arc<dyn PlaybackObserver>>>,
}

impl ObserverRegistry {
    pub(crate) fn add(&self, observer: Arc<dyn PlaybackObserver>) {
        self.observers.lock().push(observer);
    }

    /// Remove a previously registered observer by identity.
    pub(crate) fn remove(&self, observer: &Arc<dyn PlaybackObserver>) {
        self.observers
            .lock()
            .retain(|registered| !Arc::ptr_eq(registered, observer));
    }

    fn snapshot(&self) -> Vec<Arc<dyn PlaybackObserver>> {
        self.observers.lock().clone()
    }

    pub(crate) fn notify_started(&self) {
        for observer in self.snapshot() {
            observer.on_playback_started();
        }
    }

    pub(crate) fn notify_paused(&self) {
        for observer in self.snapshot() {
            observer.on_playback_paused();
        }
    }

    pub(crate) fn notify_stopped(&self) {
        for observer in self.snapshot() {
            observer.on_playback_stopped();
        }
    }

    pub(crate) fn notify_track_changed(&self, uri: &str) {
        for observer in self.snapshot() {
            observer.on_track_changed(uri);
        }
    }

    pub(crate) fn notify_progress(&self, position: f64, duration: f64) {
        for observer in self.snapshot() {
            observer.on_playback_progress(position, duration);
        }
    }
}
