//! The playback engine: command surface, shared state, and the
//! per-session background worker.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::observer::{ObserverRegistry, PlaybackObserver};
use crate::source::TrackSource;

/// What happens when a track reaches its end.
///
/// Takes effect at the next completion decision, never retroactively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Advance through the queue; stop when it runs out.
    #[default]
    None,
    /// Restart the finished track.
    Single,
    /// Re-append the finished track to the back of the queue.
    All,
}

/// State shared between command threads and the worker.
///
/// The queue and the observer set have independent locks so notification
/// never blocks queue mutation. The three playback flags are atomics:
/// command threads write them, the worker reads them every tick.
struct EngineShared {
    source: Arc<dyn TrackSource>,
    config: EngineConfig,

    is_playing: AtomicBool,
    is_paused: AtomicBool,
    should_stop: AtomicBool,

    position: Mutex<f64>,
    duration: Mutex<f64>,
    current_track: Mutex<Option<String>>,
    repeat_mode: Mutex<RepeatMode>,
    shuffle: AtomicBool,

    /// Pending tracks only; the currently playing track has already been
    /// dequeued.
    queue: Mutex<VecDeque<String>>,

    observers: ObserverRegistry,

    worker: Mutex<Option<JoinHandle<()>>>,
}

impl EngineShared {
    /// Take the stored worker handle and join it.
    ///
    /// Skips the join when invoked from the worker itself (completion
    /// transitions run `play`/`stop` on the worker thread); the exiting
    /// thread is simply detached. Returns whether a handle was taken.
    fn take_and_join_worker(&self) -> bool {
        let handle = self.worker.lock().take();
        match handle {
            Some(handle) => {
                if handle.thread().id() != thread::current().id() {
                    let _ = handle.join();
                }
                true
            }
            None => false,
        }
    }

    /// Cancel the live session, if any, and wait for its worker to exit.
    ///
    /// Loops because a completing worker may hand off to a fresh session
    /// concurrently; re-arming the cancel flag after each join converges
    /// within a tick.
    fn halt_session(&self) {
        loop {
            self.should_stop.store(true, Ordering::SeqCst);
            if !self.take_and_join_worker() {
                break;
            }
        }
    }

    fn play(self: &Arc<Self>, uri: &str) {
        self.halt_session();

        *self.current_track.lock() = Some(uri.to_string());
        *self.position.lock() = 0.0;
        self.is_paused.store(false, Ordering::SeqCst);
        self.should_stop.store(false, Ordering::SeqCst);
        self.is_playing.store(true, Ordering::SeqCst);

        debug!(uri = %uri, "Starting playback session");

        let shared = Arc::clone(self);
        let track = uri.to_string();
        let handle = thread::spawn(move || run_worker(shared, track));

        let mut slot = self.worker.lock();
        if slot.is_none() {
            *slot = Some(handle);
        }
        // Occupied slot: a fresher session stored its worker while this
        // one was spawning; the stale handle belongs to an exited thread.
    }

    fn stop(&self) {
        if !self.is_playing.load(Ordering::SeqCst) {
            return;
        }

        self.is_playing.store(false, Ordering::SeqCst);
        self.is_paused.store(false, Ordering::SeqCst);
        self.halt_session();

        *self.current_track.lock() = None;
        *self.position.lock() = 0.0;
        self.queue.lock().clear();

        debug!("Playback stopped");
        self.observers.notify_stopped();
    }

    fn next(self: &Arc<Self>) {
        let popped = self.queue.lock().pop_front();
        match popped {
            Some(uri) => {
                debug!(uri = %uri, "Advancing to next queued track");
                self.play(&uri);
            }
            None => {
                warn!("Playback queue is empty, stopping");
                self.stop();
            }
        }
    }
}

fn run_worker(shared: Arc<EngineShared>, uri: String) {
    let resource = match shared.source.open(&uri) {
        Ok(resource) => resource,
        Err(e) => {
            warn!(uri = %uri, error = %e, "Failed to open track");
            shared.is_playing.store(false, Ordering::SeqCst);
            shared.observers.notify_stopped();
            return;
        }
    };

    let duration = resource.duration().as_secs_f64();
    *shared.duration.lock() = duration;
    *shared.position.lock() = 0.0;

    // Start events fire only after a successful open, so observers can
    // tell a failed play (stopped without track-changed) from a track
    // that started and then stopped.
    shared.observers.notify_track_changed(&uri);
    shared.observers.notify_started();

    let started_at = Instant::now();

    while shared.is_playing.load(Ordering::SeqCst) && !shared.should_stop.load(Ordering::SeqCst) {
        if !shared.is_paused.load(Ordering::SeqCst) {
            let elapsed = started_at.elapsed().as_secs_f64();
            *shared.position.lock() = elapsed;
            shared.observers.notify_progress(elapsed, duration);

            if elapsed >= duration {
                // Release the audio resource before the next session opens.
                drop(resource);
                finish_track(&shared, uri);
                return;
            }
        }

        thread::sleep(shared.config.tick_interval);
    }
    // Cooperative stop or skip; the resource is released here.
}

/// Completion policy at end-of-track.
fn finish_track(shared: &Arc<EngineShared>, uri: String) {
    let mode = *shared.repeat_mode.lock();
    match mode {
        RepeatMode::Single => {
            debug!(uri = %uri, "Repeat single, restarting track");
            shared.play(&uri);
        }
        RepeatMode::All => {
            shared.queue.lock().push_back(uri);
            shared.next();
        }
        RepeatMode::None => shared.next(),
    }
}

/// Queue-driven playback engine.
///
/// Construct one per playback session group, hand out `&PlayerEngine` (or
/// wrap in `Arc`) to command-issuing threads. Dropping the engine stops
/// any live session and joins its worker.
pub struct PlayerEngine {
    shared: Arc<EngineShared>,
}

impl PlayerEngine {
    /// Engine with the default configuration.
    pub fn new(source: Arc<dyn TrackSource>) -> Self {
        Self::with_config(source, EngineConfig::default())
    }

    pub fn with_config(source: Arc<dyn TrackSource>, config: EngineConfig) -> Self {
        Self {
            shared: Arc::new(EngineShared {
                source,
                config,
                is_playing: AtomicBool::new(false),
                is_paused: AtomicBool::new(false),
                should_stop: AtomicBool::new(false),
                position: Mutex::new(0.0),
                duration: Mutex::new(0.0),
                current_track: Mutex::new(None),
                repeat_mode: Mutex::new(RepeatMode::default()),
                shuffle: AtomicBool::new(false),
                queue: Mutex::new(VecDeque::new()),
                observers: ObserverRegistry::default(),
                worker: Mutex::new(None),
            }),
        }
    }

    /// Start playing `uri`, replacing any live session.
    ///
    /// Valid from any state: playing something else makes this a "skip
    /// to", not an error, and the replaced session ends without a stopped
    /// event. Blocks until the previous worker has exited (bounded by
    /// roughly one tick). Pending queued tracks are left in place for
    /// subsequent [`next`](Self::next) calls.
    pub fn play(&self, uri: &str) {
        self.shared.play(uri);
    }

    /// Pause the current session. Silent no-op unless playing and not
    /// already paused.
    pub fn pause(&self) {
        if self.shared.is_playing.load(Ordering::SeqCst)
            && !self.shared.is_paused.load(Ordering::SeqCst)
        {
            self.shared.is_paused.store(true, Ordering::SeqCst);
            self.shared.observers.notify_paused();
        }
    }

    /// Resume a paused session. Fires the started event (the contract
    /// reuses it for resume). Silent no-op unless playing and paused.
    pub fn resume(&self) {
        if self.shared.is_playing.load(Ordering::SeqCst)
            && self.shared.is_paused.load(Ordering::SeqCst)
        {
            self.shared.is_paused.store(false, Ordering::SeqCst);
            self.shared.observers.notify_started();
        }
    }

    /// Stop the current session: cancel the worker, join it, reset the
    /// current track and position, clear the queue, and fire the stopped
    /// event. No-op when already stopped.
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// Play the next pending track. With an empty queue this is terminal
    /// for the session: the engine logs a warning and stops.
    pub fn next(&self) {
        self.shared.next();
    }

    /// Restart the current track from the beginning.
    ///
    /// There is no play-history stack; this is the documented minimal
    /// contract. No-op when nothing has been played.
    pub fn previous(&self) {
        let current = self.shared.current_track.lock().clone();
        if let Some(uri) = current {
            self.shared.play(&uri);
        }
    }

    /// Set the playback position (seconds) and fire a progress event.
    ///
    /// Does not touch the worker's audio resource; with the simulated
    /// source the worker's next tick recomputes position from wall-clock
    /// elapsed time.
    pub fn seek(&self, position: f64) {
        *self.shared.position.lock() = position;
        let duration = *self.shared.duration.lock();
        self.shared.observers.notify_progress(position, duration);
    }

    /// Append a track to the pending queue. Fires no event.
    pub fn enqueue(&self, uri: &str) {
        self.shared.queue.lock().push_back(uri.to_string());
        debug!(uri = %uri, "Enqueued track");
    }

    /// Drop all pending tracks. Fires no event.
    pub fn clear_queue(&self) {
        self.shared.queue.lock().clear();
    }

    pub fn set_repeat_mode(&self, mode: RepeatMode) {
        *self.shared.repeat_mode.lock() = mode;
    }

    /// Accepted but not yet reordering the queue.
    pub fn set_shuffle_mode(&self, shuffle: bool) {
        self.shared.shuffle.store(shuffle, Ordering::SeqCst);
    }

    /// Current position in seconds.
    pub fn position(&self) -> f64 {
        *self.shared.position.lock()
    }

    /// Duration of the current track in seconds, fixed at playback start.
    pub fn duration(&self) -> f64 {
        *self.shared.duration.lock()
    }

    /// Whether audio is advancing right now (playing and not paused).
    pub fn is_playing(&self) -> bool {
        self.shared.is_playing.load(Ordering::SeqCst)
            && !self.shared.is_paused.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.shared.is_paused.load(Ordering::SeqCst)
    }

    pub fn current_track(&self) -> Option<String> {
        self.shared.current_track.lock().clone()
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        *self.shared.repeat_mode.lock()
    }

    pub fn shuffle_mode(&self) -> bool {
        self.shared.shuffle.load(Ordering::SeqCst)
    }

    pub fn queue_len(&self) -> usize {
        self.shared.queue.lock().len()
    }

    /// Snapshot of the pending queue, front first.
    pub fn queued_tracks(&self) -> Vec<String> {
        self.shared.queue.lock().iter().cloned().collect()
    }

    pub fn add_observer(&self, observer: Arc<dyn PlaybackObserver>) {
        self.shared.observers.add(observer);
    }

    /// Remove a previously added observer by identity.
    pub fn remove_observer(&self, observer: &Arc<dyn PlaybackObserver>) {
        self.shared.observers.remove(observer);
    }
}

impl Drop for PlayerEngine {
    fn drop(&mut self) {
        self.stop();
        self.clear_queue();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SimulatedSource;

    fn stopped_engine() -> PlayerEngine {
        PlayerEngine::new(Arc::new(SimulatedSource::new()))
    }

    #[test]
    fn queue_preserves_insertion_order() {
        let engine = stopped_engine();
        engine.enqueue("a.mp3");
        engine.enqueue("b.mp3");
        engine.enqueue("c.mp3");

        assert_eq!(engine.queued_tracks(), vec!["a.mp3", "b.mp3", "c.mp3"]);
        assert_eq!(engine.queue_len(), 3);

        engine.clear_queue();
        assert_eq!(engine.queue_len(), 0);
    }

    #[test]
    fn mode_setters_are_pure_state() {
        let engine = stopped_engine();
        assert_eq!(engine.repeat_mode(), RepeatMode::None);
        assert!(!engine.shuffle_mode());

        engine.set_repeat_mode(RepeatMode::All);
        engine.set_shuffle_mode(true);

        assert_eq!(engine.repeat_mode(), RepeatMode::All);
        assert!(engine.shuffle_mode());
    }

    #[test]
    fn invalid_state_commands_are_noops() {
        let engine = stopped_engine();

        // None of these may panic or change state on a stopped engine.
        engine.pause();
        engine.resume();
        engine.stop();
        engine.previous();

        assert!(!engine.is_playing());
        assert!(!engine.is_paused());
        assert_eq!(engine.current_track(), None);
        assert_eq!(engine.position(), 0.0);
    }
}
