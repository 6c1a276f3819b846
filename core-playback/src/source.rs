//! Track source seam.
//!
//! The engine never decodes audio itself; it opens tracks through a
//! [`TrackSource`] and only ever asks the resulting [`AudioResource`] for
//! its probed duration. A real decoder (or a remote-stream backend) plugs
//! in here without touching the engine.

use std::time::Duration;

use crate::error::Result;

/// Default placeholder duration reported by the simulated source.
pub const DEFAULT_TRACK_DURATION: Duration = Duration::from_secs(180);

/// An opened, playable track.
///
/// Owned exclusively by the worker thread for the lifetime of one track
/// and released (dropped) on every worker exit path. Command threads
/// never touch it; they influence playback only through the engine's
/// state flags.
pub trait AudioResource: Send {
    /// Probed duration of the opened track.
    ///
    /// Fixed once the track starts; `seek` does not change it and only a
    /// new `play` re-probes.
    fn duration(&self) -> Duration;
}

/// Opens a track URI into an [`AudioResource`].
pub trait TrackSource: Send + Sync {
    /// Open and prepare `uri` for playback.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be opened. The engine
    /// treats this as terminal for the track: it stops and does not
    /// retry.
    fn open(&self, uri: &str) -> Result<Box<dyn AudioResource>>;
}

/// Decode stub: accepts every URI and reports a fixed duration.
///
/// Stands in for a real decoder so the engine's state machine, queue,
/// and event contracts can run (and be tested) without audio I/O.
pub struct SimulatedSource {
    duration: Duration,
}

impl SimulatedSource {
    /// Simulated source with the default 3-minute track duration.
    pub fn new() -> Self {
        Self {
            duration: DEFAULT_TRACK_DURATION,
        }
    }

    /// Simulated source reporting `duration` for every track.
    pub fn with_duration(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

struct SimulatedResource {
    duration: Duration,
}

impl AudioResource for SimulatedResource {
    fn duration(&self) -> Duration {
        self.duration
    }
}

impl TrackSource for SimulatedSource {
    fn open(&self, _uri: &str) -> Result<Box<dyn AudioResource>> {
        Ok(Box::new(SimulatedResource {
            duration: self.duration,
        }))
    }
}
