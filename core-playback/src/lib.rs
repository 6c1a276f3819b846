//! # Playback Engine
//!
//! Queue-driven audio playback with observer-based event notification.
//!
//! ## Overview
//!
//! [`PlayerEngine`] owns all playback state (current track, pending
//! queue, repeat/shuffle modes, play/pause/stop flags) and runs one
//! background worker thread per playback session. Commands are safe to
//! issue from any thread; the worker advances the playback position and
//! broadcasts lifecycle and progress events to registered
//! [`PlaybackObserver`]s.
//!
//! ## Threading Model
//!
//! - Command methods mutate shared state under dedicated locks and
//!   atomics; `play` and `stop` block the caller until the previous
//!   worker has exited (bounded by one progress tick).
//! - The worker checks the cooperative cancellation flag every tick;
//!   there is no forced preemption.
//! - Observer callbacks run synchronously on whichever thread triggered
//!   the transition. Observers must not assume a fixed notifying thread
//!   and must not block inside a callback.
//!
//! ## Decoding
//!
//! Actual decoding is behind the [`TrackSource`] seam. The shipped
//! [`SimulatedSource`] reports a fixed probed duration and produces no
//! audio; a real decoder plugs in by implementing the same trait.

pub mod config;
pub mod engine;
pub mod error;
pub mod observer;
pub mod source;

pub use config::EngineConfig;
pub use engine::{PlayerEngine, RepeatMode};
pub use error::{PlaybackError, Result};
pub use observer::PlaybackObserver;
pub use source::{AudioResource, SimulatedSource, TrackSource};
