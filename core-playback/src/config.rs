//! Engine configuration.

use std::time::Duration;

/// Playback engine configuration.
///
/// The tick interval bounds both progress-event granularity and the
/// worker's responsiveness to pause/stop. 100 ms is a deliberate
/// simplicity/latency tradeoff, not an accident; tests shorten it.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Sleep quantum between worker loop iterations.
    pub tick_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
        }
    }
}

impl EngineConfig {
    /// Set the worker tick interval.
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }
}
