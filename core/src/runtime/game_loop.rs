//! Frame interval measurement

use std::time::{Duration, Instant};

use super::RuntimeConfig;

/// Turns wall-clock frame intervals into simulation time steps.
///
/// The first tick, and any tick reporting a zero interval, runs with the
/// nominal tick duration. Long stalls are clamped to `max_delta` so the car
/// never jumps across the track after a pause.
#[derive(Debug, Clone)]
pub struct FrameClock {
    config: RuntimeConfig,
    last_update: Option<Instant>,
}

impl FrameClock {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            last_update: None,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Resolve the step for this tick.
    ///
    /// `measured` overrides the wall clock; headless runs pass a fixed value.
    pub fn delta(&mut self, measured: Option<Duration>) -> Duration {
        let now = Instant::now();
        let raw = measured.or_else(|| self.last_update.map(|last| now - last));
        self.last_update = Some(now);
        self.clamp(raw)
    }

    /// Apply the fallback and clamp rules to a raw interval.
    pub fn clamp(&self, raw: Option<Duration>) -> Duration {
        match raw {
            Some(d) if d.is_zero() => self.config.tick_duration(),
            Some(d) if d > self.config.max_delta => self.config.max_delta,
            Some(d) => d,
            None => self.config.tick_duration(),
        }
    }

    /// Log a warning when a tick ran longer than the budget.
    pub fn check_budget(&self, tick_start: Instant) {
        let tick_time = tick_start.elapsed();
        if tick_time > self.config.cpu_budget {
            tracing::warn!(
                "Tick took {:?}, exceeds budget of {:?}",
                tick_time,
                self.config.cpu_budget
            );
        }
    }
}
