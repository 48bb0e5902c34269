//! Runtime pacing

use std::time::Duration;

/// Tick pacing for a driving session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Target tick rate in Hz
    pub tick_rate: u32,
    /// Longest frame interval handed to the simulation
    pub max_delta: Duration,
    /// A tick slower than this is logged
    pub cpu_budget: Duration,
}

impl RuntimeConfig {
    /// Nominal duration of one tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_delta: Duration::from_millis(100),
            cpu_budget: Duration::from_micros(4000), // 4ms at 60fps
        }
    }
}
