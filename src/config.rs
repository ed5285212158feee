use std::time::Duration;

use crate::diff::DiffMode;

pub const DEFAULT_DELAY_MS: u64 = 2000;

/// Engine knobs. The delay stands in for the latency of a remote service.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub delay: Duration,
    pub diff_mode: DiffMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            diff_mode: DiffMode::Positional,
        }
    }
}

impl EngineConfig {
    /// Zero delay, for tests and scripted use.
    pub fn immediate() -> Self {
        Self::default().with_delay(Duration::ZERO)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_diff_mode(mut self, mode: DiffMode) -> Self {
        self.diff_mode = mode;
        self
    }
}
