//! Lightweight wall-clock timing for analysis stages.
//!
//! Timers always measure; whether the numbers are shown is decided by the
//! caller (for example the CLI `--timing` flag or the `QS_TIMING` env var).

use std::time::Instant;

/// True when the `QS_TIMING` environment variable is set.
pub fn env_enabled() -> bool {
    std::env::var_os("QS_TIMING").is_some()
}

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Seconds since the timer started.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer and return elapsed time in seconds.
    pub fn stop(self) -> f64 {
        self.elapsed_s()
    }
}
