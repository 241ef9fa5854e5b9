//! Session timer.

use serde::{Deserialize, Serialize};

/// A start/stop stopwatch counting whole seconds.
///
/// Driven by one-second ticks from the host; the elapsed seconds are
/// persisted with the board settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimer {
    seconds: u64,
    #[serde(skip)]
    running: bool,
}

impl SessionTimer {
    /// Timer resuming from `seconds`, stopped.
    pub fn from_seconds(seconds: u64) -> Self {
        Self {
            seconds,
            running: false,
        }
    }

    /// Start or stop. Returns whether the timer is now running.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one second if running.
    pub fn tick(&mut self) {
        if self.running {
            self.seconds += 1;
        }
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    /// `MM:SS`; minutes keep counting past 99.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}
