//! Process-wide flags and the per-producer [`Config`] snapshot.
//!
//! Auto-freeze defaults to on in debug builds and off in release builds.

use std::sync::atomic::{AtomicBool, Ordering};

static AUTO_FREEZE: AtomicBool = AtomicBool::new(cfg!(debug_assertions));

/// Turns freezing of produced values on or off for every subsequent
/// [`produce`](crate::produce) call that uses the global configuration.
pub fn set_auto_freeze(enabled: bool) {
    AUTO_FREEZE.store(enabled, Ordering::Relaxed);
}

pub fn auto_freeze() -> bool {
    AUTO_FREEZE.load(Ordering::Relaxed)
}

/// Settings a [`Producer`](crate::Producer) runs with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Deep-freeze every array and object reachable from a result.
    pub auto_freeze: bool,
}

impl Config {
    /// Snapshot of the process-wide flags.
    pub fn global() -> Self {
        Self {
            auto_freeze: auto_freeze(),
        }
    }

    pub fn with_auto_freeze(mut self, enabled: bool) -> Self {
        self.auto_freeze = enabled;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::global()
    }
}
