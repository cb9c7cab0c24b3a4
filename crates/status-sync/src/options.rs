//! Per-call and per-updater settings

use crds::CopyStatusOptions;
use std::time::Duration;

/// Default number of write attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;

/// Default pause between write attempts
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Switches for one [`StatusUpdater::synchronize`](crate::StatusUpdater::synchronize) call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStatusOptions {
    /// Which status field groups to merge into the persisted copy
    pub copy: CopyStatusOptions,
    /// Treat a missing (or unreadable) resource as success
    pub tolerate_absence: bool,
}

impl UpdateStatusOptions {
    /// Merge `copy` into the persisted status
    pub fn new(copy: CopyStatusOptions) -> Self {
        Self {
            copy,
            tolerate_absence: false,
        }
    }

    /// Succeed silently when the resource is gone
    #[must_use]
    pub fn tolerating_absence(mut self) -> Self {
        self.tolerate_absence = true;
        self
    }
}

/// Retry policy of a [`StatusUpdater`](crate::StatusUpdater)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Write attempts before giving up
    pub max_attempts: u32,
    /// Fixed pause after a failed write
    pub retry_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }
}
