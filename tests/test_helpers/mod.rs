//! Scoped control over the `TASKTRACK_*` environment for configuration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Every environment variable the service configuration reads.
pub const CONFIG_VARS: [&str; 7] = [
    "TASKTRACK_BIND",
    "TASKTRACK_DATABASE_URL",
    "TASKTRACK_POOL_SIZE",
    "TASKTRACK_QUEUE_CAPACITY",
    "TASKTRACK_PROCESSING_DELAY_SECS",
    "TASKTRACK_SHUTDOWN_GRACE_SECS",
    "TASKTRACK_LOG",
];

/// Holds the process environment with only the given configuration
/// variables set, restoring the previous values on drop.
pub struct ConfigEnvGuard {
    previous: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ConfigEnvGuard {
    /// Clears every configuration variable, then applies `overrides`.
    pub fn with(overrides: &[(&'static str, &str)]) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = CONFIG_VARS
            .iter()
            .map(|key| (*key, env::var_os(key)))
            .collect();

        for key in CONFIG_VARS {
            let value = overrides
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| *value);
            unsafe {
                // SAFETY: ENV_LOCK serializes environment mutations in tests.
                match value {
                    Some(new_value) => env::set_var(key, new_value),
                    None => env::remove_var(key),
                }
            }
        }

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for ConfigEnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            unsafe {
                // SAFETY: ENV_LOCK serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(key, previous),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
