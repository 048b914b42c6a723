//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background job worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Number of jobs processed at the same time.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// How long to wait for in-flight jobs on shutdown, in seconds.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            concurrency: default_concurrency(),
            shutdown_timeout_seconds: default_shutdown_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    1
}

fn default_shutdown_timeout() -> u64 {
    30
}
