//! Worker pool configuration

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PoolError;

/// Configuration for [`crate::WorkerPool::init`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum number of tasks running at once. `None` uses every available CPU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_cpus: Option<usize>,
    /// Name given to worker threads
    pub thread_name: String,
    /// Grace period for in-flight tasks on shutdown
    pub shutdown_timeout_ms: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            num_cpus: None,
            thread_name: "parlab-worker".to_string(),
            shutdown_timeout_ms: 5000,
        }
    }
}

impl PoolConfig {
    pub fn with_num_cpus(mut self, num_cpus: usize) -> Self {
        self.num_cpus = Some(num_cpus);
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    /// Worker count after applying the machine default
    pub fn resolved_num_cpus(&self) -> Result<usize, PoolError> {
        match self.num_cpus {
            Some(0) => Err(PoolError::InvalidConfig(
                "num_cpus must be at least 1".to_string(),
            )),
            Some(n) => Ok(n),
            None => Ok(std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)),
        }
    }
}
