//! Worker pool - runs remote tasks with bounded concurrency

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::object_ref::{join_error, ObjectRef, TaskId};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Default)]
struct Counters {
    submitted: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    running: AtomicU64,
    peak_running: AtomicU64,
}

impl Counters {
    fn enter(&self) {
        let running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_running.fetch_max(running, Ordering::SeqCst);
    }

    fn leave(&self, ok: bool) {
        self.running.fetch_sub(1, Ordering::SeqCst);
        if ok {
            self.completed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Pool statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub num_cpus: usize,
    pub submitted: u64,
    pub completed: u64,
    pub failed: u64,
    /// Highest number of tasks observed running at the same time
    pub peak_running: u64,
}

/// In-process worker pool.
///
/// At most `num_cpus` submitted closures run at once; the others queue for a
/// permit. The blocking methods (`get`, `get_all`, `get_timeout`, `wait`)
/// drive the pool's own runtime and must not be called from inside an async
/// tokio context. From async code, await [`ObjectRef::resolve`] instead.
pub struct WorkerPool {
    runtime: Runtime,
    permits: Arc<Semaphore>,
    counters: Arc<Counters>,
    num_cpus: usize,
    shutdown_timeout: Duration,
}

impl WorkerPool {
    /// Start a pool with the given configuration
    pub fn init(config: PoolConfig) -> Result<Self, PoolError> {
        let num_cpus = config.resolved_num_cpus()?;

        let runtime = Builder::new_multi_thread()
            .worker_threads(num_cpus)
            .max_blocking_threads(num_cpus)
            .thread_name(config.thread_name.clone())
            .enable_time()
            .build()?;

        info!("Worker pool started with {} CPUs", num_cpus);

        Ok(Self {
            runtime,
            permits: Arc::new(Semaphore::new(num_cpus)),
            counters: Arc::new(Counters::default()),
            num_cpus,
            shutdown_timeout: config.shutdown_timeout(),
        })
    }

    /// Start a pool using every available CPU
    pub fn with_defaults() -> Result<Self, PoolError> {
        Self::init(PoolConfig::default())
    }

    pub fn num_cpus(&self) -> usize {
        self.num_cpus
    }

    /// Submit a blocking closure as a remote task. Returns immediately.
    pub fn remote<T, F>(&self, f: F) -> ObjectRef<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let task_id = TaskId::new();
        let permits = Arc::clone(&self.permits);
        let counters = Arc::clone(&self.counters);
        counters.submitted.fetch_add(1, Ordering::Relaxed);

        let handle = self.runtime.spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                return Err(PoolError::TaskCancelled(task_id));
            };

            counters.enter();
            debug!("Task {} started", task_id);
            let result = tokio::task::spawn_blocking(f).await;
            counters.leave(result.is_ok());

            result.map_err(|err| {
                let err = join_error(task_id, err);
                warn!("{}", err);
                err
            })
        });

        ObjectRef::new(task_id, handle)
    }

    /// Block until the task finishes and return its value
    pub fn get<T>(&self, obj: ObjectRef<T>) -> Result<T, PoolError> {
        self.runtime.block_on(obj.resolve())
    }

    /// Block until every task finishes. Values come back in the order the
    /// handles were given, whatever order the tasks completed in.
    pub fn get_all<T>(&self, objs: Vec<ObjectRef<T>>) -> Result<Vec<T>, PoolError> {
        let results = self
            .runtime
            .block_on(futures::future::join_all(objs.into_iter().map(ObjectRef::resolve)));
        results.into_iter().collect()
    }

    /// Like [`WorkerPool::get`], giving up after `timeout`. The task keeps
    /// running in the background.
    pub fn get_timeout<T>(&self, obj: ObjectRef<T>, timeout: Duration) -> Result<T, PoolError> {
        self.runtime.block_on(async {
            match tokio::time::timeout(timeout, obj.resolve()).await {
                Ok(result) => result,
                Err(_) => Err(PoolError::Timeout { waited: timeout }),
            }
        })
    }

    /// Split handles into finished and unfinished ones.
    ///
    /// Returns once at least `num_returns` tasks are finished or, if given,
    /// `timeout` has elapsed. `num_returns` is clamped to `objs.len()`.
    pub fn wait<T>(
        &self,
        objs: Vec<ObjectRef<T>>,
        num_returns: usize,
        timeout: Option<Duration>,
    ) -> (Vec<ObjectRef<T>>, Vec<ObjectRef<T>>) {
        let num_returns = num_returns.min(objs.len());
        let deadline = timeout.map(|t| Instant::now() + t);

        self.runtime.block_on(async {
            loop {
                let ready = objs.iter().filter(|obj| obj.is_ready()).count();
                if ready >= num_returns {
                    break;
                }
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    debug!("wait timed out with {}/{} ready", ready, num_returns);
                    break;
                }
                tokio::time::sleep(WAIT_POLL_INTERVAL).await;
            }
        });

        objs.into_iter().partition(ObjectRef::is_ready)
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            num_cpus: self.num_cpus,
            submitted: self.counters.submitted.load(Ordering::Relaxed),
            completed: self.counters.completed.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            peak_running: self.counters.peak_running.load(Ordering::SeqCst),
        }
    }

    /// Stop the pool. Queued tasks are cancelled; running ones get the
    /// configured grace period.
    pub fn shutdown(self) {
        let stats = self.stats();
        self.permits.close();
        self.runtime.shutdown_timeout(self.shutdown_timeout);
        info!(
            "Worker pool stopped ({} submitted, {} completed, {} failed)",
            stats.submitted, stats.completed, stats.failed
        );
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("num_cpus", &self.num_cpus)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
