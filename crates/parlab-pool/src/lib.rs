//! parlab Pool - In-process worker pool for remote tasks
//!
//! A pool is initialized with a CPU count, closures are submitted as remote
//! tasks which immediately return an [`ObjectRef`], and results are
//! materialized by blocking on [`WorkerPool::get`] or [`WorkerPool::get_all`].

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod object_ref;
pub mod pool;

pub use config::PoolConfig;
pub use error::PoolError;
pub use object_ref::{ObjectRef, TaskId};
pub use pool::{PoolStats, WorkerPool};
