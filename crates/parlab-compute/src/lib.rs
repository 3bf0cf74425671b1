//! parlab Compute - Illustrative numeric workloads
//!
//! A sleep-based timer and a row-wise moving average, each with a
//! sequential form and a driver that fans the work out over a
//! [`parlab_pool::WorkerPool`].

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod data;
pub mod moving_average;
pub mod parallel;
pub mod timer;

pub use data::random_matrix;
pub use moving_average::{
    moving_average, moving_average_rows, moving_average_rows_with, moving_average_running, Strategy,
};
pub use parallel::{max_abs_diff, parallel_moving_average, parallel_timers, sequential_timers};
pub use timer::{timer, DEFAULT_SLEEP};
