//! parlab Core - Error types, timing, and shared functionality
//!
//! This crate provides the foundational types used across all parlab crates.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod timing;
pub mod util;

pub use error::{ParlabError, Result};
pub use timing::{speedup, time_it, Stopwatch, Timing};
