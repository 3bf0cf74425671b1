//! CLI command modules

pub mod config;
pub mod moving_average;
pub mod report;
pub mod timer;
