//! Moving-average demo: row-wise averages, sequential then on the pool

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use ndarray::ArrayView2;
use parlab_compute::{
    max_abs_diff, moving_average_rows_with, parallel_moving_average, random_matrix, Strategy,
};
use parlab_core::time_it;
use parlab_pool::WorkerPool;
use tracing::{debug, info};

use super::report::DemoReport;
use crate::config::Config;

/// Largest difference tolerated between the sequential and parallel results
const TOLERANCE: f64 = 1e-9;

#[derive(Args, Debug)]
pub struct MovingAverageArgs {
    /// Number of independent rows
    #[arg(short, long)]
    rows: Option<usize>,

    /// Elements per row
    #[arg(short, long)]
    cols: Option<usize>,

    /// Window size
    #[arg(short, long)]
    window: Option<usize>,

    /// Seed for the synthetic matrix
    #[arg(long)]
    seed: Option<u64>,

    /// Rows handled by each remote task
    #[arg(long)]
    rows_per_task: Option<usize>,

    /// Per-row kernel: naive or running
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Worker count (defaults to every available CPU)
    #[arg(short, long)]
    num_cpus: Option<usize>,
}

/// Largest difference between the two runs, or an error past `TOLERANCE`
fn check_agreement(expected: ArrayView2<'_, f64>, got: ArrayView2<'_, f64>) -> Result<f64> {
    let diff = max_abs_diff(expected, got)?;
    debug!("Max abs difference between runs: {:e}", diff);
    if diff > TOLERANCE {
        anyhow::bail!("Parallel result differs from sequential by {diff:e}");
    }
    Ok(diff)
}

pub fn run(args: MovingAverageArgs, config: &Config, json: bool) -> Result<()> {
    let defaults = &config.moving_average;
    let rows = args.rows.unwrap_or(defaults.rows);
    let cols = args.cols.unwrap_or(defaults.cols);
    let window = args.window.unwrap_or(defaults.window);
    let rows_per_task = args.rows_per_task.unwrap_or(defaults.rows_per_task);
    let strategy = args.strategy.unwrap_or(defaults.strategy);
    let seed = args.seed.or(defaults.seed);

    let mut pool_config = config.pool.clone();
    if let Some(n) = args.num_cpus {
        pool_config = pool_config.with_num_cpus(n);
    }
    let pool = WorkerPool::init(pool_config).context("Failed to start worker pool")?;

    let matrix = Arc::new(random_matrix(rows, cols, seed));
    info!(
        "Moving average over {}x{} matrix, window {}, {} kernel",
        rows, cols, window, strategy
    );

    let (expected, sequential) = time_it("sequential", || {
        moving_average_rows_with(matrix.view(), window, strategy)
    });
    let (got, parallel) = time_it("parallel", || {
        parallel_moving_average(&pool, Arc::clone(&matrix), window, rows_per_task, strategy)
    });
    let got = got?;

    let diff = check_agreement(expected.view(), got.view())?;

    let report = DemoReport::new("Moving average", sequential, parallel, pool.stats())
        .with_details(serde_json::json!({
            "rows": rows,
            "cols": cols,
            "window": window,
            "rows_per_task": rows_per_task,
            "strategy": strategy,
            "max_abs_diff": diff,
        }));
    pool.shutdown();

    report.print(json)
}
