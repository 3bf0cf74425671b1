//! Timer demo: independent sleeps, sequential then on the pool

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use parlab_compute::{parallel_timers, sequential_timers};
use parlab_core::time_it;
use parlab_pool::WorkerPool;
use tracing::info;

use super::report::DemoReport;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct TimerArgs {
    /// Number of timer calls
    #[arg(short, long)]
    calls: Option<usize>,

    /// Sleep per call in milliseconds
    #[arg(short, long)]
    sleep_ms: Option<u64>,

    /// Worker count (defaults to every available CPU)
    #[arg(short, long)]
    num_cpus: Option<usize>,
}

pub fn run(args: TimerArgs, config: &Config, json: bool) -> Result<()> {
    let calls = args.calls.unwrap_or(config.timer.calls);
    let sleep_ms = args.sleep_ms.unwrap_or(config.timer.sleep_ms);
    let sleep = Duration::from_millis(sleep_ms);

    let mut pool_config = config.pool.clone();
    if let Some(n) = args.num_cpus {
        pool_config = pool_config.with_num_cpus(n);
    }
    let pool = WorkerPool::init(pool_config).context("Failed to start worker pool")?;

    info!("Running {} timer calls of {:?}", calls, sleep);
    let inputs: Vec<usize> = (0..calls).collect();

    let (seq_out, sequential) = time_it("sequential", || sequential_timers(inputs.clone(), sleep));
    let (par_out, parallel) = time_it("parallel", || parallel_timers(&pool, inputs, sleep));
    let par_out = par_out?;

    if seq_out != par_out {
        anyhow::bail!("Parallel timers returned {:?}, expected {:?}", par_out, seq_out);
    }

    let report = DemoReport::new("Timer", sequential, parallel, pool.stats()).with_details(
        serde_json::json!({
            "calls": calls,
            "sleep_ms": sleep_ms,
        }),
    );
    pool.shutdown();

    report.print(json)
}
