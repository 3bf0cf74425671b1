//! Demo reports printed by the timing commands

use anyhow::Result;
use parlab_core::{speedup, Timing};
use parlab_pool::PoolStats;
use serde::Serialize;

/// Sequential vs parallel timing of one demo
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub demo: String,
    pub sequential: Timing,
    pub parallel: Timing,
    pub speedup: f64,
    pub pool: PoolStats,
    pub details: serde_json::Value,
}

impl DemoReport {
    pub fn new(
        demo: impl Into<String>,
        sequential: Timing,
        parallel: Timing,
        pool: PoolStats,
    ) -> Self {
        let speedup = speedup(&sequential, &parallel);
        Self {
            demo: demo.into(),
            sequential,
            parallel,
            speedup,
            pool,
            details: serde_json::Value::Null,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    pub fn print(&self, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(self)?);
            return Ok(());
        }

        println!("{}", self.demo);
        println!("{}", "=".repeat(self.demo.len()));
        println!("{:<12} {:>12}", "RUN", "SECONDS");
        println!("{}", "-".repeat(25));
        println!("{:<12} {:>12.3}", "sequential", self.sequential.elapsed_secs());
        println!("{:<12} {:>12.3}", "parallel", self.parallel.elapsed_secs());
        println!();
        println!("Speedup: {:.2}x on {} CPUs", self.speedup, self.pool.num_cpus);

        if let serde_json::Value::Object(details) = &self.details {
            for (key, value) in details {
                println!("{key}: {value}");
            }
        }

        Ok(())
    }
}
