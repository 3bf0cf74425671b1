//! Wall-clock timing of demo snippets

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::debug;

/// A running wall-clock measurement
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
    started_at: DateTime<Utc>,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Stop the watch and label the measurement
    pub fn finish(self, label: impl Into<String>) -> Timing {
        Timing {
            label: label.into(),
            started_at: self.started_at,
            elapsed: self.elapsed(),
        }
    }
}

/// A finished measurement of one snippet
#[derive(Debug, Clone, Serialize)]
pub struct Timing {
    pub label: String,
    pub started_at: DateTime<Utc>,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl Timing {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl std::fmt::Display for Timing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.3}s", self.label, self.elapsed_secs())
    }
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}

/// Run `f`, returning its output together with how long it took.
///
/// # Example
/// ```
/// use parlab_core::time_it;
///
/// let (sum, timing) = time_it("sum", || (1..=10).sum::<u32>());
/// assert_eq!(sum, 55);
/// assert_eq!(timing.label, "sum");
/// ```
pub fn time_it<T>(label: impl Into<String>, f: impl FnOnce() -> T) -> (T, Timing) {
    let watch = Stopwatch::start();
    let output = f();
    let timing = watch.finish(label);
    debug!("{} took {:.3}ms", timing.label, timing.elapsed_ms());
    (output, timing)
}

/// Ratio of sequential to parallel wall time. Zero when the parallel run
/// took no measurable time.
pub fn speedup(sequential: &Timing, parallel: &Timing) -> f64 {
    let parallel_secs = parallel.elapsed_secs();
    if parallel_secs == 0.0 {
        return 0.0;
    }
    sequential.elapsed_secs() / parallel_secs
}
