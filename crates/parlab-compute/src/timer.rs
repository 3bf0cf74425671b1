//! Sleep-based timer workload

use std::time::Duration;

use tracing::trace;

/// Pause used by the timer demo
pub const DEFAULT_SLEEP: Duration = Duration::from_secs(1);

/// Block for `duration`, then hand back `x` unchanged.
pub fn timer<T>(x: T, duration: Duration) -> T {
    trace!("timer sleeping for {:?}", duration);
    std::thread::sleep(duration);
    x
}
