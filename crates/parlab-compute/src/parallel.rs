//! Sequential and pool-backed drivers for the workloads

use std::sync::Arc;
use std::time::Duration;

use ndarray::{s, Array2, ArrayView2};
use parlab_core::{ParlabError, Result};
use parlab_pool::WorkerPool;
use tracing::debug;

use crate::moving_average::{moving_average_rows_with, Strategy};
use crate::timer::timer;

/// Run `timer` on every input, one after another
pub fn sequential_timers<T>(inputs: Vec<T>, duration: Duration) -> Vec<T> {
    inputs.into_iter().map(|x| timer(x, duration)).collect()
}

/// Run `timer` on every input as independent remote tasks.
/// Outputs are in input order.
pub fn parallel_timers<T>(pool: &WorkerPool, inputs: Vec<T>, duration: Duration) -> Result<Vec<T>>
where
    T: Send + 'static,
{
    let objs: Vec<_> = inputs
        .into_iter()
        .map(|x| pool.remote(move || timer(x, duration)))
        .collect();
    debug!("Submitted {} timer tasks", objs.len());
    Ok(pool.get_all(objs)?)
}

/// Row-wise moving average computed by remote tasks, `rows_per_task` rows each.
///
/// The matrix is shared with the tasks, not copied. Chunks are reassembled
/// in row order.
pub fn parallel_moving_average(
    pool: &WorkerPool,
    matrix: Arc<Array2<f64>>,
    window: usize,
    rows_per_task: usize,
    strategy: Strategy,
) -> Result<Array2<f64>> {
    if rows_per_task == 0 {
        return Err(ParlabError::InvalidInput(
            "rows_per_task must be at least 1".to_string(),
        ));
    }

    let (rows, cols) = matrix.dim();
    let objs: Vec<_> = (0..rows)
        .step_by(rows_per_task)
        .map(|start| {
            let end = (start + rows_per_task).min(rows);
            let matrix = Arc::clone(&matrix);
            pool.remote(move || {
                moving_average_rows_with(matrix.slice(s![start..end, ..]), window, strategy)
            })
        })
        .collect();
    debug!(
        "Submitted {} moving-average tasks for {} rows",
        objs.len(),
        rows
    );

    let chunks = pool.get_all(objs)?;

    let mut out = Array2::zeros((rows, cols));
    let mut start = 0;
    for chunk in chunks {
        let end = start + chunk.nrows();
        out.slice_mut(s![start..end, ..]).assign(&chunk);
        start = end;
    }

    Ok(out)
}

/// Largest element-wise absolute difference between two matrices
pub fn max_abs_diff(a: ArrayView2<'_, f64>, b: ArrayView2<'_, f64>) -> Result<f64> {
    if a.dim() != b.dim() {
        return Err(ParlabError::InvalidInput(format!(
            "shape mismatch: {:?} vs {:?}",
            a.dim(),
            b.dim()
        )));
    }
    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max))
}
