//! Trailing-window moving averages
//!
//! For position `j` and window `w` the average covers `values[0..=j]` while
//! `j < w`, and `values[j-w..=j]` afterwards.

use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Per-row kernel used to compute a moving average
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Re-sum the whole window at every position, O(n·w)
    #[default]
    Naive,
    /// Keep a running sum, O(n)
    Running,
}

impl Strategy {
    pub fn apply(self, values: &[f64], window: usize) -> Vec<f64> {
        match self {
            Strategy::Naive => moving_average(values, window),
            Strategy::Running => moving_average_running(values, window),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Naive => write!(f, "naive"),
            Strategy::Running => write!(f, "running"),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "naive" => Ok(Strategy::Naive),
            "running" => Ok(Strategy::Running),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Index of the first element in the window ending at `j`
#[inline]
fn window_start(j: usize, window: usize) -> usize {
    j.saturating_sub(window)
}

/// Moving average recomputed from scratch at each position
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|j| {
            let slice = &values[window_start(j, window)..=j];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Moving average with a running sum
pub fn moving_average_running(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (j, &value) in values.iter().enumerate() {
        sum += value;
        if j > window {
            sum -= values[j - window - 1];
        }
        let len = j - window_start(j, window) + 1;
        out.push(sum / len as f64);
    }

    out
}

/// Apply the moving average to every row of `matrix` independently
pub fn moving_average_rows(matrix: ArrayView2<'_, f64>, window: usize) -> Array2<f64> {
    moving_average_rows_with(matrix, window, Strategy::Naive)
}

/// Row-wise moving average with an explicit kernel
pub fn moving_average_rows_with(
    matrix: ArrayView2<'_, f64>,
    window: usize,
    strategy: Strategy,
) -> Array2<f64> {
    let mut out = Array2::zeros(matrix.raw_dim());
    for (row, mut out_row) in matrix.axis_iter(Axis(0)).zip(out.axis_iter_mut(Axis(0))) {
        let row = row.to_vec();
        for (dst, src) in out_row.iter_mut().zip(strategy.apply(&row, window)) {
            *dst = src;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const EPS: f64 = 1e-12;

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < EPS, "{x} != {y}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(moving_average(&[], 3).is_empty());
        assert!(moving_average_running(&[], 3).is_empty());
    }

    #[test]
    fn test_output_length_matches_input() {
        let values: Vec<f64> = (0..17).map(f64::from).collect();
        for window in [0, 1, 5, 16, 40] {
            assert_eq!(moving_average(&values, window).len(), values.len());
            assert_eq!(moving_average_running(&values, window).len(), values.len());
        }
    }

    #[test]
    fn test_growing_window_before_w() {
        let values = [2.0, 4.0, 6.0, 8.0, 10.0];
        let out = moving_average(&values, 3);
        // j < 3: mean of values[0..=j]
        assert_close(&out[..3], &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_trailing_window_after_w() {
        let values = [2.0, 4.0, 6.0, 8.0, 10.0];
        let out = moving_average(&values, 3);
        // j = 3: values[0..=3], j = 4: values[1..=4]
        assert_close(&out[3..], &[5.0, 7.0]);
    }

    #[test]
    fn test_zero_window_is_identity() {
        let values = [1.5, -2.0, 3.25];
        assert_close(&moving_average(&values, 0), &values);
        assert_close(&moving_average_running(&values, 0), &values);
    }

    #[test]
    fn test_running_matches_naive() {
        let values: Vec<f64> = (0..200).map(|i| (f64::from(i) * 0.37).sin()).collect();
        for window in [0, 1, 2, 7, 50, 199, 500] {
            let naive = moving_average(&values, window);
            let running = moving_average_running(&values, window);
            for (a, b) in naive.iter().zip(&running) {
                assert!((a - b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_rows_are_independent() {
        let matrix = array![[1.0, 2.0, 3.0], [10.0, 20.0, 30.0]];
        let out = moving_average_rows(matrix.view(), 1);
        assert_eq!(out, array![[1.0, 1.5, 2.5], [10.0, 15.0, 25.0]]);
    }

    #[test]
    fn test_rows_with_running_strategy() {
        let matrix = array![[4.0, 0.0, 8.0, 2.0]];
        let naive = moving_average_rows_with(matrix.view(), 2, Strategy::Naive);
        let running = moving_average_rows_with(matrix.view(), 2, Strategy::Running);
        assert_eq!(naive, running);
    }

    #[test]
    fn test_strategy_parse_and_display() {
        assert_eq!("naive".parse::<Strategy>().unwrap(), Strategy::Naive);
        assert_eq!("Running".parse::<Strategy>().unwrap(), Strategy::Running);
        assert!("fast".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Running.to_string(), "running");
    }
}
