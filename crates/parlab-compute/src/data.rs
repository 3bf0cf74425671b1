//! Synthetic input data

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Matrix of i.i.d. uniform values in `[0, 1)`.
///
/// With a seed the matrix is reproducible; without one it is drawn from
/// system entropy.
pub fn random_matrix(rows: usize, cols: usize, seed: Option<u64>) -> Array2<f64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Array2::from_shape_simple_fn((rows, cols), || rng.gen::<f64>())
}
