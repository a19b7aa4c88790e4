//! Small factor graphs with closed-form Laplacian spectra.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::spectrum::FactorSpectrum;
use crate::states::StateBatch;

/// Path graph 0 - 1: λ = {0, 2}.
pub fn path2() -> FactorSpectrum {
    let s = 0.5_f64.sqrt();
    FactorSpectrum::from_rows(vec![0.0, 2.0], vec![vec![s, s], vec![s, -s]]).unwrap()
}

/// Path graph 0 - 1 - 2: λ = {0, 1, 3}.
pub fn path3() -> FactorSpectrum {
    let a = 1.0 / 3.0_f64.sqrt();
    let b = 1.0 / 2.0_f64.sqrt();
    let c = 1.0 / 6.0_f64.sqrt();
    FactorSpectrum::from_rows(
        vec![0.0, 1.0, 3.0],
        vec![
            vec![a, b, c],
            vec![a, 0.0, -2.0 * c],
            vec![a, -b, c],
        ],
    )
    .unwrap()
}

/// Complete graph K3: λ = {0, 3, 3}.
pub fn complete3() -> FactorSpectrum {
    let a = 1.0 / 3.0_f64.sqrt();
    let b = 1.0 / 2.0_f64.sqrt();
    let c = 1.0 / 6.0_f64.sqrt();
    FactorSpectrum::from_rows(
        vec![0.0, 3.0, 3.0],
        vec![
            vec![a, b, c],
            vec![a, -b, c],
            vec![a, 0.0, -2.0 * c],
        ],
    )
    .unwrap()
}

/// `nrows` random states over factors of the given sizes, seeded.
pub fn random_batch(sizes: &[usize], nrows: usize, seed: u64) -> StateBatch {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let rows = (0..nrows)
        .map(|_| sizes.iter().map(|&n| rng.random_range(0..n)).collect())
        .collect();
    StateBatch::from_rows(rows).unwrap()
}

/// Single column of a batch as its own one-factor batch.
pub fn column_batch(batch: &StateBatch, factor: usize) -> StateBatch {
    StateBatch::from_rows(batch.column(factor).map(|v| vec![v]).collect()).unwrap()
}

pub fn entry(m: &DenseMatrix<f64>, i: usize, j: usize) -> f64 {
    *m.get((i, j))
}
