//! Per-factor Laplacian spectra.
//!
//! A [`FactorSpectrum`] holds the eigenvalues ("frequencies") and the
//! eigenvector matrix ("basis") of one factor graph's Laplacian. Row `v` of
//! the basis is the spectral representation of vertex `v`.
//!
//! The spectrum is produced upstream (any symmetric eigensolver) and is
//! immutable once handed to the kernel. Orthonormality of the basis is a
//! precondition and is not re-verified; only shapes are checked here.

use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

use log::{debug, trace};

use crate::error::{KernelError, Result};

#[derive(Debug, Clone)]
pub struct FactorSpectrum {
    frequencies: Vec<f64>,
    basis: DenseMatrix<f64>,
}

impl FactorSpectrum {
    /// Wrap a `(frequencies, basis)` pair after checking that the basis is
    /// square, non-empty and matches the number of frequencies.
    pub fn new(frequencies: Vec<f64>, basis: DenseMatrix<f64>) -> Result<Self> {
        let (rows, cols) = basis.shape();
        if rows != cols {
            return Err(KernelError::ShapeMismatch(format!(
                "basis must be square, got {}x{}",
                rows, cols
            )));
        }
        if rows == 0 {
            return Err(KernelError::ShapeMismatch(
                "factor graph must have at least one vertex".to_string(),
            ));
        }
        if frequencies.len() != rows {
            return Err(KernelError::ShapeMismatch(format!(
                "{} frequencies for a {}x{} basis",
                frequencies.len(),
                rows,
                cols
            )));
        }
        trace!("Factor spectrum with {} vertices", rows);
        Ok(Self { frequencies, basis })
    }

    /// Build from a row-major basis given as nested vectors.
    pub fn from_rows(frequencies: Vec<f64>, basis: Vec<Vec<f64>>) -> Result<Self> {
        let n = basis.len();
        if basis.iter().any(|row| row.len() != n) {
            return Err(KernelError::ShapeMismatch(format!(
                "basis rows must all have length {}",
                n
            )));
        }
        if n == 0 {
            return Err(KernelError::ShapeMismatch(
                "factor graph must have at least one vertex".to_string(),
            ));
        }
        let basis = DenseMatrix::from_2d_vec(&basis)
            .map_err(|e| KernelError::ShapeMismatch(format!("{}", e)))?;
        Self::new(frequencies, basis)
    }

    /// Identity basis: every vertex is its own eigenvector.
    pub fn with_identity_basis(frequencies: Vec<f64>) -> Result<Self> {
        let n = frequencies.len();
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        debug!("Identity basis for {} vertices", n);
        Self::from_rows(frequencies, rows)
    }

    /// Number of vertices `n_i` of this factor graph.
    #[inline]
    pub fn size(&self) -> usize {
        self.frequencies.len()
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn basis(&self) -> &DenseMatrix<f64> {
        &self.basis
    }

    /// Heat-diffusion transfer function on the spectrum: `exp(-λ_k)`.
    pub fn decay_weights(&self) -> Vec<f64> {
        self.frequencies.iter().map(|&f| (-f).exp()).collect()
    }

    /// Copy basis row `v` into `out`. Caller guarantees `v < size()` and
    /// `out.len() == size()`.
    pub(crate) fn copy_row(&self, v: usize, out: &mut [f64]) {
        for (k, slot) in out.iter_mut().enumerate() {
            *slot = *self.basis.get((v, k));
        }
    }
}
