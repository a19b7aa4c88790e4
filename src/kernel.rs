//! # Diffusion kernel over a product of factor graphs
//!
//! For a single factor graph with Laplacian `L = U diag(λ) Uᵀ` the diffusion
//! kernel between vertices `u` and `v` is
//!
//! `k(u, v) = Σ_k U[u,k] · exp(-λ_k) · U[v,k]`
//!
//! and for `F` independent factors the joint kernel between composite states
//! `x` and `y` is the product of the per-factor kernels. The evaluation here
//! folds the factors in order into a running Gram matrix, starting from the
//! multiplicative identity.
//!
//! ## Numerical safeguards
//!
//! - Each factor's contribution is divided by `mean(exp(-λ))` before it is
//!   multiplied in, so factors with very different spectral ranges do not
//!   drive the product to over/underflow. This rescaling is kept exactly as
//!   is; GP hyperparameter fits are calibrated against it.
//! - When the second batch is omitted (self-kernel) a jitter of `1e-6` is
//!   added to the diagonal (full mode) or to every entry (diagonal mode).
//! - Every intermediate tensor passes a NaN/Inf checkpoint; the first failure
//!   aborts the evaluation (see [`crate::validation`]).
//!
//! ## Parallelism
//!
//! Row gathers and per-factor products run row-parallel with rayon. The
//! factor fold itself stays sequential so failures are reported for the
//! lowest failing factor index.

use smartcore::linalg::basic::arrays::{Array, Array2};
use smartcore::linalg::basic::matrix::DenseMatrix;

use rayon::prelude::*;

use log::{debug, info, trace};

use crate::error::{Checkpoint, KernelError, Result};
use crate::params::KernelParams;
use crate::spectrum::FactorSpectrum;
use crate::states::StateBatch;
use crate::validation::{ensure_finite, ensure_finite_scalar};

/// Jitter added to self-kernel evaluations.
pub const STABILIZER: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct DiffusionKernel {
    spectra: Vec<FactorSpectrum>,
    params: KernelParams,
}

impl DiffusionKernel {
    /// Kernel over the given factor spectra with zeroed hyperparameters.
    pub fn new(spectra: Vec<FactorSpectrum>) -> Result<Self> {
        Self::with_params(spectra, KernelParams::default())
    }

    pub fn with_params(spectra: Vec<FactorSpectrum>, params: KernelParams) -> Result<Self> {
        if spectra.is_empty() {
            return Err(KernelError::NoFactors);
        }
        info!(
            "Diffusion kernel over {} factor graphs, sizes {:?}",
            spectra.len(),
            spectra.iter().map(FactorSpectrum::size).collect::<Vec<_>>()
        );
        Ok(Self { spectra, params })
    }

    pub fn nfactors(&self) -> usize {
        self.spectra.len()
    }

    /// Number of vertices of each factor graph, in factor order.
    pub fn factor_sizes(&self) -> Vec<usize> {
        self.spectra.iter().map(FactorSpectrum::size).collect()
    }

    pub fn spectra(&self) -> &[FactorSpectrum] {
        &self.spectra
    }

    pub fn params(&self) -> &KernelParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut KernelParams {
        &mut self.params
    }

    pub fn set_params(&mut self, params: KernelParams) {
        debug!(
            "Kernel params: log_amp={}, log_beta={}",
            params.log_amp, params.log_beta
        );
        self.params = params;
    }

    /// Full Gram matrix `N1 × N2`; `x2 = None` evaluates the self-kernel of
    /// `x1` with jitter on the diagonal.
    pub fn gram(&self, x1: &StateBatch, x2: Option<&StateBatch>) -> Result<DenseMatrix<f64>> {
        self.evaluate(x1, x2, false)
    }

    /// Diagonal of the self-kernel of `x1` as an `N1 × 1` matrix.
    pub fn diag(&self, x1: &StateBatch) -> Result<DenseMatrix<f64>> {
        self.evaluate(x1, None, true)
    }

    /// Evaluate the kernel between two batches of composite states.
    ///
    /// # Arguments
    /// - `x1`: `N1 × F` batch.
    /// - `x2`: optional `N2 × F` batch; `None` means `x1` against itself and
    ///   enables the jitter.
    /// - `diagonal`: return only `k(x1[n], x1[n])` as an `N1 × 1` matrix.
    ///   Requires `x2 == None`.
    ///
    /// # Errors
    /// - [`KernelError::InvalidArgument`] for `diagonal` with an explicit `x2`.
    /// - [`KernelError::ShapeMismatch`] / [`KernelError::IndexOutOfRange`]
    ///   when a batch does not fit the factor graphs.
    /// - [`KernelError::NonFinite`] at the first checkpoint that sees a NaN or
    ///   an infinite value.
    pub fn evaluate(
        &self,
        x1: &StateBatch,
        x2: Option<&StateBatch>,
        diagonal: bool,
    ) -> Result<DenseMatrix<f64>> {
        if diagonal && x2.is_some() {
            return Err(KernelError::InvalidArgument(
                "diagonal evaluation is only defined for x1 against itself".to_string(),
            ));
        }

        let self_kernel = x2.is_none();
        let x2 = x2.unwrap_or(x1);
        self.check_width(x1, "x1")?;
        self.check_width(x2, "x2")?;

        let n1 = x1.nrows();
        let ncols = if diagonal { 1 } else { x2.nrows() };
        info!(
            "Evaluating diffusion kernel: {}x{} ({} mode, self_kernel={})",
            n1,
            ncols,
            if diagonal { "diagonal" } else { "full" },
            self_kernel
        );

        let full_gram = self.spectra.iter().enumerate().try_fold(
            vec![1.0_f64; n1 * ncols],
            |mut full_gram, (i, spectrum)| {
                self.fold_factor(i, spectrum, x1, x2, diagonal, &mut full_gram)?;
                Ok::<_, KernelError>(full_gram)
            },
        )?;

        let amp = self.params.amplitude();
        let out: Vec<f64> = full_gram
            .into_iter()
            .enumerate()
            .map(|(idx, g)| {
                let (r, c) = (idx / ncols, idx % ncols);
                let stabilizer = match (self_kernel, diagonal) {
                    (true, true) => STABILIZER,
                    (true, false) if r == c => STABILIZER,
                    _ => 0.0,
                };
                amp * (g + stabilizer)
            })
            .collect();

        trace!("Gram matrix ready ({}x{}), amplitude {}", n1, ncols, amp);
        Ok(DenseMatrix::from_iterator(out.into_iter(), n1, ncols, 0))
    }

    /// Multiply factor `i`'s normalised contribution into `full_gram`.
    fn fold_factor(
        &self,
        i: usize,
        spectrum: &FactorSpectrum,
        x1: &StateBatch,
        x2: &StateBatch,
        diagonal: bool,
        full_gram: &mut [f64],
    ) -> Result<()> {
        let frequencies = spectrum.frequencies();
        ensure_finite(frequencies, &frequencies, Checkpoint::Frequencies, i)?;
        ensure_finite(spectrum.basis().iterator(0), spectrum.basis(), Checkpoint::Basis, i)?;

        let subvec1 = gather_rows(spectrum, x1, i)?;
        let subvec2 = gather_rows(spectrum, x2, i)?;
        let freq_transform = spectrum.decay_weights();

        ensure_finite(&subvec1, &subvec1, Checkpoint::Subvec1, i)?;
        ensure_finite(&subvec2, &subvec2, Checkpoint::Subvec2, i)?;
        ensure_finite(&freq_transform, &freq_transform, Checkpoint::FreqTransform, i)?;
        ensure_finite_scalar(self.params.amplitude(), Checkpoint::Amplitude, i)?;

        let n = spectrum.size();
        let factor_gram = if diagonal {
            diagonal_product(&subvec1, &subvec2, &freq_transform, n)
        } else {
            weighted_product(&subvec1, &subvec2, &freq_transform, n, x2.nrows())
        };

        let mean = freq_transform.iter().sum::<f64>() / n as f64;
        // numerical rescaling, not part of the kernel definition
        full_gram
            .par_iter_mut()
            .zip(factor_gram.par_iter())
            .for_each(|(acc, &g)| *acc *= g / mean);

        debug!("Factor {}: n={}, mean(exp(-λ))={:.6e}", i, n, mean);

        ensure_finite(&factor_gram, &factor_gram, Checkpoint::FactorGram, i)?;
        ensure_finite_scalar(1.0 / mean, Checkpoint::StabilityDivisor, i)?;
        ensure_finite(&*full_gram, &full_gram, Checkpoint::FullGram, i)?;
        Ok(())
    }

    fn check_width(&self, batch: &StateBatch, name: &str) -> Result<()> {
        if batch.nfactors() != self.nfactors() {
            return Err(KernelError::ShapeMismatch(format!(
                "{} has {} columns but the kernel has {} factors",
                name,
                batch.nfactors(),
                self.nfactors()
            )));
        }
        Ok(())
    }
}

/// Rows of factor `i`'s basis selected by column `i` of `batch`, row-major
/// `N × n_i`.
fn gather_rows(spectrum: &FactorSpectrum, batch: &StateBatch, factor: usize) -> Result<Vec<f64>> {
    let n = spectrum.size();
    let vertices: Vec<usize> = batch.column(factor).collect();
    if let Some((row, &index)) = vertices.iter().enumerate().find(|(_, v)| **v >= n) {
        return Err(KernelError::IndexOutOfRange { factor, row, index, size: n });
    }

    let mut out = vec![0.0; vertices.len() * n];
    out.par_chunks_mut(n)
        .zip(vertices.par_iter())
        .for_each(|(slot, &v)| spectrum.copy_row(v, slot));
    Ok(out)
}

/// `(subvec1 ⊙ w) · subvec2ᵀ`, row-major `N1 × N2`.
fn weighted_product(subvec1: &[f64], subvec2: &[f64], w: &[f64], n: usize, n2: usize) -> Vec<f64> {
    let n1 = subvec1.len() / n;
    let mut out = vec![0.0; n1 * n2];
    if out.is_empty() {
        return out;
    }
    out.par_chunks_mut(n2).enumerate().for_each(|(r, out_row)| {
        let weighted: Vec<f64> = subvec1[r * n..(r + 1) * n]
            .iter()
            .zip(w)
            .map(|(a, w)| a * w)
            .collect();
        for (c, slot) in out_row.iter_mut().enumerate() {
            let b = &subvec2[c * n..(c + 1) * n];
            *slot = weighted.iter().zip(b).map(|(a, b)| a * b).sum();
        }
    });
    out
}

/// Row-wise `Σ_k subvec1[r,k] · w[k] · subvec2[r,k]`, length `N1`.
fn diagonal_product(subvec1: &[f64], subvec2: &[f64], w: &[f64], n: usize) -> Vec<f64> {
    let n1 = subvec1.len() / n;
    (0..n1)
        .into_par_iter()
        .map(|r| {
            let a = &subvec1[r * n..(r + 1) * n];
            let b = &subvec2[r * n..(r + 1) * n];
            a.iter()
                .zip(w)
                .zip(b)
                .map(|((a, w), b)| a * w * b)
                .sum()
        })
        .collect()
}
