//! The covariance-function seam consumed by GP regression code.
//!
//! A GP module only needs to evaluate Gram matrices and to move the
//! hyperparameters in and out of a flat vector for its optimiser; it does
//! not care how the kernel combines its factor graphs.

use smartcore::linalg::basic::matrix::DenseMatrix;

use log::debug;

use crate::error::Result;
use crate::kernel::DiffusionKernel;
use crate::params::{KernelParams, N_PARAMS};
use crate::states::StateBatch;

pub trait GraphKernel {
    /// Number of factor graphs the kernel is defined over.
    fn nfactors(&self) -> usize;

    /// Length of the flat hyperparameter vector.
    fn n_params(&self) -> usize;

    fn param_to_vec(&self) -> Vec<f64>;

    /// Overwrite the hyperparameters from a flat vector of length
    /// [`GraphKernel::n_params`].
    fn vec_to_param(&mut self, values: &[f64]) -> Result<()>;

    /// Reset hyperparameters to output scale `amp`.
    fn init_parameters(&mut self, amp: f64) -> Result<()>;

    /// See [`DiffusionKernel::evaluate`].
    fn evaluate(
        &self,
        x1: &StateBatch,
        x2: Option<&StateBatch>,
        diagonal: bool,
    ) -> Result<DenseMatrix<f64>>;
}

impl GraphKernel for DiffusionKernel {
    fn nfactors(&self) -> usize {
        DiffusionKernel::nfactors(self)
    }

    fn n_params(&self) -> usize {
        N_PARAMS
    }

    fn param_to_vec(&self) -> Vec<f64> {
        self.params().to_vec()
    }

    fn vec_to_param(&mut self, values: &[f64]) -> Result<()> {
        let params = KernelParams::from_slice(values)?;
        self.set_params(params);
        Ok(())
    }

    fn init_parameters(&mut self, amp: f64) -> Result<()> {
        self.params_mut().init_parameters(amp)?;
        debug!("Initialised kernel parameters with amplitude {}", amp);
        Ok(())
    }

    fn evaluate(
        &self,
        x1: &StateBatch,
        x2: Option<&StateBatch>,
        diagonal: bool,
    ) -> Result<DenseMatrix<f64>> {
        DiffusionKernel::evaluate(self, x1, x2, diagonal)
    }
}
