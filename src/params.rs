//! Kernel hyperparameters.
//!
//! Both values live in log space. `log_amp` scales the whole Gram matrix by
//! `exp(log_amp)`; `log_beta` is carried for the optimiser's parameter
//! vector and is not read by the diffusion transform itself.

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};

/// Length of the flat parameter vector `[log_amp, log_beta]`.
pub const N_PARAMS: usize = 2;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct KernelParams {
    pub log_amp: f64,
    pub log_beta: f64,
}

impl KernelParams {
    pub fn new(log_amp: f64, log_beta: f64) -> Self {
        Self { log_amp, log_beta }
    }

    pub fn set_log_amp(&mut self, log_amp: f64) {
        self.log_amp = log_amp;
    }

    pub fn set_log_beta(&mut self, log_beta: f64) {
        self.log_beta = log_beta;
    }

    /// `exp(log_amp)`
    #[inline]
    pub fn amplitude(&self) -> f64 {
        self.log_amp.exp()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.log_amp, self.log_beta]
    }

    /// Inverse of [`KernelParams::to_vec`].
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [log_amp, log_beta] => Ok(Self::new(*log_amp, *log_beta)),
            _ => Err(KernelError::InvalidArgument(format!(
                "expected {} kernel parameters, got {}",
                N_PARAMS,
                values.len()
            ))),
        }
    }

    /// Reset to output scale `amp` and unit beta.
    pub fn init_parameters(&mut self, amp: f64) -> Result<()> {
        if !(amp.is_finite() && amp > 0.0) {
            return Err(KernelError::InvalidArgument(format!(
                "amplitude must be finite and positive, got {}",
                amp
            )));
        }
        self.log_amp = amp.ln();
        self.log_beta = 0.0;
        Ok(())
    }
}
