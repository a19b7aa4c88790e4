use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::Result;
use crate::kernel::DiffusionKernel;
use crate::params::KernelParams;
use crate::spectrum::FactorSpectrum;

// Add logging
use log::{debug, info};

/// Pending factor: either an already validated spectrum or a raw pair that is
/// validated at `build` time so the fluent chain stays infallible.
#[derive(Clone, Debug)]
enum PendingFactor {
    Spectrum(FactorSpectrum),
    Raw(Vec<f64>, DenseMatrix<f64>),
}

#[derive(Clone, Debug, Default)]
pub struct DiffusionKernelBuilder {
    factors: Vec<PendingFactor>,

    // Hyperparameters, both in log space. Defaults give unit amplitude.
    log_amp: f64,
    log_beta: f64,
}

impl DiffusionKernelBuilder {
    pub fn new() -> Self {
        info!("Initializing new DiffusionKernelBuilder");
        Self::default()
    }

    /// Append one factor graph's `(frequencies, basis)` pair.
    pub fn with_factor(mut self, frequencies: Vec<f64>, basis: DenseMatrix<f64>) -> Self {
        debug!("Adding factor {} with {} frequencies", self.factors.len(), frequencies.len());
        self.factors.push(PendingFactor::Raw(frequencies, basis));
        self
    }

    pub fn with_spectrum(mut self, spectrum: FactorSpectrum) -> Self {
        debug!("Adding factor {} with {} vertices", self.factors.len(), spectrum.size());
        self.factors.push(PendingFactor::Spectrum(spectrum));
        self
    }

    pub fn with_spectra<I: IntoIterator<Item = FactorSpectrum>>(self, spectra: I) -> Self {
        spectra.into_iter().fold(self, |b, s| b.with_spectrum(s))
    }

    pub fn with_log_amp(mut self, log_amp: f64) -> Self {
        debug!("Setting log_amp={}", log_amp);
        self.log_amp = log_amp;
        self
    }

    pub fn with_log_beta(mut self, log_beta: f64) -> Self {
        debug!("Setting log_beta={}", log_beta);
        self.log_beta = log_beta;
        self
    }

    pub fn with_params(self, params: KernelParams) -> Self {
        self.with_log_amp(params.log_amp).with_log_beta(params.log_beta)
    }

    /// Validate every factor and assemble the kernel.
    pub fn build(self) -> Result<DiffusionKernel> {
        info!("Building diffusion kernel from {} factors", self.factors.len());
        let spectra = self
            .factors
            .into_iter()
            .map(|f| match f {
                PendingFactor::Spectrum(s) => Ok(s),
                PendingFactor::Raw(freq, basis) => FactorSpectrum::new(freq, basis),
            })
            .collect::<Result<Vec<_>>>()?;

        DiffusionKernel::with_params(spectra, KernelParams::new(self.log_amp, self.log_beta))
    }
}
