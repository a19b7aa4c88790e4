//! Error types for kernel construction and evaluation.

use std::fmt;

/// Which kind of non-finite value tripped a checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Defect {
    NaN,
    Inf,
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Defect::NaN => write!(f, "NaN"),
            Defect::Inf => write!(f, "Inf"),
        }
    }
}

/// Validation points inside the factor loop, in the order they are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Checkpoint {
    Frequencies,
    Basis,
    Subvec1,
    Subvec2,
    FreqTransform,
    Amplitude,
    FactorGram,
    StabilityDivisor,
    FullGram,
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Checkpoint::Frequencies => "frequencies",
            Checkpoint::Basis => "basis",
            Checkpoint::Subvec1 => "subvec1",
            Checkpoint::Subvec2 => "subvec2",
            Checkpoint::FreqTransform => "freq_transform",
            Checkpoint::Amplitude => "exp(log_amp)",
            Checkpoint::FactorGram => "factor_gram",
            Checkpoint::StabilityDivisor => "1/mean(freq_transform)",
            Checkpoint::FullGram => "full_gram",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{defect} in {checkpoint} (factor {factor})")]
    NonFinite {
        defect: Defect,
        checkpoint: Checkpoint,
        factor: usize,
    },

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("vertex index {index} out of range for factor {factor} of size {size} (row {row})")]
    IndexOutOfRange {
        factor: usize,
        row: usize,
        index: usize,
        size: usize,
    },

    #[error("a diffusion kernel needs at least one factor graph")]
    NoFactors,
}

impl KernelError {
    /// `(defect, checkpoint)` for non-finite failures, `None` otherwise.
    pub fn non_finite_kind(&self) -> Option<(Defect, Checkpoint)> {
        match self {
            KernelError::NonFinite { defect, checkpoint, .. } => Some((*defect, *checkpoint)),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, KernelError>;
