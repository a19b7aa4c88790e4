//! Finite-value checkpoints for the factor loop.
//!
//! Every tensor that flows through the kernel is checked here before it is
//! allowed to reach the accumulator. NaN is checked before Inf so a tensor
//! carrying both reports NaN. On failure the offending values are dumped
//! with `log::error!` and a tagged [`KernelError::NonFinite`] is returned.

use std::fmt::Debug;

use log::error;

use crate::error::{Checkpoint, Defect, KernelError, Result};

/// Fails if any value is NaN, otherwise if any value is infinite.
///
/// `dump` is only rendered on failure; pass the tensor being checked
/// (slice, matrix, scalar) so the diagnostic shows the actual data.
pub fn ensure_finite<'a, I, D>(
    values: I,
    dump: &D,
    checkpoint: Checkpoint,
    factor: usize,
) -> Result<()>
where
    I: IntoIterator<Item = &'a f64>,
    D: Debug + ?Sized,
{
    let mut saw_inf = false;
    for v in values {
        if v.is_nan() {
            return Err(report(Defect::NaN, checkpoint, factor, dump));
        }
        saw_inf |= v.is_infinite();
    }
    if saw_inf {
        return Err(report(Defect::Inf, checkpoint, factor, dump));
    }
    Ok(())
}

/// Scalar shorthand for [`ensure_finite`].
#[inline]
pub fn ensure_finite_scalar(value: f64, checkpoint: Checkpoint, factor: usize) -> Result<()> {
    ensure_finite(std::iter::once(&value), &value, checkpoint, factor)
}

fn report<D: Debug + ?Sized>(
    defect: Defect,
    checkpoint: Checkpoint,
    factor: usize,
    dump: &D,
) -> KernelError {
    error!(
        "{} in {} at factor {}: {:?}",
        defect, checkpoint, factor, dump
    );
    KernelError::NonFinite { defect, checkpoint, factor }
}
