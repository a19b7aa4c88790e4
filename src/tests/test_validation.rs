use crate::error::{Checkpoint, Defect, KernelError};
use crate::validation::{ensure_finite, ensure_finite_scalar};

#[test]
fn test_finite_values_pass() {
    let values = vec![0.0, -1.5, 1e300, f64::MIN_POSITIVE];
    assert!(ensure_finite(&values, &values, Checkpoint::FactorGram, 0).is_ok());
}

#[test]
fn test_nan_wins_over_inf() {
    let values = vec![f64::INFINITY, 1.0, f64::NAN];
    let err = ensure_finite(&values, &values, Checkpoint::Subvec1, 4).unwrap_err();
    assert!(matches!(
        err,
        KernelError::NonFinite { defect: Defect::NaN, checkpoint: Checkpoint::Subvec1, factor: 4 }
    ));
}

#[test]
fn test_negative_infinity_is_inf() {
    let values = [1.0, f64::NEG_INFINITY];
    let err = ensure_finite(&values, &values, Checkpoint::Subvec2, 0).unwrap_err();
    assert_eq!(err.non_finite_kind(), Some((Defect::Inf, Checkpoint::Subvec2)));
}

#[test]
fn test_scalar_checkpoint() {
    assert!(ensure_finite_scalar(2.0, Checkpoint::StabilityDivisor, 1).is_ok());
    let err = ensure_finite_scalar(f64::INFINITY, Checkpoint::StabilityDivisor, 1).unwrap_err();
    assert_eq!(err.to_string(), "Inf in 1/mean(freq_transform) (factor 1)");
}

#[test]
fn test_empty_tensor_is_finite() {
    let values: Vec<f64> = Vec::new();
    assert!(ensure_finite(&values, &values, Checkpoint::FullGram, 0).is_ok());
}
