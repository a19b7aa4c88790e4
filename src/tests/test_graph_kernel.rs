use crate::graph_kernel::GraphKernel;
use crate::kernel::DiffusionKernel;
use crate::tests::test_helpers::*;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use smartcore::linalg::basic::arrays::Array;

fn fit_step<K: GraphKernel>(kernel: &mut K, step: f64) {
    let mut theta = kernel.param_to_vec();
    theta[0] += step;
    kernel.vec_to_param(&theta).unwrap();
}

#[test]
fn test_parameter_vector_through_trait() {
    let mut kernel = DiffusionKernel::new(vec![path3(), path2()]).unwrap();
    assert_eq!(GraphKernel::nfactors(&kernel), 2);
    assert_eq!(kernel.n_params(), 2);
    assert_eq!(kernel.param_to_vec(), vec![0.0, 0.0]);

    fit_step(&mut kernel, 0.4);
    assert_abs_diff_eq!(kernel.params().log_amp, 0.4, epsilon = 1e-15);
    assert!(kernel.vec_to_param(&[0.0, 0.0, 0.0]).is_err());
    // failed update leaves parameters untouched
    assert_abs_diff_eq!(kernel.params().log_amp, 0.4, epsilon = 1e-15);
}

#[test]
fn test_init_parameters_through_trait() {
    let mut kernel = DiffusionKernel::new(vec![path2()]).unwrap();
    kernel.vec_to_param(&[3.0, 3.0]).unwrap();
    kernel.init_parameters(1.0).unwrap();
    assert_eq!(kernel.param_to_vec(), vec![0.0, 0.0]);
    assert!(kernel.init_parameters(0.0).is_err());
}

#[test]
fn test_evaluate_through_trait_object() {
    let kernel = DiffusionKernel::new(vec![path3(), complete3()]).unwrap();
    let x = random_batch(&kernel.factor_sizes(), 4, 77);
    let direct = kernel.gram(&x, None).unwrap();

    let dynk: &dyn GraphKernel = &kernel;
    let via_trait = dynk.evaluate(&x, None, false).unwrap();
    assert_eq!(via_trait.shape(), direct.shape());
    for i in 0..4 {
        for j in 0..4 {
            assert_relative_eq!(entry(&via_trait, i, j), entry(&direct, i, j));
        }
    }
}
