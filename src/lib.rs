//! # graphdiffusion
//!
//! Diffusion kernels over products of graph Laplacian spectra, for Gaussian
//! process surrogates on combinatorial search spaces.
//!
//! Each independent factor graph contributes its Laplacian eigen-system
//! (frequencies and basis); a composite state picks one vertex per factor.
//! The kernel between two states is the product over factors of the heat
//! diffusion kernel `Σ_k U[u,k] exp(-λ_k) U[v,k]`.
//!
//! ```
//! use graphdiffusion::builder::DiffusionKernelBuilder;
//! use graphdiffusion::spectrum::FactorSpectrum;
//! use graphdiffusion::states::StateBatch;
//! use smartcore::linalg::basic::arrays::Array;
//!
//! let kernel = DiffusionKernelBuilder::new()
//!     .with_spectrum(FactorSpectrum::with_identity_basis(vec![0.0, 1.0, 2.0]).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let x = StateBatch::from_rows(vec![vec![0], vec![1], vec![2]]).unwrap();
//! let gram = kernel.gram(&x, None).unwrap();
//! assert_eq!(gram.shape(), (3, 3));
//!
//! // identity basis: K[0,0] = exp(-0) / mean(exp(-λ)) + jitter
//! let mean = (1.0 + (-1.0_f64).exp() + (-2.0_f64).exp()) / 3.0;
//! assert!((*gram.get((0, 0)) - (1.0 / mean + 1e-6)).abs() < 1e-12);
//! assert_eq!(*gram.get((0, 1)), 0.0);
//! ```

pub mod builder;
pub mod error;
pub mod graph_kernel;
pub mod kernel;
pub mod params;
pub mod spectrum;
pub mod states;
pub mod validation;

#[cfg(test)]
mod tests;
