//! # ma-math
//!
//! Mathematical utilities for markov-approx: array/matrix newtypes over
//! nalgebra, the standard normal distribution (erfc-based, via statrs),
//! matrix equation solvers and seedable normal random number generators.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// One-dimensional `Array` newtype.
pub mod array;

/// Probability distributions.
pub mod distributions;

/// Two-dimensional `Matrix` newtype.
pub mod matrix;

/// Spectral radius, PSD square root and the discrete Lyapunov solver.
pub mod matrix_utilities;

/// Random number generators.
pub mod random_numbers;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use array::Array;
pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use matrix::Matrix;
pub use matrix_utilities::{solve_discrete_lyapunov, spectral_radius, sqrtm_psd};
pub use random_numbers::{InverseCumulativeNormalRng, NormalRng, StdNormalRng};
