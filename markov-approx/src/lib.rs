//! # markov-approx
//!
//! Finite-state Markov chain approximations of autoregressive processes:
//! Rouwenhorst and Tauchen for scalar AR(1), and a simulation approach for
//! VAR(1).
//!
//! This crate is a **façade** that re-exports the public items of the
//! workspace crates. Application code should depend on this crate rather
//! than the individual `ma-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use markov_approx::{rouwenhorst, Tauchen};
//!
//! let mc = rouwenhorst(5, 0.0, 0.1, 0.9).unwrap();
//! assert!(mc.is_stochastic(1e-12));
//!
//! let mc = Tauchen::new(0.9, 0.1).with_states(9).discretize().unwrap();
//! assert_eq!(mc.n(), 9);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use ma_core as core;

/// Matrices, the normal distribution, matrix equations and RNGs.
pub use ma_math as math;

/// Discretization methods and the Markov chain container.
pub use ma_markov as markov;

pub use ma_core::{Error, Real, Result};
pub use ma_markov::{
    cartesian_product, discrete_var, discrete_var_with_rng, linspace, rouwenhorst, tauchen,
    MarkovChain, StateOrder, Tauchen, VarChain, VarConfig, VarSimulation,
};
