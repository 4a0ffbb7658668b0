//! # ma-markov
//!
//! Finite-state Markov chain approximations of autoregressive processes.
//!
//! * [`rouwenhorst()`]: scalar AR(1), exact first two conditional moments.
//! * [`tauchen()`] / [`Tauchen`]: scalar AR(1) on an evenly spaced grid.
//! * [`discrete_var`]: VAR(1) by simulation on a Cartesian grid.
//!
//! Every method returns a [`MarkovChain`] whose transition matrix rows sum
//! to one.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Joint state spaces from per-dimension grids.
pub mod cartesian;

/// The `MarkovChain` container.
pub mod chain;

/// Evenly spaced grids.
pub mod grid;

/// Rouwenhorst's method.
pub mod rouwenhorst;

/// Tauchen's method.
pub mod tauchen;

/// VAR(1) simulation approach.
pub mod var;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use cartesian::{cartesian_product, state_count, StateOrder};
pub use chain::{MarkovChain, StateSpace};
pub use grid::linspace;
pub use rouwenhorst::rouwenhorst;
pub use tauchen::{tauchen, Tauchen};
pub use var::{discrete_var, discrete_var_with_rng, VarChain, VarConfig, VarSimulation};
