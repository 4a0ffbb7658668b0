//! Markov chain container produced by every discretization method.
//!
//! The container only pairs a transition matrix with the state values it
//! indexes; chain analysis (stationary distributions, forward simulation)
//! is not part of this crate.

use ma_core::{ensure, Real, Result};
use ma_math::{Array, Matrix};

/// A set of discrete states, one per row of a transition matrix.
pub trait StateSpace {
    /// Number of states.
    fn n_states(&self) -> usize;
}

impl StateSpace for Array {
    fn n_states(&self) -> usize {
        self.size()
    }
}

/// Multivariate state space: one state per row, one column per dimension.
impl StateSpace for Matrix {
    fn n_states(&self) -> usize {
        self.rows()
    }
}

/// A finite-state Markov chain: transition matrix `P` and state values.
///
/// `P[(i, j)]` is the probability of moving from state `i` to state `j`.
/// Scalar processes use an [`Array`] of state values, VAR processes a
/// [`Matrix`] with one state per row.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkovChain<S = Array> {
    p: Matrix,
    state_values: S,
}

impl<S: StateSpace> MarkovChain<S> {
    /// Pair a transition matrix with its state values.
    ///
    /// # Errors
    /// [`Precondition`](ma_core::Error::Precondition) if `p` is not square,
    /// holds non-finite entries, or its size differs from the number of
    /// states.
    pub fn new(p: Matrix, state_values: S) -> Result<Self> {
        ensure!(
            p.is_square(),
            "transition matrix must be square, got {}×{}",
            p.rows(),
            p.cols()
        );
        ensure!(
            state_values.n_states() == p.rows(),
            "transition matrix has {} rows but there are {} states",
            p.rows(),
            state_values.n_states()
        );
        ensure!(
            p.inner().iter().all(|v| v.is_finite()),
            "transition matrix contains non-finite entries"
        );
        Ok(Self { p, state_values })
    }

    /// The transition matrix.
    pub fn p(&self) -> &Matrix {
        &self.p
    }

    /// The state values.
    pub fn state_values(&self) -> &S {
        &self.state_values
    }

    /// Number of states.
    pub fn n(&self) -> usize {
        self.p.rows()
    }

    /// `true` if every entry lies in `[0, 1]` and every row sums to one,
    /// both within `tol`.
    pub fn is_stochastic(&self, tol: Real) -> bool {
        let entries_ok = self
            .p
            .inner()
            .iter()
            .all(|&v| v >= -tol && v <= 1.0 + tol);
        entries_ok && self.p.row_sums().iter().all(|s| (s - 1.0).abs() <= tol)
    }

    /// Consume the chain, returning `(P, state_values)`.
    pub fn into_parts(self) -> (Matrix, S) {
        (self.p, self.state_values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_shapes() {
        let p = Matrix::from_row_slice(2, 2, &[0.9, 0.1, 0.2, 0.8]);
        let mc = MarkovChain::new(p.clone(), Array::from_slice(&[-1.0, 1.0])).unwrap();
        assert_eq!(mc.n(), 2);
        assert!(mc.is_stochastic(1e-12));
        let (p2, s) = mc.into_parts();
        assert_eq!(p2, p);
        assert_eq!(s.as_slice(), &[-1.0, 1.0]);
    }

    #[test]
    fn multivariate_states_are_rows() {
        let p = Matrix::identity(3);
        let s = Matrix::from_row_slice(3, 2, &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
        let mc = MarkovChain::new(p, s).unwrap();
        assert_eq!(mc.state_values().cols(), 2);
        assert_eq!(mc.n(), 3);
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(MarkovChain::new(Matrix::zeros(2, 3), Array::zeros(2)).is_err());
        assert!(MarkovChain::new(Matrix::identity(3), Array::zeros(2)).is_err());
        let mut p = Matrix::identity(2);
        p[(0, 1)] = Real::NAN;
        assert!(MarkovChain::new(p, Array::zeros(2)).is_err());
    }

    #[test]
    fn detects_non_stochastic_rows() {
        let p = Matrix::from_row_slice(2, 2, &[0.5, 0.4, 0.0, 1.0]);
        let mc = MarkovChain::new(p, Array::zeros(2)).unwrap();
        assert!(!mc.is_stochastic(1e-10));
        assert!(mc.is_stochastic(0.2));
    }
}
