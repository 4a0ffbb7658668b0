//! VAR(1) discretization by simulation.
//!
//! For `x_t = A·x_{t-1} + u_t` with `u_t ~ N(0, Ω)`:
//!
//! 1. the stationary covariance `Σ = AΣAᵀ + Ω` sets one grid per dimension,
//!    `std_devs` stationary standard deviations wide;
//! 2. the grids are combined into a joint state space;
//! 3. a long simulated path is quantized to the nearest state and the
//!    transitions between consecutive states are counted;
//! 4. states never entered are dropped and the counts row-normalized.

pub mod config;
pub mod counts;
pub mod simulation;

pub use config::VarConfig;
pub use counts::TransitionCounts;
pub use simulation::VarSimulation;

use crate::chain::MarkovChain;
use ma_core::Result;
use ma_math::{InverseCumulativeNormalRng, Matrix, NormalRng};

/// A discretized VAR(1) process.
#[derive(Debug, Clone, PartialEq)]
pub struct VarChain {
    pub(crate) chain: MarkovChain<Matrix>,
    pub(crate) trace: Option<Matrix>,
    pub(crate) retained: Vec<usize>,
}

impl VarChain {
    /// Transition matrix and retained states (one per row).
    pub fn chain(&self) -> &MarkovChain<Matrix> {
        &self.chain
    }

    /// Transition matrix over the retained states.
    pub fn p(&self) -> &Matrix {
        self.chain.p()
    }

    /// Retained states, one per row.
    pub fn states(&self) -> &Matrix {
        self.chain.state_values()
    }

    /// The counted continuous draws, one per row, when requested with
    /// [`VarConfig::return_sim`].
    pub fn trace(&self) -> Option<&Matrix> {
        self.trace.as_ref()
    }

    /// Indices of the retained states in the unpruned state space.
    pub fn retained(&self) -> &[usize] {
        &self.retained
    }

    /// Split into chain, trace and retained indices.
    pub fn into_parts(self) -> (MarkovChain<Matrix>, Option<Matrix>, Vec<usize>) {
        (self.chain, self.trace, self.retained)
    }
}

/// Discretize a VAR(1) process with the Mersenne Twister inverse-CDF
/// generator seeded from `config.seed`.
///
/// # Example
/// ```
/// use ma_markov::{discrete_var, VarConfig};
/// use ma_math::Matrix;
///
/// let a = Matrix::from_row_slice(2, 2, &[0.6, 0.1, 0.0, 0.4]);
/// let omega = Matrix::from_row_slice(2, 2, &[1.0, 0.3, 0.3, 1.0]);
/// let cfg = VarConfig::default()
///     .with_grid_sizes(vec![3, 3])
///     .with_sim_length(5_000)
///     .with_burn_in(500);
/// let var = discrete_var(&a, &omega, &cfg).unwrap();
/// assert!(var.chain().is_stochastic(1e-12));
/// assert_eq!(var.states().cols(), 2);
/// ```
///
/// # Errors
/// See [`VarSimulation::new`] and [`VarSimulation::finish`].
pub fn discrete_var(a: &Matrix, omega: &Matrix, config: &VarConfig) -> Result<VarChain> {
    discrete_var_with_rng(a, omega, config, InverseCumulativeNormalRng::new(config.seed))
}

/// Discretize a VAR(1) process drawing innovations from `rng`.
///
/// `config.seed` is ignored; the generator is used as given.
pub fn discrete_var_with_rng<R: NormalRng>(
    a: &Matrix,
    omega: &Matrix,
    config: &VarConfig,
    rng: R,
) -> Result<VarChain> {
    let mut sim = VarSimulation::new(a, omega, config, rng)?;
    sim.run();
    sim.finish()
}
