//! Tauchen discretization of a Gaussian AR(1) process.
//!
//! ```text
//! y_{t+1} = b + ρ·y_t + u_{t+1},   u ~ N(0, σ_u²)
//! ```
//!
//! The demeaned process is placed on an evenly spaced grid spanning `±m`
//! stationary standard deviations. Each grid point is the midpoint of a cell
//! of width `2h`; the transition probability to a cell is the Gaussian mass
//! of the innovation over that cell, with the two outer cells extended to
//! infinity.

use crate::chain::MarkovChain;
use crate::grid::linspace;
use ma_core::{ensure_domain, Real, Result};
use ma_math::{normal_cdf, Matrix};
use nalgebra::DMatrix;

/// Parameters of a Tauchen discretization.
///
/// # Example
/// ```
/// use ma_markov::Tauchen;
/// let mc = Tauchen::new(0.9, 0.1)
///     .with_intercept(0.05)
///     .with_states(11)
///     .discretize()
///     .unwrap();
/// assert_eq!(mc.n(), 11);
/// assert!(mc.is_stochastic(1e-10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tauchen {
    rho: Real,
    sigma_u: Real,
    intercept: Real,
    std_devs: Real,
    n: usize,
}

impl Tauchen {
    /// Default half-width of the grid in stationary standard deviations.
    pub const DEFAULT_STD_DEVS: Real = 3.0;

    /// Default number of states.
    pub const DEFAULT_STATES: usize = 7;

    /// Process with autocorrelation `rho`, innovation standard deviation
    /// `sigma_u`, zero intercept and the default grid.
    pub fn new(rho: Real, sigma_u: Real) -> Self {
        Self {
            rho,
            sigma_u,
            intercept: 0.0,
            std_devs: Self::DEFAULT_STD_DEVS,
            n: Self::DEFAULT_STATES,
        }
    }

    /// Set the constant term `b`.
    pub fn with_intercept(mut self, b: Real) -> Self {
        self.intercept = b;
        self
    }

    /// Set the grid half-width `m` in stationary standard deviations.
    pub fn with_std_devs(mut self, m: Real) -> Self {
        self.std_devs = m;
        self
    }

    /// Set the number of states.
    pub fn with_states(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Build the chain.
    ///
    /// # Errors
    /// [`Domain`](ma_core::Error::Domain) naming the parameter if
    /// `|rho| ≥ 1`, `n < 2`, `sigma_u ≤ 0` or `m ≤ 0`.
    pub fn discretize(&self) -> Result<MarkovChain> {
        let Self {
            rho,
            sigma_u,
            intercept,
            std_devs,
            n,
        } = *self;
        ensure_domain!(
            rho.abs() < 1.0,
            "rho",
            "|rho| must be < 1 for a stationary process, got {rho}"
        );
        ensure_domain!(n >= 2, "n", "the number of states must be at least 2, got {n}");
        ensure_domain!(
            sigma_u.is_finite() && sigma_u > 0.0,
            "sigma_u",
            "innovation standard deviation must be finite and positive, got {sigma_u}"
        );
        ensure_domain!(
            std_devs.is_finite() && std_devs > 0.0,
            "m",
            "grid half-width must be finite and positive, got {std_devs}"
        );
        ensure_domain!(
            intercept.is_finite(),
            "b",
            "intercept must be finite, got {intercept}"
        );

        let std_y = (sigma_u * sigma_u / (1.0 - rho * rho)).sqrt();
        let x_max = std_devs * std_y;
        let x_min = -x_max;
        let x = linspace(x_min, x_max, n)?;
        let step = (x_max - x_min) / (n - 1) as Real;
        let half_step = 0.5 * step;

        let mut p = DMatrix::zeros(n, n);
        fill_transition(x.as_slice(), &mut p, rho, sigma_u, half_step);

        let mean = intercept / (1.0 - rho);
        MarkovChain::new(Matrix::from(p), x.shift(mean))
    }
}

/// Discretize `y_{t+1} = b + rho·y_t + u_{t+1}` with Tauchen's method.
///
/// `m` is the grid half-width in stationary standard deviations and `n` the
/// number of states; [`Tauchen`] offers the same with defaults `b = 0`,
/// `m = 3`, `n = 7`.
pub fn tauchen(rho: Real, sigma_u: Real, b: Real, m: Real, n: usize) -> Result<MarkovChain> {
    Tauchen::new(rho, sigma_u)
        .with_intercept(b)
        .with_std_devs(m)
        .with_states(n)
        .discretize()
}

/// Dense `O(n²)` fill of the Tauchen transition matrix, in place.
///
/// `x` is the demeaned grid; `p` must be `n × n`. Entries are written
/// column by column to follow nalgebra's storage order.
fn fill_transition(x: &[Real], p: &mut DMatrix<Real>, rho: Real, sigma: Real, half_step: Real) {
    let n = x.len();
    let (first, last) = (x[0], x[n - 1]);
    for (i, &xi) in x.iter().enumerate() {
        p[(i, 0)] = normal_cdf((first - rho * xi + half_step) / sigma);
    }
    for (j, &xj) in x.iter().enumerate().take(n - 1).skip(1) {
        for (i, &xi) in x.iter().enumerate() {
            let z = xj - rho * xi;
            p[(i, j)] = normal_cdf((z + half_step) / sigma) - normal_cdf((z - half_step) / sigma);
        }
    }
    for (i, &xi) in x.iter().enumerate() {
        p[(i, n - 1)] = 1.0 - normal_cdf((last - rho * xi - half_step) / sigma);
    }
}
