//! Rouwenhorst discretization of a Gaussian AR(1) process.
//!
//! ```text
//! y_t = ȳ + ρ·y_{t−1} + ε_t,   ε_t ~ N(0, σ²)
//! ```
//!
//! The transition matrix is grown from the two-state matrix
//!
//! ```text
//! θ₂ = | p    1−p |
//!      | 1−q  q   |
//! ```
//!
//! by repeatedly embedding four weighted copies of `θ_{k−1}` into a `k × k`
//! matrix and halving the interior rows. With `p = q = (1 + ρ)/2` and the
//! states spread over `±σ_y·√(n−1)`, the chain reproduces the unconditional
//! variance and first-order autocorrelation of the process exactly.

use crate::chain::MarkovChain;
use crate::grid::linspace;
use ma_core::{ensure_domain, Real, Result};
use ma_math::Matrix;

/// Discretize `y_t = ybar + rho·y_{t−1} + ε_t` into an `n`-state chain.
///
/// States are evenly spaced over `[−ψ, ψ]`, `ψ = σ_y·√(n−1)`,
/// `σ_y = σ/√(1−ρ²)`, then shifted by the long-run mean `ybar/(1−ρ)`.
///
/// # Errors
/// [`Domain`](ma_core::Error::Domain) if `n < 2`, `|rho| ≥ 1` or `sigma` is
/// negative or not finite.
///
/// # Example
/// ```
/// use ma_markov::rouwenhorst;
/// let mc = rouwenhorst(2, 0.0, 1.0, 0.0).unwrap();
/// assert_eq!(mc.state_values().as_slice(), &[-1.0, 1.0]);
/// assert_eq!(mc.p()[(0, 0)], 0.5);
/// ```
pub fn rouwenhorst(n: usize, ybar: Real, sigma: Real, rho: Real) -> Result<MarkovChain> {
    ensure_domain!(n >= 2, "n", "the number of states must be at least 2, got {n}");
    ensure_domain!(
        rho.abs() < 1.0,
        "rho",
        "|rho| must be < 1 for a stationary process, got {rho}"
    );
    ensure_domain!(
        sigma.is_finite() && sigma >= 0.0,
        "sigma",
        "innovation standard deviation must be finite and non-negative, got {sigma}"
    );
    ensure_domain!(ybar.is_finite(), "ybar", "intercept must be finite, got {ybar}");

    let y_sd = (sigma * sigma / (1.0 - rho * rho)).sqrt();
    let p = (1.0 + rho) / 2.0;
    let q = p;
    let psi = y_sd * ((n - 1) as Real).sqrt();

    let states = linspace(-psi, psi, n)?.shift(ybar / (1.0 - rho));
    let theta = transition_matrix(n, p, q);
    MarkovChain::new(theta, states)
}

/// Build `θ_n` bottom-up from `θ₂`.
fn transition_matrix(n: usize, p: Real, q: Real) -> Matrix {
    // row-major k × k storage
    let mut theta = vec![p, 1.0 - p, 1.0 - q, q];
    for k in 3..=n {
        let prev = k - 1;
        let mut next = vec![0.0; k * k];
        // top-left, top-right, bottom-left, bottom-right, summed in this order
        let blocks = [(0, 0, p), (0, 1, 1.0 - p), (1, 0, 1.0 - q), (1, 1, q)];
        for (row_off, col_off, weight) in blocks {
            for i in 0..prev {
                let src = &theta[i * prev..(i + 1) * prev];
                let dst = &mut next[(i + row_off) * k + col_off..(i + row_off) * k + col_off + prev];
                for (d, &s) in dst.iter_mut().zip(src) {
                    *d += weight * s;
                }
            }
        }
        // interior rows received two overlapping contributions
        for v in &mut next[k..(k - 1) * k] {
            *v /= 2.0;
        }
        theta = next;
    }
    Matrix::from_row_slice(n, n, &theta)
}
