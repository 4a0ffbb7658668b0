//! Evenly spaced one-dimensional grids.

use ma_core::{ensure, Real, Result};
use ma_math::Array;

/// `n` evenly spaced points covering `[lower, upper]`, both ends included.
///
/// Point `i` is `lower + i·step` with `step = (upper − lower)/(n − 1)`; the
/// last point is set to `upper` exactly so the bound survives rounding.
/// `lower == upper` gives a degenerate grid of repeated values, which is
/// what a dimension with zero stationary variance discretizes to.
///
/// # Errors
/// [`Precondition`](ma_core::Error::Precondition) if `n < 2`, a bound is
/// not finite, or `upper < lower`.
///
/// # Example
/// ```
/// use ma_markov::grid::linspace;
/// let g = linspace(-1.0, 1.0, 5).unwrap();
/// assert_eq!(g.as_slice(), &[-1.0, -0.5, 0.0, 0.5, 1.0]);
/// ```
pub fn linspace(lower: Real, upper: Real, n: usize) -> Result<Array> {
    ensure!(n >= 2, "a grid needs at least 2 points, got {n}");
    ensure!(
        lower.is_finite() && upper.is_finite(),
        "grid bounds must be finite, got [{lower}, {upper}]"
    );
    ensure!(
        lower <= upper,
        "grid lower bound {lower} exceeds upper bound {upper}"
    );

    let step = (upper - lower) / (n - 1) as Real;
    let mut points: Vec<Real> = (0..n).map(|i| lower + i as Real * step).collect();
    points[n - 1] = upper;
    Ok(Array::from_vec(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn includes_both_bounds() {
        let g = linspace(-3.3, 7.1, 11).unwrap();
        assert_eq!(g.size(), 11);
        assert_eq!(g[0], -3.3);
        assert_eq!(g[10], 7.1);
    }

    #[test]
    fn evenly_spaced_and_increasing() {
        let g = linspace(0.0, 1.0, 8).unwrap();
        let step = 1.0 / 7.0;
        for i in 1..g.size() {
            assert!(g[i] > g[i - 1]);
            assert_relative_eq!(g[i] - g[i - 1], step, epsilon = 1e-12);
        }
    }

    #[test]
    fn two_points_are_the_bounds() {
        let g = linspace(-2.0, 5.0, 2).unwrap();
        assert_eq!(g.as_slice(), &[-2.0, 5.0]);
    }

    #[test]
    fn degenerate_interval() {
        let g = linspace(0.0, 0.0, 4).unwrap();
        assert!(g.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(linspace(0.0, 1.0, 1).is_err());
        assert!(linspace(0.0, 1.0, 0).is_err());
        assert!(linspace(1.0, 0.0, 3).is_err());
        assert!(linspace(Real::NEG_INFINITY, 0.0, 3).is_err());
        assert!(linspace(0.0, Real::NAN, 3).is_err());
    }
}
