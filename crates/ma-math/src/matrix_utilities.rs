//! Matrix decompositions and equation solvers used by the VAR discretizer.
//!
//! Wraps nalgebra's eigen decompositions into the three operations the
//! simulation approach needs: a stationarity test (spectral radius), the
//! stationary covariance (discrete Lyapunov equation) and the innovation
//! colouring matrix (PSD square root).

use crate::array::Array;
use crate::matrix::Matrix;
use nalgebra::DMatrix;
use ma_core::{degenerate, ensure, ensure_domain, Real, Result};

/// Iteration cap of [`solve_discrete_lyapunov`].
pub const LYAPUNOV_MAX_ITERATIONS: usize = 50;

/// Convergence tolerance of [`solve_discrete_lyapunov`] on the largest
/// absolute change between iterates.
pub const LYAPUNOV_TOLERANCE: Real = 1e-15;

/// Eigenvalue decomposition of a symmetric real matrix.
///
/// Returns `(eigenvalues, eigenvectors)`; column `k` of the eigenvector
/// matrix belongs to eigenvalue `k`. Only the lower triangle is read.
pub fn symmetric_eigen(m: &Matrix) -> Result<(Array, Matrix)> {
    ensure!(
        m.is_square(),
        "matrix must be square, got {}×{}",
        m.rows(),
        m.cols()
    );
    let eigen = m.inner().clone().symmetric_eigen();
    Ok((
        Array::from(eigen.eigenvalues),
        Matrix::from(eigen.eigenvectors),
    ))
}

/// Largest eigenvalue modulus of a square matrix.
pub fn spectral_radius(m: &Matrix) -> Result<Real> {
    ensure!(
        m.is_square(),
        "matrix must be square, got {}×{}",
        m.rows(),
        m.cols()
    );
    if m.rows() == 0 {
        return Ok(0.0);
    }
    let radius = m
        .inner()
        .complex_eigenvalues()
        .iter()
        .map(|z| z.re.hypot(z.im))
        .fold(0.0, Real::max);
    if !radius.is_finite() {
        degenerate!("eigenvalue computation produced a non-finite modulus");
    }
    Ok(radius)
}

/// Principal square root of a symmetric positive semi-definite matrix.
///
/// Returns the symmetric `C = V·diag(√λ)·Vᵀ`, so that `C·Cᵀ = C·C ≈ M`.
/// Eigenvalues that are negative only through rounding (within
/// `1e-12·max(1, max|λ|)`) are clamped to zero, which makes singular inputs
/// valid; a materially negative eigenvalue is a
/// [`NumericalDegeneracy`](ma_core::Error::NumericalDegeneracy).
pub fn sqrtm_psd(m: &Matrix) -> Result<Matrix> {
    let (eigenvalues, eigenvectors) = symmetric_eigen(m)?;
    let scale = eigenvalues.iter().fold(1.0, |acc: Real, v| acc.max(v.abs()));
    let floor = -1e-12 * scale;

    let mut roots = Vec::with_capacity(eigenvalues.size());
    for (k, &ev) in eigenvalues.iter().enumerate() {
        if ev < floor {
            degenerate!("matrix is not positive semi-definite: eigenvalue {k} is {ev}");
        }
        roots.push(ev.max(0.0).sqrt());
    }

    let v = eigenvectors.into_inner();
    let d = DMatrix::from_diagonal(&nalgebra::DVector::from_vec(roots));
    let c = &v * d * v.transpose();
    // Remove the rounding asymmetry of the triple product.
    let c = (&c + c.transpose()) * 0.5;
    Ok(Matrix::from(c))
}

/// Solve the discrete Lyapunov equation `X = A·X·Aᵀ + B`.
///
/// Uses the doubling iteration
///
/// ```text
/// X₀ = B,  A₀ = A
/// X_{k+1} = X_k + A_k·X_k·A_kᵀ
/// A_{k+1} = A_k²
/// ```
///
/// which converges quadratically when the spectral radius of `A` is below
/// one. With `B` the innovation covariance of a VAR(1) process, `X` is the
/// stationary covariance.
///
/// # Errors
/// * [`Domain`](ma_core::Error::Domain) on `a` when shapes disagree or the
///   spectral radius of `A` is `≥ 1` (no stationary solution).
/// * [`NumericalDegeneracy`](ma_core::Error::NumericalDegeneracy) if the
///   iteration does not settle within [`LYAPUNOV_MAX_ITERATIONS`].
pub fn solve_discrete_lyapunov(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    ensure_domain!(
        a.is_square(),
        "a",
        "matrix must be square, got {}×{}",
        a.rows(),
        a.cols()
    );
    ensure_domain!(
        b.rows() == a.rows() && b.cols() == a.cols(),
        "b",
        "expected a {n}×{n} matrix, got {}×{}",
        b.rows(),
        b.cols(),
        n = a.rows()
    );
    let radius = spectral_radius(a)?;
    ensure_domain!(
        radius < 1.0,
        "a",
        "spectral radius must be < 1 for a stationary solution, got {radius}"
    );

    let mut alpha = a.inner().clone();
    let mut gamma = b.inner().clone();
    for _ in 0..LYAPUNOV_MAX_ITERATIONS {
        let next = &gamma + &alpha * &gamma * alpha.transpose();
        let diff = next
            .iter()
            .zip(gamma.iter())
            .fold(0.0, |acc: Real, (x, y)| acc.max((x - y).abs()));
        alpha = &alpha * &alpha;
        gamma = next;
        if diff <= LYAPUNOV_TOLERANCE {
            return Ok(Matrix::from(gamma));
        }
    }
    degenerate!(
        "discrete Lyapunov iteration did not converge in {LYAPUNOV_MAX_ITERATIONS} iterations"
    )
}
