//! `Matrix` — a two-dimensional matrix of reals.
//!
//! Thin newtype around `nalgebra::DMatrix<f64>`. Transition matrices and
//! multivariate state spaces (one state per row) are `Matrix`es.

use crate::array::Array;
use nalgebra::DMatrix;
use ma_core::Real;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// A dynamically-sized 2D matrix of `Real` values, indexed `(row, col)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix(DMatrix<Real>);

impl Matrix {
    /// Create a zero-filled `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self(DMatrix::zeros(rows, cols))
    }

    /// Create an identity matrix of size `n × n`.
    pub fn identity(n: usize) -> Self {
        Self(DMatrix::identity(n, n))
    }

    /// Create from a row-major data slice.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[Real]) -> Self {
        Self(DMatrix::from_row_slice(rows, cols, data))
    }

    /// Create a matrix whose `(i, j)` entry is `f(i, j)`.
    pub fn from_fn<F: FnMut(usize, usize) -> Real>(rows: usize, cols: usize, f: F) -> Self {
        Self(DMatrix::from_fn(rows, cols, f))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.0.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.0.ncols()
    }

    /// Return `true` if the matrix is square.
    pub fn is_square(&self) -> bool {
        self.0.nrows() == self.0.ncols()
    }

    /// Return `true` if the matrix is square and `|m[i,j] - m[j,i]| <= tol`
    /// everywhere.
    pub fn is_symmetric(&self, tol: Real) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.rows();
        (0..n).all(|i| (i + 1..n).all(|j| (self.0[(i, j)] - self.0[(j, i)]).abs() <= tol))
    }

    /// Borrow the inner `DMatrix`.
    pub fn inner(&self) -> &DMatrix<Real> {
        &self.0
    }

    /// Consume and return the inner `DMatrix`.
    pub fn into_inner(self) -> DMatrix<Real> {
        self.0
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Extract a row as an `Array`.
    pub fn row(&self, i: usize) -> Array {
        Array::from_vec(self.0.row(i).iter().copied().collect())
    }

    /// Extract a column as an `Array`.
    pub fn column(&self, j: usize) -> Array {
        Array::from_vec(self.0.column(j).iter().copied().collect())
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> Array {
        Array::from_vec(self.0.row_iter().map(|r| r.sum()).collect())
    }

    /// Sum of each column.
    pub fn column_sums(&self) -> Array {
        Array::from_vec(self.0.column_iter().map(|c| c.sum()).collect())
    }

    /// Keep only the rows listed in `indices`, in that order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self(self.0.select_rows(indices))
    }

    /// Largest absolute element-wise difference to `other`.
    ///
    /// # Panics
    /// Panics if the shapes differ.
    pub fn max_abs_diff(&self, other: &Matrix) -> Real {
        assert_eq!(
            self.0.shape(),
            other.0.shape(),
            "shape mismatch in max_abs_diff"
        );
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(0.0, |acc, (a, b)| acc.max((a - b).abs()))
    }

    /// Element-wise apply.
    pub fn map<F: Fn(Real) -> Real>(&self, f: F) -> Self {
        Self(self.0.map(f))
    }

    /// Multiply every element by `scalar`.
    pub fn scale(&self, scalar: Real) -> Self {
        Self(&self.0 * scalar)
    }

    /// Iterate over rows as owned `Vec`s, top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = Vec<Real>> + '_ {
        self.0.row_iter().map(|r| r.iter().copied().collect())
    }
}

// ── From / Into ───────────────────────────────────────────────────────────────

impl From<DMatrix<Real>> for Matrix {
    fn from(m: DMatrix<Real>) -> Self {
        Self(m)
    }
}

impl From<Matrix> for DMatrix<Real> {
    fn from(m: Matrix) -> Self {
        m.0
    }
}

// ── Indexing ──────────────────────────────────────────────────────────────────

impl Index<(usize, usize)> for Matrix {
    type Output = Real;
    fn index(&self, (i, j): (usize, usize)) -> &Real {
        &self.0[(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Real {
        &mut self.0[(i, j)]
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────────

impl Add for &Matrix {
    type Output = Matrix;
    fn add(self, rhs: &Matrix) -> Matrix {
        Matrix(&self.0 + &rhs.0)
    }
}

impl Sub for &Matrix {
    type Output = Matrix;
    fn sub(self, rhs: &Matrix) -> Matrix {
        Matrix(&self.0 - &rhs.0)
    }
}

impl Mul for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Matrix {
        Matrix(&self.0 * &rhs.0)
    }
}
