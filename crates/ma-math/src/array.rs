//! `Array` — a one-dimensional vector of reals.
//!
//! Thin newtype around `nalgebra::DVector<f64>`. Grids and the state values
//! of scalar Markov chains are `Array`s.

use nalgebra::DVector;
use ma_core::Real;
use std::ops::{Index, IndexMut};

/// A dynamically-sized 1D vector of `Real` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Array(DVector<Real>);

impl Array {
    /// Create a zero-filled array of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self(DVector::zeros(n))
    }

    /// Create an array from a slice.
    pub fn from_slice(data: &[Real]) -> Self {
        Self(DVector::from_column_slice(data))
    }

    /// Create an array from a `Vec`.
    pub fn from_vec(data: Vec<Real>) -> Self {
        Self(DVector::from_vec(data))
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the elements as a slice.
    pub fn as_slice(&self) -> &[Real] {
        self.0.as_slice()
    }

    /// Borrow the inner `DVector`.
    pub fn inner(&self) -> &DVector<Real> {
        &self.0
    }

    /// Consume and return the inner `DVector`.
    pub fn into_inner(self) -> DVector<Real> {
        self.0
    }

    /// Sum of all elements.
    pub fn sum(&self) -> Real {
        self.0.sum()
    }

    /// First element, if any.
    pub fn first(&self) -> Option<Real> {
        self.as_slice().first().copied()
    }

    /// Last element, if any.
    pub fn last(&self) -> Option<Real> {
        self.as_slice().last().copied()
    }

    /// Apply a function element-wise, returning a new array.
    pub fn map<F: Fn(Real) -> Real>(&self, f: F) -> Self {
        Self(self.0.map(f))
    }

    /// Add `offset` to every element.
    pub fn shift(&self, offset: Real) -> Self {
        self.map(|x| x + offset)
    }

    /// Iterator over elements.
    pub fn iter(&self) -> impl Iterator<Item = &Real> {
        self.0.iter()
    }
}

// ── From / Into conversions ───────────────────────────────────────────────────

impl From<DVector<Real>> for Array {
    fn from(v: DVector<Real>) -> Self {
        Self(v)
    }
}

impl From<Array> for DVector<Real> {
    fn from(a: Array) -> Self {
        a.0
    }
}

// ── Index ─────────────────────────────────────────────────────────────────────

impl Index<usize> for Array {
    type Output = Real;
    fn index(&self, i: usize) -> &Real {
        &self.0[i]
    }
}

impl IndexMut<usize> for Array {
    fn index_mut(&mut self, i: usize) -> &mut Real {
        &mut self.0[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_and_ends() {
        let a = Array::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(a.size(), 3);
        assert_eq!(a[1], 2.0);
        assert_eq!(a.first(), Some(1.0));
        assert_eq!(a.last(), Some(3.0));
        assert_eq!(Array::zeros(0).first(), None);
    }

    #[test]
    fn shift_adds_offset() {
        let a = Array::from_slice(&[-1.0, 0.0, 1.0]);
        let b = a.shift(2.5);
        assert_eq!(b.as_slice(), &[1.5, 2.5, 3.5]);
        // the original is untouched
        assert_eq!(a.as_slice(), &[-1.0, 0.0, 1.0]);
    }
}
