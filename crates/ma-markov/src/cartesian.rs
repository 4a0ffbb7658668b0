//! Joint discrete state spaces from per-dimension grids.
//!
//! Row `i` of the assembled [`Matrix`] is state `i`: one value per
//! dimension. Two enumeration orders are supported and they are not
//! interchangeable: [`StateOrder::ColumnMajor`] reproduces the row order of
//! the MATLAB code accompanying Schmitt-Grohé and Uribe, quirks included.

use ma_core::{ensure, Error, Real, Result};
use ma_math::{Array, Matrix};

/// Enumeration order of a Cartesian product state space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StateOrder {
    /// The last dimension varies fastest (nested loops, dimension 0
    /// outermost).
    #[default]
    RowMajor,
    /// Legacy MATLAB-compatible order: dimension 0 varies fastest, and the
    /// grids of dimensions `1..` are sorted ascending before enumeration.
    /// Dimension 0 is enumerated in its given order.
    ColumnMajor,
}

/// Number of joint states, the product of `sizes`.
///
/// # Errors
/// [`Configuration`](ma_core::Error::Configuration) if the product
/// overflows `usize`.
pub fn state_count(sizes: &[usize]) -> Result<usize> {
    sizes
        .iter()
        .try_fold(1usize, |acc, &s| acc.checked_mul(s))
        .ok_or_else(|| Error::Configuration {
            parameter: "grid_sizes",
            message: format!("the product of grid sizes {sizes:?} overflows"),
        })
}

/// Assemble the Cartesian product of `grids` as a `(states × dims)` matrix.
///
/// # Errors
/// [`Precondition`](ma_core::Error::Precondition) if `grids` or any grid is
/// empty; [`Configuration`](ma_core::Error::Configuration) if the number of
/// states overflows.
///
/// # Example
/// ```
/// use ma_markov::cartesian::{cartesian_product, StateOrder};
/// use ma_math::Array;
///
/// let grids = [Array::from_slice(&[0.0, 1.0]), Array::from_slice(&[5.0, 6.0, 7.0])];
/// let s = cartesian_product(&grids, StateOrder::RowMajor).unwrap();
/// assert_eq!(s.rows(), 6);
/// assert_eq!(s.row(1).as_slice(), &[0.0, 6.0]);
///
/// let s = cartesian_product(&grids, StateOrder::ColumnMajor).unwrap();
/// assert_eq!(s.row(1).as_slice(), &[1.0, 5.0]);
/// ```
pub fn cartesian_product(grids: &[Array], order: StateOrder) -> Result<Matrix> {
    ensure!(!grids.is_empty(), "at least one grid is required");
    let sizes: Vec<usize> = grids.iter().map(Array::size).collect();
    ensure!(
        sizes.iter().all(|&s| s > 0),
        "grids must be non-empty, got sizes {sizes:?}"
    );
    let n = state_count(&sizes)?;
    let m = grids.len();

    // strides[d]: how many consecutive rows share one value of dimension d
    let mut strides = vec![1usize; m];
    match order {
        StateOrder::RowMajor => {
            for d in (0..m.saturating_sub(1)).rev() {
                strides[d] = strides[d + 1] * sizes[d + 1];
            }
            Ok(Matrix::from_fn(n, m, |i, d| {
                grids[d][(i / strides[d]) % sizes[d]]
            }))
        }
        StateOrder::ColumnMajor => {
            for d in 1..m {
                strides[d] = strides[d - 1] * sizes[d - 1];
            }
            // The legacy order sorts the repeated values of every dimension
            // but the first; sorting each grid once and striding is equivalent.
            let columns: Vec<Vec<Real>> = grids
                .iter()
                .enumerate()
                .map(|(d, g)| {
                    let mut values = g.as_slice().to_vec();
                    if d > 0 {
                        values.sort_by(Real::total_cmp);
                    }
                    values
                })
                .collect();
            Ok(Matrix::from_fn(n, m, |i, d| {
                columns[d][(i / strides[d]) % sizes[d]]
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grids_2_3() -> Vec<Array> {
        vec![
            Array::from_slice(&[-1.0, 1.0]),
            Array::from_slice(&[10.0, 20.0, 30.0]),
        ]
    }

    #[test]
    fn row_major_last_dimension_fastest() {
        let s = cartesian_product(&grids_2_3(), StateOrder::RowMajor).unwrap();
        let expected = Matrix::from_row_slice(
            6,
            2,
            &[
                -1.0, 10.0, -1.0, 20.0, -1.0, 30.0, //
                1.0, 10.0, 1.0, 20.0, 1.0, 30.0,
            ],
        );
        assert_eq!(s, expected);
    }

    #[test]
    fn column_major_first_dimension_fastest() {
        let s = cartesian_product(&grids_2_3(), StateOrder::ColumnMajor).unwrap();
        let expected = Matrix::from_row_slice(
            6,
            2,
            &[
                -1.0, 10.0, 1.0, 10.0, //
                -1.0, 20.0, 1.0, 20.0, //
                -1.0, 30.0, 1.0, 30.0,
            ],
        );
        assert_eq!(s, expected);
    }

    #[test]
    fn column_major_three_dimensions() {
        let grids = vec![
            Array::from_slice(&[0.0, 1.0]),
            Array::from_slice(&[0.0, 1.0]),
            Array::from_slice(&[0.0, 1.0, 2.0]),
        ];
        let s = cartesian_product(&grids, StateOrder::ColumnMajor).unwrap();
        assert_eq!(s.rows(), 12);
        for i in 0..12 {
            let expected = [(i % 2) as Real, ((i / 2) % 2) as Real, ((i / 4) % 3) as Real];
            assert_eq!(s.row(i).as_slice(), &expected, "row {i}");
        }
    }

    #[test]
    fn column_major_sorts_later_dimensions_only() {
        // Unsorted grids expose the legacy behaviour: dimension 0 keeps its
        // order, dimension 1 comes out sorted.
        let grids = vec![
            Array::from_slice(&[2.0, 1.0]),
            Array::from_slice(&[9.0, 7.0]),
        ];
        let col = cartesian_product(&grids, StateOrder::ColumnMajor).unwrap();
        assert_eq!(
            col,
            Matrix::from_row_slice(4, 2, &[2.0, 7.0, 1.0, 7.0, 2.0, 9.0, 1.0, 9.0])
        );
        let row = cartesian_product(&grids, StateOrder::RowMajor).unwrap();
        assert_eq!(
            row,
            Matrix::from_row_slice(4, 2, &[2.0, 9.0, 2.0, 7.0, 1.0, 9.0, 1.0, 7.0])
        );
    }

    #[test]
    fn single_dimension_is_the_grid() {
        let g = Array::from_slice(&[1.0, 2.0, 3.0]);
        for order in [StateOrder::RowMajor, StateOrder::ColumnMajor] {
            let s = cartesian_product(std::slice::from_ref(&g), order).unwrap();
            assert_eq!(s.column(0), g);
        }
    }

    #[test]
    fn rejects_empty_input() {
        assert!(cartesian_product(&[], StateOrder::RowMajor).is_err());
        assert!(cartesian_product(&[Array::zeros(0)], StateOrder::RowMajor).is_err());
    }

    #[test]
    fn state_count_overflow_is_a_configuration_error() {
        assert_eq!(state_count(&[2, 3, 4]).unwrap(), 24);
        let err = state_count(&[usize::MAX, 2]).unwrap_err();
        assert_eq!(err.parameter(), Some("grid_sizes"));
    }
}
