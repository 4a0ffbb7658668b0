//! Raw transition counts and their conversion into a stochastic matrix.

use ma_core::{degenerate, Real, Result};
use ma_math::Matrix;

/// Dense `n × n` matrix of observed transitions between quantized states.
///
/// Counts are exact integers; they only become probabilities in
/// [`normalize`](Self::normalize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionCounts {
    n: usize,
    data: Vec<u64>,
}

/// Result of pruning and normalizing a [`TransitionCounts`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Row-stochastic matrix over the retained states.
    pub p: Matrix,
    /// Original indices of the retained states, ascending.
    pub retained: Vec<usize>,
}

impl TransitionCounts {
    /// All-zero counts over `n` states.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            data: vec![0; n * n],
        }
    }

    /// Number of states.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Record one transition `from → to`.
    #[inline]
    pub fn record(&mut self, from: usize, to: usize) {
        self.data[from * self.n + to] += 1;
    }

    /// Count of `from → to` transitions.
    pub fn get(&self, from: usize, to: usize) -> u64 {
        self.data[from * self.n + to]
    }

    /// Transitions out of `state`.
    pub fn row_total(&self, state: usize) -> u64 {
        self.data[state * self.n..(state + 1) * self.n].iter().sum()
    }

    /// Transitions into each state.
    pub fn column_totals(&self) -> Vec<u64> {
        let mut totals = vec![0u64; self.n];
        for row in self.data.chunks_exact(self.n.max(1)) {
            for (t, &c) in totals.iter_mut().zip(row) {
                *t += c;
            }
        }
        totals
    }

    /// Total number of recorded transitions.
    pub fn total(&self) -> u64 {
        self.data.iter().sum()
    }

    /// Drop every state never entered, then divide each row by its total.
    ///
    /// A state that was entered but never left (its only visit was the last
    /// step) would produce a zero row; that is reported rather than turned
    /// into NaNs.
    ///
    /// # Errors
    /// [`NumericalDegeneracy`](ma_core::Error::NumericalDegeneracy) carrying
    /// the original index of the first such state, or with no index when no
    /// transition was recorded at all.
    pub fn normalize(&self) -> Result<Normalized> {
        let retained: Vec<usize> = self
            .column_totals()
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(j, _)| j)
            .collect();
        if retained.is_empty() {
            degenerate!("no transitions were recorded");
        }

        let k = retained.len();
        let mut p = Matrix::zeros(k, k);
        for (r, &i) in retained.iter().enumerate() {
            let row_sum: u64 = retained.iter().map(|&j| self.get(i, j)).sum();
            if row_sum == 0 {
                degenerate!(
                    state = i;
                    "state {i} (retained position {r}) is entered but never left, \
                     its transition row cannot be normalized"
                );
            }
            let total = row_sum as Real;
            for (c, &j) in retained.iter().enumerate() {
                p[(r, c)] = self.get(i, j) as Real / total;
            }
        }
        Ok(Normalized { p, retained })
    }
}
