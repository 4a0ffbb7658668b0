//! Settings of the VAR(1) simulation approach.

use crate::cartesian::StateOrder;
use ma_core::Real;

/// Configuration of [`discrete_var`](crate::discrete_var).
///
/// Defaults are those of the Schmitt-Grohé–Uribe procedure: ten grid points per
/// dimension spanning `±√10` stationary standard deviations, one million
/// counted draws after a burn-in of one hundred thousand, seed 1234.
///
/// ```
/// use ma_markov::{StateOrder, VarConfig};
/// let cfg = VarConfig::default()
///     .with_grid_sizes(vec![21, 11])
///     .with_sim_length(50_000)
///     .with_burn_in(1_000)
///     .with_order(StateOrder::ColumnMajor);
/// assert_eq!(cfg.seed, 1234);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VarConfig {
    /// Grid points per dimension; `None` means
    /// [`DEFAULT_GRID_SIZE`](Self::DEFAULT_GRID_SIZE) for every dimension.
    pub grid_sizes: Option<Vec<usize>>,
    /// Grid half-width in stationary standard deviations.
    pub std_devs: Real,
    /// Seed of the normal generator owned by the simulation.
    pub seed: u64,
    /// Number of simulated periods after the burn-in.
    pub sim_length: usize,
    /// Number of initial periods excluded from the transition counts.
    pub burn_in: usize,
    /// Enumeration order of the joint state space.
    pub order: StateOrder,
    /// Keep the simulated continuous draws.
    pub return_sim: bool,
    /// Upper bound on the cells of the `states × states` count matrix.
    pub max_cells: usize,
    /// Upper bound on the number of reals kept when `return_sim` is set,
    /// `(sim_length − 1)·m`.
    pub max_trace_len: usize,
}

impl VarConfig {
    /// Grid points per dimension when `grid_sizes` is `None`.
    pub const DEFAULT_GRID_SIZE: usize = 10;

    /// Default bound on the count matrix: 2²⁷ cells (1 GiB of `u64`).
    pub const DEFAULT_MAX_CELLS: usize = 1 << 27;

    /// Default bound on the trace: 2²⁷ reals (1 GiB of `f64`).
    pub const DEFAULT_MAX_TRACE_LEN: usize = 1 << 27;

    /// Set the grid sizes, one per dimension.
    pub fn with_grid_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.grid_sizes = Some(sizes);
        self
    }

    /// Set the grid half-width in stationary standard deviations.
    pub fn with_std_devs(mut self, std_devs: Real) -> Self {
        self.std_devs = std_devs;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of simulated periods after the burn-in.
    pub fn with_sim_length(mut self, sim_length: usize) -> Self {
        self.sim_length = sim_length;
        self
    }

    /// Set the burn-in length.
    pub fn with_burn_in(mut self, burn_in: usize) -> Self {
        self.burn_in = burn_in;
        self
    }

    /// Set the state enumeration order.
    pub fn with_order(mut self, order: StateOrder) -> Self {
        self.order = order;
        self
    }

    /// Keep (or drop) the simulated trace.
    pub fn with_return_sim(mut self, return_sim: bool) -> Self {
        self.return_sim = return_sim;
        self
    }

    /// Set the allocation bound on the count matrix.
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Set the allocation bound on the simulated trace.
    pub fn with_max_trace_len(mut self, max_trace_len: usize) -> Self {
        self.max_trace_len = max_trace_len;
        self
    }

    /// Grid sizes for an `m`-dimensional process.
    pub fn resolved_grid_sizes(&self, m: usize) -> Vec<usize> {
        self.grid_sizes
            .clone()
            .unwrap_or_else(|| vec![Self::DEFAULT_GRID_SIZE; m])
    }
}

impl Default for VarConfig {
    fn default() -> Self {
        Self {
            grid_sizes: None,
            std_devs: 10.0_f64.sqrt(),
            seed: 1234,
            sim_length: 1_000_000,
            burn_in: 100_000,
            order: StateOrder::RowMajor,
            return_sim: false,
            max_cells: Self::DEFAULT_MAX_CELLS,
            max_trace_len: Self::DEFAULT_MAX_TRACE_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_defaults() {
        let cfg = VarConfig::default();
        assert_eq!(cfg.grid_sizes, None);
        assert_eq!(cfg.std_devs, 10.0_f64.sqrt());
        assert_eq!(cfg.sim_length, 1_000_000);
        assert_eq!(cfg.burn_in, 100_000);
        assert_eq!(cfg.order, StateOrder::RowMajor);
        assert!(!cfg.return_sim);
        assert_eq!(cfg.resolved_grid_sizes(3), vec![10, 10, 10]);
    }

    #[test]
    fn builders_override_fields() {
        let cfg = VarConfig::default()
            .with_grid_sizes(vec![3, 4])
            .with_std_devs(2.0)
            .with_seed(7)
            .with_return_sim(true)
            .with_max_cells(100)
            .with_max_trace_len(50);
        assert_eq!(cfg.resolved_grid_sizes(2), vec![3, 4]);
        assert_eq!(cfg.std_devs, 2.0);
        assert_eq!(cfg.seed, 7);
        assert!(cfg.return_sim);
        assert_eq!(cfg.max_cells, 100);
        assert_eq!(cfg.max_trace_len, 50);
    }
}
