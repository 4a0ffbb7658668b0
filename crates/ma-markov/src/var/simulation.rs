//! Resumable simulation kernel of the VAR(1) discretizer.
//!
//! A [`VarSimulation`] is built once (validation, stationary covariance,
//! grid, innovation colouring matrix) and then advanced in chunks of time
//! steps. Chunking does not change the result: the state after
//! `advance(a); advance(b)` is identical to the state after
//! `advance(a + b)`.

use super::config::VarConfig;
use super::counts::TransitionCounts;
use super::VarChain;
use crate::cartesian::{cartesian_product, state_count};
use crate::chain::MarkovChain;
use crate::grid::linspace;
use ma_core::{degenerate, ensure, ensure_config, ensure_domain, Error, Real, Result};
use ma_math::{solve_discrete_lyapunov, sqrtm_psd, Matrix, NormalRng};
use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace};

/// An in-progress simulation of `x_t = A·x_{t-1} + u_t`, `u_t ~ N(0, Ω)`,
/// quantized onto a Cartesian grid.
pub struct VarSimulation<R> {
    a: DMatrix<Real>,
    c: DMatrix<Real>,
    states: Matrix,
    // row-major copy of `states` for the nearest-state scan
    flat_states: Vec<Real>,
    m: usize,
    counts: TransitionCounts,
    trace: Option<Vec<Real>>,
    rng: R,
    x0: DVector<Real>,
    x: DVector<Real>,
    z: DVector<Real>,
    prev: usize,
    t: usize,
    burn_in: usize,
    total_steps: usize,
}

impl<R: NormalRng> VarSimulation<R> {
    /// Validate the inputs and prepare the grid; no time step is taken.
    ///
    /// # Errors
    /// * [`Domain`](ma_core::Error::Domain) naming `a`, `omega`,
    ///   `grid_sizes` or `std_devs` for malformed inputs, and `a` when its
    ///   spectral radius is `≥ 1`.
    /// * [`Configuration`](ma_core::Error::Configuration) naming
    ///   `sim_length`, `burn_in`, `grid_sizes` or `max_cells` when the run
    ///   is too short or would exceed an allocation bound; an oversized
    ///   trace is reported on `sim_length`.
    /// * [`NumericalDegeneracy`](ma_core::Error::NumericalDegeneracy) if the
    ///   stationary covariance cannot be computed or `omega` is materially
    ///   indefinite.
    pub fn new(a: &Matrix, omega: &Matrix, config: &VarConfig, rng: R) -> Result<Self> {
        let m = a.rows();
        ensure_domain!(
            a.is_square() && m >= 1,
            "a",
            "must be a non-empty square matrix, got {}×{}",
            a.rows(),
            a.cols()
        );
        ensure_domain!(
            a.inner().iter().all(|v| v.is_finite()),
            "a",
            "contains non-finite entries"
        );
        ensure_domain!(
            omega.rows() == m && omega.cols() == m,
            "omega",
            "expected a {m}×{m} matrix, got {}×{}",
            omega.rows(),
            omega.cols()
        );
        ensure_domain!(
            omega.inner().iter().all(|v| v.is_finite()),
            "omega",
            "contains non-finite entries"
        );
        let sym_tol = 1e-12 * omega.inner().amax().max(1.0);
        ensure_domain!(
            omega.is_symmetric(sym_tol),
            "omega",
            "covariance matrix must be symmetric"
        );

        let sizes = config.resolved_grid_sizes(m);
        ensure_domain!(
            sizes.len() == m,
            "grid_sizes",
            "expected {m} grid sizes, got {}",
            sizes.len()
        );
        ensure_domain!(
            sizes.iter().all(|&s| s >= 2),
            "grid_sizes",
            "every grid needs at least 2 points, got {sizes:?}"
        );
        ensure_domain!(
            config.std_devs > 0.0 && config.std_devs.is_finite(),
            "std_devs",
            "must be positive and finite, got {}",
            config.std_devs
        );
        ensure_config!(
            config.sim_length >= 2,
            "sim_length",
            "at least 2 periods are needed to record a transition, got {}",
            config.sim_length
        );
        let total_steps = config
            .burn_in
            .checked_add(config.sim_length)
            .ok_or_else(|| Error::Configuration {
                parameter: "burn_in",
                message: "burn_in + sim_length overflows".into(),
            })?;

        let n = state_count(&sizes)?;
        let cells = n.checked_mul(n);
        ensure_config!(
            cells.is_some_and(|c| c <= config.max_cells),
            "max_cells",
            "{n} states need {n}² count cells, above the limit of {}",
            config.max_cells
        );

        let trace_capacity = if config.return_sim {
            Some(trace_len(config, m)?)
        } else {
            None
        };

        let sigma = solve_discrete_lyapunov(a, omega)?;
        let mut grids = Vec::with_capacity(m);
        for (k, &size) in sizes.iter().enumerate() {
            let var = sigma[(k, k)];
            if !(var >= 0.0 && var.is_finite()) {
                degenerate!("stationary variance of dimension {k} is {var}");
            }
            let half_width = config.std_devs * var.sqrt();
            grids.push(linspace(-half_width, half_width, size)?);
        }
        let states = cartesian_product(&grids, config.order)?;
        let c = sqrtm_psd(omega)?;

        let mut flat_states = Vec::with_capacity(n * m);
        for row in states.rows_iter() {
            flat_states.extend_from_slice(&row);
        }
        let x0 = DVector::<Real>::zeros(m);
        let prev = nearest_state(&flat_states, m, x0.as_slice());

        let trace = trace_capacity.map(Vec::with_capacity);

        debug!(
            dimension = m,
            states = n,
            sim_length = config.sim_length,
            burn_in = config.burn_in,
            order = ?config.order,
            "prepared VAR(1) simulation"
        );

        Ok(Self {
            a: a.inner().clone(),
            c: c.into_inner(),
            states,
            flat_states,
            m,
            counts: TransitionCounts::new(n),
            trace,
            rng,
            x0,
            x: DVector::zeros(m),
            z: DVector::zeros(m),
            prev,
            t: 0,
            burn_in: config.burn_in,
            total_steps,
        })
    }

    /// Take at most `max_steps` time steps; returns the number taken.
    pub fn advance(&mut self, max_steps: usize) -> usize {
        let steps = max_steps.min(self.total_steps - self.t);
        for _ in 0..steps {
            self.step();
        }
        trace!(
            steps,
            done = self.t,
            total = self.total_steps,
            "advanced VAR(1) simulation"
        );
        steps
    }

    /// Run every remaining time step.
    pub fn run(&mut self) {
        self.advance(self.total_steps - self.t);
    }

    /// Whether every time step has been taken.
    pub fn is_complete(&self) -> bool {
        self.t == self.total_steps
    }

    /// Time steps taken so far, burn-in included.
    pub fn steps_done(&self) -> usize {
        self.t
    }

    /// Total number of time steps, `burn_in + sim_length`.
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// The full (unpruned) state space, one state per row.
    pub fn states(&self) -> &Matrix {
        &self.states
    }

    /// Transitions counted so far.
    pub fn counts(&self) -> &TransitionCounts {
        &self.counts
    }

    /// Prune never-visited states and normalize the counts.
    ///
    /// # Errors
    /// [`Precondition`](ma_core::Error::Precondition) if the simulation is
    /// not complete; otherwise see
    /// [`TransitionCounts::normalize`](super::counts::TransitionCounts::normalize).
    pub fn finish(self) -> Result<VarChain> {
        ensure!(
            self.is_complete(),
            "simulation is incomplete: {} of {} steps taken",
            self.t,
            self.total_steps
        );
        let normalized = self.counts.normalize()?;
        let n = self.counts.n();
        debug!(
            kept = normalized.retained.len(),
            dropped = n - normalized.retained.len(),
            transitions = self.counts.total(),
            "pruned unvisited states"
        );

        let states = self.states.select_rows(&normalized.retained);
        let chain = MarkovChain::new(normalized.p, states)?;
        let m = self.m;
        let trace = self
            .trace
            .map(|buf| Matrix::from_row_slice(buf.len() / m, m, &buf));
        Ok(VarChain {
            chain,
            trace,
            retained: normalized.retained,
        })
    }

    #[inline]
    fn step(&mut self) {
        self.rng.fill_normal(self.z.as_mut_slice());
        self.x.gemv(1.0, &self.a, &self.x0, 0.0);
        self.x.gemv(1.0, &self.c, &self.z, 1.0);
        let j = nearest_state(&self.flat_states, self.m, self.x.as_slice());
        if self.t > self.burn_in {
            self.counts.record(self.prev, j);
            if let Some(buf) = self.trace.as_mut() {
                buf.extend_from_slice(self.x.as_slice());
            }
        }
        std::mem::swap(&mut self.x0, &mut self.x);
        self.prev = j;
        self.t += 1;
    }
}

/// Number of reals in the trace buffer, `(sim_length − 1)·m`.
///
/// Checked against `max_trace_len` and the largest allocation a `Vec<Real>`
/// can hold, before anything is reserved.
fn trace_len(config: &VarConfig, m: usize) -> Result<usize> {
    let limit = config
        .max_trace_len
        .min(isize::MAX as usize / std::mem::size_of::<Real>());
    (config.sim_length - 1)
        .checked_mul(m)
        .filter(|&len| len <= limit)
        .ok_or_else(|| Error::Configuration {
            parameter: "sim_length",
            message: format!(
                "a trace of {} draws of dimension {m} exceeds the limit of {limit} values",
                config.sim_length - 1
            ),
        })
}

/// Index of the state closest to `x` in Euclidean distance; the lowest
/// index wins ties.
fn nearest_state(flat_states: &[Real], m: usize, x: &[Real]) -> usize {
    let mut best = 0;
    let mut best_dist = Real::INFINITY;
    for (i, s) in flat_states.chunks_exact(m).enumerate() {
        let d: Real = s.iter().zip(x).map(|(a, b)| (a - b) * (a - b)).sum();
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}
