//! Integration tests for the VAR(1) discretizer.

use approx::assert_relative_eq;
use ma_core::Error;
use ma_markov::{discrete_var, discrete_var_with_rng, StateOrder, VarConfig, VarSimulation};
use ma_math::{solve_discrete_lyapunov, InverseCumulativeNormalRng, Matrix, StdNormalRng};

fn bivariate() -> (Matrix, Matrix) {
    (
        Matrix::from_row_slice(2, 2, &[0.7, 0.1, -0.05, 0.5]),
        Matrix::from_row_slice(2, 2, &[0.04, 0.01, 0.01, 0.02]),
    )
}

fn config() -> VarConfig {
    VarConfig::default()
        .with_grid_sizes(vec![3, 3])
        .with_sim_length(10_000)
        .with_burn_in(1_000)
}

// ─── Output shape ─────────────────────────────────────────────────────────────

#[test]
fn chain_is_stochastic_and_consistent() {
    let (a, omega) = bivariate();
    let var = discrete_var(&a, &omega, &config()).unwrap();
    let p = var.p();
    assert!(p.is_square());
    assert_eq!(p.rows(), var.states().rows());
    assert_eq!(var.states().cols(), 2);
    assert_eq!(var.retained().len(), p.rows());
    assert!(var.retained().windows(2).all(|w| w[0] < w[1]));
    for s in p.row_sums().iter() {
        assert_relative_eq!(*s, 1.0, epsilon = 1e-12);
    }
    assert!(p.inner().iter().all(|&v| (0.0..=1.0).contains(&v)));
    // every retained state is entered at least once
    assert!(p.column_sums().iter().all(|&c| c > 0.0));
    assert!(var.trace().is_none());
}

#[test]
fn retained_states_are_rows_of_the_full_grid() {
    let (a, omega) = bivariate();
    let cfg = config();
    let sim = VarSimulation::new(&a, &omega, &cfg, InverseCumulativeNormalRng::new(cfg.seed))
        .unwrap();
    let full = sim.states().clone();
    let var = discrete_var(&a, &omega, &cfg).unwrap();
    assert_eq!(var.states(), &full.select_rows(var.retained()));
}

#[test]
fn grid_spans_stationary_standard_deviations() {
    let (a, omega) = bivariate();
    let cfg = config().with_std_devs(2.0);
    let sim = VarSimulation::new(&a, &omega, &cfg, InverseCumulativeNormalRng::new(1)).unwrap();
    let sigma = solve_discrete_lyapunov(&a, &omega).unwrap();
    let states = sim.states();
    for k in 0..2 {
        let col = states.column(k);
        let max = col.iter().fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        let min = col.iter().fold(f64::INFINITY, |m, &v| m.min(v));
        assert_relative_eq!(max, 2.0 * sigma[(k, k)].sqrt(), epsilon = 1e-12);
        assert_relative_eq!(min, -2.0 * sigma[(k, k)].sqrt(), epsilon = 1e-12);
    }
}

#[test]
fn trace_holds_counted_draws() {
    let (a, omega) = bivariate();
    let cfg = config().with_return_sim(true);
    let var = discrete_var(&a, &omega, &cfg).unwrap();
    let trace = var.trace().unwrap();
    assert_eq!(trace.rows(), cfg.sim_length - 1);
    assert_eq!(trace.cols(), 2);
    // sample covariance of the path is close to the stationary one
    let sigma = solve_discrete_lyapunov(&a, &omega).unwrap();
    let n = trace.rows() as f64;
    let mean0 = trace.column(0).sum() / n;
    let var0 = trace.column(0).iter().map(|v| (v - mean0).powi(2)).sum::<f64>() / n;
    assert_relative_eq!(var0, sigma[(0, 0)], max_relative = 0.15);
}

#[test]
fn column_major_enumerates_the_same_states() {
    let (a, omega) = bivariate();
    let rm = VarSimulation::new(&a, &omega, &config(), InverseCumulativeNormalRng::new(1))
        .unwrap();
    let cfg = config().with_order(StateOrder::ColumnMajor);
    let cm = VarSimulation::new(&a, &omega, &cfg, InverseCumulativeNormalRng::new(1)).unwrap();
    let mut r: Vec<Vec<f64>> = rm.states().rows_iter().collect();
    let mut c: Vec<Vec<f64>> = cm.states().rows_iter().collect();
    r.sort_by(|x, y| x.partial_cmp(y).unwrap());
    c.sort_by(|x, y| x.partial_cmp(y).unwrap());
    assert_eq!(r, c);
}

// ─── Determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_chain() {
    let (a, omega) = bivariate();
    let cfg = config().with_return_sim(true);
    let first = discrete_var(&a, &omega, &cfg).unwrap();
    let second = discrete_var(&a, &omega, &cfg).unwrap();
    assert_eq!(first, second);

    let other = discrete_var(&a, &omega, &cfg.clone().with_seed(99)).unwrap();
    assert_ne!(first.trace(), other.trace());
}

#[test]
fn chunked_run_matches_one_shot() {
    let (a, omega) = bivariate();
    let cfg = config().with_return_sim(true);
    let one_shot = discrete_var(&a, &omega, &cfg).unwrap();

    let mut sim =
        VarSimulation::new(&a, &omega, &cfg, InverseCumulativeNormalRng::new(cfg.seed)).unwrap();
    while !sim.is_complete() {
        sim.advance(777);
    }
    assert_eq!(sim.steps_done(), cfg.burn_in + cfg.sim_length);
    assert_eq!(sim.finish().unwrap(), one_shot);
}

#[test]
fn independent_runs_on_threads() {
    let (a, omega) = bivariate();
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let (a, omega) = (a.clone(), omega.clone());
            std::thread::spawn(move || {
                discrete_var(&a, &omega, &config().with_seed(seed)).unwrap()
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (seed, r) in results.iter().enumerate() {
        let again = discrete_var(&a, &omega, &config().with_seed(seed as u64)).unwrap();
        assert_eq!(r, &again);
    }
}

#[test]
fn custom_generator() {
    let (a, omega) = bivariate();
    let var = discrete_var_with_rng(&a, &omega, &config(), StdNormalRng::new(5)).unwrap();
    assert!(var.chain().is_stochastic(1e-12));
}

#[test]
fn reading_the_output_leaves_it_unchanged() {
    let (a, omega) = bivariate();
    let var = discrete_var(&a, &omega, &config()).unwrap();
    let snapshot = var.clone();
    let total: f64 = var.p().inner().iter().sum::<f64>() + var.states().inner().iter().sum::<f64>();
    assert!(total.is_finite());
    let (chain, trace, retained) = var.into_parts();
    assert_eq!(&chain, snapshot.chain());
    assert_eq!(trace.as_ref(), snapshot.trace());
    assert_eq!(retained, snapshot.retained());
}

// ─── Degenerate inputs ────────────────────────────────────────────────────────

#[test]
fn scalar_var_with_singular_noise_in_one_direction() {
    // the second component is a deterministic function of the first
    let a = Matrix::from_row_slice(2, 2, &[0.5, 0.0, 0.5, 0.0]);
    let omega = Matrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 0.0]);
    let var = discrete_var(&a, &omega, &config()).unwrap();
    assert!(var.chain().is_stochastic(1e-12));
}

#[test]
fn unit_root_is_a_domain_error() {
    let a = Matrix::from_row_slice(1, 1, &[1.0]);
    let omega = Matrix::identity(1);
    let cfg = config().with_grid_sizes(vec![5]);
    let err = discrete_var(&a, &omega, &cfg).unwrap_err();
    assert!(matches!(err, Error::Domain { parameter: "a", .. }));
}

#[test]
fn indefinite_noise_is_degenerate() {
    let a = Matrix::identity(2).scale(0.5);
    let omega = Matrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
    let err = discrete_var(&a, &omega, &config()).unwrap_err();
    assert!(matches!(err, Error::NumericalDegeneracy { .. }));
}
