//! Error types for markov-approx.
//!
//! Every fallible constructor in the workspace returns [`Result`] with the
//! single [`Error`] enum defined here. Failures are deterministic: the same
//! inputs fail the same way, so nothing in the workspace retries.
//!
//! The `ensure!`, `ensure_domain!`, `ensure_config!` and `degenerate!`
//! macros return early with the matching variant.

use thiserror::Error;

/// The top-level error type used throughout markov-approx.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A generic precondition on an argument was violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A mathematical precondition of a discretization method was violated
    /// (e.g. `|rho| >= 1`, a non-square autocorrelation matrix).
    #[error("domain error in `{parameter}`: {message}")]
    Domain {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The violated condition.
        message: String,
    },

    /// A numerical computation produced a degenerate result: a state with no
    /// outgoing transitions, a non-convergent solver, an indefinite matrix.
    #[error("numerical degeneracy{}: {message}", fmt_state(.state))]
    NumericalDegeneracy {
        /// Index of the affected state, when one is identifiable.
        state: Option<usize>,
        /// Description of the failure.
        message: String,
    },

    /// A configuration value is outside what can be allocated or simulated.
    #[error("configuration error in `{parameter}`: {message}")]
    Configuration {
        /// Name of the offending setting.
        parameter: &'static str,
        /// The violated condition.
        message: String,
    },
}

fn fmt_state(state: &Option<usize>) -> String {
    match state {
        Some(i) => format!(" at state {i}"),
        None => String::new(),
    }
}

impl Error {
    /// The parameter named by a [`Error::Domain`] or [`Error::Configuration`]
    /// error.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Error::Domain { parameter, .. } | Error::Configuration { parameter, .. } => {
                Some(parameter)
            }
            _ => None,
        }
    }

    /// The state index carried by a [`Error::NumericalDegeneracy`] error.
    pub fn state(&self) -> Option<usize> {
        match self {
            Error::NumericalDegeneracy { state, .. } => *state,
            _ => None,
        }
    }
}

/// Shorthand `Result` type used throughout markov-approx.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ma_core::ensure;
/// fn positive(x: f64) -> ma_core::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Domain { .. })` naming `$param` if `$cond` is false.
///
/// # Example
/// ```
/// use ma_core::ensure_domain;
/// fn stationary(rho: f64) -> ma_core::Result<f64> {
///     ensure_domain!(rho.abs() < 1.0, "rho", "|rho| must be < 1, got {rho}");
///     Ok(1.0 / (1.0 - rho * rho))
/// }
/// assert!(stationary(0.5).is_ok());
/// assert_eq!(stationary(1.0).unwrap_err().parameter(), Some("rho"));
/// ```
#[macro_export]
macro_rules! ensure_domain {
    ($cond:expr, $param:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Domain {
                parameter: $param,
                message: format!($($msg)*),
            });
        }
    };
}

/// Returns `Err(Error::Configuration { .. })` naming `$param` if `$cond` is
/// false.
#[macro_export]
macro_rules! ensure_config {
    ($cond:expr, $param:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Configuration {
                parameter: $param,
                message: format!($($msg)*),
            });
        }
    };
}

/// Returns `Err(Error::NumericalDegeneracy { .. })` immediately.
///
/// The first form carries no state index; `state = i;` attaches one.
///
/// # Example
/// ```
/// use ma_core::degenerate;
/// fn row_total(sum: f64, i: usize) -> ma_core::Result<f64> {
///     if sum == 0.0 {
///         degenerate!(state = i; "row {i} has no outgoing transitions");
///     }
///     Ok(sum)
/// }
/// assert_eq!(row_total(0.0, 4).unwrap_err().state(), Some(4));
/// ```
#[macro_export]
macro_rules! degenerate {
    (state = $state:expr; $($msg:tt)*) => {
        return Err($crate::errors::Error::NumericalDegeneracy {
            state: Some($state),
            message: format!($($msg)*),
        })
    };
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::NumericalDegeneracy {
            state: None,
            message: format!($($msg)*),
        })
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_parameter() {
        let e = Error::Domain {
            parameter: "rho",
            message: "|rho| must be < 1, got 1".into(),
        };
        assert_eq!(e.to_string(), "domain error in `rho`: |rho| must be < 1, got 1");
        assert_eq!(e.parameter(), Some("rho"));
        assert_eq!(e.state(), None);
    }

    #[test]
    fn display_degeneracy_with_and_without_state() {
        let with = Error::NumericalDegeneracy {
            state: Some(3),
            message: "zero row".into(),
        };
        assert_eq!(with.to_string(), "numerical degeneracy at state 3: zero row");
        assert_eq!(with.state(), Some(3));

        let without = Error::NumericalDegeneracy {
            state: None,
            message: "no convergence".into(),
        };
        assert_eq!(without.to_string(), "numerical degeneracy: no convergence");
    }

    #[test]
    fn macros_return_matching_variants() {
        fn cfg(cells: usize) -> Result<()> {
            ensure_config!(cells < 10, "max_cells", "{cells} cells exceed 10");
            Ok(())
        }
        fn pre(n: usize) -> Result<()> {
            ensure!(n >= 2, "need at least two points, got {n}");
            Ok(())
        }
        fn deg() -> Result<()> {
            degenerate!("solver did not converge");
        }

        assert!(matches!(cfg(20), Err(Error::Configuration { parameter: "max_cells", .. })));
        assert!(cfg(1).is_ok());
        assert!(matches!(pre(1), Err(Error::Precondition(_))));
        assert!(matches!(deg(), Err(Error::NumericalDegeneracy { state: None, .. })));
    }
}
