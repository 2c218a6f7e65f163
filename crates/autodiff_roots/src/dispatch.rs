//! Method dispatch.

use autodiff_core::differentiate::Differentiable;
use autodiff_core::types::{AdError, Dual, Output};
use tracing::debug;

use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::input::Guess;
use crate::method::RootMethod;
use crate::solvers::{BisectionSolver, NewtonFourierSolver, NewtonRaphsonSolver, RootResult};

/// Find a root of `f` with the chosen method.
///
/// Newton-Raphson needs a [`Guess::Start`]; bisection and Newton-Fourier
/// need a [`Guess::Interval`]. Named guesses are matched against the
/// parameter names of `f`.
///
/// # Errors
/// * `SolverError::MissingStartValues` / `MissingInterval` - wrong kind of guess
/// * validation errors from [`StartValues::resolve`] and [`Interval::resolve`]
/// * the selected solver's convergence errors
///
/// # Examples
/// ```
/// use autodiff_core::prelude::*;
/// use autodiff_roots::{find_root, Interval, RootMethod, SolverConfig};
///
/// let f = differentiate(["x"], |v| Ok(((&v[0] + 2.0) * (&v[0] - 3.0)).into())).unwrap();
/// let config = SolverConfig::default();
///
/// let newton = find_root(&f, RootMethod::NewtonRaphson, 1.0, &config).unwrap();
/// assert!((newton.root[0] - 3.0).abs() < 1e-8);
///
/// let interval = Interval::Bounds(vec![(0.0, 5.0)]);
/// let bisect = find_root(&f, RootMethod::Bisection, interval, &config).unwrap();
/// assert!((bisect.root[0] - 3.0).abs() < 1e-8);
/// ```
///
/// [`StartValues::resolve`]: crate::StartValues::resolve
/// [`Interval::resolve`]: crate::Interval::resolve
pub fn find_root<F>(
    f: &Differentiable<F>,
    method: RootMethod,
    guess: impl Into<Guess>,
    config: &SolverConfig,
) -> Result<RootResult, SolverError>
where
    F: Fn(&[Dual]) -> Result<Output, AdError>,
{
    let guess = guess.into();
    debug!(%method, n_vars = f.n_vars(), "find_root");

    match (method, guess) {
        (RootMethod::NewtonRaphson, Guess::Start(values)) => {
            let start = values.resolve(f.signature())?;
            NewtonRaphsonSolver::new(*config).find_root(f, &start)
        }
        (RootMethod::NewtonRaphson, Guess::Interval(_)) => Err(SolverError::MissingStartValues),
        (RootMethod::Bisection, Guess::Interval(interval)) => {
            let (start, end) = interval.resolve(f.signature())?;
            BisectionSolver::new(*config).find_root(f, &start, &end)
        }
        (RootMethod::NewtonFourier, Guess::Interval(interval)) => {
            let (start, end) = interval.resolve(f.signature())?;
            NewtonFourierSolver::new(*config).find_root(f, &start, &end)
        }
        (RootMethod::Bisection | RootMethod::NewtonFourier, Guess::Start(_)) => {
            Err(SolverError::MissingInterval)
        }
    }
}

/// [`find_root`] with the method given by name.
///
/// # Errors
/// `SolverError::InvalidMethod` for an unknown name, otherwise as
/// [`find_root`].
pub fn find_root_by_name<F>(
    f: &Differentiable<F>,
    method: &str,
    guess: impl Into<Guess>,
    config: &SolverConfig,
) -> Result<RootResult, SolverError>
where
    F: Fn(&[Dual]) -> Result<Output, AdError>,
{
    find_root(f, method.parse()?, guess, config)
}
