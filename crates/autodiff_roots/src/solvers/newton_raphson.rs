//! Newton-Raphson root-finding solver.

use autodiff_core::differentiate::Differentiable;
use autodiff_core::types::{AdError, Dual, Output};
use ndarray::Array1;
use tracing::{debug, warn};

use super::{check_dimension, RootResult};
use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::linalg::{all_finite, l1_norm, linearise, InverseJacobian};
use crate::method::RootMethod;

/// Newton-Raphson root finder driven by automatic differentiation.
///
/// Uses Newton's method: `x_{n+1} = x_n - J(x_n)⁺ f(x_n)`, where `J⁺` is
/// the reciprocal of the derivative for a scalar function and the
/// Moore-Penrose pseudoinverse of the Jacobian otherwise. The pseudoinverse
/// keeps non-square and rank-deficient systems moving instead of failing.
///
/// # Convergence
///
/// Converges quadratically near a simple root. It may fail if:
/// - The scalar derivative is exactly zero (`SingularJacobian`)
/// - The initial guess is far from the root
/// - The function has no real root at all
///
/// # Example
///
/// ```
/// use autodiff_core::prelude::*;
/// use autodiff_roots::{NewtonRaphsonSolver, SolverConfig};
///
/// // (x + 2)(x - 3) = 0
/// let f = differentiate(["x"], |v| Ok(((&v[0] + 2.0) * (&v[0] - 3.0)).into())).unwrap();
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let result = solver.find_root(&f, &[1.0]).unwrap();
/// assert!((result.root[0] - 3.0).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver {
    /// Solver configuration
    config: SolverConfig,
}

impl NewtonRaphsonSolver {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` starting from `start` (one value per parameter).
    ///
    /// # Returns
    ///
    /// * `Ok(result)` - `result.residual` (L1 norm of `f`) is below the threshold
    /// * `Err(SolverError::VariableCount)` - `start` has the wrong length
    /// * `Err(SolverError::SingularJacobian)` - scalar derivative is zero
    /// * `Err(SolverError::NumericalInstability)` - an iterate became non-finite
    /// * `Err(SolverError::MaxIterationsExceeded)` - failed to converge
    pub fn find_root<F>(
        &self,
        f: &Differentiable<F>,
        start: &[f64],
    ) -> Result<RootResult, SolverError>
    where
        F: Fn(&[Dual]) -> Result<Output, AdError>,
    {
        let n_vars = f.n_vars();
        check_dimension(start.len(), n_vars)?;
        let mut x = Array1::from(start.to_vec());

        for iteration in 0..self.config.max_iterations {
            let (fx, jacobian) = linearise(f.evaluate_at(&x.to_vec())?, n_vars)?;
            let residual = l1_norm(&fx);
            debug!(iteration, residual, "newton-raphson");

            if residual < self.config.threshold {
                return Ok(self.result(x, iteration, residual));
            }

            let inverse = InverseJacobian::new(&jacobian, iteration)?;
            x = &x - &inverse.step(&fx);

            if !all_finite(&x) {
                warn!(iteration, "newton-raphson diverged");
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
        }

        // the last update has not been checked yet
        let residual = l1_norm(&f.value_at(&x.to_vec())?);
        if residual < self.config.threshold {
            return Ok(self.result(x, self.config.max_iterations, residual));
        }

        warn!(
            iterations = self.config.max_iterations,
            residual, "newton-raphson did not converge"
        );
        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn result(&self, root: Array1<f64>, iterations: usize, residual: f64) -> RootResult {
        RootResult {
            root,
            iterations,
            residual,
            method: RootMethod::NewtonRaphson,
        }
    }
}
