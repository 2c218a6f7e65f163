//! Newton-Fourier bracketing solver.

use autodiff_core::differentiate::Differentiable;
use autodiff_core::types::{AdError, Dual, Output};
use ndarray::{Array1, Zip};
use tracing::{debug, warn};

use super::{check_endpoints, RootResult};
use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::linalg::{all_finite, l1_norm, linearise, InverseJacobian};
use crate::method::RootMethod;

/// Newton-Fourier root finder.
///
/// Runs two Newton sequences from the ends of an interval, `x` from `start`
/// and `z` from `end`. Both are advanced with the Jacobian at `x`:
///
/// ```text
/// x ← x - J(x)⁺ f(x)
/// z ← z - J(x)⁺ f(z)
/// ```
///
/// With `w = x - z`, convergence is measured as `max_i |w'_i| / w_i²`, the
/// contraction of the bracket relative to the square of its previous width.
/// A component that has collapsed to zero contributes 0. On success the
/// root is the mean of the two sequences.
///
/// # Example
///
/// ```
/// use autodiff_core::prelude::*;
/// use autodiff_roots::{NewtonFourierSolver, SolverConfig};
///
/// // 2x + y = 0, x - 1 = 0
/// let f = differentiate(["x", "y"], |v| {
///     Ok(Output::from(vec![2.0 * &v[0] + &v[1], &v[0] - 1.0]))
/// })
/// .unwrap();
///
/// let solver = NewtonFourierSolver::new(SolverConfig::default());
/// let result = solver.find_root(&f, &[1.0, 2.0], &[3.0, 4.0]).unwrap();
/// assert!((result.root[0] - 1.0).abs() < 1e-8);
/// assert!((result.root[1] + 2.0).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonFourierSolver {
    /// Solver configuration
    config: SolverConfig,
}

impl NewtonFourierSolver {
    /// Create a new Newton-Fourier solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` between `start` and `end`.
    ///
    /// # Returns
    ///
    /// * `Ok(result)` - bracket contraction fell below the threshold
    /// * `Err(SolverError::IntervalEndpointLength)` / `VariableCount` - bad bounds
    /// * `Err(SolverError::SingularJacobian)` - scalar derivative at `x` is zero
    /// * `Err(SolverError::NumericalInstability)` - an iterate became non-finite
    /// * `Err(SolverError::CandidateRoots)` - both sequences satisfy the
    ///   threshold on `|f|` but never met
    /// * `Err(SolverError::MaxIterationsExceeded)` - failed to converge
    pub fn find_root<F>(
        &self,
        f: &Differentiable<F>,
        start: &[f64],
        end: &[f64],
    ) -> Result<RootResult, SolverError>
    where
        F: Fn(&[Dual]) -> Result<Output, AdError>,
    {
        let n_vars = f.n_vars();
        check_endpoints(start, end, n_vars)?;
        let mut x = Array1::from(start.to_vec());
        let mut z = Array1::from(end.to_vec());
        let mut width = &x - &z;

        for iteration in 0..self.config.max_iterations {
            let (fx, jacobian) = linearise(f.evaluate_at(&x.to_vec())?, n_vars)?;
            let fz = f.value_at(&z.to_vec())?;
            let inverse = InverseJacobian::new(&jacobian, iteration)?;

            x = &x - &inverse.step(&fx);
            z = &z - &inverse.step(&fz);
            if !all_finite(&x) || !all_finite(&z) {
                warn!(iteration, "newton-fourier diverged");
                return Err(SolverError::NumericalInstability(
                    "Newton-Fourier iteration produced non-finite value".to_string(),
                ));
            }

            let next_width = &x - &z;
            let contraction = contraction(&next_width, &width);
            debug!(iteration, contraction, "newton-fourier");

            if contraction < self.config.threshold {
                let root = (&x + &z) / 2.0;
                let residual = l1_norm(&f.value_at(&root.to_vec())?);
                return Ok(RootResult {
                    root,
                    iterations: iteration + 1,
                    residual,
                    method: RootMethod::NewtonFourier,
                });
            }
            width = next_width;
        }

        let fx = l1_norm(&f.value_at(&x.to_vec())?);
        let fz = l1_norm(&f.value_at(&z.to_vec())?);
        if fx < self.config.threshold && fz < self.config.threshold {
            warn!("newton-fourier stopped with two candidate roots");
            return Err(SolverError::CandidateRoots {
                first: x.to_vec(),
                second: z.to_vec(),
            });
        }

        warn!(
            iterations = self.config.max_iterations,
            "newton-fourier did not converge"
        );
        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

/// `max_i |next_i| / previous_i²`, with collapsed components counting as 0.
fn contraction(next: &Array1<f64>, previous: &Array1<f64>) -> f64 {
    Zip::from(next)
        .and(previous)
        .fold(0.0_f64, |worst, &n, &p| {
            let ratio = if n == 0.0 { 0.0 } else { n.abs() / (p * p) };
            worst.max(ratio)
        })
}
