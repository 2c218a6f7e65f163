//! Multi-dimensional bisection solver.

use autodiff_core::differentiate::Differentiable;
use autodiff_core::types::{AdError, Dual, Output};
use ndarray::Array1;
use tracing::{debug, warn};

use super::{check_endpoints, RootResult};
use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::linalg::l1_norm;
use crate::method::RootMethod;

/// Bisection over a hyper-rectangle.
///
/// The box spanned by `start` and `end` must show a sign change in every
/// output component across its 2ⁿ corners. Each iteration evaluates the
/// midpoint `c`; the new box spans `c` and the first corner whose value has
/// the opposite sign to `f(c)` in every component.
///
/// No derivatives are used, so `f` is only evaluated through
/// [`Differentiable::value_at`].
///
/// # Example
///
/// ```
/// use autodiff_core::prelude::*;
/// use autodiff_roots::{BisectionSolver, SolverConfig};
///
/// let f = differentiate(["x"], |v| Ok((v[0].powi(2) - 2.0).into())).unwrap();
/// let solver = BisectionSolver::new(SolverConfig::default());
///
/// let result = solver.find_root(&f, &[0.0], &[2.0]).unwrap();
/// assert!((result.root[0] - std::f64::consts::SQRT_2).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct BisectionSolver {
    /// Solver configuration
    config: SolverConfig,
}

/// Largest box dimension whose corners can be counted in a `usize`.
const MAX_DIMENSION: usize = usize::BITS as usize - 1;

/// Corners of the current box with their function values.
struct Corners {
    points: Vec<Array1<f64>>,
    values: Vec<Array1<f64>>,
}

impl Corners {
    /// Evaluate `f` at all 2ⁿ corners, first parameter varying slowest.
    fn evaluate<F>(
        f: &Differentiable<F>,
        start: &Array1<f64>,
        end: &Array1<f64>,
    ) -> Result<Self, SolverError>
    where
        F: Fn(&[Dual]) -> Result<Output, AdError>,
    {
        let n = start.len();
        if n > MAX_DIMENSION {
            return Err(SolverError::TooManyDimensions {
                dimension: n,
                max: MAX_DIMENSION,
            });
        }
        let points: Vec<Array1<f64>> = (0..1usize << n)
            .map(|k| {
                Array1::from_shape_fn(n, |i| {
                    if (k >> (n - 1 - i)) & 1 == 0 {
                        start[i]
                    } else {
                        end[i]
                    }
                })
            })
            .collect();
        let values = points
            .iter()
            .map(|p| f.value_at(&p.to_vec()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { points, values })
    }

    /// First corner where the L1 norm of `f` is below `threshold`.
    fn near_root(&self, threshold: f64) -> Option<(&Array1<f64>, f64)> {
        self.points
            .iter()
            .zip(&self.values)
            .map(|(point, value)| (point, l1_norm(value)))
            .find(|(_, residual)| *residual < threshold)
    }

    /// Output components whose sign is the same at every corner.
    fn without_sign_change(&self) -> Vec<usize> {
        let components = self.values.first().map_or(0, Array1::len);
        (0..components)
            .filter(|&j| {
                let first = self.values[0][j].signum_or_zero();
                self.values.iter().all(|v| v[j].signum_or_zero() == first)
            })
            .collect()
    }

    /// First corner whose value straddles `fc` in every component.
    fn straddling(&self, fc: &Array1<f64>) -> Option<&Array1<f64>> {
        self.points
            .iter()
            .zip(&self.values)
            .find(|(_, value)| value.iter().zip(fc.iter()).all(|(a, b)| a * b < 0.0))
            .map(|(point, _)| point)
    }
}

trait SignumOrZero {
    fn signum_or_zero(self) -> i8;
}

impl SignumOrZero for f64 {
    fn signum_or_zero(self) -> i8 {
        if self > 0.0 {
            1
        } else if self < 0.0 {
            -1
        } else {
            0
        }
    }
}

impl BisectionSolver {
    /// Create a new bisection solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` inside the box spanned by `start` and `end`.
    ///
    /// # Returns
    ///
    /// * `Ok(result)` - L1 norm of `f` at the midpoint is below the threshold,
    ///   or no corner straddles the midpoint but one is itself a root
    /// * `Err(SolverError::TooManyDimensions)` - too many variables to enumerate
    ///   the corners
    /// * `Err(SolverError::IntervalEndpointLength)` / `VariableCount` - bad bounds
    /// * `Err(SolverError::NoSignChange)` - some component keeps its sign on
    ///   every corner of the initial box
    /// * `Err(SolverError::BracketLost)` - no corner straddles the midpoint
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
        check_endpoints(start, end, f.n_vars())?;
        let mut lower = Array1::from(start.to_vec());
        let mut upper = Array1::from(end.to_vec());

        let mut corners = Corners::evaluate(f, &lower, &upper)?;
        let missing = corners.without_sign_change();
        if !missing.is_empty() {
            warn!(components = ?missing, "bisection interval has no sign change");
            return Err(SolverError::NoSignChange {
                components: missing,
            });
        }

        for iteration in 0..self.config.max_iterations {
            let midpoint = (&lower + &upper) / 2.0;
            let fc = f.value_at(&midpoint.to_vec())?;
            let residual = l1_norm(&fc);
            debug!(iteration, residual, "bisection");

            if residual < self.config.threshold {
                return Ok(RootResult {
                    root: midpoint,
                    iterations: iteration,
                    residual,
                    method: RootMethod::Bisection,
                });
            }

            // a corner with a zero component never straddles, but may itself be the root
            let Some(corner) = corners.straddling(&fc) else {
                return self.corner_root(&corners, iteration).ok_or_else(|| {
                    warn!(iteration, "no corner straddles the midpoint");
                    SolverError::BracketLost { iteration }
                });
            };
            lower = Array1::from_shape_fn(midpoint.len(), |i| corner[i].min(midpoint[i]));
            upper = Array1::from_shape_fn(midpoint.len(), |i| corner[i].max(midpoint[i]));

            corners = Corners::evaluate(f, &lower, &upper)?;
            if !corners.without_sign_change().is_empty() {
                warn!(iteration, "bisection lost its bracket");
                return Err(SolverError::BracketLost { iteration });
            }
        }

        warn!(
            iterations = self.config.max_iterations,
            "bisection did not converge"
        );
        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    fn corner_root(&self, corners: &Corners, iterations: usize) -> Option<RootResult> {
        let (point, residual) = corners.near_root(self.config.threshold)?;
        debug!(iterations, residual, "bisection corner is a root");
        Some(RootResult {
            root: point.clone(),
            iterations,
            residual,
            method: RootMethod::Bisection,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}
