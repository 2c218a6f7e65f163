//! Root-finding solvers.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: quadratic convergence from a starting point,
//!   pseudoinverse steps for systems
//! - [`BisectionSolver`]: halves a hyper-rectangle whose corners straddle a root
//! - [`NewtonFourierSolver`]: advances both ends of an interval with a shared
//!   Jacobian until they meet
//!
//! All three take the function as a [`Differentiable`], so derivatives come
//! from dual-number evaluation rather than a hand-written `f'`.
//!
//! ## Configuration
//!
//! Every solver holds a [`SolverConfig`]:
//! - `threshold`: convergence threshold (default: 1e-8)
//! - `max_iterations`: maximum iteration count (default: 2000)
//!
//! ## Examples
//!
//! ```
//! use autodiff_core::prelude::*;
//! use autodiff_roots::{NewtonRaphsonSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 (find √2)
//! let f = differentiate(["x"], |v| Ok((v[0].powi(2) - 2.0).into())).unwrap();
//! let solver = NewtonRaphsonSolver::new(SolverConfig::default());
//!
//! let result = solver.find_root(&f, &[1.0]).unwrap();
//! assert!((result.root[0] - std::f64::consts::SQRT_2).abs() < 1e-8);
//! ```
//!
//! [`Differentiable`]: autodiff_core::differentiate::Differentiable
//! [`SolverConfig`]: crate::SolverConfig

mod bisection;
mod newton_fourier;
mod newton_raphson;

pub use bisection::BisectionSolver;
pub use newton_fourier::NewtonFourierSolver;
pub use newton_raphson::NewtonRaphsonSolver;

use ndarray::Array1;

use crate::error::SolverError;
use crate::method::RootMethod;

/// Result of a successful root search.
#[derive(Debug, Clone, PartialEq)]
pub struct RootResult {
    /// Root location, one entry per parameter.
    pub root: Array1<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// L1 norm of `f(root)`.
    pub residual: f64,
    /// Method that produced the root.
    pub method: RootMethod,
}

impl RootResult {
    /// Root of a one-parameter function.
    pub fn scalar(&self) -> Option<f64> {
        match self.root.len() {
            1 => self.root.first().copied(),
            _ => None,
        }
    }
}

fn check_dimension(got: usize, expected: usize) -> Result<(), SolverError> {
    if got == expected {
        Ok(())
    } else {
        Err(SolverError::VariableCount { expected, got })
    }
}

fn check_endpoints(start: &[f64], end: &[f64], n_vars: usize) -> Result<(), SolverError> {
    if start.len() != end.len() {
        return Err(SolverError::IntervalEndpointLength {
            start: start.len(),
            end: end.len(),
        });
    }
    check_dimension(start.len(), n_vars)
}
