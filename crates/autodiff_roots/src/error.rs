//! Error types for root finding.
//!
//! [`SolverError`] covers three families:
//! - Input errors: unknown method names and malformed start values or intervals
//! - Convergence errors: singular Jacobians, lost brackets, exhausted iterations
//! - Differentiation errors forwarded from `autodiff_core`

use autodiff_core::types::AdError;
use thiserror::Error;

/// Root-finding errors.
///
/// Every failure mode is a distinct variant so callers can tell a malformed
/// request apart from a solver that ran but did not converge.
///
/// # Variants
/// - `InvalidMethod`: method name not among the accepted aliases
/// - `MissingStartValues` / `MissingInterval`: required guess absent
/// - `VariableCount`, `MissingKey`, `TooManyKeys`, `IntervalKeyMismatch`,
///   `IntervalEndpointLength`: guess does not match the function's parameters
/// - `TooManyDimensions`: box has more corners than can be enumerated
/// - `JacobianShape`: residual vector and Jacobian cannot be combined
/// - `SingularJacobian`, `NoSignChange`, `BracketLost`, `MaxIterationsExceeded`,
///   `CandidateRoots`, `NumericalInstability`: the solver did not converge
/// - `Differentiation`: the function or its derivative could not be evaluated
///
/// # Examples
/// ```
/// use autodiff_roots::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// assert!(err.is_non_convergence());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Method name not recognised.
    #[error("Invalid method '{0}': expected newton-raphson, bisection or newton-fourier")]
    InvalidMethod(String),

    /// Newton-Raphson called without start values.
    #[error("Start values are required for this method")]
    MissingStartValues,

    /// Bracketing method called without an interval.
    #[error("An interval is required for this method")]
    MissingInterval,

    /// Number of values differs from the number of parameters.
    #[error("Incorrect number of variables: expected {expected}, got {got}")]
    VariableCount {
        /// Number of function parameters
        expected: usize,
        /// Number of values supplied
        got: usize,
    },

    /// A parameter has no entry in a named mapping.
    #[error("Parameter '{0}' missing from the supplied values")]
    MissingKey(String),

    /// A named mapping has entries that are not parameters.
    #[error("Too many keys: expected {expected}, got {got}")]
    TooManyKeys {
        /// Number of function parameters
        expected: usize,
        /// Number of keys supplied
        got: usize,
    },

    /// Named interval endpoints have different key counts.
    #[error("Interval start has {start} keys but interval end has {end}")]
    IntervalKeyMismatch {
        /// Keys in the start mapping
        start: usize,
        /// Keys in the end mapping
        end: usize,
    },

    /// Interval endpoints have different lengths.
    #[error("Interval start has {start} values but interval end has {end}")]
    IntervalEndpointLength {
        /// Length of the start point
        start: usize,
        /// Length of the end point
        end: usize,
    },

    /// Bisection box has more corners than can be enumerated.
    #[error("Cannot bisect over {dimension} variables: at most {max} are supported")]
    TooManyDimensions {
        /// Number of variables in the box
        dimension: usize,
        /// Largest supported number of variables
        max: usize,
    },

    /// Residuals and Jacobian have incompatible shapes.
    #[error("Cannot combine {residuals} residuals with a {rows}x{columns} Jacobian")]
    JacobianShape {
        /// Number of residual components
        residuals: usize,
        /// Jacobian rows
        rows: usize,
        /// Jacobian columns
        columns: usize,
    },

    /// Scalar derivative is exactly zero.
    #[error("Jacobian is singular at iteration {iteration}")]
    SingularJacobian {
        /// Iteration at which the step could not be taken
        iteration: usize,
    },

    /// Some output components do not change sign over the interval.
    #[error("No sign change over the interval for output components {components:?}")]
    NoSignChange {
        /// Indices of the components without a sign change
        components: Vec<usize>,
    },

    /// Shrinking the interval lost the sign change.
    #[error("Bracket lost at iteration {iteration}")]
    BracketLost {
        /// Iteration at which no straddling corner remained
        iteration: usize,
    },

    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Both Newton-Fourier endpoints satisfy the threshold but never met.
    #[error("Two candidate roots found: {first:?} and {second:?}")]
    CandidateRoots {
        /// Final lower sequence point
        first: Vec<f64>,
        /// Final upper sequence point
        second: Vec<f64>,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Function evaluation or differentiation failed.
    #[error("Differentiation failed: {0}")]
    #[cfg_attr(feature = "serde", serde(skip))]
    Differentiation(#[from] AdError),
}

impl SolverError {
    /// Check if the solver ran but did not converge.
    pub fn is_non_convergence(&self) -> bool {
        matches!(
            self,
            SolverError::SingularJacobian { .. }
                | SolverError::NoSignChange { .. }
                | SolverError::BracketLost { .. }
                | SolverError::MaxIterationsExceeded { .. }
                | SolverError::CandidateRoots { .. }
                | SolverError::NumericalInstability(_)
        )
    }

    /// Check if the request itself was malformed.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SolverError::InvalidMethod(_)
                | SolverError::MissingStartValues
                | SolverError::MissingInterval
                | SolverError::VariableCount { .. }
                | SolverError::MissingKey(_)
                | SolverError::TooManyKeys { .. }
                | SolverError::IntervalKeyMismatch { .. }
                | SolverError::IntervalEndpointLength { .. }
                | SolverError::TooManyDimensions { .. }
        )
    }
}
