//! Solver configuration types.

/// Configuration for root-finding algorithms.
///
/// Shared by all three solvers: the convergence threshold and the iteration
/// cap. The cap is a hard bound on work, not a timeout.
///
/// # Example
///
/// ```
/// use autodiff_roots::SolverConfig;
///
/// // Use default configuration
/// let config = SolverConfig::default();
/// assert_eq!(config.threshold, 1e-8);
/// assert_eq!(config.max_iterations, 2000);
///
/// // Custom configuration
/// let custom = SolverConfig {
///     threshold: 1e-12,
///     max_iterations: 200,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Convergence threshold.
    ///
    /// Newton-Raphson and bisection stop when the L1 norm of `f(x)` drops
    /// below it; Newton-Fourier compares its bracket contraction ratio.
    pub threshold: f64,

    /// Maximum number of iterations before giving up.
    ///
    /// If the solver doesn't converge within this limit,
    /// it returns `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    /// Default values:
    /// - `threshold`: 1e-8
    /// - `max_iterations`: 2000
    fn default() -> Self {
        Self {
            threshold: 1e-8,
            max_iterations: 2000,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with specified values.
    ///
    /// # Panics
    ///
    /// Panics if `threshold <= 0` or `max_iterations == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use autodiff_roots::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-12, 200);
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(threshold: f64, max_iterations: usize) -> Self {
        assert!(threshold > 0.0, "threshold must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            threshold,
            max_iterations,
        }
    }

    /// Tighter threshold (1e-14) and more iterations (10000).
    pub fn high_precision() -> Self {
        Self {
            threshold: 1e-14,
            max_iterations: 10_000,
        }
    }

    /// Relaxed threshold (1e-6) and fewer iterations (100).
    pub fn fast() -> Self {
        Self {
            threshold: 1e-6,
            max_iterations: 100,
        }
    }
}
