//! Root-finding method selection.

use std::fmt;
use std::str::FromStr;

use crate::error::SolverError;

/// Available root-finding algorithms.
///
/// Parsed case-insensitively from its canonical name or an alias:
///
/// | method          | accepted names                      |
/// |-----------------|-------------------------------------|
/// | `NewtonRaphson` | `newton-raphson`, `newton`, `n-r`   |
/// | `Bisection`     | `bisection`, `bisect`, `b`          |
/// | `NewtonFourier` | `newton-fourier`, `n-f`             |
///
/// # Examples
/// ```
/// use autodiff_roots::RootMethod;
///
/// let method: RootMethod = "Newton".parse().unwrap();
/// assert_eq!(method, RootMethod::NewtonRaphson);
/// assert!("secant".parse::<RootMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RootMethod {
    /// Newton-Raphson iteration from start values.
    NewtonRaphson,
    /// Multi-dimensional bisection over a hyper-rectangle.
    Bisection,
    /// Newton-Fourier bracketing from two interval endpoints.
    NewtonFourier,
}

impl RootMethod {
    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            RootMethod::NewtonRaphson => "newton-raphson",
            RootMethod::Bisection => "bisection",
            RootMethod::NewtonFourier => "newton-fourier",
        }
    }

    /// True if the method needs an interval rather than start values.
    pub fn requires_interval(&self) -> bool {
        !matches!(self, RootMethod::NewtonRaphson)
    }
}

impl FromStr for RootMethod {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newton-raphson" | "newton" | "n-r" => Ok(RootMethod::NewtonRaphson),
            "bisection" | "bisect" | "b" => Ok(RootMethod::Bisection),
            "newton-fourier" | "n-f" => Ok(RootMethod::NewtonFourier),
            _ => Err(SolverError::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for RootMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
