//! # autodiff_roots: Root Finding on Differentiable Functions
//!
//! ## Solver Layer Role
//!
//! autodiff_roots sits on top of `autodiff_core` and provides:
//! - Newton-Raphson, bisection and Newton-Fourier solvers (`solvers`)
//! - A single [`find_root`] entry point selecting the solver by [`RootMethod`]
//! - Start-value and interval validation against a function's parameters (`input`)
//! - Solver configuration: [`SolverConfig`]
//! - Error type: [`SolverError`]
//!
//! Jacobians come from dual-number evaluation; systems are stepped with a
//! Moore-Penrose pseudoinverse so non-square Jacobians are accepted.
//!
//! ## Dependencies
//!
//! - autodiff_core: dual numbers and derivative extraction
//! - ndarray: iterates and residual vectors
//! - nalgebra: SVD pseudoinverse
//! - thiserror: structured errors
//! - tracing: per-iteration debug events, warnings on non-convergence
//! - serde: serialisation of configuration and inputs (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use autodiff_core::prelude::*;
//! use autodiff_roots::{find_root, Interval, RootMethod, SolverConfig};
//!
//! // 2x + y = 0, x - 1 = 0
//! let f = differentiate(["x", "y"], |v| {
//!     Ok(Output::from(vec![2.0 * &v[0] + &v[1], &v[0] - 1.0]))
//! })
//! .unwrap();
//! let config = SolverConfig::default();
//!
//! let newton = find_root(&f, RootMethod::NewtonRaphson, vec![1.0, 2.0], &config).unwrap();
//! assert!((newton.root[0] - 1.0).abs() < 1e-8);
//!
//! let interval = Interval::from_endpoints(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();
//! let fourier = find_root(&f, RootMethod::NewtonFourier, interval, &config).unwrap();
//! assert!((fourier.root[1] + 2.0).abs() < 1e-8);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: derive `Serialize`/`Deserialize` for configuration, methods,
//!   guesses and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

mod config;
mod dispatch;
mod error;
mod input;
mod linalg;
mod method;
pub mod solvers;

pub use config::SolverConfig;
pub use dispatch::{find_root, find_root_by_name};
pub use error::SolverError;
pub use input::{Guess, Interval, StartValues};
pub use method::RootMethod;
pub use solvers::{
    BisectionSolver, NewtonFourierSolver, NewtonRaphsonSolver, RootResult,
};

/// Commonly used items.
pub mod prelude {
    pub use crate::{
        find_root, find_root_by_name, Guess, Interval, RootMethod, RootResult, SolverConfig,
        SolverError, StartValues,
    };
}
