//! Derivative extraction for functions written against [`Dual`](crate::types::Dual).
//!
//! A function is paired with an explicit [`Signature`] naming its
//! parameters. Calling it through [`Differentiable`] seeds every argument as
//! an independent variable, runs the function once and returns the value
//! together with the gradient (scalar output) or Jacobian (vector output).
//!
//! ## Usage
//!
//! ```
//! use autodiff_core::differentiate::{differentiate, Arguments};
//! use autodiff_core::math::{sin, sqrt, tan};
//!
//! // f(x) = sin(3x²) + tan(√(7x))
//! let f = differentiate(["x"], |v| {
//!     let x = &v[0];
//!     Ok((sin(3.0 * x.powi(2)) + tan(sqrt(7.0 * x)?)).into())
//! })
//! .unwrap();
//!
//! let grad = f.derivative(Arguments::new().named("x", 5.0)).unwrap();
//! assert!((grad.as_gradient().unwrap()[0] - 28.3316).abs() < 1e-4);
//! ```

pub mod arguments;
pub mod extractor;
pub mod signature;

pub use arguments::Arguments;
pub use extractor::{differentiate, Derivative, Differentiable, Evaluation};
pub use signature::Signature;
