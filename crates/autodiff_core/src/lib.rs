//! # autodiff_core: Forward-Mode Automatic Differentiation
//!
//! ## Core Layer Role
//!
//! autodiff_core is the bottom layer of the workspace, providing:
//! - Dual numbers with exact derivative propagation (`types::dual`)
//! - Constants-or-duals and function outputs (`types::number`)
//! - Differentiable elementary functions (`math::elementary`)
//! - Seeding and gradient/Jacobian extraction (`differentiate`)
//! - Error type: `AdError` (`types::error`)
//!
//! ## Dependencies
//!
//! - ndarray: broadcasting tensors for values and derivatives
//! - num-traits: the `Pow` operator trait
//! - thiserror: structured errors
//! - tracing: trace events from derivative extraction
//!
//! ## Usage Examples
//!
//! ```rust
//! use autodiff_core::differentiate::differentiate;
//! use autodiff_core::math::exp;
//! use autodiff_core::types::Dual;
//!
//! // Dual arithmetic
//! let x = Dual::new(3.0, 1.0).unwrap();
//! let y = 3.0 * &x - 4.0;
//! assert_eq!(y.scalar_value(), Some(5.0));
//!
//! // Jacobian of f(x, y) = (x·y, eˣ)
//! let f = differentiate(["x", "y"], |v| Ok(vec![&v[0] * &v[1], exp(&v[0])].into())).unwrap();
//! let eval = f.evaluate_at(&[0.0, 2.0]).unwrap();
//! let jacobian = eval.derivative.as_jacobian().unwrap();
//! assert_eq!(jacobian.row(0).to_vec(), vec![2.0, 0.0]);
//! assert_eq!(jacobian.row(1).to_vec(), vec![1.0, 0.0]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod differentiate;
pub mod math;
pub mod types;

/// Commonly used items.
pub mod prelude {
    pub use crate::differentiate::{
        differentiate, Arguments, Derivative, Differentiable, Evaluation, Signature,
    };
    pub use crate::math::*;
    pub use crate::types::{AdError, Dual, IntoTensor, Number, Output, Tensor};
    pub use num_traits::Pow;
}
