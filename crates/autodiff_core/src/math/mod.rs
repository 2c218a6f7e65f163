//! Differentiable elementary functions.
//!
//! Free functions accept `f64`, [`Dual`](crate::types::Dual),
//! [`Number`](crate::types::Number) or references to the latter two, and
//! return the same kind of number.

pub mod elementary;

pub use elementary::{
    arccos, arcsin, arctan, cos, cosh, exp, ln, log, logistic, sin, sinh, sqrt, tan, tanh,
    Elementary,
};
