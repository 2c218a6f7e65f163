//! Core types: dual numbers, constants-or-duals, tensors and errors.
//!
//! This module provides:
//! - [`Dual`]: value/derivative pair with operator overloading
//! - [`Number`]: either a constant or a dual number
//! - [`Output`]: scalar or vector return value of a differentiated function
//! - [`Tensor`] and [`IntoTensor`]: rank-limited storage and conversions
//! - [`AdError`]: structured errors for the whole core layer

pub mod dual;
pub mod error;
pub mod number;
pub mod tensor;

pub use dual::Dual;
pub use error::AdError;
pub use number::{Number, Output};
pub use tensor::{IntoTensor, Tensor};
