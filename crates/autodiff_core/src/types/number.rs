//! Numbers that are either plain constants or dual numbers.
//!
//! Functions handed to the derivative extractor mix seeded variables with
//! literal constants. [`Number`] carries either one, and arithmetic between
//! two constants stays a constant so no derivative storage is allocated for
//! purely constant sub-expressions.
//!
//! [`Output`] is what a differentiated function returns: one number, or an
//! ordered list of numbers (one per output component).

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::Pow;

use super::dual::{value_ordering, Dual};
use super::tensor::IntoTensor;

/// A real constant or a dual number.
///
/// # Examples
/// ```
/// use autodiff_core::types::{Dual, Number};
///
/// let x = Number::from(Dual::variable(2.0).unwrap());
/// let y = &x * 3.0 + Number::from(1.0);
/// assert!(y.is_dual());
/// assert_eq!(y.value_scalar(), Some(7.0));
/// ```
#[derive(Debug, Clone)]
pub enum Number {
    /// Constant without derivative information.
    Constant(f64),
    /// Value carrying derivatives.
    Dual(Dual),
}

impl Number {
    /// True for the `Dual` variant.
    pub fn is_dual(&self) -> bool {
        matches!(self, Number::Dual(_))
    }

    /// The dual number, if any.
    pub fn as_dual(&self) -> Option<&Dual> {
        match self {
            Number::Dual(d) => Some(d),
            Number::Constant(_) => None,
        }
    }

    /// The value when it is a scalar.
    pub fn value_scalar(&self) -> Option<f64> {
        match self {
            Number::Constant(c) => Some(*c),
            Number::Dual(d) => d.scalar_value(),
        }
    }

    /// Promote to a dual number (constants get a zero derivative).
    pub fn into_dual(self) -> Dual {
        match self {
            Number::Constant(c) => Dual::from(c),
            Number::Dual(d) => d,
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Constant(value)
    }
}

impl From<Dual> for Number {
    fn from(value: Dual) -> Self {
        Number::Dual(value)
    }
}

impl From<&Dual> for Number {
    fn from(value: &Dual) -> Self {
        Number::Dual(value.clone())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Constant(c) => write!(f, "{}", c),
            Number::Dual(d) => write!(f, "{}", d),
        }
    }
}

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Number::Constant(c) => Number::Constant(-c),
            Number::Dual(d) => Number::Dual(-d),
        }
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        -&self
    }
}

/// Implement a binary operator on `Number`, dispatching on the variants.
/// Constant-constant pairs stay constants.
macro_rules! impl_number_binary_op {
    ($trait:ident, $method:ident, $const_op:expr) => {
        impl $trait<&Number> for &Number {
            type Output = Number;
            fn $method(self, rhs: &Number) -> Number {
                match (self, rhs) {
                    (Number::Constant(a), Number::Constant(b)) => {
                        Number::Constant($const_op(*a, *b))
                    }
                    (Number::Constant(a), Number::Dual(b)) => Number::Dual($trait::$method(*a, b)),
                    (Number::Dual(a), Number::Constant(b)) => Number::Dual($trait::$method(a, *b)),
                    (Number::Dual(a), Number::Dual(b)) => Number::Dual($trait::$method(a, b)),
                }
            }
        }

        impl $trait<Number> for Number {
            type Output = Number;
            fn $method(self, rhs: Number) -> Number {
                $trait::$method(&self, &rhs)
            }
        }

        impl $trait<&Number> for Number {
            type Output = Number;
            fn $method(self, rhs: &Number) -> Number {
                $trait::$method(&self, rhs)
            }
        }

        impl $trait<Number> for &Number {
            type Output = Number;
            fn $method(self, rhs: Number) -> Number {
                $trait::$method(self, &rhs)
            }
        }

        impl $trait<f64> for &Number {
            type Output = Number;
            fn $method(self, rhs: f64) -> Number {
                $trait::$method(self, &Number::Constant(rhs))
            }
        }

        impl $trait<f64> for Number {
            type Output = Number;
            fn $method(self, rhs: f64) -> Number {
                $trait::$method(&self, &Number::Constant(rhs))
            }
        }

        impl $trait<&Number> for f64 {
            type Output = Number;
            fn $method(self, rhs: &Number) -> Number {
                $trait::$method(&Number::Constant(self), rhs)
            }
        }

        impl $trait<Number> for f64 {
            type Output = Number;
            fn $method(self, rhs: Number) -> Number {
                $trait::$method(&Number::Constant(self), &rhs)
            }
        }
    };
}

impl_number_binary_op!(Add, add, |a: f64, b: f64| a + b);
impl_number_binary_op!(Sub, sub, |a: f64, b: f64| a - b);
impl_number_binary_op!(Mul, mul, |a: f64, b: f64| a * b);
impl_number_binary_op!(Div, div, |a: f64, b: f64| a / b);
impl_number_binary_op!(Pow, pow, f64::powf);

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialEq<f64> for Number {
    fn eq(&self, other: &f64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Constant(a), Number::Constant(b)) => a.partial_cmp(b),
            (Number::Constant(a), Number::Dual(b)) => {
                value_ordering(&(*a).into_tensor(), b.value())
            }
            (Number::Dual(a), Number::Constant(b)) => {
                value_ordering(a.value(), &(*b).into_tensor())
            }
            (Number::Dual(a), Number::Dual(b)) => a.partial_cmp(b),
        }
    }
}

impl PartialOrd<f64> for Number {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.partial_cmp(&Number::Constant(*other))
    }
}

/// Return value of a function handed to the derivative extractor.
///
/// A `Scalar` output yields a gradient; a `Vector` output yields one
/// Jacobian row per component.
#[derive(Debug, Clone)]
pub enum Output {
    /// Single output component.
    Scalar(Number),
    /// Ordered output components.
    Vector(Vec<Number>),
}

impl Output {
    /// Output components in order (one for a scalar output).
    pub fn components(&self) -> &[Number] {
        match self {
            Output::Scalar(n) => std::slice::from_ref(n),
            Output::Vector(v) => v,
        }
    }
}

impl From<Number> for Output {
    fn from(value: Number) -> Self {
        Output::Scalar(value)
    }
}

impl From<Dual> for Output {
    fn from(value: Dual) -> Self {
        Output::Scalar(Number::Dual(value))
    }
}

impl From<f64> for Output {
    fn from(value: f64) -> Self {
        Output::Scalar(Number::Constant(value))
    }
}

impl<T: Into<Number>> From<Vec<T>> for Output {
    fn from(values: Vec<T>) -> Self {
        Output::Vector(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Number>, const N: usize> From<[T; N]> for Output {
    fn from(values: [T; N]) -> Self {
        Output::Vector(values.into_iter().map(Into::into).collect())
    }
}
