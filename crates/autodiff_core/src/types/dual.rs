//! Dual number type for forward-mode automatic differentiation.
//!
//! A [`Dual`] pairs a value with its derivative with respect to a set of
//! seeded independent variables. Every arithmetic operation returns a new
//! dual number whose derivative follows the corresponding calculus rule, so
//! composing operations propagates exact partial derivatives.
//!
//! ## Shapes
//!
//! | value | derivative | meaning                                          |
//! |-------|------------|--------------------------------------------------|
//! | `[]`  | `[]`       | scalar with a single directional derivative      |
//! | `[]`  | `[M]`      | scalar differentiated against `M` variables      |
//! | `[k]` | `[]`       | vector with a uniform derivative (constants)     |
//! | `[k]` | `[k]`      | vector with one derivative per element           |
//! | `[k]` | `[M, k]`   | vector differentiated against `M` variables      |
//!
//! Arithmetic relies on ndarray co-broadcasting along the trailing axis, so a
//! `[k]` value scales every row of an `[M, k]` derivative. When a scalar-valued
//! operand with an `[M]` derivative meets a vector-valued one, its derivative
//! is first lifted to `[M, k]`, one column per element.
//!
//! ## Division and powers
//!
//! Division by zero is not an error: it follows IEEE semantics and yields
//! `inf` or `nan` in the value and derivative. Powers use the generalised rule
//! `d(a^b) = b·a^(b-1)·da + a^b·ln|a|·db`, except where the base is exactly
//! zero, where only `b·a^(b-1)·da` is kept.
//!
//! ## Usage
//!
//! ```
//! use autodiff_core::types::Dual;
//!
//! let x = Dual::new(3.0, 1.0).unwrap();
//! let f = 3.0 * &x - 4.0;
//! assert_eq!(f.scalar_value(), Some(5.0));
//! assert_eq!(f.derivative().first(), Some(&3.0));
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use ndarray::{ArrayD, Axis, IxDyn};
use num_traits::Pow;

use super::error::AdError;
use super::tensor::{all_pairs, zip_map, IntoTensor, Tensor};

/// Value/derivative pair propagating exact derivatives through arithmetic.
///
/// Dual numbers are immutable: operators and elementary functions always
/// build a new instance. Equality and ordering look at the value only.
///
/// # Panics
///
/// Binary operators panic when the operands' derivative shapes cannot be
/// broadcast together, e.g. duals seeded for different numbers of variables.
#[derive(Debug, Clone)]
pub struct Dual {
    value: Tensor,
    derivative: Tensor,
}

/// Validate a value/derivative pairing.
fn check_shapes(value: &Tensor, derivative: &Tensor) -> Result<(), AdError> {
    if value.ndim() > 1 {
        return Err(AdError::RankTooHigh {
            what: "value",
            rank: value.ndim(),
            max: 1,
        });
    }
    if derivative.ndim() > 2 {
        return Err(AdError::RankTooHigh {
            what: "derivative",
            rank: derivative.ndim(),
            max: 2,
        });
    }
    let compatible = match (value.shape(), derivative.shape()) {
        ([], []) | ([], [_]) | ([_], []) => true,
        ([k], [d]) | ([k], [_, d]) => k == d,
        _ => false,
    };
    if compatible {
        Ok(())
    } else {
        Err(AdError::ShapeMismatch {
            value: value.shape().to_vec(),
            derivative: derivative.shape().to_vec(),
        })
    }
}

impl Dual {
    /// Create a dual number from an explicit value and derivative.
    ///
    /// # Errors
    ///
    /// * `AdError::RankTooHigh` - value of rank > 1 or derivative of rank > 2
    /// * `AdError::ShapeMismatch` - shapes cannot be paired (see module docs)
    ///
    /// # Example
    ///
    /// ```
    /// use autodiff_core::types::{AdError, Dual};
    ///
    /// let x = Dual::new(vec![1.0, 2.0], vec![1.0, 1.0]).unwrap();
    /// assert_eq!(x.value().len(), 2);
    ///
    /// let bad = Dual::new(vec![1.0, 2.0], vec![1.0, 1.0, 1.0]);
    /// assert!(matches!(bad, Err(AdError::ShapeMismatch { .. })));
    /// ```
    pub fn new(value: impl IntoTensor, derivative: impl IntoTensor) -> Result<Self, AdError> {
        let value = value.into_tensor();
        let derivative = derivative.into_tensor();
        check_shapes(&value, &derivative)?;
        Ok(Self { value, derivative })
    }

    /// Create independent variable `index` out of `n_vars`.
    ///
    /// The derivative is a one-hot vector of length `n_vars` for a scalar
    /// value, or an `[n_vars, k]` matrix whose `index`-th row is all ones for
    /// a vector value of length `k`.
    ///
    /// # Errors
    ///
    /// * `AdError::NoVariables` - `n_vars == 0`
    /// * `AdError::SeedIndexOutOfRange` - `index >= n_vars`
    /// * `AdError::RankTooHigh` - value of rank > 1
    ///
    /// # Example
    ///
    /// ```
    /// use autodiff_core::types::Dual;
    ///
    /// let y = Dual::seeded(2.0, 3, 1).unwrap();
    /// assert_eq!(y.derivative().as_slice().unwrap(), &[0.0, 1.0, 0.0]);
    /// ```
    pub fn seeded(value: impl IntoTensor, n_vars: usize, index: usize) -> Result<Self, AdError> {
        if n_vars == 0 {
            return Err(AdError::NoVariables);
        }
        if index >= n_vars {
            return Err(AdError::SeedIndexOutOfRange { index, n_vars });
        }
        let value = value.into_tensor();
        let mut derivative = match value.shape() {
            [] => ArrayD::zeros(IxDyn(&[n_vars])),
            [k] => ArrayD::zeros(IxDyn(&[n_vars, *k])),
            _ => {
                return Err(AdError::RankTooHigh {
                    what: "value",
                    rank: value.ndim(),
                    max: 1,
                })
            }
        };
        derivative.index_axis_mut(Axis(0), index).fill(1.0);
        Ok(Self { value, derivative })
    }

    /// Create the single independent variable of a one-variable function.
    pub fn variable(value: impl IntoTensor) -> Result<Self, AdError> {
        Self::seeded(value, 1, 0)
    }

    /// Create a constant (zero derivative).
    ///
    /// # Errors
    ///
    /// * `AdError::RankTooHigh` - value of rank > 1
    pub fn constant(value: impl IntoTensor) -> Result<Self, AdError> {
        Self::new(value, 0.0)
    }

    /// Build from parts already known to be compatible.
    pub(crate) fn from_parts(value: Tensor, derivative: Tensor) -> Self {
        debug_assert!(check_shapes(&value, &derivative).is_ok());
        Self { value, derivative }
    }

    /// Function value.
    pub fn value(&self) -> &Tensor {
        &self.value
    }

    /// Derivative with respect to the seeded variables.
    pub fn derivative(&self) -> &Tensor {
        &self.derivative
    }

    /// The value as a plain number when it is a scalar.
    pub fn scalar_value(&self) -> Option<f64> {
        if self.value.ndim() == 0 {
            self.value.first().copied()
        } else {
            None
        }
    }

    /// Split into `(value, derivative)`.
    pub fn into_parts(self) -> (Tensor, Tensor) {
        (self.value, self.derivative)
    }

    /// True if every element of the value and derivative is finite.
    pub fn is_finite(&self) -> bool {
        self.value.iter().chain(self.derivative.iter()).all(|x| x.is_finite())
    }

    /// Unary plus: the identity.
    pub fn pos(&self) -> Self {
        self.clone()
    }

    /// Apply `f` to the value and scale the derivative by `df` (chain rule).
    pub(crate) fn chain(&self, f: impl Fn(f64) -> f64, df: impl Fn(f64) -> f64) -> Self {
        let value = self.value.mapv(f);
        let derivative = &self.value.mapv(df) * &self.derivative;
        Self::from_parts(value, derivative)
    }

    /// Raise to a constant real power.
    pub fn powf(&self, exponent: f64) -> Self {
        pow_df(self, exponent)
    }

    /// Raise to a constant integer power.
    pub fn powi(&self, exponent: i32) -> Self {
        self.chain(
            |x| x.powi(exponent),
            |x| f64::from(exponent) * x.powi(exponent - 1),
        )
    }
}

impl From<f64> for Dual {
    fn from(value: f64) -> Self {
        Self::from_parts(value.into_tensor(), 0.0_f64.into_tensor())
    }
}

impl fmt::Display for Dual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.value, self.derivative)
    }
}

// ========================================
// Arithmetic kernels
// ========================================

/// Derivative of `this` shaped to combine with `other`.
///
/// An `[M]` derivative on a scalar value would otherwise line up with the
/// element axis of a `[k]` operand; it becomes `[M, k]` with every column
/// equal to the original partials.
fn lifted_derivative<'a>(this: &'a Dual, other: &Dual) -> Cow<'a, Tensor> {
    match (this.value.shape(), this.derivative.shape(), other.value.shape()) {
        ([], [m], [k]) => {
            let column = this.derivative.view().insert_axis(Axis(1));
            match column.broadcast(IxDyn(&[*m, *k])) {
                Some(lifted) => Cow::Owned(lifted.to_owned()),
                None => Cow::Borrowed(&this.derivative),
            }
        }
        _ => Cow::Borrowed(&this.derivative),
    }
}

fn aligned_derivatives<'a>(a: &'a Dual, b: &'a Dual) -> (Cow<'a, Tensor>, Cow<'a, Tensor>) {
    (lifted_derivative(a, b), lifted_derivative(b, a))
}

fn add_dd(a: &Dual, b: &Dual) -> Dual {
    let (da, db) = aligned_derivatives(a, b);
    Dual::from_parts(&a.value + &b.value, &*da + &*db)
}

fn add_df(a: &Dual, c: f64) -> Dual {
    Dual::from_parts(&a.value + c, a.derivative.clone())
}

fn add_fd(c: f64, a: &Dual) -> Dual {
    add_df(a, c)
}

fn sub_dd(a: &Dual, b: &Dual) -> Dual {
    let (da, db) = aligned_derivatives(a, b);
    Dual::from_parts(&a.value - &b.value, &*da - &*db)
}

fn sub_df(a: &Dual, c: f64) -> Dual {
    Dual::from_parts(&a.value - c, a.derivative.clone())
}

fn sub_fd(c: f64, a: &Dual) -> Dual {
    Dual::from_parts(c - &a.value, -&a.derivative)
}

// d(ab) = a·db + b·da
fn mul_dd(a: &Dual, b: &Dual) -> Dual {
    let (da, db) = aligned_derivatives(a, b);
    let derivative = &(&a.value * &*db) + &(&b.value * &*da);
    Dual::from_parts(&a.value * &b.value, derivative)
}

fn mul_df(a: &Dual, c: f64) -> Dual {
    Dual::from_parts(&a.value * c, &a.derivative * c)
}

fn mul_fd(c: f64, a: &Dual) -> Dual {
    mul_df(a, c)
}

// d(a/b) = (b·da - a·db) / b²
fn div_dd(a: &Dual, b: &Dual) -> Dual {
    let (da, db) = aligned_derivatives(a, b);
    let numerator = &(&b.value * &*da) - &(&a.value * &*db);
    let derivative = &numerator / &(&b.value * &b.value);
    Dual::from_parts(&a.value / &b.value, derivative)
}

fn div_df(a: &Dual, c: f64) -> Dual {
    Dual::from_parts(&a.value / c, &a.derivative / c)
}

fn div_fd(c: f64, a: &Dual) -> Dual {
    let derivative = &(&a.derivative * -c) / &(&a.value * &a.value);
    Dual::from_parts(c / &a.value, derivative)
}

/// Coefficient of `db` in `d(a^b)`: `a^b·ln|a|`, zero where `a == 0`.
fn log_coefficient(a: f64, b: f64) -> f64 {
    if a == 0.0 {
        0.0
    } else {
        a.powf(b) * a.abs().ln()
    }
}

fn pow_dd(a: &Dual, b: &Dual) -> Dual {
    let value = zip_map(&a.value, &b.value, f64::powf);
    let base_coefficient = zip_map(&a.value, &b.value, |x, y| y * x.powf(y - 1.0));
    let exponent_coefficient = zip_map(&a.value, &b.value, log_coefficient);
    let (da, db) = aligned_derivatives(a, b);
    let derivative = &(&base_coefficient * &*da) + &(&exponent_coefficient * &*db);
    Dual::from_parts(value, derivative)
}

fn pow_df(a: &Dual, c: f64) -> Dual {
    a.chain(|x| x.powf(c), |x| c * x.powf(c - 1.0))
}

fn pow_fd(c: f64, b: &Dual) -> Dual {
    let value = b.value.mapv(|y| c.powf(y));
    let derivative = &b.value.mapv(|y| log_coefficient(c, y)) * &b.derivative;
    Dual::from_parts(value, derivative)
}

impl Neg for &Dual {
    type Output = Dual;

    fn neg(self) -> Dual {
        Dual::from_parts(-&self.value, -&self.derivative)
    }
}

impl Neg for Dual {
    type Output = Dual;

    fn neg(self) -> Dual {
        -&self
    }
}

/// Implement a binary operator for every owned/borrowed pairing of `Dual`
/// and for `f64` on either side.
macro_rules! impl_dual_binary_op {
    ($trait:ident, $method:ident, $dd:ident, $df:ident, $fd:ident) => {
        impl $trait<&Dual> for &Dual {
            type Output = Dual;
            fn $method(self, rhs: &Dual) -> Dual {
                $dd(self, rhs)
            }
        }

        impl $trait<Dual> for Dual {
            type Output = Dual;
            fn $method(self, rhs: Dual) -> Dual {
                $dd(&self, &rhs)
            }
        }

        impl $trait<&Dual> for Dual {
            type Output = Dual;
            fn $method(self, rhs: &Dual) -> Dual {
                $dd(&self, rhs)
            }
        }

        impl $trait<Dual> for &Dual {
            type Output = Dual;
            fn $method(self, rhs: Dual) -> Dual {
                $dd(self, &rhs)
            }
        }

        impl $trait<f64> for &Dual {
            type Output = Dual;
            fn $method(self, rhs: f64) -> Dual {
                $df(self, rhs)
            }
        }

        impl $trait<f64> for Dual {
            type Output = Dual;
            fn $method(self, rhs: f64) -> Dual {
                $df(&self, rhs)
            }
        }

        impl $trait<&Dual> for f64 {
            type Output = Dual;
            fn $method(self, rhs: &Dual) -> Dual {
                $fd(self, rhs)
            }
        }

        impl $trait<Dual> for f64 {
            type Output = Dual;
            fn $method(self, rhs: Dual) -> Dual {
                $fd(self, &rhs)
            }
        }
    };
}

impl_dual_binary_op!(Add, add, add_dd, add_df, add_fd);
impl_dual_binary_op!(Sub, sub, sub_dd, sub_df, sub_fd);
impl_dual_binary_op!(Mul, mul, mul_dd, mul_df, mul_fd);
impl_dual_binary_op!(Div, div, div_dd, div_df, div_fd);
impl_dual_binary_op!(Pow, pow, pow_dd, pow_df, pow_fd);

impl Pow<i32> for &Dual {
    type Output = Dual;

    fn pow(self, rhs: i32) -> Dual {
        self.powi(rhs)
    }
}

impl Pow<i32> for Dual {
    type Output = Dual;

    fn pow(self, rhs: i32) -> Dual {
        self.powi(rhs)
    }
}

// ========================================
// Comparison (value only)
// ========================================

/// Product order over the values: an ordering holds only if every element
/// agrees with it.
pub(crate) fn value_ordering(a: &Tensor, b: &Tensor) -> Option<Ordering> {
    if all_pairs(a, b, |x, y| x == y) {
        Some(Ordering::Equal)
    } else if all_pairs(a, b, |x, y| x <= y) {
        Some(Ordering::Less)
    } else if all_pairs(a, b, |x, y| x >= y) {
        Some(Ordering::Greater)
    } else {
        None
    }
}

impl PartialEq for Dual {
    fn eq(&self, other: &Self) -> bool {
        all_pairs(&self.value, &other.value, |x, y| x == y)
    }
}

impl PartialEq<f64> for Dual {
    fn eq(&self, other: &f64) -> bool {
        self.value.iter().all(|x| x == other)
    }
}

impl PartialOrd for Dual {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        value_ordering(&self.value, &other.value)
    }
}

impl PartialOrd<f64> for Dual {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        value_ordering(&self.value, &(*other).into_tensor())
    }
}
