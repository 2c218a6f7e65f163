//! Elementary functions over constants and dual numbers.
//!
//! Every function applies to the value element-wise and multiplies the
//! derivative by the analytic derivative of the function (chain rule).
//! Functions with a restricted domain check the value first and return
//! [`AdError::Domain`] naming the first offending element.
//!
//! | function   | derivative           | domain        |
//! |------------|----------------------|---------------|
//! | `sin`      | `cos x`              |               |
//! | `cos`      | `-sin x`             |               |
//! | `tan`      | `1 / cos² x`         |               |
//! | `exp`      | `exp x`              |               |
//! | `sqrt`     | `1 / (2√x)`          | `x > 0`       |
//! | `arcsin`   | `1 / √(1 - x²)`      | `-1 ≤ x ≤ 1`  |
//! | `arccos`   | `-1 / √(1 - x²)`     | `-1 ≤ x ≤ 1`  |
//! | `arctan`   | `1 / (1 + x²)`       |               |
//! | `sinh`     | `cosh x`             |               |
//! | `cosh`     | `sinh x`             |               |
//! | `tanh`     | `1 - tanh² x`        |               |
//! | `logistic` | `σ(x)(1 - σ(x))`     |               |
//! | `ln`       | `1 / x`              | `x > 0`       |
//! | `log_b`    | `1 / (x ln b)`       | `x > 0`       |
//!
//! # Examples
//! ```
//! use autodiff_core::math::{sin, sqrt};
//! use autodiff_core::types::Dual;
//!
//! let x = Dual::variable(0.0).unwrap();
//! let y = sin(&x);
//! assert_eq!(y.scalar_value(), Some(0.0));
//!
//! assert!(sqrt(Dual::variable(-1.0).unwrap()).is_err());
//! assert_eq!(sqrt(4.0).unwrap(), 2.0);
//! ```

use crate::types::{AdError, Dual, Number};

fn logistic_value(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn logistic_derivative(x: f64) -> f64 {
    let s = logistic_value(x);
    s * (1.0 - s)
}

fn in_unit_interval(x: f64) -> bool {
    (-1.0..=1.0).contains(&x)
}

fn positive(x: f64) -> bool {
    x > 0.0
}

/// Element-wise elementary functions with exact derivatives.
///
/// Implementors provide [`apply`](Elementary::apply) and
/// [`first_outside`](Elementary::first_outside); every function is derived
/// from those two.
pub trait Elementary: Sized {
    /// Result type of applying a function.
    type Output;

    /// Apply `f` to the value, scaling the derivative by `df` at the value.
    fn apply<F, G>(self, f: F, df: G) -> Self::Output
    where
        F: Fn(f64) -> f64,
        G: Fn(f64) -> f64;

    /// First value element rejected by `accept`, if any.
    fn first_outside<P: Fn(f64) -> bool>(&self, accept: P) -> Option<f64>;

    /// Apply after checking every value element lies in the domain.
    fn apply_checked<P, F, G>(
        self,
        function: &'static str,
        accept: P,
        f: F,
        df: G,
    ) -> Result<Self::Output, AdError>
    where
        P: Fn(f64) -> bool,
        F: Fn(f64) -> f64,
        G: Fn(f64) -> f64,
    {
        match self.first_outside(accept) {
            Some(value) => Err(AdError::Domain { function, value }),
            None => Ok(self.apply(f, df)),
        }
    }

    /// Sine.
    fn sin(self) -> Self::Output {
        self.apply(f64::sin, f64::cos)
    }

    /// Cosine.
    fn cos(self) -> Self::Output {
        self.apply(f64::cos, |x| -x.sin())
    }

    /// Tangent.
    fn tan(self) -> Self::Output {
        self.apply(f64::tan, |x| 1.0 / x.cos().powi(2))
    }

    /// Natural exponential.
    fn exp(self) -> Self::Output {
        self.apply(f64::exp, f64::exp)
    }

    /// Square root.
    ///
    /// # Errors
    /// `AdError::Domain` if any value element is ≤ 0.
    fn sqrt(self) -> Result<Self::Output, AdError> {
        self.apply_checked("sqrt", positive, f64::sqrt, |x| 0.5 / x.sqrt())
    }

    /// Inverse sine.
    ///
    /// # Errors
    /// `AdError::Domain` if any value element lies outside `[-1, 1]`.
    fn arcsin(self) -> Result<Self::Output, AdError> {
        self.apply_checked("arcsin", in_unit_interval, f64::asin, |x| {
            1.0 / (1.0 - x * x).sqrt()
        })
    }

    /// Inverse cosine.
    ///
    /// # Errors
    /// `AdError::Domain` if any value element lies outside `[-1, 1]`.
    fn arccos(self) -> Result<Self::Output, AdError> {
        self.apply_checked("arccos", in_unit_interval, f64::acos, |x| {
            -1.0 / (1.0 - x * x).sqrt()
        })
    }

    /// Inverse tangent.
    fn arctan(self) -> Self::Output {
        self.apply(f64::atan, |x| 1.0 / (1.0 + x * x))
    }

    /// Hyperbolic sine.
    fn sinh(self) -> Self::Output {
        self.apply(f64::sinh, f64::cosh)
    }

    /// Hyperbolic cosine.
    fn cosh(self) -> Self::Output {
        self.apply(f64::cosh, f64::sinh)
    }

    /// Hyperbolic tangent.
    fn tanh(self) -> Self::Output {
        self.apply(f64::tanh, |x| 1.0 - x.tanh().powi(2))
    }

    /// Standard logistic function `1 / (1 + e^(-x))`.
    fn logistic(self) -> Self::Output {
        self.apply(logistic_value, logistic_derivative)
    }

    /// Natural logarithm.
    ///
    /// # Errors
    /// `AdError::Domain` if any value element is ≤ 0.
    fn ln(self) -> Result<Self::Output, AdError> {
        self.apply_checked("ln", positive, f64::ln, |x| 1.0 / x)
    }

    /// Logarithm to an arbitrary base.
    ///
    /// # Errors
    /// * `AdError::InvalidLogBase` - base ≤ 0 or base == 1
    /// * `AdError::Domain` - any value element ≤ 0
    fn log(self, base: f64) -> Result<Self::Output, AdError> {
        if base.is_nan() || base <= 0.0 || base == 1.0 {
            return Err(AdError::InvalidLogBase { base });
        }
        let ln_base = base.ln();
        self.apply_checked("log", positive, |x| x.ln() / ln_base, |x| {
            1.0 / (x * ln_base)
        })
    }
}

impl Elementary for f64 {
    type Output = f64;

    fn apply<F, G>(self, f: F, _df: G) -> f64
    where
        F: Fn(f64) -> f64,
        G: Fn(f64) -> f64,
    {
        f(self)
    }

    fn first_outside<P: Fn(f64) -> bool>(&self, accept: P) -> Option<f64> {
        (!accept(*self)).then_some(*self)
    }
}

impl Elementary for &Dual {
    type Output = Dual;

    fn apply<F, G>(self, f: F, df: G) -> Dual
    where
        F: Fn(f64) -> f64,
        G: Fn(f64) -> f64,
    {
        self.chain(f, df)
    }

    fn first_outside<P: Fn(f64) -> bool>(&self, accept: P) -> Option<f64> {
        self.value().iter().copied().find(|&x| !accept(x))
    }
}

impl Elementary for Dual {
    type Output = Dual;

    fn apply<F, G>(self, f: F, df: G) -> Dual
    where
        F: Fn(f64) -> f64,
        G: Fn(f64) -> f64,
    {
        self.chain(f, df)
    }

    fn first_outside<P: Fn(f64) -> bool>(&self, accept: P) -> Option<f64> {
        <&Dual as Elementary>::first_outside(&self, accept)
    }
}

impl Elementary for &Number {
    type Output = Number;

    fn apply<F, G>(self, f: F, df: G) -> Number
    where
        F: Fn(f64) -> f64,
        G: Fn(f64) -> f64,
    {
        match self {
            Number::Constant(c) => Number::Constant(f(*c)),
            Number::Dual(d) => Number::Dual(d.chain(f, df)),
        }
    }

    fn first_outside<P: Fn(f64) -> bool>(&self, accept: P) -> Option<f64> {
        match self {
            Number::Constant(c) => c.first_outside(accept),
            Number::Dual(d) => d.first_outside(accept),
        }
    }
}

impl Elementary for Number {
    type Output = Number;

    fn apply<F, G>(self, f: F, df: G) -> Number
    where
        F: Fn(f64) -> f64,
        G: Fn(f64) -> f64,
    {
        (&self).apply(f, df)
    }

    fn first_outside<P: Fn(f64) -> bool>(&self, accept: P) -> Option<f64> {
        <&Number as Elementary>::first_outside(&self, accept)
    }
}

/// Sine of `x`.
pub fn sin<T: Elementary>(x: T) -> T::Output {
    x.sin()
}

/// Cosine of `x`.
pub fn cos<T: Elementary>(x: T) -> T::Output {
    x.cos()
}

/// Tangent of `x`.
pub fn tan<T: Elementary>(x: T) -> T::Output {
    x.tan()
}

/// `e` raised to `x`.
pub fn exp<T: Elementary>(x: T) -> T::Output {
    x.exp()
}

/// Square root of `x`; errors unless every element is positive.
pub fn sqrt<T: Elementary>(x: T) -> Result<T::Output, AdError> {
    x.sqrt()
}

/// Inverse sine of `x`; errors outside `[-1, 1]`.
pub fn arcsin<T: Elementary>(x: T) -> Result<T::Output, AdError> {
    x.arcsin()
}

/// Inverse cosine of `x`; errors outside `[-1, 1]`.
pub fn arccos<T: Elementary>(x: T) -> Result<T::Output, AdError> {
    x.arccos()
}

/// Inverse tangent of `x`.
pub fn arctan<T: Elementary>(x: T) -> T::Output {
    x.arctan()
}

/// Hyperbolic sine of `x`.
pub fn sinh<T: Elementary>(x: T) -> T::Output {
    x.sinh()
}

/// Hyperbolic cosine of `x`.
pub fn cosh<T: Elementary>(x: T) -> T::Output {
    x.cosh()
}

/// Hyperbolic tangent of `x`.
pub fn tanh<T: Elementary>(x: T) -> T::Output {
    x.tanh()
}

/// Standard logistic function of `x`.
pub fn logistic<T: Elementary>(x: T) -> T::Output {
    x.logistic()
}

/// Natural logarithm of `x`; errors unless every element is positive.
pub fn ln<T: Elementary>(x: T) -> Result<T::Output, AdError> {
    x.ln()
}

/// Logarithm of `x` to `base`.
///
/// # Errors
/// * `AdError::InvalidLogBase` - base ≤ 0 or base == 1
/// * `AdError::Domain` - any element of `x` ≤ 0
///
/// # Examples
/// ```
/// use autodiff_core::math::log;
/// use autodiff_core::types::Dual;
///
/// let y = log(Dual::variable(8.0).unwrap(), 2.0).unwrap();
/// assert!((y.scalar_value().unwrap() - 3.0).abs() < 1e-12);
/// assert!(log(8.0, 1.0).is_err());
/// ```
pub fn log<T: Elementary>(x: T, base: f64) -> Result<T::Output, AdError> {
    x.log(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn x3() -> Dual {
        Dual::new(3.0, 1.0).unwrap()
    }

    fn parts(d: &Dual) -> (f64, f64) {
        let value = d.scalar_value().unwrap();
        let derivative = *d.derivative().first().unwrap();
        (value, derivative)
    }

    // ========================================
    // Trigonometric
    // ========================================

    #[test]
    fn test_sin_cos_tan_at_three() {
        let (v, d) = parts(&sin(x3()));
        assert_relative_eq!(v, 0.141_120_008_059_867_2, epsilon = 1e-12);
        assert_relative_eq!(d, -0.989_992_496_600_445_4, epsilon = 1e-12);

        let (v, d) = parts(&cos(x3()));
        assert_relative_eq!(v, -0.989_992_496_600_445_4, epsilon = 1e-12);
        assert_relative_eq!(d, -0.141_120_008_059_867_2, epsilon = 1e-12);

        let (v, d) = parts(&tan(x3()));
        assert_relative_eq!(v, -0.142_546_543_074_277_8, epsilon = 1e-12);
        assert_relative_eq!(d, 1.020_319_516_942_427, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_trig() {
        let x = Dual::new(0.5, 1.0).unwrap();
        let (v, d) = parts(&arcsin(&x).unwrap());
        assert_relative_eq!(v, 0.5_f64.asin());
        assert_relative_eq!(d, 1.0 / 0.75_f64.sqrt());

        let (v, d) = parts(&arccos(&x).unwrap());
        assert_relative_eq!(v, 0.5_f64.acos());
        assert_relative_eq!(d, -1.0 / 0.75_f64.sqrt());

        let (v, d) = parts(&arctan(&x));
        assert_relative_eq!(v, 0.5_f64.atan());
        assert_relative_eq!(d, 0.8);
    }

    #[test]
    fn test_inverse_trig_domain() {
        let err = arcsin(x3()).unwrap_err();
        assert_eq!(
            err,
            AdError::Domain {
                function: "arcsin",
                value: 3.0
            }
        );
        assert!(arccos(Dual::new(-1.5, 1.0).unwrap()).is_err());
        assert!(arcsin(Dual::new(1.0, 1.0).unwrap()).is_ok());
    }

    // ========================================
    // Exponential and logarithmic
    // ========================================

    #[test]
    fn test_exp() {
        let (v, d) = parts(&exp(x3()));
        assert_relative_eq!(v, 20.085_536_923_187_668, epsilon = 1e-12);
        assert_relative_eq!(d, 20.085_536_923_187_668, epsilon = 1e-12);
    }

    #[test]
    fn test_sqrt() {
        let (v, d) = parts(&sqrt(x3()).unwrap());
        assert_relative_eq!(v, 1.732_050_807_568_877_2, epsilon = 1e-12);
        assert_relative_eq!(d, 0.288_675_134_594_812_87, epsilon = 1e-12);
    }

    #[test]
    fn test_sqrt_domain() {
        let err = sqrt(Dual::new(-4.0, 1.0).unwrap()).unwrap_err();
        assert!(err.is_domain_error());
        assert!(sqrt(0.0).is_err());
        assert!(sqrt(Dual::new(0.0, 1.0).unwrap()).is_err());
    }

    #[test]
    fn test_ln_and_log() {
        let (v, d) = parts(&ln(x3()).unwrap());
        assert_relative_eq!(v, 3.0_f64.ln());
        assert_relative_eq!(d, 1.0 / 3.0);

        let (v, d) = parts(&log(x3(), 10.0).unwrap());
        assert_relative_eq!(v, 3.0_f64.log10(), epsilon = 1e-12);
        assert_relative_eq!(d, 1.0 / (3.0 * 10.0_f64.ln()), epsilon = 1e-12);
    }

    #[test]
    fn test_log_errors() {
        assert_eq!(
            ln(Dual::new(0.0, 1.0).unwrap()).unwrap_err(),
            AdError::Domain {
                function: "ln",
                value: 0.0
            }
        );
        assert_eq!(
            log(x3(), 1.0).unwrap_err(),
            AdError::InvalidLogBase { base: 1.0 }
        );
        assert!(log(x3(), -2.0).is_err());
        assert!(log(x3(), f64::NAN).is_err());
        assert!(log(-1.0, 2.0).is_err());
    }

    // ========================================
    // Hyperbolic and logistic
    // ========================================

    #[test]
    fn test_hyperbolic() {
        let x = Dual::new(0.7, 1.0).unwrap();
        let (v, d) = parts(&sinh(&x));
        assert_relative_eq!(v, 0.7_f64.sinh());
        assert_relative_eq!(d, 0.7_f64.cosh());

        let (v, d) = parts(&cosh(&x));
        assert_relative_eq!(v, 0.7_f64.cosh());
        assert_relative_eq!(d, 0.7_f64.sinh());

        let (v, d) = parts(&tanh(&x));
        assert_relative_eq!(v, 0.7_f64.tanh());
        assert_relative_eq!(d, 1.0 - 0.7_f64.tanh().powi(2));
    }

    #[test]
    fn test_logistic() {
        let (v, d) = parts(&logistic(Dual::new(0.0, 1.0).unwrap()));
        assert_relative_eq!(v, 0.5);
        assert_relative_eq!(d, 0.25);
    }

    // ========================================
    // Vectors and mixed inputs
    // ========================================

    #[test]
    fn test_vector_reports_first_offending_element() {
        let x = Dual::new(vec![4.0, -1.0, -2.0], vec![1.0, 1.0, 1.0]).unwrap();
        assert_eq!(
            sqrt(&x).unwrap_err(),
            AdError::Domain {
                function: "sqrt",
                value: -1.0
            }
        );
    }

    #[test]
    fn test_vector_elementwise() {
        let x = Dual::seeded(vec![0.0, 1.0], 2, 0).unwrap();
        let y = exp(&x);
        let d: Vec<f64> = y.derivative().iter().copied().collect();
        assert_relative_eq!(d[0], 1.0);
        assert_relative_eq!(d[1], 1.0_f64.exp());
        assert_eq!(d[2], 0.0);
        assert_eq!(d[3], 0.0);
    }

    #[test]
    fn test_number_inputs() {
        assert_eq!(sin(Number::from(0.0)).value_scalar(), Some(0.0));
        let n = Number::from(Dual::variable(1.0).unwrap());
        let e = exp(&n);
        assert!(e.is_dual());
        assert!(ln(Number::from(-1.0)).is_err());
    }

    #[test]
    fn test_chain_composition() {
        // d/dx sin(x²) = 2x cos(x²)
        let x = Dual::new(1.5, 1.0).unwrap();
        let (_, d) = parts(&sin(&x * &x));
        assert_relative_eq!(d, 3.0 * 2.25_f64.cos(), epsilon = 1e-12);
    }
}
