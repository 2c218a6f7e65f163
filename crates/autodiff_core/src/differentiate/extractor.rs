//! Seeding, evaluation and Jacobian harvesting.
//!
//! [`differentiate`] wraps a function written against [`Dual`] together with
//! its [`Signature`]. Each call seeds argument `i` as independent variable
//! `i` of `N`, evaluates the function once, and flattens every output
//! component's derivative into one row of the result.

use ndarray::{Array1, Array2};
use tracing::trace;

use crate::types::{AdError, Dual, Number, Output, Tensor};

use super::arguments::Arguments;
use super::signature::Signature;

/// Derivative harvested from one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Derivative {
    /// Gradient of a scalar-output function.
    Gradient(Array1<f64>),
    /// One row per output component of a vector-output function.
    Jacobian(Array2<f64>),
}

impl Derivative {
    /// The gradient, if the function had a scalar output.
    pub fn as_gradient(&self) -> Option<&Array1<f64>> {
        match self {
            Derivative::Gradient(g) => Some(g),
            Derivative::Jacobian(_) => None,
        }
    }

    /// The Jacobian, if the function had a vector output.
    pub fn as_jacobian(&self) -> Option<&Array2<f64>> {
        match self {
            Derivative::Jacobian(j) => Some(j),
            Derivative::Gradient(_) => None,
        }
    }

    /// Matrix form; a gradient becomes a single row.
    pub fn to_matrix(&self) -> Array2<f64> {
        match self {
            Derivative::Jacobian(j) => j.clone(),
            Derivative::Gradient(g) => g.clone().insert_axis(ndarray::Axis(0)),
        }
    }
}

/// Value and derivative of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Output components' values, flattened in order.
    pub value: Array1<f64>,
    /// Gradient or Jacobian at the evaluation point.
    pub derivative: Derivative,
}

/// A function bundled with its signature, ready for differentiation.
///
/// Created by [`differentiate`]. The wrapped function receives one seeded
/// [`Dual`] per parameter, in signature order.
#[derive(Debug, Clone)]
pub struct Differentiable<F> {
    signature: Signature,
    function: F,
}

/// Wrap `function` so it can be evaluated together with its derivative.
///
/// # Errors
/// `AdError::DuplicateParameter` if `params` repeats a name.
///
/// # Examples
/// ```
/// use autodiff_core::differentiate::{differentiate, Arguments};
///
/// // f(x) = 3x²
/// let f = differentiate(["x"], |v| Ok((3.0 * v[0].powi(2)).into())).unwrap();
/// let grad = f.derivative(Arguments::new().named("x", 5.0)).unwrap();
/// assert_eq!(grad.as_gradient().unwrap()[0], 30.0);
/// ```
pub fn differentiate<I, S, F>(params: I, function: F) -> Result<Differentiable<F>, AdError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: Fn(&[Dual]) -> Result<Output, AdError>,
{
    Ok(Differentiable {
        signature: Signature::new(params)?,
        function,
    })
}

impl<F> Differentiable<F>
where
    F: Fn(&[Dual]) -> Result<Output, AdError>,
{
    /// Parameter list of the wrapped function.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Number of independent variables.
    pub fn n_vars(&self) -> usize {
        self.signature.len()
    }

    /// Evaluate at `args`, returning the value and derivative.
    ///
    /// # Errors
    /// Argument resolution errors, seeding errors for values of rank > 1,
    /// any error raised by the function itself, and
    /// `AdError::RaggedJacobian` when output rows have different widths.
    pub fn evaluate(&self, args: Arguments) -> Result<Evaluation, AdError> {
        let values = args.resolve(&self.signature)?;
        let default_width = self.n_vars()
            * values
                .iter()
                .find(|v| v.ndim() == 1)
                .map_or(1, |v| v.len());
        let seeded = self.seed(values)?;
        let output = (self.function)(&seeded)?;

        let value = flatten_values(output.components());
        let rows = harvest_rows(output.components(), default_width)?;
        trace!(
            n_vars = self.n_vars(),
            components = rows.len(),
            width = rows.first().map_or(default_width, Vec::len),
            "extracted derivative"
        );

        let derivative = match output {
            Output::Scalar(_) => Derivative::Gradient(Array1::from(rows.concat())),
            Output::Vector(_) => Derivative::Jacobian(stack_rows(&rows, default_width)),
        };
        Ok(Evaluation { value, derivative })
    }

    /// Derivative at `args`.
    ///
    /// # Errors
    /// Same as [`evaluate`](Self::evaluate).
    pub fn derivative(&self, args: Arguments) -> Result<Derivative, AdError> {
        self.evaluate(args).map(|e| e.derivative)
    }

    /// Evaluate at a point given as positional scalars.
    ///
    /// # Errors
    /// Same as [`evaluate`](Self::evaluate).
    pub fn evaluate_at(&self, point: &[f64]) -> Result<Evaluation, AdError> {
        self.evaluate(Arguments::from(point))
    }

    /// Function value at a point, without seeding any derivative.
    ///
    /// # Errors
    /// `AdError::ArgumentCount` if `point` has the wrong length, or any error
    /// raised by the function itself.
    pub fn value_at(&self, point: &[f64]) -> Result<Array1<f64>, AdError> {
        if point.len() != self.n_vars() {
            return Err(AdError::ArgumentCount {
                expected: self.n_vars(),
                got: point.len(),
            });
        }
        let constants: Vec<Dual> = point.iter().map(|&x| Dual::from(x)).collect();
        let output = (self.function)(&constants)?;
        Ok(flatten_values(output.components()))
    }

    fn seed(&self, values: Vec<Tensor>) -> Result<Vec<Dual>, AdError> {
        let n_vars = self.n_vars();
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Dual::seeded(value, n_vars, index))
            .collect()
    }
}

fn flatten_values(components: &[Number]) -> Array1<f64> {
    components
        .iter()
        .flat_map(|n| match n {
            Number::Constant(c) => vec![*c],
            Number::Dual(d) => d.value().iter().copied().collect(),
        })
        .collect()
}

/// Flattened derivative row of each component; `None` marks a row that does
/// not depend on the inputs or carries a uniform rank-0 derivative.
fn component_row(number: &Number) -> Option<Vec<f64>> {
    match number {
        Number::Dual(d) if d.derivative().ndim() > 0 => {
            Some(d.derivative().iter().copied().collect())
        }
        _ => None,
    }
}

fn uniform_row(number: &Number, width: usize) -> Vec<f64> {
    let fill = match number {
        Number::Dual(d) => d.derivative().first().copied().unwrap_or(0.0),
        Number::Constant(_) => 0.0,
    };
    vec![fill; width]
}

fn harvest_rows(components: &[Number], default_width: usize) -> Result<Vec<Vec<f64>>, AdError> {
    let rows: Vec<Option<Vec<f64>>> = components.iter().map(component_row).collect();
    let width = rows
        .iter()
        .flatten()
        .map(Vec::len)
        .next()
        .unwrap_or(default_width);

    rows.into_iter()
        .zip(components)
        .enumerate()
        .map(|(row, (dense, number))| match dense {
            Some(r) if r.len() != width => Err(AdError::RaggedJacobian {
                row,
                expected: width,
                got: r.len(),
            }),
            Some(r) => Ok(r),
            None => Ok(uniform_row(number, width)),
        })
        .collect()
}

fn stack_rows(rows: &[Vec<f64>], default_width: usize) -> Array2<f64> {
    let n_rows = rows.len();
    let width = rows.first().map_or(default_width, Vec::len);
    Array2::from_shape_fn((n_rows, width), |(i, j)| rows[i][j])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{sin, sqrt, tan};
    use approx::assert_relative_eq;

    // ========================================
    // Scalar functions
    // ========================================

    #[test]
    fn test_identity_has_unit_derivative() {
        let f = differentiate(["x"], |v| Ok(v[0].clone().into())).unwrap();
        for x in [-3.0, 0.0, 2.5] {
            let eval = f.evaluate_at(&[x]).unwrap();
            assert_eq!(eval.value[0], x);
            assert_eq!(eval.derivative.as_gradient().unwrap()[0], 1.0);
        }
    }

    #[test]
    fn test_constant_has_zero_derivative() {
        let f = differentiate(["x", "y"], |_| Ok(Output::from(7.0))).unwrap();
        let eval = f.evaluate_at(&[1.0, 2.0]).unwrap();
        assert_eq!(eval.value[0], 7.0);
        assert_eq!(eval.derivative, Derivative::Gradient(Array1::zeros(2)));
    }

    #[test]
    fn test_composite_scalar_derivative() {
        // f(x) = sin(3x²) + tan(√(7x))
        let f = differentiate(["x"], |v| {
            let x = &v[0];
            let inner = sqrt(7.0 * x)?;
            Ok((sin(3.0 * x.powi(2)) + tan(inner)).into())
        })
        .unwrap();
        let grad = f.derivative(Arguments::new().named("x", 5.0)).unwrap();
        assert_relative_eq!(grad.as_gradient().unwrap()[0], 28.3316, epsilon = 1e-4);
    }

    #[test]
    fn test_vector_argument_flattened() {
        let f = differentiate(["x"], |v| {
            let x = &v[0];
            let inner = sqrt(7.0 * x)?;
            Ok((sin(3.0 * x.powi(2)) + tan(inner)).into())
        })
        .unwrap();
        let grad = f
            .derivative(Arguments::new().arg(vec![2.0, 1.0, 3.0]))
            .unwrap();
        let g = grad.as_gradient().unwrap();
        assert_eq!(g.len(), 3);
        assert_relative_eq!(g[0], 11.4996, epsilon = 1e-4);
        assert_relative_eq!(g[1], -4.2300, epsilon = 1e-4);
        assert_relative_eq!(g[2], 40.3201, epsilon = 1e-4);
    }

    #[test]
    fn test_two_variable_gradient() {
        // f(x, y) = x·y + y²
        let f = differentiate(["x", "y"], |v| Ok((&v[0] * &v[1] + v[1].powi(2)).into())).unwrap();
        let eval = f.evaluate(Arguments::new().named("y", 3.0).named("x", 2.0)).unwrap();
        assert_eq!(eval.value[0], 15.0);
        let g = eval.derivative.as_gradient().unwrap();
        assert_relative_eq!(g[0], 3.0);
        assert_relative_eq!(g[1], 8.0);
    }

    #[test]
    fn test_scalar_and_vector_arguments() {
        let sum = differentiate(["x", "y"], |v| Ok((&v[0] + &v[1]).into())).unwrap();
        let g = sum
            .derivative(Arguments::new().arg(1.0).arg(vec![2.0, 3.0]))
            .unwrap();
        assert_eq!(g.as_gradient().unwrap().to_vec(), vec![1.0, 1.0, 1.0, 1.0]);

        let product = differentiate(["x", "y"], |v| Ok((&v[0] * &v[1]).into())).unwrap();
        let g = product
            .derivative(Arguments::new().arg(5.0).arg(vec![2.0, 3.0]))
            .unwrap();
        assert_eq!(g.as_gradient().unwrap().to_vec(), vec![2.0, 3.0, 5.0, 5.0]);

        let g = product
            .derivative(Arguments::new().arg(5.0).arg(vec![2.0, 3.0, 4.0]))
            .unwrap();
        assert_eq!(
            g.as_gradient().unwrap().to_vec(),
            vec![2.0, 3.0, 4.0, 5.0, 5.0, 5.0]
        );
    }

    // ========================================
    // Vector functions
    // ========================================

    #[test]
    fn test_jacobian_rows() {
        let f = differentiate(["x", "y"], |v| {
            Ok(vec![2.0 * &v[0] + &v[1], &v[0] - 1.0].into())
        })
        .unwrap();
        let eval = f.evaluate_at(&[1.0, 2.0]).unwrap();
        assert_eq!(eval.value.to_vec(), vec![4.0, 0.0]);
        let j = eval.derivative.as_jacobian().unwrap();
        assert_eq!(j.shape(), &[2, 2]);
        assert_eq!(j.row(0).to_vec(), vec![2.0, 1.0]);
        assert_eq!(j.row(1).to_vec(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_constant_component_gives_zero_row() {
        let f = differentiate(["x", "y"], |v| {
            Ok(Output::Vector(vec![
                Number::from(&v[0] * &v[1]),
                Number::from(4.0),
            ]))
        })
        .unwrap();
        let j = f.derivative(Arguments::from(vec![2.0, 3.0])).unwrap();
        let j = j.as_jacobian().unwrap();
        assert_eq!(j.row(0).to_vec(), vec![3.0, 2.0]);
        assert_eq!(j.row(1).to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_all_constant_vector_output() {
        let f = differentiate(["x", "y", "z"], |_| Ok(Output::from(vec![1.0_f64, 2.0]))).unwrap();
        let j = f.derivative(Arguments::from(vec![0.0, 0.0, 0.0])).unwrap();
        assert_eq!(j.to_matrix(), Array2::zeros((2, 3)));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let f = differentiate(["x"], |v| {
            let wide = Dual::new(1.0, vec![1.0, 0.0, 0.0])?;
            Ok(vec![v[0].clone(), wide].into())
        })
        .unwrap();
        let err = f.derivative(Arguments::from(vec![1.0])).unwrap_err();
        assert_eq!(
            err,
            AdError::RaggedJacobian {
                row: 1,
                expected: 1,
                got: 3
            }
        );
    }

    // ========================================
    // Errors and helpers
    // ========================================

    #[test]
    fn test_argument_errors_propagate() {
        let f = differentiate(["x", "y"], |v| Ok((&v[0] + &v[1]).into())).unwrap();
        assert!(matches!(
            f.evaluate(Arguments::new().arg(1.0)),
            Err(AdError::ArgumentCount {
                expected: 2,
                got: 1
            })
        ));
        assert!(matches!(
            f.evaluate(Arguments::new().arg(1.0).named("y", 1.0)),
            Err(AdError::MixedArguments)
        ));
    }

    #[test]
    fn test_domain_error_propagates() {
        let f = differentiate(["x"], |v| Ok(sqrt(&v[0])?.into())).unwrap();
        assert!(f.evaluate_at(&[-1.0]).unwrap_err().is_domain_error());
    }

    #[test]
    fn test_duplicate_signature() {
        let result = differentiate(["x", "x"], |v| Ok(v[0].clone().into()));
        assert!(matches!(result, Err(AdError::DuplicateParameter(_))));
    }

    #[test]
    fn test_value_at() {
        let f = differentiate(["x", "y"], |v| {
            Ok(vec![&v[0] * &v[1], &v[0] + &v[1]].into())
        })
        .unwrap();
        assert_eq!(f.value_at(&[2.0, 3.0]).unwrap().to_vec(), vec![6.0, 5.0]);
        assert!(f.value_at(&[2.0]).is_err());
    }

    #[test]
    fn test_gradient_to_matrix() {
        let g = Derivative::Gradient(Array1::from(vec![1.0, 2.0]));
        assert_eq!(g.to_matrix().shape(), &[1, 2]);
        assert!(g.as_jacobian().is_none());
    }
}
