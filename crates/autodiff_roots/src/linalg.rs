//! Linear algebra for Newton-type steps.
//!
//! Jacobians arrive as `ndarray` matrices from the derivative extractor and
//! are inverted with nalgebra's SVD. A 1×1 Jacobian is divided through
//! directly so an exactly zero derivative is reported as singular instead
//! of silently producing a zero step.

use autodiff_core::differentiate::Evaluation;
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

use crate::error::SolverError;

/// Relative singular-value cutoff, matching numpy's `pinv` default.
const PINV_RCOND: f64 = 1e-15;

/// L1 norm (sum of absolute values).
pub(crate) fn l1_norm(v: &Array1<f64>) -> f64 {
    v.iter().map(|x| x.abs()).sum()
}

/// True if every element is finite.
pub(crate) fn all_finite(v: &Array1<f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Residuals and Jacobian of one evaluation, checked for compatible shapes.
pub(crate) fn linearise(
    evaluation: Evaluation,
    n_vars: usize,
) -> Result<(Array1<f64>, Array2<f64>), SolverError> {
    let jacobian = evaluation.derivative.to_matrix();
    let residuals = evaluation.value;
    if jacobian.nrows() != residuals.len() || jacobian.ncols() != n_vars {
        return Err(SolverError::JacobianShape {
            residuals: residuals.len(),
            rows: jacobian.nrows(),
            columns: jacobian.ncols(),
        });
    }
    Ok((residuals, jacobian))
}

/// Moore-Penrose pseudoinverse of `m`.
///
/// Singular values at or below `1e-15 · σ_max` are treated as zero.
pub(crate) fn pseudo_inverse(m: &Array2<f64>) -> Result<DMatrix<f64>, SolverError> {
    let matrix = DMatrix::from_row_iterator(m.nrows(), m.ncols(), m.iter().copied());
    let svd = matrix.svd(true, true);
    let cutoff = PINV_RCOND * svd.singular_values.max();
    svd.pseudo_inverse(cutoff)
        .map_err(|msg| SolverError::NumericalInstability(msg.to_string()))
}

/// Inverse of the Jacobian used for a Newton step.
#[derive(Debug, Clone)]
pub(crate) enum InverseJacobian {
    /// Reciprocal of a 1×1 Jacobian.
    Scalar(f64),
    /// Pseudoinverse of a general Jacobian.
    Pseudo(DMatrix<f64>),
}

impl InverseJacobian {
    /// Invert `jacobian` at `iteration`.
    ///
    /// # Errors
    /// * `SolverError::SingularJacobian` - a 1×1 Jacobian equal to zero
    /// * `SolverError::NumericalInstability` - SVD failed (non-finite entries)
    pub(crate) fn new(jacobian: &Array2<f64>, iteration: usize) -> Result<Self, SolverError> {
        if jacobian.dim() == (1, 1) {
            let derivative = jacobian[[0, 0]];
            if derivative == 0.0 {
                return Err(SolverError::SingularJacobian { iteration });
            }
            return Ok(InverseJacobian::Scalar(derivative.recip()));
        }
        pseudo_inverse(jacobian).map(InverseJacobian::Pseudo)
    }

    /// Newton step `J⁺ · r` for residuals `r`.
    pub(crate) fn step(&self, residuals: &Array1<f64>) -> Array1<f64> {
        match self {
            InverseJacobian::Scalar(inverse) => residuals * *inverse,
            InverseJacobian::Pseudo(pinv) => {
                let r = DVector::from_iterator(residuals.len(), residuals.iter().copied());
                let step = pinv * r;
                step.iter().copied().collect()
            }
        }
    }
}
