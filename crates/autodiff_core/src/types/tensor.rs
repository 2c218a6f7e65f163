//! Rank-limited tensors backing dual numbers.
//!
//! Values are scalars (rank 0) or vectors (rank 1); derivatives add at most
//! one leading axis for the independent variables. Storage is a dynamic-rank
//! `ndarray` array so arithmetic can rely on ndarray's co-broadcasting.

use ndarray::{Array1, ArrayD, IxDyn, Zip};

/// Dynamic-rank array used for both halves of a dual number.
pub type Tensor = ArrayD<f64>;

/// Conversion into a [`Tensor`].
///
/// Implemented for plain scalars, vectors, slices, fixed-size arrays and
/// ndarray arrays so constructors accept whatever the caller has at hand.
///
/// # Examples
/// ```
/// use autodiff_core::types::IntoTensor;
///
/// assert_eq!(3.0_f64.into_tensor().ndim(), 0);
/// assert_eq!(vec![1.0, 2.0].into_tensor().shape(), &[2]);
/// ```
pub trait IntoTensor {
    /// Convert `self` into a dynamic-rank array.
    fn into_tensor(self) -> Tensor;
}

impl IntoTensor for f64 {
    fn into_tensor(self) -> Tensor {
        ArrayD::from_elem(IxDyn(&[]), self)
    }
}

impl IntoTensor for Vec<f64> {
    fn into_tensor(self) -> Tensor {
        Array1::from(self).into_dyn()
    }
}

impl IntoTensor for &[f64] {
    fn into_tensor(self) -> Tensor {
        Array1::from(self.to_vec()).into_dyn()
    }
}

impl<const N: usize> IntoTensor for [f64; N] {
    fn into_tensor(self) -> Tensor {
        Array1::from(self.to_vec()).into_dyn()
    }
}

impl IntoTensor for Array1<f64> {
    fn into_tensor(self) -> Tensor {
        self.into_dyn()
    }
}

impl IntoTensor for Tensor {
    fn into_tensor(self) -> Tensor {
        self
    }
}

/// Shape two values of rank ≤ 1 broadcast to, if any.
pub(crate) fn broadcast_value_shape(a: &Tensor, b: &Tensor) -> Option<Vec<usize>> {
    match (a.shape(), b.shape()) {
        ([], other) | (other, []) => Some(other.to_vec()),
        (x, y) if x == y => Some(x.to_vec()),
        _ => None,
    }
}

/// Apply `op` element-wise over two rank ≤ 1 tensors after broadcasting.
///
/// # Panics
///
/// Panics if the shapes cannot be broadcast together.
pub(crate) fn zip_map(a: &Tensor, b: &Tensor, op: impl Fn(f64, f64) -> f64) -> Tensor {
    let views = broadcast_value_shape(a, b)
        .and_then(|shape| Some((a.broadcast(IxDyn(&shape))?, b.broadcast(IxDyn(&shape))?)));
    match views {
        Some((x, y)) => Zip::from(&x).and(&y).map_collect(|&x, &y| op(x, y)),
        None => panic!(
            "cannot broadcast value shapes {:?} and {:?}",
            a.shape(),
            b.shape()
        ),
    }
}

/// True if `pred` holds for every broadcast pair of elements.
///
/// Shapes that cannot be broadcast never satisfy a predicate.
pub(crate) fn all_pairs(a: &Tensor, b: &Tensor, pred: impl Fn(f64, f64) -> bool) -> bool {
    let Some(shape) = broadcast_value_shape(a, b) else {
        return false;
    };
    match (a.broadcast(IxDyn(&shape)), b.broadcast(IxDyn(&shape))) {
        (Some(a), Some(b)) => Zip::from(&a).and(&b).all(|&x, &y| pred(x, y)),
        _ => false,
    }
}
