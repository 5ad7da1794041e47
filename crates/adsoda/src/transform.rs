//! Dense transform-matrix constructors.
//!
//! The engine consumes square matrices only through construction and
//! multiplication; both products come from `nalgebra`. What lives here is the
//! two constructors the pipeline needs: plane rotations and diagonal scaling.

use nalgebra::{DMatrix, DVector};

/// Rotation by `angle` radians in the plane spanned by the standard basis
/// vectors `axis1` and `axis2` (zero-based). With `axis1 = 0`, `axis2 = 1`
/// this rotates in the xy-plane.
pub fn rotation(dim: usize, axis1: usize, axis2: usize, angle: f64) -> DMatrix<f64> {
    debug_assert!(axis1 < dim && axis2 < dim && axis1 != axis2);
    let mut m = DMatrix::identity(dim, dim);
    let (sin, cos) = angle.sin_cos();
    m[(axis1, axis1)] = cos;
    m[(axis2, axis2)] = cos;
    m[(axis1, axis2)] = sin;
    m[(axis2, axis1)] = -sin;
    m
}

/// Diagonal scaling; each factor scales the corresponding axis.
pub fn scale(factors: &DVector<f64>) -> DMatrix<f64> {
    DMatrix::from_diagonal(factors)
}
