//! Closed halfspaces `normal·x + constant ≥ 0`.
//!
//! The first n coefficients double as the normal vector; the constant picks
//! which of the parallel hyperplanes bounds the halfspace. A point with a
//! strictly positive residual is inside; the boundary band is `±EPS` wide.

use std::fmt;

use nalgebra::{DMatrix, DVector};

use crate::cfg::EPS;
use crate::face::Face;
use crate::solid::Solid;
use crate::vector::Point;

/// Closed halfspace `normal·x + constant ≥ 0` in n-space.
///
/// Invariants:
/// - `normal.len()` is the nominal dimension n; together with the constant
///   the representation has exactly n + 1 coefficients.
/// - `negate` flips every coefficient, preserving the boundary hyperplane
///   while swapping inside and outside.
#[derive(Clone, Debug, PartialEq)]
pub struct Halfspace {
    pub normal: DVector<f64>,
    pub constant: f64,
}

/// A halfspace is represented by the equation of its bounding hyperplane, so
/// a hyperplane is the same representation read as a boundary.
pub type Hyperplane = Halfspace;

/// Every normal coefficient is zero: the equation bounds nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DegenerateHalfspace;

impl fmt::Display for DegenerateHalfspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "halfspace has an all-zero normal")
    }
}

impl std::error::Error for DegenerateHalfspace {}

impl Halfspace {
    #[inline]
    pub fn new(normal: DVector<f64>, constant: f64) -> Self {
        Self { normal, constant }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.normal.len()
    }

    /// Residual of the boundary equation at `p`.
    #[inline]
    pub fn eval(&self, p: &Point) -> f64 {
        self.normal.dot(p) + self.constant
    }

    /// Strictly inside: points on or within `EPS` of the boundary are out.
    #[inline]
    pub fn contains(&self, p: &Point) -> bool {
        self.eval(p) > EPS
    }

    /// Inside or on the boundary (within `EPS`).
    #[inline]
    pub fn contains_or_boundary(&self, p: &Point) -> bool {
        self.eval(p) > -EPS
    }

    /// Flip the normal without moving the boundary hyperplane.
    pub fn negate(&mut self) {
        self.normal.neg_mut();
        self.constant = -self.constant;
    }

    /// Negated copy.
    pub fn negated(&self) -> Halfspace {
        let mut flipped = self.clone();
        flipped.negate();
        flipped
    }

    /// Parallel transport of the boundary: substituting `x − offset` for `x`
    /// only changes the constant, `k ← k − a·offset`.
    pub fn translate(&mut self, offset: &Point) {
        self.constant -= self.normal.dot(offset);
    }

    /// Apply an invertible linear map to the halfspace.
    ///
    /// The transformed normal is `M·a`. The constant comes from transporting
    /// one point of the boundary: the axis intercept `pᵢ = −k/aᵢ` on the
    /// first axis with `aᵢ ≠ 0`. Its image is the i-th column of `M` scaled
    /// by the intercept, and the new constant makes the transformed point
    /// satisfy the transformed equation.
    pub fn transform(&mut self, m: &DMatrix<f64>) -> Result<(), DegenerateHalfspace> {
        let dim = self.dim();
        let axis = (0..dim)
            .find(|&i| self.normal[i] != 0.0)
            .ok_or(DegenerateHalfspace)?;
        let intercept = -self.constant / self.normal[axis];

        let transformed = m * &self.normal;
        let mut sum = 0.0;
        for j in 0..dim {
            sum += m[(j, axis)] * intercept * transformed[j];
        }
        self.normal = transformed;
        self.constant = -sum;
        Ok(())
    }

    /// The n + 1 coefficients as one equation row for the solver.
    pub(crate) fn equation_row(&self) -> DVector<f64> {
        let dim = self.dim();
        let mut row = DVector::zeros(dim + 1);
        row.rows_mut(0, dim).copy_from(&self.normal);
        row[dim] = self.constant;
        row
    }

    /// Slice `solid` along this boundary into an (inside, outside) pair.
    ///
    /// Both halves are copies of `solid`; the inside copy gains this
    /// halfspace as a face, the outside copy its negation. Either half may be
    /// empty; callers collapse empties later.
    pub fn slice_solid(&self, solid: &Solid) -> (Solid, Solid) {
        let mut inside = solid.clone();
        inside.add_face(Face::new(self.clone()));
        let mut outside = solid.clone();
        outside.add_face(Face::new(self.negated()));
        (inside, outside)
    }
}

/// True when `p` is strictly inside every halfspace; short-circuits on the
/// first violation.
pub fn inside_all<'a, I>(halfspaces: I, p: &Point) -> bool
where
    I: IntoIterator<Item = &'a Halfspace>,
{
    halfspaces.into_iter().all(|h| h.contains(p))
}

/// True when `p` is inside or on every halfspace.
pub fn inside_or_on_all<'a, I>(halfspaces: I, p: &Point) -> bool
where
    I: IntoIterator<Item = &'a Halfspace>,
{
    halfspaces.into_iter().all(|h| h.contains_or_boundary(p))
}

#[cfg(test)]
mod tests {
    use super::{DegenerateHalfspace, Halfspace};
    use crate::transform::rotation;
    use nalgebra::{dvector, DVector};
    use proptest::prelude::*;

    #[test]
    fn membership_respects_the_tolerance_band() {
        // x ≥ 1.
        let h = Halfspace::new(dvector![1.0, 0.0], -1.0);
        assert!(h.contains(&dvector![2.0, 5.0]));
        assert!(!h.contains(&dvector![1.0, 0.0]));
        assert!(h.contains_or_boundary(&dvector![1.0, 0.0]));
        assert!(!h.contains_or_boundary(&dvector![0.9, 0.0]));
    }

    #[test]
    fn all_zero_normal_cannot_be_transformed() {
        let mut h = Halfspace::new(DVector::zeros(3), 4.0);
        let m = rotation(3, 0, 1, 0.5);
        assert_eq!(h.transform(&m), Err(DegenerateHalfspace));
    }

    #[test]
    fn transform_moves_the_boundary_with_the_map() {
        // x ≥ 2, rotated a quarter turn in the xy-plane, becomes y ≥ 2.
        let mut h = Halfspace::new(dvector![1.0, 0.0], -2.0);
        h.transform(&rotation(2, 0, 1, -std::f64::consts::FRAC_PI_2))
            .unwrap();
        assert!((h.normal[0]).abs() < 1e-12);
        assert!((h.normal[1] - 1.0).abs() < 1e-12);
        assert!((h.constant + 2.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn negate_twice_is_identity(
            a in -50.0f64..50.0, b in -50.0f64..50.0, k in -50.0f64..50.0,
        ) {
            let h = Halfspace::new(dvector![a, b], k);
            let mut twice = h.clone();
            twice.negate();
            twice.negate();
            prop_assert_eq!(h, twice);
        }

        #[test]
        fn translate_round_trips(
            a in -50.0f64..50.0, b in 0.5f64..50.0, k in -50.0f64..50.0,
            ox in -50.0f64..50.0, oy in -50.0f64..50.0,
        ) {
            let h = Halfspace::new(dvector![a, b], k);
            let offset = dvector![ox, oy];
            let mut moved = h.clone();
            moved.translate(&offset);
            moved.translate(&-offset);
            prop_assert!((moved.constant - h.constant).abs() < 1e-9);
            prop_assert_eq!(moved.normal, h.normal);
        }

        #[test]
        fn transform_round_trips_under_rotations(
            a in 0.5f64..10.0, b in -10.0f64..10.0, c in -10.0f64..10.0,
            k in -10.0f64..10.0, angle in -3.0f64..3.0,
        ) {
            let h = Halfspace::new(dvector![a, b, c], k);
            let mut moved = h.clone();
            moved.transform(&rotation(3, 0, 2, angle)).unwrap();
            moved.transform(&rotation(3, 0, 2, -angle)).unwrap();
            prop_assert!((&moved.normal - &h.normal).norm() < 1e-8);
            prop_assert!((moved.constant - h.constant).abs() < 1e-6);
        }
    }
}
