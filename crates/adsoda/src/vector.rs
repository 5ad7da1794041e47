//! Points and small vector helpers on top of `nalgebra::DVector`.
//!
//! A point is a vector read positionally; dimension is a runtime value so the
//! same code serves the whole projection cascade (4 → 3 → 2 → 1).

use nalgebra::DVector;

use crate::halfspace::Halfspace;
use crate::solve::solve_system;

/// A position in n-space.
pub type Point = DVector<f64>;

/// Right-handed cross product; both operands must be 3-dimensional.
pub fn cross3(a: &Point, b: &Point) -> Point {
    debug_assert_eq!(a.len(), 3);
    debug_assert_eq!(b.len(), 3);
    DVector::from_vec(vec![
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ])
}

/// Intersection point of `n` hyperplanes in n-space, if it is unique.
///
/// Interprets each halfspace's coefficients as one boundary equation and
/// solves the resulting n×(n+1) system.
pub fn intersect_hyperplanes(hyperplanes: &[&Halfspace]) -> Option<Point> {
    let rows = hyperplanes.iter().map(|h| h.equation_row()).collect();
    solve_system(rows).point()
}

#[cfg(test)]
mod tests {
    use super::{cross3, intersect_hyperplanes, Point};
    use crate::halfspace::Halfspace;
    use nalgebra::dvector;
    use proptest::prelude::*;

    #[test]
    fn plane_pair_intersects_in_2d() {
        // x = 3 and y = -2.
        let h1 = Halfspace::new(dvector![1.0, 0.0], -3.0);
        let h2 = Halfspace::new(dvector![0.0, 1.0], 2.0);
        let p = intersect_hyperplanes(&[&h1, &h2]).expect("unique intersection");
        assert!((p - dvector![3.0, -2.0]).norm() < 1e-12);
    }

    #[test]
    fn parallel_planes_do_not_intersect() {
        let h1 = Halfspace::new(dvector![1.0, 1.0], 0.0);
        let h2 = Halfspace::new(dvector![2.0, 2.0], -5.0);
        assert!(intersect_hyperplanes(&[&h1, &h2]).is_none());
    }

    proptest! {
        #[test]
        fn cross_is_orthogonal_to_both_operands(
            ax in -10.0f64..10.0, ay in -10.0f64..10.0, az in -10.0f64..10.0,
            bx in -10.0f64..10.0, by in -10.0f64..10.0, bz in -10.0f64..10.0,
        ) {
            let a: Point = dvector![ax, ay, az];
            let b: Point = dvector![bx, by, bz];
            let c = cross3(&a, &b);
            prop_assert!(c.dot(&a).abs() < 1e-9);
            prop_assert!(c.dot(&b).abs() < 1e-9);
        }
    }
}
