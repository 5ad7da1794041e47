//! Canonical solids for demos, tests, and benchmarks.
//!
//! Constructors are small and explicit so callers can rely on the exact face
//! order (enumeration order matters downstream: corners and draw output are
//! deterministic given the face list).

use nalgebra::DVector;

use crate::face::Face;
use crate::halfspace::Halfspace;
use crate::solid::Solid;

/// Axis-aligned box from per-axis `(min, max)` bounds, in any dimension.
///
/// Faces come in axis order, lower bound first: `xᵢ − lo ≥ 0`, then
/// `−xᵢ + hi ≥ 0`.
pub fn block(bounds: &[(f64, f64)]) -> Solid {
    let dim = bounds.len();
    let mut solid = Solid::new(dim);
    for (axis, &(lo, hi)) in bounds.iter().enumerate() {
        let mut inward = DVector::zeros(dim);
        inward[axis] = 1.0;
        solid.add_face(Face::new(Halfspace::new(inward, -lo)));

        let mut inward = DVector::zeros(dim);
        inward[axis] = -1.0;
        solid.add_face(Face::new(Halfspace::new(inward, hi)));
    }
    solid
}

/// The six-face demo polygon: a diamond of radius 100 clipped by `x ≥ −50`
/// and `2x + y ≤ 140`.
pub fn demo_polygon() -> Solid {
    let mut polygon = Solid::new(2);
    let faces: [(f64, f64, f64); 6] = [
        (1.0, 1.0, 100.0),
        (-1.0, -1.0, 100.0),
        (1.0, -1.0, 100.0),
        (-1.0, 1.0, 100.0),
        (1.0, 0.0, 50.0),
        (-2.0, -1.0, 140.0),
    ];
    for (a, b, k) in faces {
        polygon.add_face(Face::new(Halfspace::new(DVector::from_vec(vec![a, b]), k)));
    }
    polygon
}
