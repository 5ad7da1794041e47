//! Demo scene construction, one scene per supported dimension.

use adsoda::color::Color;
use adsoda::light::Light;
use adsoda::shapes::{block, demo_polygon};
use adsoda::space::Space;
use nalgebra::dvector;

/// Three translated copies of the demo polygon under one white light.
pub fn demo_2d() -> Space {
    let mut polygon = demo_polygon();
    polygon.set_color(Color::new(0.0, 1.0, 1.0));
    let mut polygon2 = polygon.clone();
    polygon2.set_color(Color::new(1.0, 0.0, 1.0));
    let mut polygon3 = polygon.clone();
    polygon3.set_color(Color::new(0.0, 1.0, 0.0));

    polygon.translate(&dvector![50.0, 80.0]);
    polygon2.translate(&dvector![-80.0, -20.0]);
    polygon3.translate(&dvector![80.0, -130.0]);

    let mut space = Space::new(2, Color::grey(0.1));
    space.add_solid(polygon);
    space.add_solid(polygon2);
    space.add_solid(polygon3);
    space.add_light(Light::new(dvector![0.0, -100.0], Color::WHITE));
    space
}

/// Two cubes in opposite octants under one white light.
pub fn demo_3d() -> Space {
    let mut space = Space::new(3, Color::grey(0.2));

    let mut cube = block(&[(10.0, 130.0), (10.0, 130.0), (10.0, 130.0)]);
    cube.set_color(Color::new(0.0, 1.0, 1.0));
    space.add_solid(cube);

    let mut cube = block(&[(-130.0, -10.0), (-130.0, -10.0), (-130.0, -10.0)]);
    cube.set_color(Color::new(1.0, 1.0, 0.0));
    space.add_solid(cube);

    space.add_light(Light::new(dvector![-100.0, -100.0, -100.0], Color::WHITE));
    space
}

/// Two tesseracts in opposite orthants under one green-tinted light.
pub fn demo_4d() -> Space {
    let mut space = Space::new(4, Color::grey(0.3));

    let b = (10.0, 150.0);
    let mut hypercube = block(&[b, b, b, b]);
    hypercube.set_color(Color::grey(0.7));
    space.add_solid(hypercube);

    let b = (-150.0, -10.0);
    let mut hypercube = block(&[b, b, b, b]);
    hypercube.set_color(Color::new(1.0, 0.0, 0.0));
    space.add_solid(hypercube);

    space.add_light(Light::new(
        dvector![-100.0, -100.0, -100.0, -100.0],
        Color::new(0.3, 1.0, 0.3),
    ));
    space
}

#[cfg(test)]
mod tests {
    use super::{demo_2d, demo_3d, demo_4d};

    #[test]
    fn scenes_have_the_documented_shape() {
        let plane = demo_2d();
        assert_eq!(plane.dim(), 2);
        assert_eq!(plane.solids().len(), 3);
        assert_eq!(plane.lights().len(), 1);

        let volume = demo_3d();
        assert_eq!(volume.dim(), 3);
        assert_eq!(volume.solids().len(), 2);

        let hyper = demo_4d();
        assert_eq!(hyper.dim(), 4);
        assert_eq!(hyper.solids().len(), 2);
        assert!((hyper.lights()[0].direction.norm() - 1.0).abs() < 1e-12);
    }
}
