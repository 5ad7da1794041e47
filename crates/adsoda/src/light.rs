//! Directional lights: points at infinity with an RGB intensity.

use nalgebra::DVector;

use crate::color::Color;
use crate::vector::Point;

/// A colored light source at infinity shining along `direction`.
///
/// The direction is normalized by the owning space when the light is added;
/// `apply` assumes both the direction and the face normal are unit length.
#[derive(Clone, Debug)]
pub struct Light {
    pub direction: DVector<f64>,
    pub intensity: Color,
}

impl Light {
    #[inline]
    pub fn new(direction: DVector<f64>, intensity: Color) -> Self {
        Self {
            direction,
            intensity,
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.direction.len()
    }

    pub(crate) fn normalize(&mut self) {
        let _ = self.direction.normalize_mut();
    }

    /// Accumulate this light's diffuse contribution on a face with unit
    /// normal `normal` into `shade`, clipping each channel to 1.
    pub fn apply(&self, normal: &Point, shade: &mut Color) {
        let intensity = -(normal.dot(&self.direction));
        // The face points away from the light.
        if intensity < 0.0 {
            return;
        }
        shade.red += self.intensity.red * intensity;
        shade.green += self.intensity.green * intensity;
        shade.blue += self.intensity.blue * intensity;
        shade.clip_unit();
    }
}

#[cfg(test)]
mod tests {
    use super::Light;
    use crate::color::Color;
    use nalgebra::dvector;

    #[test]
    fn head_on_light_contributes_full_intensity() {
        let light = Light::new(dvector![0.0, 0.0, -1.0], Color::new(0.5, 0.25, 1.0));
        let mut shade = Color::new(0.1, 0.1, 0.1);
        light.apply(&dvector![0.0, 0.0, 1.0], &mut shade);
        assert!((shade.red - 0.6).abs() < 1e-12);
        assert!((shade.green - 0.35).abs() < 1e-12);
        assert!((shade.blue - 1.0).abs() < 1e-12);
    }

    #[test]
    fn faces_pointing_away_are_unlit() {
        let light = Light::new(dvector![0.0, 0.0, 1.0], Color::WHITE);
        let mut shade = Color::new(0.2, 0.2, 0.2);
        light.apply(&dvector![0.0, 0.0, 1.0], &mut shade);
        assert_eq!(shade, Color::new(0.2, 0.2, 0.2));
    }

    #[test]
    fn oblique_light_scales_with_the_cosine() {
        let inv_sqrt2 = std::f64::consts::FRAC_1_SQRT_2;
        let light = Light::new(dvector![-inv_sqrt2, -inv_sqrt2], Color::WHITE);
        let mut shade = Color::BLACK;
        light.apply(&dvector![0.0, 1.0], &mut shade);
        assert!((shade.green - inv_sqrt2).abs() < 1e-12);
    }
}
