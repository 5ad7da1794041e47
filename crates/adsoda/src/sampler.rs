//! Deterministic random convex polygon solids.
//!
//! Model
//! - Start from equally spaced angles, add bounded angular and radial
//!   jitter, take the convex hull, and turn each hull edge into an inward
//!   halfspace.
//! - Determinism uses a replay token `(seed, index)` mixed into a single
//!   RNG, so a draw can be reproduced from its index alone.

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::face::Face;
use crate::halfspace::Halfspace;
use crate::solid::Solid;

/// Replay token making draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    /// Number of sampled directions; clamped to at least 3.
    pub vertices: usize,
    /// Angular jitter as a fraction of the base spacing. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radial jitter amplitude; radii are `base_radius · (1 + u)` with
    /// `u ∈ [−radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    /// Base radius in scene units.
    pub base_radius: f64,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertices: 12,
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 100.0,
        }
    }
}

/// Draw a random convex polygon as a 2-dimensional solid.
///
/// Returns `None` only when the sampled points collapse below a usable hull.
pub fn polygon_solid(cfg: RadialCfg, tok: ReplayToken) -> Option<Solid> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertices.max(3);
    let angle_jitter = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let radial_jitter = cfg.radial_jitter.max(0.0);
    let base_radius = cfg.base_radius.max(1e-9);
    let spacing = 2.0 * std::f64::consts::PI / (n as f64);

    let mut angles: Vec<f64> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * angle_jitter * spacing;
            (k as f64) * spacing + jitter
        })
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let points: Vec<[f64; 2]> = angles
        .into_iter()
        .map(|theta| {
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * radial_jitter;
            let r = (1.0 + u).max(1e-6) * base_radius;
            [theta.cos() * r, theta.sin() * r]
        })
        .collect();

    let hull = convex_hull(&points)?;
    if hull.len() < 3 {
        return None;
    }

    let mut solid = Solid::new(2);
    for k in 0..hull.len() {
        let p = hull[k];
        let q = hull[(k + 1) % hull.len()];
        // For a CCW hull the interior lies left of each edge, so the inward
        // normal of p→q is (−dy, dx).
        let inward = [p[1] - q[1], q[0] - p[0]];
        let constant = -(inward[0] * p[0] + inward[1] * p[1]);
        solid.add_face(Face::new(Halfspace::new(
            DVector::from_vec(vec![inward[0], inward[1]]),
            constant,
        )));
    }
    Some(solid)
}

/// Andrew's monotone chain convex hull (CCW order).
fn convex_hull(points: &[[f64; 2]]) -> Option<Vec<[f64; 2]>> {
    if points.len() < 3 {
        return None;
    }
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| {
        match a[0].partial_cmp(&b[0]).unwrap_or(std::cmp::Ordering::Equal) {
            std::cmp::Ordering::Equal => {
                a[1].partial_cmp(&b[1]).unwrap_or(std::cmp::Ordering::Equal)
            }
            other => other,
        }
    });
    pts.dedup_by(|a, b| (a[0] - b[0]).hypot(a[1] - b[1]) < 1e-12);
    if pts.len() < 3 {
        return None;
    }

    let mut lower: Vec<[f64; 2]> = Vec::with_capacity(pts.len());
    for &p in &pts {
        while lower.len() >= 2 && turn(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<[f64; 2]> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && turn(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    Some(hull)
}

#[inline]
fn turn(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}
