//! Spaces: euclidean n-space containing solids and lights.
//!
//! A space owns its solids; projection builds a fresh lower-dimensional space
//! and leaves the source's solids untouched (apart from bringing their
//! derived state up to date).

use nalgebra::DMatrix;

use crate::color::Color;
use crate::halfspace::DegenerateHalfspace;
use crate::light::Light;
use crate::render::{DrawStyle, RenderSink};
use crate::solid::{DepthOrder, Solid};
use crate::voxel::VoxelGrid;

/// Euclidean n-space with an ambient color, lights, and owned solids.
#[derive(Clone, Debug)]
pub struct Space {
    dim: usize,
    ambient: Color,
    lights: Vec<Light>,
    solids: Vec<Solid>,
}

impl Space {
    pub fn new(dim: usize, ambient: Color) -> Self {
        Self {
            dim,
            ambient,
            lights: Vec::new(),
            solids: Vec::new(),
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn ambient(&self) -> Color {
        self.ambient
    }

    #[inline]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    #[inline]
    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    pub fn add_solid(&mut self, solid: Solid) {
        debug_assert_eq!(solid.dim(), self.dim);
        self.solids.push(solid);
    }

    /// Lights are stored with unit direction.
    pub fn add_light(&mut self, mut light: Light) {
        debug_assert_eq!(light.dim(), self.dim);
        light.normalize();
        self.lights.push(light);
    }

    /// Drop every solid.
    pub fn clear(&mut self) {
        self.solids.clear();
    }

    /// Detach the solids without destroying them.
    pub fn take_solids(&mut self) -> Vec<Solid> {
        std::mem::take(&mut self.solids)
    }

    /// Move every solid of `other` into this space.
    pub fn absorb(&mut self, mut other: Space) {
        debug_assert_eq!(other.dim, self.dim);
        self.solids.append(&mut other.solids);
    }

    pub fn ensure_adjacencies(&mut self) {
        for solid in &mut self.solids {
            solid.ensure_adjacencies();
        }
    }

    /// Drop solids whose intersection is empty (too few corners to span the
    /// dimension).
    pub fn eliminate_empty_solids(&mut self) {
        for solid in &mut self.solids {
            solid.ensure_adjacencies();
        }
        let dim = self.dim;
        self.solids.retain(|solid| solid.corners().len() > dim);
    }

    /// Remove everything intersecting `solid`: each owned solid is replaced
    /// by its difference from `solid`, possibly broken into several pieces.
    pub fn subtract(&mut self, solid: &Solid) {
        let mut difference = Vec::new();
        for own in &self.solids {
            difference.extend(own.subtract(solid));
        }
        self.solids = difference;
    }

    /// Apply a linear map to every solid.
    pub fn transform(&mut self, m: &DMatrix<f64>) -> Result<(), DegenerateHalfspace> {
        for solid in &mut self.solids {
            solid.transform(m)?;
        }
        Ok(())
    }

    /// Project every solid onto the hyperplane xₙ = 0, replacing the contents
    /// of `projection` with the per-face projected solids. Lighting comes
    /// from this space's lights and ambient color.
    pub fn project_to(&mut self, projection: &mut Space) {
        debug_assert_eq!(projection.dim, self.dim - 1);
        self.eliminate_empty_solids();
        projection.clear();

        let (lights, ambient) = (&self.lights, self.ambient);
        for solid in &mut self.solids {
            for projected in solid.project(lights, ambient) {
                projection.add_solid(projected);
            }
        }
    }

    /// Remove the hidden parts of every solid.
    ///
    /// Each solid is clipped, in a scratch space of its own, by the
    /// silhouette of every solid strictly in front of it; what survives
    /// replaces it. Pairs ordered `Neither` (disjoint or cyclic overlap) are
    /// left alone, which can leave overdraw.
    pub fn remove_hidden_solids(&mut self) {
        let mut source = self.clone();
        self.solids.clear();

        for i in 0..source.solids.len() {
            let mut clipped = source.solids[i].clone();
            clipped.ensure_adjacencies();
            clipped.ensure_silhouette();

            let mut result = Space::new(self.dim, self.ambient);
            result.add_solid(clipped.clone());

            for j in 0..source.solids.len() {
                if i == j {
                    continue;
                }
                let occluder = &mut source.solids[j];
                if clipped.order(occluder) != DepthOrder::Behind {
                    continue;
                }
                let silhouette = occluder.silhouette().expect("computed by order");
                result.subtract(silhouette);
            }

            self.solids.extend(result.take_solids());
        }
    }

    /// Scan convert every solid into `grid`.
    pub fn scan_convert(&self, grid: &mut VoxelGrid) {
        for solid in &self.solids {
            solid.scan_convert(grid);
        }
    }

    pub fn draw_1d(&self, sink: &mut dyn RenderSink) {
        for solid in &self.solids {
            solid.draw_1d(sink);
        }
    }

    pub fn draw_2d(&self, sink: &mut dyn RenderSink, style: DrawStyle) {
        for solid in &self.solids {
            solid.draw_2d(sink, style);
        }
    }

    pub fn draw_3d(&self, sink: &mut dyn RenderSink, style: DrawStyle) {
        for solid in &self.solids {
            solid.draw_3d(sink, &self.lights, self.ambient, style);
        }
    }
}
