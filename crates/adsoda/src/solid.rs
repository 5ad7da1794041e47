//! Solids: bounded intersections of halfspaces, and the engine that drives
//! them.
//!
//! Purpose
//! - Hold the H-representation (faces) together with the derived V-side
//!   (corners) and the face adjacency graph, recomputed on demand behind an
//!   `adjacencies_valid` flag.
//! - Provide the coupled polytope algorithms: vertex enumeration, projection
//!   to (n−1)-space, silhouette extrusion, depth ordering, CSG subtraction,
//!   scan conversion, and draw dispatch.
//!
//! Why this design
//! - Corners live in a per-solid arena and faces refer to them by index, so
//!   deep copies are plain `Clone` and invalidation is a single flag.
//! - Corner identity downstream is the arena index; enumeration visits each
//!   face combination exactly once, so corners are appended without
//!   geometric dedup.

use nalgebra::{DMatrix, DVector};

use crate::color::Color;
use crate::face::Face;
use crate::halfspace::{self, DegenerateHalfspace, Halfspace};
use crate::light::Light;
use crate::render::{DrawStyle, RenderSink};
use crate::util::index_combinations;
use crate::vector::{cross3, intersect_hyperplanes, Point};
use crate::voxel::VoxelGrid;

/// Relative depth of two solids along the projection axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthOrder {
    Behind,
    InFront,
    Neither,
}

/// An object in n-space described as the intersection of halfspaces.
#[derive(Clone, Debug)]
pub struct Solid {
    dim: usize,
    faces: Vec<Face>,
    corners: Vec<Point>,
    color: Color,
    adjacencies_valid: bool,
    silhouette: Option<Box<Solid>>,
}

impl Solid {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            faces: Vec::new(),
            corners: Vec::new(),
            color: Color::BLACK,
            adjacencies_valid: false,
            silhouette: None,
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// The derived vertex arena; meaningful only while adjacencies are valid.
    #[inline]
    pub fn corners(&self) -> &[Point] {
        &self.corners
    }

    #[inline]
    pub fn adjacencies_valid(&self) -> bool {
        self.adjacencies_valid
    }

    /// The cached silhouette prism, if one has been computed.
    #[inline]
    pub fn silhouette(&self) -> Option<&Solid> {
        self.silhouette.as_deref()
    }

    /// Add a bounding face. Derived state becomes stale.
    pub fn add_face(&mut self, face: Face) {
        debug_assert_eq!(face.dim(), self.dim);
        self.faces.push(face);
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.adjacencies_valid = false;
        self.silhouette = None;
    }

    /// Translate every face; derived state becomes stale.
    pub fn translate(&mut self, offset: &Point) {
        for face in &mut self.faces {
            face.halfspace.translate(offset);
        }
        self.invalidate();
    }

    /// Apply a linear map to every face; derived state becomes stale.
    pub fn transform(&mut self, m: &DMatrix<f64>) -> Result<(), DegenerateHalfspace> {
        for face in &mut self.faces {
            face.halfspace.transform(m)?;
        }
        self.invalidate();
        Ok(())
    }

    /// True when the intersection has too few corners to span the dimension.
    pub fn is_empty(&mut self) -> bool {
        self.ensure_adjacencies();
        self.corners.len() <= self.dim
    }

    pub fn ensure_adjacencies(&mut self) {
        if !self.adjacencies_valid {
            self.find_adjacencies();
        }
    }

    /// Recover the corners and the face adjacency graph, and drop redundant
    /// faces.
    ///
    /// Every n-element face combination is intersected; a solution that lies
    /// inside or on every face is a corner, and the contributing faces become
    /// mutually adjacent. A face left with fewer than n touching corners is
    /// implied by the others and is removed.
    pub fn find_adjacencies(&mut self) {
        self.corners.clear();
        for face in &mut self.faces {
            face.clear_caches();
        }

        for combo in index_combinations(self.faces.len(), self.dim) {
            let point = {
                let selected: Vec<&Halfspace> =
                    combo.iter().map(|&i| &self.faces[i].halfspace).collect();
                intersect_hyperplanes(&selected)
            };
            // Singular tuples (parallel or dependent boundaries) are skipped.
            let Some(point) = point else { continue };
            self.process_corner(point, &combo);
        }

        self.remove_redundant_faces();
        self.adjacencies_valid = true;
    }

    /// Accept an intersection point as a corner if it lies within the solid,
    /// and wire the contributing faces' caches.
    fn process_corner(&mut self, corner: Point, contributing: &[usize]) {
        if !halfspace::inside_or_on_all(self.faces.iter().map(|f| &f.halfspace), &corner) {
            return;
        }
        self.corners.push(corner);
        let corner_index = self.corners.len() - 1;

        for &fi in contributing {
            self.faces[fi].touching_corners.push(corner_index);
            for &fj in contributing {
                if fi != fj && !self.faces[fi].adjacent_faces.contains(&fj) {
                    self.faces[fi].adjacent_faces.push(fj);
                }
            }
        }
    }

    /// Removal invalidates face indices, so surviving adjacency sets are
    /// remapped; entries pointing at removed faces are dropped (their
    /// inequalities are implied by the rest, no boundary is lost).
    fn remove_redundant_faces(&mut self) {
        let dim = self.dim;
        let keep: Vec<bool> = self
            .faces
            .iter()
            .map(|f| f.touching_corners.len() >= dim)
            .collect();
        if keep.iter().all(|&k| k) {
            return;
        }
        let mut remap = vec![usize::MAX; self.faces.len()];
        let mut next = 0usize;
        for (i, &k) in keep.iter().enumerate() {
            if k {
                remap[i] = next;
                next += 1;
            }
        }
        let old = std::mem::take(&mut self.faces);
        self.faces = old
            .into_iter()
            .enumerate()
            .filter_map(|(i, mut face)| {
                if !keep[i] {
                    return None;
                }
                face.adjacent_faces.retain(|&j| keep[j]);
                for j in face.adjacent_faces.iter_mut() {
                    *j = remap[*j];
                }
                Some(face)
            })
            .collect();
    }

    /// Project onto the hyperplane xₙ = 0, producing one (n−1)-dimensional
    /// solid per face visible from the projection direction.
    ///
    /// The boundary between a visible face `(a, k)` and an adjacent face
    /// `(b, j)` projects to `(bₙaᵢ − aₙbᵢ)xᵢ + (bₙk − aₙj) ≥ 0`, correct up
    /// to sign. The sign is fixed with a corner on the face but not on the
    /// neighbor: its shadow must land inside the projected halfspace.
    pub fn project(&mut self, lights: &[Light], ambient: Color) -> Vec<Solid> {
        debug_assert!(self.dim >= 2);
        self.ensure_adjacencies();
        let dim = self.dim;

        let mut projected_solids = Vec::new();
        for fi in 0..self.faces.len() {
            let face_hs = &self.faces[fi].halfspace;
            // Backface culling: faces pointing away from the projection
            // hyperplane cannot contribute.
            if face_hs.normal[dim - 1] <= 0.0 {
                continue;
            }

            let mut projection = Solid::new(dim - 1);
            projection.set_color(self.lit_face_color(fi, lights, ambient));

            let an = face_hs.normal[dim - 1];
            for &aj in &self.faces[fi].adjacent_faces {
                let other = &self.faces[aj].halfspace;
                let bn = other.normal[dim - 1];

                let mut normal = DVector::zeros(dim - 1);
                for k in 0..dim - 1 {
                    normal[k] = bn * face_hs.normal[k] - an * other.normal[k];
                }
                let constant = bn * face_hs.constant - an * other.constant;
                let mut boundary = Halfspace::new(normal, constant);

                let Some(&ci) = self.faces[fi]
                    .touching_corners
                    .iter()
                    .find(|&&c| !self.faces[aj].touching_corners.contains(&c))
                else {
                    continue;
                };
                let shadow: Point = self.corners[ci].rows(0, dim - 1).into_owned();
                if !boundary.contains(&shadow) {
                    boundary.negate();
                }
                projection.add_face(Face::new(boundary));
            }

            projected_solids.push(projection);
        }
        projected_solids
    }

    /// Diffuse shading for one face: ambient plus each light's contribution
    /// against the unit face normal, modulating the solid color.
    fn lit_face_color(&self, fi: usize, lights: &[Light], ambient: Color) -> Color {
        let mut unit_normal = self.faces[fi].halfspace.normal.clone();
        let _ = unit_normal.normalize_mut();
        let mut shade = ambient;
        for light in lights {
            light.apply(&unit_normal, &mut shade);
        }
        self.color.modulate(shade)
    }

    pub fn ensure_silhouette(&mut self) {
        if self.silhouette.is_none() {
            self.find_silhouette();
        }
    }

    /// Build the silhouette of the xₙ-projection as an n-dimensional prism.
    ///
    /// Like projection, but only boundaries between a backface and a front
    /// face survive, and the xₙ coefficient is zeroed so the inequality holds
    /// for every xₙ: the silhouette edge is extruded along the projection
    /// axis.
    pub fn find_silhouette(&mut self) {
        self.ensure_adjacencies();
        let dim = self.dim;
        let mut silhouette = Solid::new(dim);

        for fi in 0..self.faces.len() {
            let back = &self.faces[fi].halfspace;
            if back.normal[dim - 1] > 0.0 {
                continue;
            }
            let an = back.normal[dim - 1];

            for &aj in &self.faces[fi].adjacent_faces {
                let front = &self.faces[aj].halfspace;
                let bn = front.normal[dim - 1];
                if bn <= 0.0 {
                    continue;
                }

                let mut normal = DVector::zeros(dim);
                for k in 0..dim - 1 {
                    normal[k] = bn * back.normal[k] - an * front.normal[k];
                }
                normal[dim - 1] = 0.0;
                let constant = bn * back.constant - an * front.constant;
                let mut boundary = Halfspace::new(normal, constant);

                let Some(&ci) = self.faces[fi]
                    .touching_corners
                    .iter()
                    .find(|&&c| !self.faces[aj].touching_corners.contains(&c))
                else {
                    continue;
                };
                if !boundary.contains_or_boundary(&self.corners[ci]) {
                    boundary.negate();
                }
                silhouette.add_face(Face::new(boundary));
            }
        }

        self.silhouette = Some(Box::new(silhouette));
    }

    /// Classify this solid's depth relative to `other`, assuming xₙ is the
    /// view axis. Resolves the acyclic orderings the hidden-solid pass needs;
    /// overlapping cycles come back as `Neither`.
    pub fn order(&mut self, other: &mut Solid) -> DepthOrder {
        self.ensure_silhouette();
        other.ensure_silhouette();
        self.ensure_adjacencies();
        other.ensure_adjacencies();

        if let Some(verdict) = occlusion_verdict(&self.corners, other) {
            return verdict;
        }
        // No corner of this solid overlaps the other's silhouette; one
        // silhouette may still entirely enclose the other, so test the
        // mirror image.
        if let Some(verdict) = occlusion_verdict(&other.corners, self) {
            return match verdict {
                DepthOrder::Behind => DepthOrder::InFront,
                DepthOrder::InFront => DepthOrder::Behind,
                DepthOrder::Neither => DepthOrder::Neither,
            };
        }
        DepthOrder::Neither
    }

    /// Everything in this solid but not in `other`, as a list of solids whose
    /// union is the difference. Slicing along each face of `other` in turn
    /// peels off the part outside that face; what is left at the end is the
    /// intersection and is discarded. The result may contain empty solids.
    pub fn subtract(&self, other: &Solid) -> Vec<Solid> {
        let mut difference = Vec::new();
        let mut remaining = self.clone();
        for face in &other.faces {
            let (inside, outside) = face.halfspace.slice_solid(&remaining);
            difference.push(outside);
            remaining = inside;
        }
        difference
    }

    /// Color every lattice voxel of `grid` covered by this solid.
    pub fn scan_convert(&self, grid: &mut VoxelGrid) {
        debug_assert_eq!(grid.dim(), self.dim);
        let dim = self.dim;
        let mut point: Point =
            DVector::from_iterator(dim, grid.minima().iter().map(|&lo| lo as f64));

        // Counter-with-carry walk over the lattice; coordinate 0 advances
        // fastest, matching the grid's linear layout.
        let mut element = 0usize;
        let mut i = 0usize;
        'grid: loop {
            if halfspace::inside_or_on_all(self.faces.iter().map(|f| &f.halfspace), &point) {
                grid.voxels[element] = self.color;
            }
            element += 1;

            loop {
                point[i] += 1.0;
                if point[i] > grid.maxima()[i] as f64 {
                    point[i] = grid.minima()[i] as f64;
                    i += 1;
                    if i == dim {
                        break 'grid;
                    }
                } else {
                    i = 0;
                    break;
                }
            }
        }
    }

    /// Draw a 1-dimensional solid as a line segment.
    pub fn draw_1d(&self, sink: &mut dyn RenderSink) {
        assert!(self.adjacencies_valid, "adjacencies must be valid to draw");
        assert_eq!(self.dim, 1);
        if self.corners.len() < 2 {
            return;
        }
        sink.set_color(self.color);
        sink.begin_line_loop();
        sink.vertex(self.corners[0][0] / 100.0, -2.0, 0.0);
        sink.vertex(self.corners[1][0] / 100.0, -2.0, 0.0);
        sink.end_line_loop();
    }

    /// Draw a 2-dimensional solid as a polygon.
    ///
    /// Corners are sorted by descending y and split into left and right
    /// chains by the left-of-ray test against the bottom→top direction; the
    /// closed outline is top, left chain, bottom, reversed right chain.
    pub fn draw_2d(&self, sink: &mut dyn RenderSink, style: DrawStyle) {
        assert!(self.adjacencies_valid, "adjacencies must be valid to draw");
        assert_eq!(self.dim, 2);
        if self.corners.len() < 2 {
            return;
        }

        let mut order: Vec<usize> = (0..self.corners.len()).collect();
        order.sort_by(|&a, &b| {
            self.corners[b][1]
                .partial_cmp(&self.corners[a][1])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let top = order[0];
        let bottom = *order.last().unwrap();

        let mut left_side = vec![top];
        let mut right_side = vec![top];
        for &ci in &order[1..order.len() - 1] {
            if left_of_ray(&self.corners[bottom], &self.corners[top], &self.corners[ci]) {
                left_side.push(ci);
            } else {
                right_side.push(ci);
            }
        }
        left_side.push(bottom);
        right_side.push(bottom);

        if style.fill {
            sink.set_color(self.color);
            sink.begin_polygon();
            self.emit_chain_2d(sink, &left_side, &right_side);
            sink.end_polygon();
        }
        if style.outline {
            sink.set_color(Color::WHITE);
            sink.begin_line_loop();
            self.emit_chain_2d(sink, &left_side, &right_side);
            sink.end_line_loop();
        }
    }

    fn emit_chain_2d(&self, sink: &mut dyn RenderSink, left: &[usize], right: &[usize]) {
        for &ci in left {
            let c = &self.corners[ci];
            sink.vertex(c[0] / 100.0, c[1] / 100.0, 0.0);
        }
        for &ci in right.iter().rev() {
            let c = &self.corners[ci];
            sink.vertex(c[0] / 100.0, c[1] / 100.0, 0.0);
        }
    }

    /// Draw a 3-dimensional solid face by face.
    ///
    /// Each face's vertices are ordered by the signed angle from a reference
    /// edge (the face's first two touching corners) around the face normal,
    /// then emitted as a closed polygon in the lit face color and, when
    /// outlining, as a white line loop.
    pub fn draw_3d(
        &self,
        sink: &mut dyn RenderSink,
        lights: &[Light],
        ambient: Color,
        style: DrawStyle,
    ) {
        assert!(self.adjacencies_valid, "adjacencies must be valid to draw");
        assert_eq!(self.dim, 3);

        for fi in 0..self.faces.len() {
            let touching = &self.faces[fi].touching_corners;
            if touching.len() < 2 {
                continue;
            }
            let face_color = self.lit_face_color(fi, lights, ambient);

            let p1 = &self.corners[touching[0]];
            let p2 = &self.corners[touching[1]];
            let reference = p2 - p1;
            let face_normal = &self.faces[fi].halfspace.normal;

            let mut angled: Vec<(f64, usize)> = touching[1..]
                .iter()
                .map(|&ci| {
                    let edge = &self.corners[ci] - p1;
                    let cross = cross3(&reference, &edge);
                    let mut theta = cross.norm().atan2(reference.dot(&edge));
                    if cross.dot(face_normal) < 0.0 {
                        theta = -theta;
                    }
                    (theta, ci)
                })
                .collect();
            angled.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

            if style.fill {
                sink.set_color(face_color);
                sink.begin_polygon();
                self.emit_face_3d(sink, touching[0], &angled);
                sink.end_polygon();
            }
            if style.outline {
                sink.set_color(Color::WHITE);
                sink.begin_line_loop();
                self.emit_face_3d(sink, touching[0], &angled);
                sink.end_line_loop();
            }
        }
    }

    fn emit_face_3d(&self, sink: &mut dyn RenderSink, anchor: usize, angled: &[(f64, usize)]) {
        let emit = |sink: &mut dyn RenderSink, c: &Point| {
            sink.vertex(c[0] / 100.0, c[1] / 100.0, c[2] / 100.0);
        };
        emit(sink, &self.corners[anchor]);
        for &(_, ci) in angled {
            emit(sink, &self.corners[ci]);
        }
        emit(sink, &self.corners[anchor]);
    }
}

/// Which side of the ray from `start` through `end` is `point` on?
fn left_of_ray(start: &Point, end: &Point, point: &Point) -> bool {
    let dot = (end[1] - start[1]) * (point[0] - start[0])
        + (start[0] - end[0]) * (point[1] - start[1]);
    dot < 0.0
}

/// One side of the depth test: does any corner land inside the occluder's
/// silhouette, and if so, on which side of the occluder's boundary?
///
/// The verdict is for the corners' owner: `Behind` when a corner fails a
/// backface of the occluder, `InFront` when it fails a front face. The scan
/// returns on the first violated face, in face-list order.
fn occlusion_verdict(corners: &[Point], occluder: &Solid) -> Option<DepthOrder> {
    let silhouette = occluder
        .silhouette
        .as_deref()
        .expect("silhouette computed before ordering");
    let dim = occluder.dim;

    for corner in corners {
        if !halfspace::inside_all(silhouette.faces.iter().map(|f| &f.halfspace), corner) {
            continue;
        }
        for face in &occluder.faces {
            let hs = &face.halfspace;
            if hs.normal[dim - 1] <= 0.0 {
                if !hs.contains(corner) {
                    return Some(DepthOrder::Behind);
                }
            } else if !hs.contains(corner) {
                return Some(DepthOrder::InFront);
            }
        }
    }
    None
}
