//! Faces: bounding halfspaces with adjacency caches.
//!
//! A face stores arena indices rather than references: corners index into the
//! owning solid's corner list, adjacent faces into its face list. Both caches
//! are filled exclusively by the solid's adjacency pass and must not be read
//! while that solid reports its adjacencies as invalid.

use crate::halfspace::Halfspace;

/// One bounding constraint of a solid, plus the vertices that lie on it and
/// the faces sharing at least one vertex with it.
#[derive(Clone, Debug)]
pub struct Face {
    pub halfspace: Halfspace,
    pub(crate) touching_corners: Vec<usize>,
    pub(crate) adjacent_faces: Vec<usize>,
}

impl Face {
    pub fn new(halfspace: Halfspace) -> Self {
        Self {
            halfspace,
            touching_corners: Vec::new(),
            adjacent_faces: Vec::new(),
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.halfspace.dim()
    }

    /// Indices of the owning solid's corners lying on this face.
    #[inline]
    pub fn touching_corners(&self) -> &[usize] {
        &self.touching_corners
    }

    /// Indices of the owning solid's faces adjacent to this one.
    #[inline]
    pub fn adjacent_faces(&self) -> &[usize] {
        &self.adjacent_faces
    }

    pub(crate) fn clear_caches(&mut self) {
        self.touching_corners.clear();
        self.adjacent_faces.clear();
    }
}
