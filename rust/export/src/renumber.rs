// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bijection between native element IDs and Elmer's two numbering spaces.
//!
//! The source enumerates edges, then faces, then volumes. Concatenating the
//! three lists gives the combined order; an element's position in it (plus
//! one) is its target ID. Edges and faces occupy `1..=NbBoundary`, volumes
//! follow and are re-based to `1..=NbVolumes` by subtracting `NbBoundary`.

use elmer_lite_mesh::{ElementCategory, ElementId, MeshSource};

use crate::error::{Error, Result};

/// Native element ID to target ID table, built once per export.
#[derive(Debug, Clone)]
pub struct RenumberTable {
    /// Native IDs in combined order (edges, faces, volumes).
    order: Vec<ElementId>,
    /// Target ID by native ID, indexed by `native - 1`.
    target: Vec<u32>,
    edges: usize,
    faces: usize,
}

impl RenumberTable {
    /// Builds the table from the source's by-category enumeration.
    ///
    /// # Errors
    ///
    /// [`Error::NumberingMismatch`] when the element count differs from the
    /// highest native ID or a zero ID appears, and [`Error::DuplicateElement`]
    /// when an ID is enumerated twice.
    pub fn build<S: MeshSource + ?Sized>(source: &S) -> Result<Self> {
        let edges = source.elements_of(ElementCategory::Edge);
        let faces = source.elements_of(ElementCategory::Face);
        let volumes = source.elements_of(ElementCategory::Volume);
        Self::from_lists(edges, faces, volumes)
    }

    /// Builds the table from explicit per-category ID lists.
    pub fn from_lists(
        edges: Vec<ElementId>,
        faces: Vec<ElementId>,
        volumes: Vec<ElementId>,
    ) -> Result<Self> {
        let edge_count = edges.len();
        let face_count = faces.len();

        let mut order = edges;
        order.extend(faces);
        order.extend(volumes);

        let max_id = order.iter().map(|e| e.get()).max().unwrap_or(0);
        let mismatch = || Error::NumberingMismatch {
            elements: order.len(),
            max_id,
        };
        if order.len() != max_id as usize {
            return Err(mismatch());
        }

        let mut target = vec![0u32; order.len()];
        for (position, element) in order.iter().enumerate() {
            let Some(slot) = (element.get() as usize)
                .checked_sub(1)
                .and_then(|i| target.get_mut(i))
            else {
                return Err(mismatch());
            };
            if *slot != 0 {
                return Err(Error::DuplicateElement(*element));
            }
            *slot = position as u32 + 1;
        }

        Ok(Self {
            order,
            target,
            edges: edge_count,
            faces: face_count,
        })
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` for a mesh without elements.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of edge elements.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Number of face elements.
    pub fn face_count(&self) -> usize {
        self.faces
    }

    /// `NbEdges + NbFaces`, the offset that re-bases volume IDs.
    pub fn boundary_count(&self) -> usize {
        self.edges + self.faces
    }

    /// Number of volume elements.
    pub fn volume_count(&self) -> usize {
        self.order.len() - self.boundary_count()
    }

    /// Native IDs in combined order.
    pub fn combined(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.order.iter().copied()
    }

    /// Edges then faces, in enumeration order.
    pub fn boundary_elements(&self) -> &[ElementId] {
        &self.order[..self.boundary_count()]
    }

    /// Volumes in enumeration order.
    pub fn volume_elements(&self) -> &[ElementId] {
        &self.order[self.boundary_count()..]
    }

    /// Position of the element in the combined order, plus one.
    pub fn target_id(&self, element: ElementId) -> Option<usize> {
        let index = (element.get() as usize).checked_sub(1)?;
        self.target.get(index).map(|&t| t as usize)
    }

    /// Boundary-local ID (`1..=NbBoundary`) of an edge or face.
    pub fn boundary_id(&self, element: ElementId) -> Option<usize> {
        self.target_id(element)
            .filter(|&t| t <= self.boundary_count())
    }

    /// Re-based volume-local ID (`1..=NbVolumes`) of a volume.
    pub fn volume_id(&self, element: ElementId) -> Option<usize> {
        self.target_id(element)
            .filter(|&t| t > self.boundary_count())
            .map(|t| t - self.boundary_count())
    }
}
