// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Owned in-memory mesh.
//!
//! The [`Mesh`] keeps nodes and elements in insertion order (which is their
//! native enumeration order) alongside ID lookup tables, per-category element
//! lists, the named groups, and a [`PointLocator`] built once at construction.

use nalgebra::Point3;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::ids::{ElementCategory, ElementId, GeometryType, NodeId};
use crate::source::{Group, MeshSource};
use crate::spatial::PointLocator;

/// Data stored for an element: its geometry and ordered connectivity.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub geometry: GeometryType,
    pub nodes: SmallVec<[NodeId; 8]>,
}

/// An immutable finite-element mesh. Build one with [`crate::MeshBuilder`].
#[derive(Debug, Clone)]
pub struct Mesh {
    pub(crate) name: String,

    // Entity storage, in native enumeration order
    pub(crate) nodes: Vec<(NodeId, Point3<f64>)>,
    pub(crate) elements: Vec<(ElementId, ElementData)>,

    // Lookup: native ID -> storage position
    pub(crate) node_index: FxHashMap<NodeId, usize>,
    pub(crate) element_index: FxHashMap<ElementId, usize>,

    // Per-category enumeration (edges, faces, volumes)
    pub(crate) by_category: [Vec<ElementId>; 3],

    pub(crate) groups: Vec<Group>,
    pub(crate) locator: PointLocator,
}

impl Mesh {
    /// Mesh name, used by hosts to name the output directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of elements of every category.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Returns the number of elements of one category.
    pub fn count_of(&self, category: ElementCategory) -> usize {
        self.by_category[category_slot(category)].len()
    }

    /// Returns the element data for the given ID, or `None` if not found.
    pub fn element(&self, id: ElementId) -> Option<&ElementData> {
        self.element_index.get(&id).map(|&i| &self.elements[i].1)
    }

    /// All groups in presentation order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The point locator over this mesh's volume elements.
    pub fn locator(&self) -> &PointLocator {
        &self.locator
    }
}

pub(crate) fn category_slot(category: ElementCategory) -> usize {
    match category {
        ElementCategory::Edge => 0,
        ElementCategory::Face => 1,
        ElementCategory::Volume => 2,
    }
}

impl MeshSource for Mesh {
    fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|(id, _)| *id).collect()
    }

    fn node_coords(&self, node: NodeId) -> Option<Point3<f64>> {
        self.node_index.get(&node).map(|&i| self.nodes[i].1)
    }

    fn elements_of(&self, category: ElementCategory) -> Vec<ElementId> {
        self.by_category[category_slot(category)].clone()
    }

    fn element_geometry(&self, element: ElementId) -> Option<GeometryType> {
        self.element(element).map(|e| e.geometry)
    }

    fn element_nodes(&self, element: ElementId) -> Option<&[NodeId]> {
        self.element(element).map(|e| e.nodes.as_slice())
    }

    fn groups_of(&self, category: ElementCategory) -> Vec<&Group> {
        self.groups
            .iter()
            .filter(|g| g.category.element_category() == Some(category))
            .collect()
    }

    fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn find_volumes_at(&self, point: &Point3<f64>) -> Vec<ElementId> {
        self.locator.locate(point)
    }
}
