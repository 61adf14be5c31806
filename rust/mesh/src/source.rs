// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The query surface a mesh provider exposes to the exporter.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::ids::{ElementCategory, ElementId, GeometryType, GroupCategory, NodeId};

/// A named group of mesh entities.
///
/// `members` holds native element IDs for edge, face and volume groups, and
/// native node IDs for node groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub category: GroupCategory,
    pub members: Vec<u32>,
}

impl Group {
    /// Creates an element group from native element IDs.
    pub fn of_elements(
        name: impl Into<String>,
        category: ElementCategory,
        members: impl IntoIterator<Item = ElementId>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            members: members.into_iter().map(ElementId::get).collect(),
        }
    }

    /// Member element IDs. Empty for node groups.
    pub fn element_members(&self) -> impl Iterator<Item = ElementId> + '_ {
        let elements = self.category.element_category().is_some();
        self.members
            .iter()
            .filter(move |_| elements)
            .map(|&id| ElementId(id))
    }
}

/// Read-only view of a finite-element mesh.
///
/// Every enumeration returns IDs in the source's native order; that order is
/// significant for the exported numbering. Implementations must not change
/// between calls made during one export.
pub trait MeshSource {
    /// Node IDs in native enumeration order.
    fn node_ids(&self) -> Vec<NodeId>;

    /// Coordinates of a node.
    fn node_coords(&self, node: NodeId) -> Option<Point3<f64>>;

    /// Element IDs of one category in native enumeration order.
    fn elements_of(&self, category: ElementCategory) -> Vec<ElementId>;

    /// Geometry of an element.
    fn element_geometry(&self, element: ElementId) -> Option<GeometryType>;

    /// Incident nodes of an element, in the element's local node order.
    fn element_nodes(&self, element: ElementId) -> Option<&[NodeId]>;

    /// Groups of one element category in presentation order.
    fn groups_of(&self, category: ElementCategory) -> Vec<&Group>;

    /// Total number of groups of every category, node groups included.
    fn group_count(&self) -> usize;

    /// Volume elements containing `point`, boundary included.
    ///
    /// The order of the returned IDs is preserved by callers.
    fn find_volumes_at(&self, point: &Point3<f64>) -> Vec<ElementId>;

    /// Arithmetic mean of an element's node coordinates.
    fn barycenter(&self, element: ElementId) -> Option<Point3<f64>> {
        let nodes = self.element_nodes(element)?;
        if nodes.is_empty() {
            return None;
        }

        let mut sum = Vector3::new(0.0, 0.0, 0.0);
        for &node in nodes {
            sum += self.node_coords(node)?.coords;
        }

        Some(Point3::from(sum / nodes.len() as f64))
    }
}
