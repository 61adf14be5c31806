// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validating builder for [`Mesh`].

use nalgebra::Point3;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::ids::{ElementCategory, ElementId, GeometryType, GroupCategory, NodeId};
use crate::mesh::{category_slot, ElementData, Mesh};
use crate::source::Group;
use crate::spatial::{LocatorConfig, PointLocator};

/// Collects nodes, elements and groups, then validates them into a [`Mesh`].
///
/// Insertion order is preserved and becomes the native enumeration order.
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    name: String,
    nodes: Vec<(u32, [f64; 3])>,
    elements: Vec<(u32, GeometryType, Vec<u32>)>,
    groups: Vec<Group>,
    locator: LocatorConfig,
}

impl MeshBuilder {
    /// Creates an empty builder for a mesh called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Overrides the point locator settings.
    pub fn locator_config(&mut self, config: LocatorConfig) -> &mut Self {
        self.locator = config;
        self
    }

    /// Adds a node with native ID `id`.
    pub fn add_node(&mut self, id: u32, x: f64, y: f64, z: f64) -> &mut Self {
        self.nodes.push((id, [x, y, z]));
        self
    }

    /// Adds an element with native ID `id` and ordered connectivity `nodes`.
    pub fn add_element(&mut self, id: u32, geometry: GeometryType, nodes: &[u32]) -> &mut Self {
        self.elements.push((id, geometry, nodes.to_vec()));
        self
    }

    /// Adds an arbitrary group.
    pub fn add_group(&mut self, group: Group) -> &mut Self {
        self.groups.push(group);
        self
    }

    /// Adds a group of elements of one category.
    pub fn add_element_group(
        &mut self,
        name: impl Into<String>,
        category: ElementCategory,
        members: &[u32],
    ) -> &mut Self {
        self.add_group(Group {
            name: name.into(),
            category: category.into(),
            members: members.to_vec(),
        })
    }

    /// Adds a group of nodes.
    pub fn add_node_group(&mut self, name: impl Into<String>, members: &[u32]) -> &mut Self {
        self.add_group(Group {
            name: name.into(),
            category: GroupCategory::Node,
            members: members.to_vec(),
        })
    }

    /// Validates the collected entities and builds the mesh.
    ///
    /// # Errors
    ///
    /// Fails on zero or duplicate IDs, connectivity referencing unknown
    /// nodes, wrong node counts for fixed-size geometries, and group members
    /// that do not exist.
    pub fn build(self) -> Result<Mesh> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        let mut node_index = FxHashMap::default();
        for (id, [x, y, z]) in self.nodes {
            if id == 0 {
                return Err(Error::ZeroId("node"));
            }
            let id = NodeId(id);
            if node_index.insert(id, nodes.len()).is_some() {
                return Err(Error::DuplicateNode(id));
            }
            nodes.push((id, Point3::new(x, y, z)));
        }

        let mut elements = Vec::with_capacity(self.elements.len());
        let mut element_index = FxHashMap::default();
        let mut by_category: [Vec<ElementId>; 3] = Default::default();
        for (id, geometry, connectivity) in self.elements {
            if id == 0 {
                return Err(Error::ZeroId("element"));
            }
            let id = ElementId(id);
            if let Some(expected) = geometry.node_count() {
                if connectivity.len() != expected {
                    return Err(Error::NodeCountMismatch {
                        element: id,
                        geometry,
                        expected,
                        got: connectivity.len(),
                    });
                }
            }
            let connectivity: SmallVec<[NodeId; 8]> =
                connectivity.into_iter().map(NodeId).collect();
            if let Some(&node) = connectivity.iter().find(|n| !node_index.contains_key(*n)) {
                return Err(Error::UnknownNode { element: id, node });
            }
            if element_index.insert(id, elements.len()).is_some() {
                return Err(Error::DuplicateElement(id));
            }
            by_category[category_slot(geometry.category())].push(id);
            elements.push((
                id,
                ElementData {
                    geometry,
                    nodes: connectivity,
                },
            ));
        }

        for group in &self.groups {
            let missing = match group.category {
                GroupCategory::Node => group
                    .members
                    .iter()
                    .find(|&&m| !node_index.contains_key(&NodeId(m))),
                _ => group
                    .members
                    .iter()
                    .find(|&&m| !element_index.contains_key(&ElementId(m))),
            };
            if let Some(&member) = missing {
                return Err(Error::UnknownGroupMember {
                    group: group.name.clone(),
                    member,
                });
            }
        }

        let volumes = by_category[category_slot(ElementCategory::Volume)]
            .iter()
            .map(|id| {
                let data = &elements[element_index[id]].1;
                let corners: Vec<Point3<f64>> = data
                    .nodes
                    .iter()
                    .map(|n| nodes[node_index[n]].1)
                    .collect();
                (*id, data.geometry, corners)
            });
        let locator = PointLocator::build(volumes, &self.locator);

        tracing::debug!(
            name = %self.name,
            nodes = nodes.len(),
            elements = elements.len(),
            groups = self.groups.len(),
            "Built mesh"
        );

        Ok(Mesh {
            name: self.name,
            nodes,
            elements,
            node_index,
            element_index,
            by_category,
            groups: self.groups,
            locator,
        })
    }
}
