// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON snapshots of meshes.
//!
//! A snapshot lists nodes, elements and groups in native enumeration order,
//! so loading one reproduces the exact numbering of the tool that wrote it.

use serde::{Deserialize, Serialize};

use crate::builder::MeshBuilder;
use crate::error::{Error, Result};
use crate::ids::GeometryType;
use crate::mesh::Mesh;
use crate::source::Group;
use crate::spatial::LocatorConfig;

/// Serializable representation of a full mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshSnapshot {
    pub name: String,
    pub nodes: Vec<NodeSnapshot>,
    pub elements: Vec<ElementSnapshot>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub id: u32,
    #[serde(rename = "type")]
    pub geometry: GeometryType,
    pub nodes: Vec<u32>,
}

impl MeshSnapshot {
    /// Converts the snapshot into a validated mesh.
    pub fn into_mesh(self, config: &LocatorConfig) -> Result<Mesh> {
        let mut builder = MeshBuilder::new(self.name);
        builder.locator_config(config.clone());
        for n in &self.nodes {
            builder.add_node(n.id, n.x, n.y, n.z);
        }
        for e in &self.elements {
            builder.add_element(e.id, e.geometry, &e.nodes);
        }
        for g in self.groups {
            builder.add_group(g);
        }
        builder.build()
    }
}

impl Mesh {
    /// Parses a JSON snapshot with default point location settings.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with(json, &LocatorConfig::default())
    }

    /// Parses a JSON snapshot with explicit point location settings.
    pub fn from_json_with(json: &str, config: &LocatorConfig) -> Result<Self> {
        let snapshot: MeshSnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        snapshot.into_mesh(config)
    }

    /// Serializes the mesh to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_snapshot())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Creates a serializable snapshot of the mesh.
    pub fn to_snapshot(&self) -> MeshSnapshot {
        MeshSnapshot {
            name: self.name.clone(),
            nodes: self
                .nodes
                .iter()
                .map(|(id, p)| NodeSnapshot {
                    id: id.get(),
                    x: p.x,
                    y: p.y,
                    z: p.z,
                })
                .collect(),
            elements: self
                .elements
                .iter()
                .map(|(id, e)| ElementSnapshot {
                    id: id.get(),
                    geometry: e.geometry,
                    nodes: e.nodes.iter().map(|n| n.get()).collect(),
                })
                .collect(),
            groups: self.groups.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ElementCategory, ElementId, GroupCategory};
    use crate::source::MeshSource;

    const PRISM_JSON: &str = r#"{
        "name": "wedge",
        "nodes": [
            { "id": 1, "x": 0.0, "y": 0.0, "z": 0.0 },
            { "id": 2, "x": 1.0, "y": 0.0, "z": 0.0 },
            { "id": 3, "x": 0.0, "y": 1.0, "z": 0.0 },
            { "id": 4, "x": 0.0, "y": 0.0, "z": 1.0 },
            { "id": 5, "x": 1.0, "y": 0.0, "z": 1.0 },
            { "id": 6, "x": 0.0, "y": 1.0, "z": 1.0 }
        ],
        "elements": [
            { "id": 1, "type": "triangle", "nodes": [1, 3, 2] },
            { "id": 2, "type": "triangle", "nodes": [4, 5, 6] },
            { "id": 3, "type": "prism", "nodes": [1, 2, 3, 4, 5, 6] }
        ],
        "groups": [
            { "name": "caps", "category": "face", "members": [1, 2] }
        ]
    }"#;

    #[test]
    fn parse_snapshot() {
        let mesh = Mesh::from_json(PRISM_JSON).unwrap();
        assert_eq!(mesh.name(), "wedge");
        assert_eq!(mesh.node_count(), 6);
        assert_eq!(
            mesh.elements_of(ElementCategory::Volume),
            vec![ElementId(3)]
        );
        assert_eq!(mesh.groups()[0].category, GroupCategory::Face);
    }

    #[test]
    fn groups_default_to_empty() {
        let json = r#"{ "name": "bare", "nodes": [], "elements": [] }"#;
        let mesh = Mesh::from_json(json).unwrap();
        assert_eq!(mesh.group_count(), 0);
    }

    #[test]
    fn round_trip_preserves_order() {
        let mesh = Mesh::from_json(PRISM_JSON).unwrap();
        let json = mesh.to_json().unwrap();
        let again = Mesh::from_json(&json).unwrap();
        assert_eq!(mesh.to_snapshot(), again.to_snapshot());
    }

    #[test]
    fn invalid_type_is_a_serialization_error() {
        let json = r#"{ "name": "x", "nodes": [],
            "elements": [ { "id": 1, "type": "hexagon", "nodes": [] } ] }"#;
        assert!(matches!(Mesh::from_json(json), Err(Error::Serialization(_))));
    }

    #[test]
    fn validation_errors_pass_through() {
        let json = r#"{ "name": "x",
            "nodes": [ { "id": 1, "x": 0, "y": 0, "z": 0 } ],
            "elements": [ { "id": 1, "type": "edge", "nodes": [1, 2] } ] }"#;
        assert!(matches!(Mesh::from_json(json), Err(Error::UnknownNode { .. })));
    }
}
