// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identifier and classification types for mesh entities.
//!
//! Nodes and elements are identified by the native 1-based integers the mesh
//! source assigns them. Elements share one global numbering across edges,
//! faces and volumes; [`ElementCategory`] tells them apart.

use serde::{Deserialize, Serialize};

/// Native node identifier (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// Native element identifier (1-based, unique across all element categories).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl NodeId {
    /// Returns the raw native ID.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl ElementId {
    /// Returns the raw native ID.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id)
    }
}

impl From<u32> for ElementId {
    fn from(id: u32) -> Self {
        ElementId(id)
    }
}

/// The three disjoint element categories of a mesh.
///
/// Edges and faces are the boundary elements of a 3D mesh; volumes are the
/// bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementCategory {
    Edge = 1,
    Face = 2,
    Volume = 3,
}

impl ElementCategory {
    /// All categories in native numbering order.
    pub const ALL: [ElementCategory; 3] = [
        ElementCategory::Edge,
        ElementCategory::Face,
        ElementCategory::Volume,
    ];

    /// Returns the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementCategory::Edge => "edge",
            ElementCategory::Face => "face",
            ElementCategory::Volume => "volume",
        }
    }

    /// `true` for edges and faces.
    pub fn is_boundary(&self) -> bool {
        !matches!(self, ElementCategory::Volume)
    }
}

impl std::fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a named group. Node groups exist in mesh sources but never
/// carry elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupCategory {
    Node,
    Edge,
    Face,
    Volume,
}

impl GroupCategory {
    /// Returns the element category this group collects, if any.
    pub fn element_category(&self) -> Option<ElementCategory> {
        match self {
            GroupCategory::Node => None,
            GroupCategory::Edge => Some(ElementCategory::Edge),
            GroupCategory::Face => Some(ElementCategory::Face),
            GroupCategory::Volume => Some(ElementCategory::Volume),
        }
    }
}

impl From<ElementCategory> for GroupCategory {
    fn from(category: ElementCategory) -> Self {
        match category {
            ElementCategory::Edge => GroupCategory::Edge,
            ElementCategory::Face => GroupCategory::Face,
            ElementCategory::Volume => GroupCategory::Volume,
        }
    }
}

/// Element geometry as reported by the mesh source.
///
/// Node ordering follows the usual FE convention: for solids, the bottom
/// face first, then the top face (or apex) with node `i + n` above node `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryType {
    Edge,
    Triangle,
    Quadrangle,
    Polygon,
    Tetra,
    Pyramid,
    Prism,
    Hexa,
    HexagonalPrism,
    Polyhedron,
}

impl GeometryType {
    /// Returns the geometry name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Edge => "edge",
            GeometryType::Triangle => "triangle",
            GeometryType::Quadrangle => "quadrangle",
            GeometryType::Polygon => "polygon",
            GeometryType::Tetra => "tetra",
            GeometryType::Pyramid => "pyramid",
            GeometryType::Prism => "prism",
            GeometryType::Hexa => "hexa",
            GeometryType::HexagonalPrism => "hexagonal_prism",
            GeometryType::Polyhedron => "polyhedron",
        }
    }

    /// The category every element of this geometry belongs to.
    pub fn category(&self) -> ElementCategory {
        match self {
            GeometryType::Edge => ElementCategory::Edge,
            GeometryType::Triangle | GeometryType::Quadrangle | GeometryType::Polygon => {
                ElementCategory::Face
            }
            GeometryType::Tetra
            | GeometryType::Pyramid
            | GeometryType::Prism
            | GeometryType::Hexa
            | GeometryType::HexagonalPrism
            | GeometryType::Polyhedron => ElementCategory::Volume,
        }
    }

    /// Fixed node count, or `None` for polygons and polyhedra.
    pub fn node_count(&self) -> Option<usize> {
        match self {
            GeometryType::Edge => Some(2),
            GeometryType::Triangle => Some(3),
            GeometryType::Quadrangle => Some(4),
            GeometryType::Tetra => Some(4),
            GeometryType::Pyramid => Some(5),
            GeometryType::Prism => Some(6),
            GeometryType::Hexa => Some(8),
            GeometryType::HexagonalPrism => Some(12),
            GeometryType::Polygon | GeometryType::Polyhedron => None,
        }
    }
}

impl std::fmt::Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
