// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for mesh construction and loading.

use crate::ids::{ElementId, GeometryType, NodeId};

/// Result type alias for mesh operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or loading a mesh.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Native IDs are 1-based; zero is never a valid node or element ID.
    #[error("native IDs start at 1, found a zero {0} ID")]
    ZeroId(&'static str),

    /// Two nodes were registered under the same native ID.
    #[error("duplicate node ID {0}")]
    DuplicateNode(NodeId),

    /// Two elements were registered under the same native ID.
    #[error("duplicate element ID {0}")]
    DuplicateElement(ElementId),

    /// An element references a node that was never added.
    #[error("element {element} references unknown node {node}")]
    UnknownNode { element: ElementId, node: NodeId },

    /// A fixed-size element was given the wrong number of nodes.
    #[error("element {element} of type {geometry} needs {expected} nodes, got {got}")]
    NodeCountMismatch {
        element: ElementId,
        geometry: GeometryType,
        expected: usize,
        got: usize,
    },

    /// A group lists a member that does not exist in the mesh.
    #[error("group '{group}' references unknown member {member}")]
    UnknownGroupMember { group: String, member: u32 },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
