// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Elmer export.
//!
//! Every variant is fatal: the export stops at the first one and no output
//! artifact is committed.

use std::path::PathBuf;

use elmer_lite_mesh::{ElementId, GeometryType, NodeId};

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during an export.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An output artifact or the output directory could not be written.
    #[error("cannot write {}: {source}", path.display())]
    OutputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mesh contains a geometry the Elmer format has no code for.
    #[error("element geometry '{0}' has no Elmer element type")]
    UnknownType(GeometryType),

    /// Element IDs are not a dense 1..=N numbering.
    #[error("the number of elements does not match: {elements} elements, highest native ID {max_id}")]
    NumberingMismatch { elements: usize, max_id: u32 },

    /// The same native ID was enumerated twice.
    #[error("element {0} is enumerated more than once")]
    DuplicateElement(ElementId),

    /// A boundary element does not have one or two neighbouring volumes.
    #[error("boundary element {element} touches {parents} volume elements, expected 1 or 2")]
    BoundaryResolution { element: ElementId, parents: usize },

    /// The source referenced an element outside its own enumeration.
    #[error("element {0} is not part of the enumerated mesh")]
    UnknownElement(ElementId),

    /// A volume query returned something that is not a volume element.
    #[error("element {found} returned as parent of {element} is not a volume element")]
    NotAVolume { element: ElementId, found: ElementId },

    /// A group lists an element that is not part of the enumerated mesh.
    #[error("group '{group}' references element {element} which is not part of the mesh")]
    UnknownGroupMember { group: String, element: ElementId },

    /// A node enumerated or referenced by the mesh has no coordinates.
    #[error("node {0} has no coordinates")]
    MissingNode(NodeId),

    /// Mesh construction or loading error.
    #[error(transparent)]
    Mesh(#[from] elmer_lite_mesh::Error),
}

impl Error {
    /// Wraps an I/O error with the path it happened on.
    pub fn output_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputIo {
            path: path.into(),
            source,
        }
    }
}
