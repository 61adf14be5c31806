// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Everything the exporter writes, derived from a mesh source up front.
//!
//! Building the tables performs every check that can fail on mesh content.
//! Once [`ExportTables::build`] succeeds, rendering the artifacts can only
//! fail on I/O.

use std::collections::BTreeMap;

use elmer_lite_mesh::{ElementId, MeshSource, NodeId, Point3};

use crate::catalog::ElementTypes;
use crate::error::{Error, Result};
use crate::groups::{GroupKind, GroupTable};
use crate::linker::BoundaryLinks;
use crate::renumber::RenumberTable;

/// Renumbering, classification, groups, parent links and a copy of the
/// node coordinates and connectivity of one mesh.
#[derive(Debug, Clone)]
pub struct ExportTables {
    nodes: Vec<(NodeId, Point3<f64>)>,
    /// Connectivity by native element ID, indexed by `native - 1`.
    connectivity: Vec<Vec<NodeId>>,
    renumber: RenumberTable,
    types: ElementTypes,
    groups: GroupTable,
    links: BoundaryLinks,
}

impl ExportTables {
    /// Runs every pass of the export against `source`.
    pub fn build<S: MeshSource + ?Sized>(source: &S) -> Result<Self> {
        let renumber = RenumberTable::build(source)?;
        tracing::debug!(
            edges = renumber.edge_count(),
            faces = renumber.face_count(),
            volumes = renumber.volume_count(),
            "Renumbered elements"
        );

        let types = ElementTypes::classify(source, &renumber)?;
        let groups = GroupTable::resolve(source, &renumber)?;

        let nodes = source
            .node_ids()
            .into_iter()
            .map(|id| {
                source
                    .node_coords(id)
                    .map(|p| (id, p))
                    .ok_or(Error::MissingNode(id))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut connectivity = vec![Vec::new(); renumber.len()];
        for element in renumber.combined() {
            let element_nodes = source
                .element_nodes(element)
                .ok_or(Error::UnknownElement(element))?;
            if let Some(&missing) = element_nodes
                .iter()
                .find(|&&n| source.node_coords(n).is_none())
            {
                return Err(Error::MissingNode(missing));
            }
            connectivity[element.get() as usize - 1] = element_nodes.to_vec();
        }

        let links = BoundaryLinks::resolve(source, &renumber)?;

        Ok(Self {
            nodes,
            connectivity,
            renumber,
            types,
            groups,
            links,
        })
    }

    /// Nodes with coordinates, in source enumeration order.
    pub fn nodes(&self) -> &[(NodeId, Point3<f64>)] {
        &self.nodes
    }

    /// Corner nodes of an element in source order.
    pub fn element_nodes(&self, element: ElementId) -> &[NodeId] {
        (element.get() as usize)
            .checked_sub(1)
            .and_then(|i| self.connectivity.get(i))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Native to Elmer element numbering.
    pub fn renumber(&self) -> &RenumberTable {
        &self.renumber
    }

    /// Elmer type code of every element.
    pub fn types(&self) -> &ElementTypes {
        &self.types
    }

    /// Group assignment and name registry.
    pub fn groups(&self) -> &GroupTable {
        &self.groups
    }

    /// Parent volumes of every boundary element.
    pub fn links(&self) -> &BoundaryLinks {
        &self.links
    }

    /// Elmer type code of an element.
    pub fn code_of(&self, element: ElementId) -> u16 {
        self.types.code(element).unwrap_or_default()
    }

    /// Group of an element, `empty` when it has none.
    pub fn group_of(&self, element: ElementId) -> u32 {
        self.groups
            .group_of(element)
            .unwrap_or_else(|| self.groups.empty_id())
    }

    /// Counts reported back to the caller.
    pub fn summary(&self) -> ExportSummary {
        ExportSummary {
            nodes: self.nodes.len(),
            volumes: self.renumber.volume_count(),
            boundary: self.renumber.boundary_count(),
            interior_boundary: self.links.interior_count(),
            bodies: self.groups.names_of(GroupKind::Body).count(),
            boundaries: self.groups.names_of(GroupKind::Boundary).count(),
            type_counts: self.types.counts().clone(),
        }
    }
}

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub nodes: usize,
    pub volumes: usize,
    /// Edges plus faces.
    pub boundary: usize,
    /// Boundary elements shared by two volumes.
    pub interior_boundary: usize,
    /// Named volume groups.
    pub bodies: usize,
    /// Named face groups.
    pub boundaries: usize,
    /// Element count per Elmer type code.
    pub type_counts: BTreeMap<u16, usize>,
}
