// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parent volume resolution for boundary elements.
//!
//! Each edge or face is located by its barycenter: the volume elements that
//! contain that point are its parents. One parent makes an exterior boundary,
//! two make an interior one. Anything else means the geometry is degenerate.

use elmer_lite_mesh::{ElementId, MeshSource};

use crate::error::{Error, Result};
use crate::renumber::RenumberTable;

/// Re-based volume IDs on either side of a boundary element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryLink {
    pub parent1: usize,
    /// `0` when the element has a single neighbour.
    pub parent2: usize,
}

impl BoundaryLink {
    /// `true` when the element separates two volumes.
    pub fn is_interior(&self) -> bool {
        self.parent2 != 0
    }
}

/// Parent links of every boundary element, in boundary numbering order.
#[derive(Debug, Clone, Default)]
pub struct BoundaryLinks {
    links: Vec<BoundaryLink>,
}

impl BoundaryLinks {
    /// Locates the parents of every edge and face of the renumbered mesh.
    ///
    /// # Errors
    ///
    /// [`Error::BoundaryResolution`] when a barycenter lies in zero or more
    /// than two volumes, [`Error::NotAVolume`] when the source answers with a
    /// non-volume element, and [`Error::UnknownElement`] when a barycenter
    /// cannot be computed.
    pub fn resolve<S: MeshSource + ?Sized>(source: &S, renumber: &RenumberTable) -> Result<Self> {
        let boundary = renumber.boundary_elements();
        let mut links = Vec::with_capacity(boundary.len());

        for &element in boundary {
            let center = source
                .barycenter(element)
                .ok_or(Error::UnknownElement(element))?;
            let parents = source.find_volumes_at(&center);

            let rebase = |found: ElementId| {
                renumber
                    .volume_id(found)
                    .ok_or(Error::NotAVolume { element, found })
            };

            let link = match parents.as_slice() {
                [only] => BoundaryLink {
                    parent1: rebase(*only)?,
                    parent2: 0,
                },
                [first, second] => BoundaryLink {
                    parent1: rebase(*first)?,
                    parent2: rebase(*second)?,
                },
                _ => {
                    return Err(Error::BoundaryResolution {
                        element,
                        parents: parents.len(),
                    })
                }
            };
            links.push(link);
        }

        let interior = links.iter().filter(|l| l.is_interior()).count();
        tracing::debug!(
            boundary = links.len(),
            interior,
            "Resolved boundary parents"
        );

        Ok(Self { links })
    }

    /// Link of a boundary element by its boundary-local ID.
    pub fn get(&self, boundary_id: usize) -> Option<&BoundaryLink> {
        self.links.get(boundary_id.checked_sub(1)?)
    }

    /// Links in boundary numbering order.
    pub fn iter(&self) -> impl Iterator<Item = &BoundaryLink> + '_ {
        self.links.iter()
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// `true` when the mesh has no boundary elements.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Number of boundary elements with two parents.
    pub fn interior_count(&self) -> usize {
        self.links.iter().filter(|l| l.is_interior()).count()
    }
}
