// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mapping between source element geometries and Elmer element type codes.
//!
//! Elmer codes are `<family><node count>`: 303 is a 3-node triangle, 808 an
//! 8-node hexahedron. Only linear elements are supported.

use std::collections::BTreeMap;

use elmer_lite_mesh::{ElementId, GeometryType, MeshSource};

use crate::error::{Error, Result};
use crate::renumber::RenumberTable;

/// Supported geometries and their Elmer type codes, in ascending code order.
pub const CATALOG: [(GeometryType, u16); 7] = [
    (GeometryType::Edge, 202),
    (GeometryType::Triangle, 303),
    (GeometryType::Quadrangle, 404),
    (GeometryType::Tetra, 504),
    (GeometryType::Pyramid, 605),
    (GeometryType::Prism, 706),
    (GeometryType::Hexa, 808),
];

/// Elmer type code for a source geometry.
///
/// # Errors
///
/// [`Error::UnknownType`] when the geometry has no Elmer counterpart.
pub fn target_code(geometry: GeometryType) -> Result<u16> {
    CATALOG
        .iter()
        .find(|(g, _)| *g == geometry)
        .map(|(_, code)| *code)
        .ok_or(Error::UnknownType(geometry))
}

/// Source geometry for an Elmer type code.
pub fn geometry_of(code: u16) -> Option<GeometryType> {
    CATALOG
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(g, _)| *g)
}

/// Elmer type code of every enumerated element plus per-code counts.
#[derive(Debug, Clone)]
pub struct ElementTypes {
    codes: Vec<u16>,
    counts: BTreeMap<u16, usize>,
}

impl ElementTypes {
    /// Classifies every element of the renumbered mesh.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownType`] for the first unsupported geometry, and
    /// [`Error::UnknownElement`] when the source has no geometry for an
    /// element it enumerated.
    pub fn classify<S: MeshSource + ?Sized>(source: &S, renumber: &RenumberTable) -> Result<Self> {
        let mut codes = vec![0u16; renumber.len()];
        let mut counts = BTreeMap::new();

        for element in renumber.combined() {
            let geometry = source
                .element_geometry(element)
                .ok_or(Error::UnknownElement(element))?;
            let code = target_code(geometry)?;
            codes[element.get() as usize - 1] = code;
            *counts.entry(code).or_insert(0) += 1;
        }

        Ok(Self { codes, counts })
    }

    /// Elmer code of an element, by native ID.
    pub fn code(&self, element: ElementId) -> Option<u16> {
        let index = (element.get() as usize).checked_sub(1)?;
        self.codes.get(index).copied()
    }

    /// Per-code element counts in ascending code order. Codes with zero
    /// elements never appear.
    pub fn counts(&self) -> &BTreeMap<u16, usize> {
        &self.counts
    }
}
