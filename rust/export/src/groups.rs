// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Body and boundary group assignment.
//!
//! Volume groups become bodies `1..=Gv`, face groups become boundaries
//! `Gv+1..=Gv+Gb`, and everything else falls into the synthetic `empty` group
//! numbered `G + 1`, where `G` counts groups of every category.
//!
//! The two passes resolve conflicts differently. A volume group overwrites
//! whatever was assigned before it (last group wins); a face group only
//! replaces a larger ID (lowest boundary group wins).

use elmer_lite_mesh::{ElementCategory, ElementId, MeshSource};

use crate::error::{Error, Result};
use crate::renumber::RenumberTable;

/// Name of the catch-all group.
pub const EMPTY_GROUP_NAME: &str = "empty";

/// What a registry entry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Body,
    Boundary,
    Empty,
}

/// One line of the name registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub name: String,
    pub id: u32,
    pub kind: GroupKind,
}

/// Group ID of every element plus the ordered name registry.
#[derive(Debug, Clone)]
pub struct GroupTable {
    /// Group ID by native element ID, indexed by `native - 1`.
    assignment: Vec<u32>,
    names: Vec<NameEntry>,
    empty_id: u32,
}

impl GroupTable {
    /// Resolves group membership for every renumbered element.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownGroupMember`] when a group lists an element outside
    /// the renumbered mesh.
    pub fn resolve<S: MeshSource + ?Sized>(source: &S, renumber: &RenumberTable) -> Result<Self> {
        let empty_id = source.group_count() as u32 + 1;
        let mut assignment = vec![empty_id; renumber.len()];
        let mut names = Vec::new();
        let mut next_id = 1u32;

        for group in source.groups_of(ElementCategory::Volume) {
            let id = next_id;
            next_id += 1;
            names.push(NameEntry {
                name: group.name.clone(),
                id,
                kind: GroupKind::Body,
            });
            for element in group.element_members() {
                let slot = slot_of(&mut assignment, renumber, &group.name, element)?;
                *slot = id;
            }
        }

        for group in source.groups_of(ElementCategory::Face) {
            let id = next_id;
            next_id += 1;
            names.push(NameEntry {
                name: group.name.clone(),
                id,
                kind: GroupKind::Boundary,
            });
            for element in group.element_members() {
                let slot = slot_of(&mut assignment, renumber, &group.name, element)?;
                if *slot > id {
                    *slot = id;
                }
            }
        }

        names.push(NameEntry {
            name: EMPTY_GROUP_NAME.to_string(),
            id: empty_id,
            kind: GroupKind::Empty,
        });

        Ok(Self {
            assignment,
            names,
            empty_id,
        })
    }

    /// Group ID assigned to an element.
    pub fn group_of(&self, element: ElementId) -> Option<u32> {
        let index = (element.get() as usize).checked_sub(1)?;
        self.assignment.get(index).copied()
    }

    /// ID of the synthetic `empty` group.
    pub fn empty_id(&self) -> u32 {
        self.empty_id
    }

    /// Registry entries: bodies, then boundaries, then `empty`.
    pub fn names(&self) -> &[NameEntry] {
        &self.names
    }

    /// Registry entries of one kind, in registry order.
    pub fn names_of(&self, kind: GroupKind) -> impl Iterator<Item = &NameEntry> + '_ {
        self.names.iter().filter(move |n| n.kind == kind)
    }
}

fn slot_of<'a>(
    assignment: &'a mut [u32],
    renumber: &RenumberTable,
    group: &str,
    element: ElementId,
) -> Result<&'a mut u32> {
    renumber
        .target_id(element)
        .and_then(|_| assignment.get_mut(element.get() as usize - 1))
        .ok_or_else(|| Error::UnknownGroupMember {
            group: group.to_string(),
            element,
        })
}
