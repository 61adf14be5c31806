// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Writers for the five Elmer mesh artifacts.
//!
//! Each artifact has a renderer over any [`Write`] sink. [`write_all`] stages
//! every artifact in a temporary file inside the output directory and only
//! moves them into place once all five rendered successfully.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use elmer_lite_mesh::ElementId;
use tempfile::NamedTempFile;

use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::format::format_g;
use crate::groups::GroupKind;
use crate::tables::ExportTables;

/// One of the files making up an Elmer mesh directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Header,
    Nodes,
    Names,
    Elements,
    Boundary,
}

impl Artifact {
    /// All artifacts, in the order they are written.
    pub const ALL: [Artifact; 5] = [
        Artifact::Header,
        Artifact::Nodes,
        Artifact::Names,
        Artifact::Elements,
        Artifact::Boundary,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Header => "mesh.header",
            Artifact::Nodes => "mesh.nodes",
            Artifact::Names => "mesh.names",
            Artifact::Elements => "mesh.elements",
            Artifact::Boundary => "mesh.boundary",
        }
    }

    /// Renders this artifact into `out`.
    pub fn render<W: Write>(
        self,
        out: &mut W,
        tables: &ExportTables,
        config: &ExportConfig,
    ) -> io::Result<()> {
        match self {
            Artifact::Header => write_header(out, tables),
            Artifact::Nodes => write_nodes(out, tables, config.precision()),
            Artifact::Names => write_names(out, tables),
            Artifact::Elements => write_elements(out, tables),
            Artifact::Boundary => write_boundary(out, tables),
        }
    }
}

/// `NbNodes NbVolumes NbBoundary`, the number of element types, then one
/// `code count` line per type in ascending code order.
pub fn write_header<W: Write>(out: &mut W, tables: &ExportTables) -> io::Result<()> {
    let renumber = tables.renumber();
    let counts = tables.types().counts();
    writeln!(
        out,
        "{} {} {}",
        tables.nodes().len(),
        renumber.volume_count(),
        renumber.boundary_count()
    )?;
    writeln!(out, "{}", counts.len())?;
    for (code, count) in counts {
        writeln!(out, "{code} {count}")?;
    }
    Ok(())
}

/// `id -1 x y z` per node.
pub fn write_nodes<W: Write>(out: &mut W, tables: &ExportTables, precision: usize) -> io::Result<()> {
    for (id, p) in tables.nodes() {
        writeln!(
            out,
            "{} -1 {} {} {}",
            id,
            format_g(p.x, precision),
            format_g(p.y, precision),
            format_g(p.z, precision)
        )?;
    }
    Ok(())
}

/// Body names, boundary names, then the `empty` group.
pub fn write_names<W: Write>(out: &mut W, tables: &ExportTables) -> io::Result<()> {
    let groups = tables.groups();
    writeln!(out, "! ----- names for bodies -----")?;
    for entry in groups.names_of(GroupKind::Body) {
        writeln!(out, "$ {} = {}", entry.name, entry.id)?;
    }
    writeln!(out, "! ----- names for boundaries -----")?;
    for entry in groups.names_of(GroupKind::Boundary) {
        writeln!(out, "$ {} = {}", entry.name, entry.id)?;
    }
    for entry in groups.names_of(GroupKind::Empty) {
        writeln!(out, "$ {} = {}", entry.name, entry.id)?;
    }
    Ok(())
}

/// `volumeID group code nodes...` per volume element.
pub fn write_elements<W: Write>(out: &mut W, tables: &ExportTables) -> io::Result<()> {
    let renumber = tables.renumber();
    for (index, &element) in renumber.volume_elements().iter().enumerate() {
        write!(
            out,
            "{} {} {}",
            index + 1,
            tables.group_of(element),
            tables.code_of(element)
        )?;
        write_connectivity(out, tables, element)?;
    }
    Ok(())
}

/// `boundaryID group parent1 parent2 code nodes...` per edge and face.
pub fn write_boundary<W: Write>(out: &mut W, tables: &ExportTables) -> io::Result<()> {
    let renumber = tables.renumber();
    let elements = renumber.boundary_elements().iter();
    for (index, (&element, link)) in elements.zip(tables.links().iter()).enumerate() {
        write!(
            out,
            "{} {} {} {} {}",
            index + 1,
            tables.group_of(element),
            link.parent1,
            link.parent2,
            tables.code_of(element)
        )?;
        write_connectivity(out, tables, element)?;
    }
    Ok(())
}

fn write_connectivity<W: Write>(
    out: &mut W,
    tables: &ExportTables,
    element: ElementId,
) -> io::Result<()> {
    for node in tables.element_nodes(element) {
        write!(out, " {node}")?;
    }
    writeln!(out)
}

/// Writes all five artifacts into `dir`, creating it when needed.
///
/// Artifacts are staged as temporary files next to their destination and
/// persisted together at the end; a failure while rendering leaves no
/// artifact behind.
pub fn write_all(tables: &ExportTables, dir: &Path, config: &ExportConfig) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| Error::output_io(dir, e))?;

    let mut staged = Vec::with_capacity(Artifact::ALL.len());
    for artifact in Artifact::ALL {
        let path = dir.join(artifact.file_name());
        let file = NamedTempFile::new_in(dir).map_err(|e| Error::output_io(&path, e))?;
        let mut out = BufWriter::new(file);
        artifact
            .render(&mut out, tables, config)
            .map_err(|e| Error::output_io(&path, e))?;
        let file = out
            .into_inner()
            .map_err(|e| Error::output_io(&path, e.into_error()))?;
        tracing::debug!(artifact = artifact.file_name(), "Rendered artifact");
        staged.push((file, path));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (file, path) in staged {
        file.persist(&path)
            .map_err(|e| Error::output_io(&path, e.error))?;
        written.push(path);
    }
    Ok(written)
}
