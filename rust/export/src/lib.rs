// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Elmer-Lite Export
//!
//! Writes a finite-element mesh in Elmer's native mesh-directory format:
//! `mesh.header`, `mesh.nodes`, `mesh.names`, `mesh.elements` and
//! `mesh.boundary`.
//!
//! The export runs in passes over a [`MeshSource`]:
//!
//! 1. [`RenumberTable`] maps native element IDs to Elmer's boundary and
//!    volume numbering.
//! 2. [`ElementTypes`] maps every geometry to an Elmer type code.
//! 3. [`GroupTable`] assigns body and boundary groups.
//! 4. [`BoundaryLinks`] finds the parent volumes of every edge and face.
//! 5. [`emitter`] renders the artifacts.
//!
//! Every content check happens before the output directory is touched, so a
//! failed export leaves nothing behind.
//!
//! ## Quick Start
//!
//! ```no_run
//! use elmer_lite_export::{export_mesh, ExportConfig};
//! use elmer_lite_mesh::Mesh;
//!
//! let json = std::fs::read_to_string("cube.json").unwrap();
//! let mesh = Mesh::from_json(&json).unwrap();
//! let summary = export_mesh(&mesh, "out/cube", &ExportConfig::default()).unwrap();
//! println!("{} volumes, {} boundary elements", summary.volumes, summary.boundary);
//! ```

use std::path::Path;
use std::time::Instant;

use elmer_lite_mesh::MeshSource;

pub mod catalog;
pub mod config;
pub mod emitter;
pub mod error;
pub mod format;
pub mod groups;
pub mod linker;
pub mod renumber;
pub mod tables;

pub use catalog::{target_code, ElementTypes, CATALOG};
pub use config::ExportConfig;
pub use emitter::Artifact;
pub use error::{Error, Result};
pub use format::format_g;
pub use groups::{GroupKind, GroupTable, NameEntry, EMPTY_GROUP_NAME};
pub use linker::{BoundaryLink, BoundaryLinks};
pub use renumber::RenumberTable;
pub use tables::{ExportSummary, ExportTables};

/// Exports `source` into the directory `dir`.
///
/// The directory is created when missing and existing artifacts in it are
/// replaced.
///
/// # Errors
///
/// Any [`Error`]. Content errors are reported before anything is written;
/// I/O errors name the path that failed.
pub fn export_mesh<S, P>(source: &S, dir: P, config: &ExportConfig) -> Result<ExportSummary>
where
    S: MeshSource + ?Sized,
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    let start = Instant::now();
    tracing::info!(output = %dir.display(), "Starting Elmer export");

    let tables = ExportTables::build(source)?;
    emitter::write_all(&tables, dir, config)?;

    let summary = tables.summary();
    tracing::info!(
        nodes = summary.nodes,
        volumes = summary.volumes,
        boundary = summary.boundary,
        interior = summary.interior_boundary,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Export complete"
    );
    Ok(summary)
}
