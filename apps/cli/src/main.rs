// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elmer-Lite CLI - exports JSON mesh snapshots to Elmer mesh directories.
//!
//! Each snapshot is written to `<output-root>/<mesh name>/`.
//!
//! # Environment
//!
//! - `RUST_LOG` - overrides `--log-level`
//! - `ELMER_COORD_PRECISION` - significant digits for coordinates (min 12)
//! - `ELMER_LOCATE_TOLERANCE` - point location slack

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use elmer_lite_export::{export_mesh, ExportConfig};
use elmer_lite_mesh::{LocatorConfig, Mesh};
use tracing_subscriber::EnvFilter;

/// Export finite-element meshes to Elmer's native mesh format.
#[derive(Parser, Debug)]
#[command(name = "elmer-lite")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Export JSON mesh snapshots to Elmer mesh directories", long_about = None)]
struct Cli {
    /// Mesh snapshot files to export.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory receiving one subdirectory per mesh.
    #[arg(short, long, default_value = ".")]
    output_root: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .init();

    let export_config = ExportConfig::from_env();
    let locator_config = LocatorConfig::from_env();

    tracing::info!(
        meshes = cli.inputs.len(),
        output_root = %cli.output_root.display(),
        precision = export_config.precision(),
        "Starting Elmer-Lite"
    );

    for input in &cli.inputs {
        export_one(input, &cli.output_root, &export_config, &locator_config)?;
    }
    Ok(())
}

fn export_one(
    input: &Path,
    output_root: &Path,
    export_config: &ExportConfig,
    locator_config: &LocatorConfig,
) -> anyhow::Result<()> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let mesh = Mesh::from_json_with(&json, locator_config)
        .with_context(|| format!("failed to load mesh from {}", input.display()))?;

    let dir = output_root.join(mesh.name());
    let summary = export_mesh(&mesh, &dir, export_config)
        .with_context(|| format!("failed to export mesh '{}'", mesh.name()))?;

    tracing::info!(
        mesh = mesh.name(),
        output = %dir.display(),
        volumes = summary.volumes,
        boundary = summary.boundary,
        "Mesh exported"
    );
    Ok(())
}
