// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Elmer-Lite Mesh
//!
//! Finite-element mesh model consumed by the Elmer exporter.
//!
//! The exporter never talks to a concrete mesh. It talks to the
//! [`MeshSource`] trait, which exposes exactly the queries a mesh provider
//! has to answer: node coordinates, elements enumerated by category, element
//! geometry and connectivity, named groups, and point location over volume
//! elements.
//!
//! This crate also ships [`Mesh`], an owned in-memory implementation of that
//! trait with an R-tree backed [`PointLocator`], and a JSON snapshot format
//! so meshes can be handed over from other tools.
//!
//! ## Quick Start
//!
//! ```
//! use elmer_lite_mesh::{ElementCategory, GeometryType, MeshBuilder, MeshSource};
//!
//! let mut builder = MeshBuilder::new("tetra");
//! builder.add_node(1, 0.0, 0.0, 0.0);
//! builder.add_node(2, 1.0, 0.0, 0.0);
//! builder.add_node(3, 0.0, 1.0, 0.0);
//! builder.add_node(4, 0.0, 0.0, 1.0);
//! builder.add_element(1, GeometryType::Tetra, &[1, 2, 3, 4]);
//! let mesh = builder.build().unwrap();
//!
//! assert_eq!(mesh.elements_of(ElementCategory::Volume).len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod mesh;
pub mod serialization;
pub mod source;
pub mod spatial;

pub use builder::MeshBuilder;
pub use error::{Error, Result};
pub use ids::{ElementCategory, ElementId, GeometryType, GroupCategory, NodeId};
pub use mesh::{ElementData, Mesh};
pub use serialization::MeshSnapshot;
pub use source::{Group, MeshSource};
pub use spatial::{LocatorConfig, PointLocator};

/// Re-exported so callers can build query points without naming nalgebra.
pub use nalgebra::Point3;
