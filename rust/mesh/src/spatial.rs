// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! R-tree accelerated point location over volume elements.
//!
//! Every volume element is stored once in an R-tree under its padded
//! bounding box, so memory stays linear in the element count however much
//! element sizes vary. A query collects the boxes containing the point and
//! decides exact containment on each element's tetrahedral decomposition.

use nalgebra::Point3;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::geometry::{tetrahedralize, Aabb, Tetrahedron};
use crate::ids::{ElementId, GeometryType};

/// Point location settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorConfig {
    /// Containment slack in barycentric units.
    pub tolerance: f64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self { tolerance: 1e-9 }
    }
}

impl LocatorConfig {
    /// Load locator settings from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tolerance: std::env::var("ELMER_LOCATE_TOLERANCE")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|t: &f64| t.is_finite() && *t >= 0.0)
                .unwrap_or(defaults.tolerance),
        }
    }
}

#[derive(Debug, Clone)]
struct LocatedVolume {
    id: ElementId,
    tets: Vec<Tetrahedron>,
}

/// Padded bounding box of one located volume, keyed by build position.
#[derive(Debug, Clone)]
struct VolumeEnvelope {
    index: usize,
    min: [f64; 3],
    max: [f64; 3],
}

impl VolumeEnvelope {
    fn new(index: usize, bbox: &Aabb, pad: f64) -> Self {
        Self {
            index,
            min: [bbox.min.x - pad, bbox.min.y - pad, bbox.min.z - pad],
            max: [bbox.max.x + pad, bbox.max.y + pad, bbox.max.z + pad],
        }
    }
}

impl RTreeObject for VolumeEnvelope {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PointDistance for VolumeEnvelope {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        (0..3)
            .map(|axis| {
                let d = if point[axis] < self.min[axis] {
                    self.min[axis] - point[axis]
                } else if point[axis] > self.max[axis] {
                    point[axis] - self.max[axis]
                } else {
                    0.0
                };
                d * d
            })
            .sum()
    }

    fn contains_point(&self, point: &[f64; 3]) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }
}

/// Spatial index answering "which volume elements contain this point".
#[derive(Clone)]
pub struct PointLocator {
    tolerance: f64,
    volumes: Vec<LocatedVolume>,
    tree: RTree<VolumeEnvelope>,
}

impl std::fmt::Debug for PointLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointLocator")
            .field("tolerance", &self.tolerance)
            .field("volumes", &self.volumes.len())
            .finish()
    }
}

impl PointLocator {
    /// Builds the index from `(id, geometry, corners)` triples.
    ///
    /// Elements that cannot be split into tetrahedra (polyhedra, malformed
    /// corner lists) are skipped with a warning and never reported.
    pub fn build<I>(volumes: I, config: &LocatorConfig) -> Self
    where
        I: IntoIterator<Item = (ElementId, GeometryType, Vec<Point3<f64>>)>,
    {
        let mut located = Vec::new();
        let mut envelopes = Vec::new();
        let mut skipped = 0usize;

        for (id, geometry, corners) in volumes {
            let (Some(tets), Some(bbox)) =
                (tetrahedralize(geometry, &corners), Aabb::from_points(&corners))
            else {
                skipped += 1;
                continue;
            };
            let pad = config.tolerance * bbox.extent();
            envelopes.push(VolumeEnvelope::new(located.len(), &bbox, pad));
            located.push(LocatedVolume { id, tets });
        }

        if skipped > 0 {
            tracing::warn!(
                skipped,
                "Volume elements without a tetrahedral decomposition are excluded from point location"
            );
        }

        Self {
            tolerance: config.tolerance,
            volumes: located,
            tree: RTree::bulk_load(envelopes),
        }
    }

    /// Number of indexed volume elements.
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// `true` when no volume element is indexed.
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Volume elements containing `point`, in build order.
    pub fn locate(&self, point: &Point3<f64>) -> Vec<ElementId> {
        let mut candidates: Vec<usize> = self
            .tree
            .locate_all_at_point(&[point.x, point.y, point.z])
            .map(|envelope| envelope.index)
            .collect();
        // Tree order is arbitrary; callers rely on build order.
        candidates.sort_unstable();

        candidates
            .into_iter()
            .map(|i| &self.volumes[i])
            .filter(|v| v.tets.iter().any(|t| t.contains(point, self.tolerance)))
            .map(|v| v.id)
            .collect()
    }
}
