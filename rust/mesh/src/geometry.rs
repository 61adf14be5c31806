// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometric primitives for point location.
//!
//! Every supported solid is split into tetrahedra, and containment is decided
//! per tetrahedron with barycentric coordinates. The test is closed: a point
//! on a shared face is inside both neighbours, which is exactly what boundary
//! linking needs.

use nalgebra::{Matrix3, Point3};

use crate::ids::GeometryType;

/// Tetrahedra of a pyramid (base 0-1-2-3, apex 4).
const PYRAMID_TETS: [[usize; 4]; 2] = [[0, 1, 2, 4], [0, 2, 3, 4]];

/// Tetrahedra of a prism (bottom 0-1-2, top 3-4-5).
const PRISM_TETS: [[usize; 4]; 3] = [[0, 1, 2, 3], [1, 2, 3, 4], [2, 3, 4, 5]];

/// Tetrahedra of a hexahedron, fanned around the 0-6 diagonal.
const HEXA_TETS: [[usize; 4]; 6] = [
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
    [0, 5, 1, 6],
];

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Smallest box containing all `points`. `None` for an empty slice.
    pub fn from_points(points: &[Point3<f64>]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        Some(Self { min, max })
    }

    /// Largest side length.
    pub fn extent(&self) -> f64 {
        let d = self.max - self.min;
        d.x.max(d.y).max(d.z)
    }

    /// Tests containment with every side pushed out by `pad`.
    pub fn contains(&self, point: &Point3<f64>, pad: f64) -> bool {
        (0..3).all(|axis| {
            point[axis] >= self.min[axis] - pad && point[axis] <= self.max[axis] + pad
        })
    }
}

/// A tetrahedron given by its four corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tetrahedron(pub [Point3<f64>; 4]);

impl Tetrahedron {
    /// Barycentric coordinates of `point`, or `None` for a degenerate tetrahedron.
    pub fn barycentric(&self, point: &Point3<f64>) -> Option<[f64; 4]> {
        let [a, b, c, d] = &self.0;
        let m = Matrix3::from_columns(&[b - a, c - a, d - a]);

        let scale = m
            .column_iter()
            .map(|col| col.norm())
            .fold(0.0_f64, f64::max);
        if scale == 0.0 || m.determinant().abs() <= 1e-12 * scale.powi(3) {
            return None;
        }

        let lambda = m.try_inverse()? * (point - a);
        Some([
            1.0 - lambda.x - lambda.y - lambda.z,
            lambda.x,
            lambda.y,
            lambda.z,
        ])
    }

    /// Closed containment test; `tolerance` is in barycentric units.
    pub fn contains(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        match self.barycentric(point) {
            Some(coords) => coords.iter().all(|&l| l >= -tolerance),
            None => false,
        }
    }
}

/// Splits a solid element into tetrahedra.
///
/// `corners` are the element's node coordinates in local node order. Returns
/// `None` for non-solid geometry, polyhedra, and a corner count that does not
/// match the geometry.
pub fn tetrahedralize(geometry: GeometryType, corners: &[Point3<f64>]) -> Option<Vec<Tetrahedron>> {
    if let Some(expected) = geometry.node_count() {
        if corners.len() != expected {
            return None;
        }
    }

    let pick = |ids: &[[usize; 4]]| -> Vec<Tetrahedron> {
        ids.iter()
            .map(|t| Tetrahedron([corners[t[0]], corners[t[1]], corners[t[2]], corners[t[3]]]))
            .collect()
    };

    match geometry {
        GeometryType::Tetra => Some(vec![Tetrahedron([
            corners[0], corners[1], corners[2], corners[3],
        ])]),
        GeometryType::Pyramid => Some(pick(&PYRAMID_TETS)),
        GeometryType::Prism => Some(pick(&PRISM_TETS)),
        GeometryType::Hexa => Some(pick(&HEXA_TETS)),
        GeometryType::HexagonalPrism => {
            // Fan the hexagon from node 0 into four prisms.
            let mut tets = Vec::with_capacity(12);
            for i in 1..5 {
                let prism = [
                    corners[0],
                    corners[i],
                    corners[i + 1],
                    corners[6],
                    corners[6 + i],
                    corners[6 + i + 1],
                ];
                tets.extend(PRISM_TETS.iter().map(|t| {
                    Tetrahedron([prism[t[0]], prism[t[1]], prism[t[2]], prism[t[3]]])
                }));
            }
            Some(tets)
        }
        _ => None,
    }
}
