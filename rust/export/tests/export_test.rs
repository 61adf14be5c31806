// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end exports into temporary directories.

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use elmer_lite_export::{export_mesh, Error, ExportConfig};
use elmer_lite_mesh::{
    ElementCategory, ElementId, GeometryType, Group, Mesh, MeshBuilder, MeshSource, NodeId,
    Point3,
};

fn read(dir: &Path, file: &str) -> String {
    fs::read_to_string(dir.join(file)).unwrap()
}

/// Unit tetrahedron 5 with its four faces 1..=4.
fn single_tet() -> MeshBuilder {
    let mut b = MeshBuilder::new("tet");
    b.add_node(1, 0.0, 0.0, 0.0)
        .add_node(2, 1.0, 0.0, 0.0)
        .add_node(3, 0.0, 1.0, 0.0)
        .add_node(4, 0.0, 0.0, 1.0)
        .add_element(1, GeometryType::Triangle, &[1, 3, 2])
        .add_element(2, GeometryType::Triangle, &[1, 2, 4])
        .add_element(3, GeometryType::Triangle, &[1, 4, 3])
        .add_element(4, GeometryType::Triangle, &[2, 3, 4])
        .add_element(5, GeometryType::Tetra, &[1, 2, 3, 4]);
    b
}

/// Tetrahedra 8 and 9 sharing face 4.
fn two_tets() -> MeshBuilder {
    let mut b = MeshBuilder::new("pair");
    b.add_node(1, 0.0, 0.0, 0.0)
        .add_node(2, 1.0, 0.0, 0.0)
        .add_node(3, 0.0, 1.0, 0.0)
        .add_node(4, 0.0, 0.0, 1.0)
        .add_node(5, 1.0, 1.0, 1.0)
        .add_element(1, GeometryType::Triangle, &[1, 3, 2])
        .add_element(2, GeometryType::Triangle, &[1, 2, 4])
        .add_element(3, GeometryType::Triangle, &[1, 4, 3])
        .add_element(4, GeometryType::Triangle, &[2, 3, 4])
        .add_element(5, GeometryType::Triangle, &[2, 5, 3])
        .add_element(6, GeometryType::Triangle, &[2, 4, 5])
        .add_element(7, GeometryType::Triangle, &[3, 5, 4])
        .add_element(8, GeometryType::Tetra, &[1, 2, 3, 4])
        .add_element(9, GeometryType::Tetra, &[2, 3, 4, 5]);
    b
}

#[test]
fn single_tetra_round_trip() {
    let mesh = single_tet().build().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("tet");

    let summary = export_mesh(&mesh, &dir, &ExportConfig::default()).unwrap();
    assert_eq!(summary.nodes, 4);
    assert_eq!(summary.volumes, 1);
    assert_eq!(summary.boundary, 4);

    assert_eq!(read(&dir, "mesh.header"), "4 1 4\n2\n303 4\n504 1\n");
    assert_eq!(
        read(&dir, "mesh.nodes"),
        "1 -1 0 0 0\n2 -1 1 0 0\n3 -1 0 1 0\n4 -1 0 0 1\n"
    );
    assert_eq!(
        read(&dir, "mesh.names"),
        "! ----- names for bodies -----\n! ----- names for boundaries -----\n$ empty = 1\n"
    );
    assert_eq!(read(&dir, "mesh.elements"), "1 1 504 1 2 3 4\n");
    assert_eq!(
        read(&dir, "mesh.boundary"),
        "1 1 1 0 303 1 3 2\n\
         2 1 1 0 303 1 2 4\n\
         3 1 1 0 303 1 4 3\n\
         4 1 1 0 303 2 3 4\n"
    );
}

#[test]
fn shared_face_gets_both_parents() {
    let mut b = two_tets();
    b.add_element_group("left", ElementCategory::Volume, &[8])
        .add_element_group("right", ElementCategory::Volume, &[9])
        .add_element_group("interface", ElementCategory::Face, &[4]);
    let mesh = b.build().unwrap();
    let tmp = tempfile::tempdir().unwrap();

    let summary = export_mesh(&mesh, tmp.path(), &ExportConfig::default()).unwrap();
    assert_eq!(summary.interior_boundary, 1);
    assert_eq!(summary.bodies, 2);
    assert_eq!(summary.boundaries, 1);

    let boundary = read(tmp.path(), "mesh.boundary");
    let lines: Vec<_> = boundary.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "1 4 1 0 303 1 3 2");
    assert_eq!(lines[3], "4 3 1 2 303 2 3 4");
    assert_eq!(lines[4], "5 4 2 0 303 2 5 3");

    assert_eq!(
        read(tmp.path(), "mesh.elements"),
        "1 1 504 1 2 3 4\n2 2 504 2 3 4 5\n"
    );
    assert_eq!(
        read(tmp.path(), "mesh.names"),
        "! ----- names for bodies -----\n\
         $ left = 1\n\
         $ right = 2\n\
         ! ----- names for boundaries -----\n\
         $ interface = 3\n\
         $ empty = 4\n"
    );
}

#[test]
fn numbering_gap_writes_nothing() {
    let mut b = MeshBuilder::new("gap");
    b.add_node(1, 0.0, 0.0, 0.0)
        .add_node(2, 1.0, 0.0, 0.0)
        .add_node(3, 0.0, 1.0, 0.0)
        .add_node(4, 0.0, 0.0, 1.0)
        .add_element(1, GeometryType::Triangle, &[1, 3, 2])
        .add_element(2, GeometryType::Triangle, &[1, 2, 4])
        .add_element(4, GeometryType::Tetra, &[1, 2, 3, 4]);
    let mesh = b.build().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("gap");

    let err = export_mesh(&mesh, &dir, &ExportConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::NumberingMismatch {
            elements: 3,
            max_id: 4
        }
    ));
    assert!(!dir.exists());
}

#[test]
fn unsupported_geometry_writes_nothing() {
    let mut b = MeshBuilder::new("poly");
    b.add_node(1, 0.0, 0.0, 0.0)
        .add_node(2, 1.0, 0.0, 0.0)
        .add_node(3, 1.0, 1.0, 0.0)
        .add_node(4, 0.5, 1.5, 0.0)
        .add_node(5, 0.0, 1.0, 0.0)
        .add_element(1, GeometryType::Polygon, &[1, 2, 3, 4, 5]);
    let mesh = b.build().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("poly");

    let err = export_mesh(&mesh, &dir, &ExportConfig::default()).unwrap_err();
    assert!(matches!(err, Error::UnknownType(GeometryType::Polygon)));
    assert!(!dir.exists());
}

#[test]
fn existing_artifacts_are_replaced() {
    let mesh = single_tet().build().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("mesh.header"), "stale\n").unwrap();

    export_mesh(&mesh, tmp.path(), &ExportConfig::default()).unwrap();
    assert_eq!(read(tmp.path(), "mesh.header"), "4 1 4\n2\n303 4\n504 1\n");
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 5);
}

#[test]
fn coordinates_keep_twelve_significant_digits() {
    let mut b = MeshBuilder::new("cloud");
    b.add_node(1, 1.0 / 3.0, -2.5e-7, 1234567890123.0)
        .add_node(2, -0.0, 0.1, 100.0);
    let mesh = b.build().unwrap();
    let tmp = tempfile::tempdir().unwrap();

    // Requests below twelve digits are raised to twelve.
    let config = ExportConfig {
        coordinate_precision: 4,
    };
    export_mesh(&mesh, tmp.path(), &config).unwrap();
    assert_eq!(
        read(tmp.path(), "mesh.nodes"),
        "1 -1 0.333333333333 -2.5e-07 1.23456789012e+12\n2 -1 -0 0.1 100\n"
    );
    assert_eq!(read(tmp.path(), "mesh.header"), "2 0 0\n0\n");
    assert_eq!(read(tmp.path(), "mesh.elements"), "");
}

#[test]
fn written_coordinates_read_back_close_to_the_source() {
    let mut b = MeshBuilder::new("skew");
    b.add_node(1, 0.1 + 0.2, 2.0 / 3.0, -1.0 / 7.0)
        .add_node(2, 1.0e-9 / 3.0, 12345.678901234567, 9.87654321e20);
    let mesh = b.build().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    export_mesh(&mesh, tmp.path(), &ExportConfig::default()).unwrap();

    let nodes = read(tmp.path(), "mesh.nodes");
    for (line, id) in nodes.lines().zip([NodeId(1), NodeId(2)]) {
        let fields: Vec<&str> = line.split(' ').collect();
        assert_eq!(fields[0], id.to_string());
        assert_eq!(fields[1], "-1");
        let source = mesh.node_coords(id).unwrap();
        for (text, expected) in fields[2..].iter().zip([source.x, source.y, source.z]) {
            let value: f64 = text.parse().unwrap();
            assert_relative_eq!(value, expected, max_relative = 1e-11);
        }
    }
}

#[test]
fn edges_come_before_faces() {
    let mut b = single_tet();
    b.add_element(6, GeometryType::Edge, &[1, 2]);
    let mesh = b.build().unwrap();
    let tmp = tempfile::tempdir().unwrap();

    export_mesh(&mesh, tmp.path(), &ExportConfig::default()).unwrap();
    assert_eq!(read(tmp.path(), "mesh.header"), "4 1 5\n3\n202 1\n303 4\n504 1\n");
    let boundary = read(tmp.path(), "mesh.boundary");
    assert_eq!(boundary.lines().next(), Some("1 1 1 0 202 1 2"));
    assert_eq!(read(tmp.path(), "mesh.elements"), "1 1 504 1 2 3 4\n");
}

#[test]
fn loads_and_exports_a_snapshot() {
    let json = r#"{
        "name": "wedge",
        "nodes": [
            { "id": 1, "x": 0.0, "y": 0.0, "z": 0.0 },
            { "id": 2, "x": 1.0, "y": 0.0, "z": 0.0 },
            { "id": 3, "x": 0.0, "y": 1.0, "z": 0.0 },
            { "id": 4, "x": 0.0, "y": 0.0, "z": 1.0 },
            { "id": 5, "x": 1.0, "y": 0.0, "z": 1.0 },
            { "id": 6, "x": 0.0, "y": 1.0, "z": 1.0 }
        ],
        "elements": [
            { "id": 1, "type": "triangle", "nodes": [1, 3, 2] },
            { "id": 2, "type": "triangle", "nodes": [4, 5, 6] },
            { "id": 3, "type": "prism", "nodes": [1, 2, 3, 4, 5, 6] }
        ],
        "groups": [
            { "name": "caps", "category": "face", "members": [1, 2] },
            { "name": "wedge", "category": "volume", "members": [3] }
        ]
    }"#;
    let mesh = Mesh::from_json(json).unwrap();
    let tmp = tempfile::tempdir().unwrap();

    export_mesh(&mesh, tmp.path(), &ExportConfig::default()).unwrap();
    assert_eq!(read(tmp.path(), "mesh.header"), "6 1 2\n2\n303 2\n706 1\n");
    assert_eq!(read(tmp.path(), "mesh.elements"), "1 1 706 1 2 3 4 5 6\n");
    assert_eq!(
        read(tmp.path(), "mesh.boundary"),
        "1 2 1 0 303 1 3 2\n2 2 1 0 303 4 5 6\n"
    );
}

/// Delegates to a [`Mesh`] with selected answers replaced.
struct Tampered {
    mesh: Mesh,
    /// Answer for every `find_volumes_at` query.
    parents: Option<Vec<ElementId>>,
    /// Node reported without coordinates.
    hidden_node: Option<NodeId>,
    /// Extra face group appended to the mesh's own.
    extra_face_group: Option<Group>,
}

impl Tampered {
    fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            parents: None,
            hidden_node: None,
            extra_face_group: None,
        }
    }
}

impl MeshSource for Tampered {
    fn node_ids(&self) -> Vec<NodeId> {
        self.mesh.node_ids()
    }

    fn node_coords(&self, node: NodeId) -> Option<Point3<f64>> {
        if self.hidden_node == Some(node) {
            return None;
        }
        self.mesh.node_coords(node)
    }

    fn elements_of(&self, category: ElementCategory) -> Vec<ElementId> {
        self.mesh.elements_of(category)
    }

    fn element_geometry(&self, element: ElementId) -> Option<GeometryType> {
        self.mesh.element_geometry(element)
    }

    fn element_nodes(&self, element: ElementId) -> Option<&[NodeId]> {
        self.mesh.element_nodes(element)
    }

    fn groups_of(&self, category: ElementCategory) -> Vec<&Group> {
        let mut groups = self.mesh.groups_of(category);
        if category == ElementCategory::Face {
            groups.extend(self.extra_face_group.as_ref());
        }
        groups
    }

    fn group_count(&self) -> usize {
        self.mesh.group_count() + usize::from(self.extra_face_group.is_some())
    }

    fn find_volumes_at(&self, point: &Point3<f64>) -> Vec<ElementId> {
        match &self.parents {
            Some(parents) => parents.clone(),
            None => self.mesh.find_volumes_at(point),
        }
    }
}

fn assert_no_artifacts(dir: &Path) {
    for entry in fs::read_dir(dir).unwrap() {
        let name = entry.unwrap().file_name();
        assert!(
            !name.to_string_lossy().starts_with("mesh."),
            "unexpected artifact {name:?}"
        );
    }
}

#[test]
fn three_parents_is_an_error() {
    let mut b = two_tets();
    b.add_node(6, 2.0, 2.0, 2.0)
        .add_element(10, GeometryType::Tetra, &[2, 3, 5, 6]);
    let mut source = Tampered::new(b.build().unwrap());
    source.parents = Some(vec![ElementId(8), ElementId(9), ElementId(10)]);
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("overlap");

    let err = export_mesh(&source, &dir, &ExportConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::BoundaryResolution {
            element: ElementId(1),
            parents: 3
        }
    ));
    assert!(!dir.exists());
}

#[test]
fn parent_outside_the_volumes_is_rejected() {
    let mut source = Tampered::new(single_tet().build().unwrap());
    source.parents = Some(vec![ElementId(2)]);
    let tmp = tempfile::tempdir().unwrap();

    let err = export_mesh(&source, tmp.path(), &ExportConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::NotAVolume {
            element: ElementId(1),
            found: ElementId(2)
        }
    ));
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn group_member_outside_the_mesh_is_rejected() {
    let mut source = Tampered::new(single_tet().build().unwrap());
    source.extra_face_group = Some(Group::of_elements(
        "ghost",
        ElementCategory::Face,
        [ElementId(2), ElementId(99)],
    ));
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("ghost");

    let err = export_mesh(&source, &dir, &ExportConfig::default()).unwrap_err();
    match err {
        Error::UnknownGroupMember { group, element } => {
            assert_eq!(group, "ghost");
            assert_eq!(element, ElementId(99));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!dir.exists());
}

#[test]
fn node_without_coordinates_is_rejected() {
    let mut source = Tampered::new(single_tet().build().unwrap());
    source.hidden_node = Some(NodeId(3));
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("hole");

    let err = export_mesh(&source, &dir, &ExportConfig::default()).unwrap_err();
    assert!(matches!(err, Error::MissingNode(NodeId(3))));
    assert!(!dir.exists());
}

#[test]
fn output_path_that_is_a_file_fails_without_artifacts() {
    let mesh = single_tet().build().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let blocked = tmp.path().join("blocked");
    fs::write(&blocked, "not a directory\n").unwrap();

    let err = export_mesh(&mesh, &blocked, &ExportConfig::default()).unwrap_err();
    match &err {
        Error::OutputIo { path, .. } => assert_eq!(path, &blocked),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read_to_string(&blocked).unwrap(), "not a directory\n");
    assert_no_artifacts(tmp.path());
}
