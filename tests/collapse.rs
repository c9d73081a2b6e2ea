//! Collapsing edges.

use halfmesh::prelude::*;

mod util;
use self::util::*;


/// A 3x3 grid of quads plus the outer boundary (12 edges long).
fn grid() -> Conversion<Mesh2D> {
    from_faces(&grid_faces(3, 3))
}

fn outer_face(mesh: &Mesh2D) -> FaceHandle {
    mesh.faces().find(|&f| mesh.face_vertices(f).count() == 12).unwrap()
}

#[test]
fn failures() {
    init();
    let conv = from_edges(&[[v(0, 0), v(100, 0)], [v(100, 0), v(0, 100)], [v(0, 100), v(0, 0)]]);
    let hv1 = vertex(&conv, v(100, 0));
    let mut mesh = conv.into_mesh();
    let incoming = mesh.vertex_edge(hv1);
    let outgoing = mesh.opposite(incoming);

    assert!(!mesh.remove_vertex(hv1));
    assert!(!mesh.collapse_edge(incoming));
    assert!(!mesh.collapse_edge(outgoing));
    assert_counts(&mesh, 2, 6, 3);
}

#[test]
fn quad_edge() {
    init();
    let faces = vec![vec![v(0, 0), v(10, 0), v(10, 10), v(0, 10)]];

    let mut mesh = from_faces(&faces).into_mesh();
    let he = mesh.half_edges().next().unwrap();
    assert!(mesh.collapse_edge(he));
    assert_counts(&mesh, 2, 6, 3);

    let mut mesh = from_faces(&faces).into_mesh();
    let first = mesh.half_edges().next().unwrap();
    let he = mesh.opposite(first);
    assert!(mesh.collapse_edge(he));
    assert_counts(&mesh, 2, 6, 3);
}

#[test]
fn inner_edge_of_grid() {
    init();
    let conv = grid();
    let hv11 = vertex(&conv, v(1, 1));
    let mut mesh = conv.into_mesh();

    let outer = outer_face(&mesh);
    let central = mesh.faces()
        .find(|&f| f != outer && !mesh.face_neighbors(f).any(|n| n == outer))
        .unwrap();
    let he = mesh.next_matching(mesh.face_edge(central), |e| mesh.head(e) == hv11).unwrap();
    let tail = mesh.tail(he);
    let position = mesh.position(tail);

    assert!(mesh.collapse_edge(he));
    assert_counts(&mesh, 10, 46, 15);
    assert!(!mesh.contains_vertex(hv11));
    assert_eq!(mesh.position(tail), position);
    assert_eq!(mesh.degree(tail), 6);
    assert_eq!(mesh.face_edges(central).count(), 3);
}

#[test]
fn outer_edge_of_grid() {
    init();
    let conv = grid();
    let hv00 = vertex(&conv, v(0, 0));
    let mut mesh = conv.into_mesh();

    let outer = outer_face(&mesh);
    let he = mesh.next_matching(mesh.face_edge(outer), |e| mesh.head(e) == hv00).unwrap();
    let corner = mesh.face(mesh.opposite(he));

    assert!(mesh.collapse_edge(he));
    assert_counts(&mesh, 10, 46, 15);
    assert_eq!(mesh.face_edges(outer).count(), 11);
    assert_eq!(mesh.face_edges(corner).count(), 3);

    // The corner is a triangle now.
    let he = mesh.face_edge(corner);
    assert!(!mesh.collapse_edge(he));
}
