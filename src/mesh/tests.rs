use crate::{
    build::Converter,
    handle::{FaceHandle, HalfEdgeHandle, VertexHandle},
};
use super::*;


fn from_faces(faces: &[Vec<usize>]) -> HalfEdgeMesh {
    Converter::new().convert_faces(faces, None).unwrap().into_mesh()
}

fn interior_face(mesh: &HalfEdgeMesh) -> FaceHandle {
    mesh.faces().find(|&f| mesh.face_status(f) == FaceStatus::Interior).unwrap()
}

fn boundary_face(mesh: &HalfEdgeMesh) -> FaceHandle {
    mesh.faces().find(|&f| mesh.face_status(f) == FaceStatus::Boundary).unwrap()
}

fn quad() -> HalfEdgeMesh {
    from_faces(&[vec![0, 1, 2, 3]])
}

fn triangle() -> HalfEdgeMesh {
    from_faces(&[vec![0, 1, 2]])
}

fn two_quads() -> HalfEdgeMesh {
    from_faces(&[vec![0, 1, 4, 3], vec![1, 2, 5, 4]])
}

/// A half edge with interior faces on both sides.
fn shared_edge(mesh: &HalfEdgeMesh) -> HalfEdgeHandle {
    mesh.half_edges()
        .find(|&he| {
            mesh.face_status(mesh.face(he)) == FaceStatus::Interior
                && mesh.face_status(mesh.face(mesh.opposite(he))) == FaceStatus::Interior
        })
        .unwrap()
}


// ===============================================================================================
// ===== Queries
// ===============================================================================================

#[test]
fn accessors() {
    let mesh = two_quads();

    for he in mesh.half_edges() {
        let opp = mesh.opposite(he);
        assert_ne!(opp, he);
        assert_eq!(mesh.opposite(opp), he);
        assert_eq!(mesh.tail(he), mesh.head(opp));
        assert_eq!(mesh.face(mesh.next(he)), mesh.face(he));
        assert_eq!(mesh.previous(mesh.next(he)), he);
        assert_eq!(mesh.edge_between(mesh.tail(he), mesh.head(he)), Some(he));
    }

    for v in mesh.vertices() {
        assert_eq!(mesh.head(mesh.vertex_edge(v)), v);
        assert!(mesh.incoming_edges(v).all(|he| mesh.head(he) == v));
        assert!(mesh.outgoing_edges(v).all(|he| mesh.tail(he) == v));
        assert_eq!(mesh.vertex_neighbors(v).count(), mesh.degree(v));
    }

    for f in mesh.faces() {
        assert_eq!(mesh.face(mesh.face_edge(f)), f);
    }
}

#[test]
fn neighborhood() {
    let mesh = two_quads();
    let he = shared_edge(&mesh);
    let (f1, f2) = (mesh.face(he), mesh.face(mesh.opposite(he)));

    assert!(mesh.are_neighbor_faces(f1, f2));
    assert!(mesh.are_neighbor_vertices(mesh.head(he), mesh.tail(he)));
    // One per contiguous border.
    assert_eq!(mesh.face_neighbors(f1).count(), 2);
    assert_eq!(mesh.face_neighbors(boundary_face(&mesh)).count(), 2);

    let diagonal = mesh.face_vertices(f1).nth(2).unwrap();
    assert!(!mesh.are_neighbor_vertices(mesh.face_vertices(f1).next().unwrap(), diagonal));

    let first = mesh.face_edge(f1);
    assert_eq!(mesh.next_matching(first, |e| e == he), Some(he));
    assert_eq!(mesh.next_matching(first, |e| mesh.face(mesh.opposite(e)) == f1), None);
}

#[test]
#[should_panic(expected = "has been discarded")]
fn discarded_handles_are_rejected() {
    let mut mesh = quad();
    let he = mesh.half_edges().next().unwrap();
    assert!(mesh.collapse_edge(he));
    mesh.collapse_edge(he);
}

#[test]
#[should_panic(expected = "does not exist in this mesh")]
fn foreign_handles_are_rejected() {
    let mesh = triangle();
    mesh.head(HalfEdgeHandle::new(100));
}

#[test]
#[should_panic(expected = "bug")]
fn integrity_check_finds_broken_links() {
    let mut mesh = quad();
    let he = mesh.half_edges().next().unwrap();
    let skipped = mesh.next(mesh.next(he));
    mesh.link(he, skipped);
    mesh.check_integrity();
}


// ===============================================================================================
// ===== Edit operations
// ===============================================================================================

#[test]
fn split_quad() {
    let mut mesh = quad();
    let face = interior_face(&mesh);
    let vertices = mesh.face_vertices(face).collect::<Vec<_>>();

    let new_face = mesh.split_face(face, vertices[0], vertices[2]).unwrap();
    mesh.check_integrity();

    assert_eq!(mesh.num_faces(), 3);
    assert_eq!(mesh.num_half_edges(), 10);
    assert_eq!(mesh.face_edges(face).count(), 3);
    assert_eq!(mesh.face_edges(new_face).count(), 3);
    assert_eq!(mesh.face_status(new_face), FaceStatus::Interior);

    let degrees = mesh.vertices().map(|v| mesh.degree(v)).collect::<Vec<_>>();
    assert_eq!(degrees.iter().min(), Some(&2));
    assert_eq!(degrees.iter().max(), Some(&3));
}

#[test]
fn split_face_failures() {
    let mut mesh = two_quads();
    let face = interior_face(&mesh);
    let vertices = mesh.face_vertices(face).collect::<Vec<_>>();
    let outside = mesh.vertices().find(|v| !vertices.contains(v)).unwrap();
    let count = mesh.mod_count();

    assert_eq!(mesh.split_face(face, vertices[0], vertices[1]), None);
    assert_eq!(mesh.split_face(face, vertices[3], vertices[0]), None);
    assert_eq!(mesh.split_face(face, vertices[0], vertices[0]), None);
    assert_eq!(mesh.split_face(face, vertices[0], outside), None);

    assert_eq!(mesh.mod_count(), count);
    assert_eq!(mesh.num_faces(), 3);
    mesh.check_integrity();
}

#[test]
fn merge_two_quads() {
    let mut mesh = two_quads();
    let he = shared_edge(&mesh);
    let (f1, f2) = (mesh.face(he), mesh.face(mesh.opposite(he)));
    let (v1, v2) = (mesh.head(he), mesh.tail(he));

    assert!(mesh.merge_faces(f1, f2));
    mesh.check_integrity();

    assert_eq!(mesh.num_faces(), 2);
    assert_eq!(mesh.num_half_edges(), 12);
    assert_eq!(mesh.num_vertices(), 6);
    assert!(!mesh.contains_face(f2));
    assert!(!mesh.contains_half_edge(he));
    assert_eq!(mesh.face_edges(f1).count(), 6);
    assert_eq!(mesh.degree(v1), 2);
    assert_eq!(mesh.degree(v2), 2);
}

#[test]
fn merge_failures() {
    let mut mesh = quad();
    let face = interior_face(&mesh);
    let boundary = boundary_face(&mesh);
    let count = mesh.mod_count();

    // Same face; the whole loop as common border.
    assert!(!mesh.merge_faces(face, face));
    assert!(!mesh.merge_faces(face, boundary));

    assert_eq!(mesh.mod_count(), count);
    assert_eq!(mesh.num_faces(), 2);
}

#[test]
fn merge_after_split() {
    let mut mesh = quad();
    let face = interior_face(&mesh);
    let vertices = mesh.face_vertices(face).collect::<Vec<_>>();
    let new_face = mesh.split_face(face, vertices[1], vertices[3]).unwrap();

    assert!(mesh.merge_faces(face, new_face));
    mesh.check_integrity();
    assert_eq!(mesh.num_faces(), 2);
    assert_eq!(mesh.num_half_edges(), 8);
    assert_eq!(mesh.face_edges(face).count(), 4);
}

#[test]
fn split_edge() {
    let mut mesh = quad();
    let he = mesh.face_edge(interior_face(&mesh));
    let (tail, head) = (mesh.tail(he), mesh.head(he));

    let v = mesh.split_edge(he);
    mesh.check_integrity();

    assert_eq!(mesh.num_half_edges(), 10);
    assert_eq!(mesh.num_vertices(), 5);
    assert_eq!(mesh.head(he), v);
    assert_eq!(mesh.tail(he), tail);
    assert_eq!(mesh.head(mesh.next(he)), head);
    assert_eq!(mesh.degree(v), 2);
}

#[test]
fn collapse_quad_edge() {
    let mut mesh = quad();
    let he = mesh.half_edges().next().unwrap();
    let (tail, head) = (mesh.tail(he), mesh.head(he));

    assert!(mesh.collapse_edge(he));
    mesh.check_integrity();
    assert_eq!(mesh.num_half_edges(), 6);
    assert_eq!(mesh.num_vertices(), 3);
    assert!(mesh.contains_vertex(tail));
    assert!(!mesh.contains_vertex(head));

    let mut mesh = quad();
    let he = mesh.opposite(mesh.half_edges().next().unwrap());
    assert!(mesh.collapse_edge(he));
    mesh.check_integrity();
    assert_eq!(mesh.num_half_edges(), 6);
    assert_eq!(mesh.num_vertices(), 3);
}

#[test]
fn collapse_triangle_edge_fails() {
    let mut mesh = triangle();
    let count = mesh.mod_count();

    for he in mesh.half_edges().collect::<Vec<_>>() {
        assert!(!mesh.collapse_edge(he));
    }
    assert_eq!(mesh.mod_count(), count);
    assert_eq!(mesh.num_half_edges(), 6);
    assert_eq!(mesh.num_vertices(), 3);
    assert_eq!(mesh.num_faces(), 2);
}

#[test]
fn remove_vertex() {
    let mut mesh = quad();
    let he = mesh.face_edge(interior_face(&mesh));
    let v = mesh.split_edge(he);
    let (tail, head) = (mesh.tail(he), mesh.head(mesh.next(he)));

    assert!(mesh.remove_vertex(v));
    mesh.check_integrity();
    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.num_half_edges(), 8);
    assert!(!mesh.contains_vertex(v));
    assert_eq!(mesh.head(he), head);
    assert_eq!(mesh.tail(he), tail);
}

#[test]
fn remove_vertex_failures() {
    let mut mesh = triangle();
    let count = mesh.mod_count();
    for v in mesh.vertices().collect::<Vec<_>>() {
        assert!(!mesh.remove_vertex(v));
    }
    assert_eq!(mesh.mod_count(), count);

    // Degree 3.
    let mut mesh = two_quads();
    let he = shared_edge(&mesh);
    assert!(!mesh.remove_vertex(mesh.head(he)));
    assert_eq!(mesh.num_vertices(), 6);
}

#[test]
fn mod_count_and_trim() {
    let mut mesh = quad();
    let start = mesh.mod_count();

    let he = mesh.half_edges().next().unwrap();
    let v = mesh.split_edge(he);
    assert_eq!(mesh.mod_count(), start + 1);

    assert!(mesh.remove_vertex(v));
    assert_eq!(mesh.mod_count(), start + 2);

    let live = mesh.half_edges().collect::<Vec<_>>();
    mesh.trim();
    assert_eq!(mesh.half_edges().collect::<Vec<_>>(), live);
    assert!(!mesh.contains_vertex(v));
    mesh.check_integrity();
}

#[test]
fn stored_prev_is_maintained() {
    let mut mesh = Converter::<StorePrev>::with_options(Default::default())
        .convert_faces(&[vec![0, 1, 4, 3], vec![1, 2, 5, 4]][..], None)
        .unwrap()
        .into_mesh();

    let he = mesh.half_edges().next().unwrap();
    mesh.split_edge(he);
    let f = mesh.faces().find(|&f| mesh.face_status(f) == FaceStatus::Interior).unwrap();
    let vertices = mesh.face_vertices(f).collect::<Vec<_>>();
    mesh.split_face(f, vertices[0], vertices[2]).unwrap();

    mesh.check_integrity();
    for he in mesh.half_edges() {
        assert_eq!(mesh.previous(mesh.next(he)), he);
    }
}

#[test]
fn vertex_handle_debug() {
    assert_eq!(format!("{:?}", VertexHandle::new(3)), "V3");
}
