//! Helpers shared by the integration tests.

#![allow(dead_code)]

use halfmesh::{
    cgmath::Point2,
    prelude::*,
    source::FnCoords,
};


/// Installs the test logger and colored backtraces. Can be called from every
/// test.
pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
    color_backtrace::install();
}

/// Input index of the grid point `(x, y)`.
pub const fn v(x: usize, y: usize) -> usize {
    y * 10000 + x
}

fn grid_point(index: usize) -> Point2<f64> {
    Point2::new((index % 10000) as f64, (index / 10000) as f64)
}

pub type GridCoords = FnCoords<fn(usize) -> Point2<f64>>;

/// Coordinates for all indices produced by [`v`].
pub fn grid_coords() -> GridCoords {
    FnCoords(grid_point as fn(usize) -> Point2<f64>)
}

/// The edges of a grid with `nx * ny` cells. Edges shared by two cells are
/// listed twice.
pub fn grid_edges(nx: usize, ny: usize) -> Vec<[usize; 2]> {
    let mut edges = Vec::new();
    for y in 0..ny {
        for x in 0..nx {
            edges.push([v(x, y), v(x + 1, y)]);
            edges.push([v(x + 1, y), v(x + 1, y + 1)]);
            edges.push([v(x + 1, y + 1), v(x, y + 1)]);
            edges.push([v(x, y + 1), v(x, y)]);
        }
    }
    edges
}

/// The quads of a grid with `nx * ny` cells.
pub fn grid_faces(nx: usize, ny: usize) -> Vec<Vec<usize>> {
    let mut faces = Vec::new();
    for y in 0..ny {
        for x in 0..nx {
            faces.push(vec![v(x, y), v(x + 1, y), v(x + 1, y + 1), v(x, y + 1)]);
        }
    }
    faces
}

pub fn from_faces(faces: &[Vec<usize>]) -> Conversion<Mesh2D> {
    Converter::new()
        .convert_faces_2d(faces, &grid_coords(), None)
        .expect("conversion from faces failed")
}

pub fn from_edges(edges: &[[usize; 2]]) -> Conversion<Mesh2D> {
    Converter::new()
        .convert_edges_2d(edges, &grid_coords(), None)
        .expect("conversion from edges failed")
}

/// The vertex built from the input vertex `index`.
pub fn vertex<M: MeshView>(conv: &Conversion<M>, index: usize) -> VertexHandle {
    let mesh = conv.mesh().core();
    mesh.vertices()
        .find(|&v| conv.vertex_index(v) == Some(index))
        .unwrap_or_else(|| panic!("no vertex for input index {}", index))
}

pub fn count_status<M: MeshView>(mesh: &M, status: FaceStatus) -> usize {
    let mesh = mesh.core();
    mesh.faces().filter(|&f| mesh.face_status(f) == status).count()
}

/// Checks the integrity of `mesh` and its element counts.
pub fn assert_counts<M: MeshView>(mesh: &M, faces: usize, half_edges: usize, vertices: usize) {
    let mesh = mesh.core();
    mesh.check_integrity();
    assert_eq!(mesh.num_faces() as usize, faces, "number of faces");
    assert_eq!(mesh.num_half_edges() as usize, half_edges, "number of half edges");
    assert_eq!(mesh.num_vertices() as usize, vertices, "number of vertices");
}

/// The edges of all given polygons, in order. Edges shared by two polygons
/// are listed twice.
pub fn polygon_edges(faces: &[Vec<usize>]) -> Vec<[usize; 2]> {
    faces.iter()
        .flat_map(|face| {
            (0..face.len()).map(move |i| [face[i], face[(i + 1) % face.len()]])
        })
        .collect()
}
